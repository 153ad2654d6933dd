use std::collections::HashMap;
use std::path::Path;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::default_roots;
use crate::error::CorpusError;
use crate::filter::NoiseFilter;
use crate::generator::registry;
use crate::morph::SeedType;
use crate::seeds::SeedRepository;

fn to_py_err(e: CorpusError) -> PyErr {
    match e {
        CorpusError::Parse(msg) | CorpusError::Config(msg) => PyValueError::new_err(msg),
        other => PyIOError::new_err(other.to_string()),
    }
}

/// Generate the synthetic seeds for the built-in roots
/// Returns: list of (term, lemma, lang, type, pos)
#[pyfunction]
fn generate_seeds() -> PyResult<Vec<(String, String, String, String, String)>> {
    let seeds = SeedRepository::generate(&registry(), &default_roots());
    Ok(SeedRepository::merge(seeds, Vec::new())
        .into_iter()
        .map(|s| {
            (
                s.term,
                s.lemma,
                s.lang.to_string(),
                s.seed_type.to_string(),
                s.pos.to_string(),
            )
        })
        .collect())
}

/// True when a sentence reads as English rather than the target language
#[pyfunction]
fn is_off_target(sentence: String) -> PyResult<bool> {
    Ok(NoiseFilter::default().is_off_target(&sentence))
}

/// Clean a mined JSONL file, reading and writing entirely in Rust
/// Returns: {kept, dropped_off_target, dropped_false_positive, malformed}
#[pyfunction]
fn clean_file(input_path: String, output_path: String) -> PyResult<HashMap<String, usize>> {
    let report = NoiseFilter::default()
        .clean_file(Path::new(&input_path), Path::new(&output_path))
        .map_err(to_py_err)?;
    Ok(HashMap::from([
        ("kept".to_string(), report.kept),
        ("dropped_off_target".to_string(), report.dropped_off_target),
        ("dropped_false_positive".to_string(), report.dropped_false_positive),
        ("malformed".to_string(), report.malformed),
    ]))
}

/// Integration level and spelling class of a type tag
/// Returns: (level, spelling), both None for attested tags
#[pyfunction]
fn classify_type(tag: String) -> PyResult<(Option<String>, Option<String>)> {
    let seed_type = SeedType::try_from(tag).map_err(to_py_err)?;
    Ok((
        seed_type.integration_level().map(|l| l.to_string()),
        seed_type.spelling().map(|s| s.to_string()),
    ))
}

#[pymodule]
fn loanword_corpus(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_seeds, m)?)?;
    m.add_function(wrap_pyfunction!(is_off_target, m)?)?;
    m.add_function(wrap_pyfunction!(clean_file, m)?)?;
    m.add_function(wrap_pyfunction!(classify_type, m)?)?;
    Ok(())
}
