//! Corpus validation against external lexical resources.
//!
//! Three independent checks, one per language:
//! - Asturian: is the term a CogNet cognate of Spanish, Latin or Iberian?
//! - Basque: is the form attested in UniMorph?
//! - Greek: is the term a historical loan recorded in ConLoan?
//!
//! Resources are optional; a missing file leaves that check empty.

mod dictionary;

pub use dictionary::{NativeDictionaries, dictionary_name};

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::corpus::{JsonlRead, read_jsonl};
use crate::error::Result;
use crate::model::{CleanCorpusEntry, Lang};
use crate::morph::SeedType;
use crate::persist::write_atomic;

pub const COGNET_FILE: &str = "cognet.tsv";
pub const UNIMORPH_FILE: &str = "unimorph_eus.tsv";
pub const CONLOAN_FILE: &str = "conloan_ell.tsv";

/// CogNet partner languages that count as the Asturian cognate base.
const COGNATE_PARTNERS: &[&str] = &["spa", "lat", "xib"];

/// Lower-cased form sets from the external resources.
#[derive(Debug, Clone, Default)]
pub struct ExternalResources {
    pub ast_cognates: HashSet<String>,
    pub eu_forms: HashSet<String>,
    pub el_loans: HashSet<String>,
}

/// Tab-separated columns of every line that has at least `min_cols`.
/// Lines that are not UTF-8 are skipped; an I/O error ends the read.
fn tsv_rows<R: BufRead>(reader: R, min_cols: usize) -> impl Iterator<Item = Vec<String>> {
    reader
        .split(b'\n')
        .map_while(|l| l.ok())
        .filter_map(|bytes| String::from_utf8(bytes).ok())
        .filter_map(move |line| {
            let cols: Vec<String> = line.trim().split('\t').map(str::to_string).collect();
            (cols.len() >= min_cols).then_some(cols)
        })
}

impl ExternalResources {
    /// `concept, lang1, form1, lang2, form2, ...`: Asturian forms whose
    /// partner is Spanish, Latin or Iberian.
    pub fn read_cognet<R: BufRead>(reader: R) -> HashSet<String> {
        tsv_rows(reader, 5)
            .filter(|c| c[1] == "ast" && COGNATE_PARTNERS.contains(&c[3].as_str()))
            .map(|c| c[2].to_lowercase())
            .collect()
    }

    /// `lemma, form, features`: inflected forms.
    pub fn read_unimorph<R: BufRead>(reader: R) -> HashSet<String> {
        tsv_rows(reader, 2).map(|c| c[1].to_lowercase()).collect()
    }

    /// First column: the loan.
    pub fn read_conloan<R: BufRead>(reader: R) -> HashSet<String> {
        tsv_rows(reader, 1)
            .map(|c| c[0].to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Load every resource found in `dir`.
    pub fn load(dir: &Path) -> Self {
        let resources = Self {
            ast_cognates: load_set(&dir.join(COGNET_FILE), Self::read_cognet),
            eu_forms: load_set(&dir.join(UNIMORPH_FILE), Self::read_unimorph),
            el_loans: load_set(&dir.join(CONLOAN_FILE), Self::read_conloan),
        };
        info!(
            ast_cognates = resources.ast_cognates.len(),
            eu_forms = resources.eu_forms.len(),
            el_loans = resources.el_loans.len(),
            "loaded external resources"
        );
        resources
    }
}

fn load_set(path: &Path, read: fn(BufReader<File>) -> HashSet<String>) -> HashSet<String> {
    match File::open(path) {
        Ok(f) => read(BufReader::new(f)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "resource not available");
            HashSet::new()
        }
    }
}

/// Whether a term entered the corpus as an attested or a generated seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "established")]
    Established,
    #[serde(rename = "new/tech")]
    NewTech,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Established => "established",
            Category::NewTech => "new/tech",
        })
    }
}

/// One row of the validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub lang: Lang,
    pub term: String,
    pub frequency: usize,
    pub category: Category,
    pub source_types: String,
    pub is_valid_cognate: u8,
    pub is_valid_integrated: u8,
    pub is_valid_historical: u8,
    /// Empty when no Hunspell dictionary is loaded for the language.
    pub in_native_dictionary: Option<u8>,
}

/// `hits` out of `total` report rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ratio {
    pub hits: usize,
    pub total: usize,
}

impl Ratio {
    fn of<'a>(records: impl Iterator<Item = &'a ValidationRecord>, hit: fn(&ValidationRecord) -> bool) -> Self {
        records.fold(Self::default(), |mut r, rec| {
            r.total += 1;
            if hit(rec) {
                r.hits += 1;
            }
            r
        })
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "0/0");
        }
        write!(
            f,
            "{}/{} ({:.1}%)",
            self.hits,
            self.total,
            100.0 * self.hits as f64 / self.total as f64
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Established Asturian loans that are Spanish/Latin cognates.
    pub ast_established_cognates: Ratio,
    /// Generated Basque forms attested in UniMorph.
    pub eu_new_integrated: Ratio,
    /// Established Greek loans recorded in ConLoan.
    pub el_established_historical: Ratio,
    /// Generated Greek forms recorded in ConLoan, for contrast.
    pub el_new_historical: Ratio,
}

impl ValidationSummary {
    pub fn from_records(records: &[ValidationRecord]) -> Self {
        let select = |lang: Lang, category: Category| {
            records
                .iter()
                .filter(move |r| r.lang == lang && r.category == category)
        };
        Self {
            ast_established_cognates: Ratio::of(
                select(Lang::Asturian, Category::Established),
                |r| r.is_valid_cognate == 1,
            ),
            eu_new_integrated: Ratio::of(select(Lang::Basque, Category::NewTech), |r| {
                r.is_valid_integrated == 1
            }),
            el_established_historical: Ratio::of(
                select(Lang::Greek, Category::Established),
                |r| r.is_valid_historical == 1,
            ),
            el_new_historical: Ratio::of(select(Lang::Greek, Category::NewTech), |r| {
                r.is_valid_historical == 1
            }),
        }
    }

    pub fn log(&self) {
        info!("Asturian established loans that are Spanish/Latin cognates: {}", self.ast_established_cognates);
        info!("Basque new/tech terms attested in UniMorph: {}", self.eu_new_integrated);
        info!("Greek established loans recorded in ConLoan: {}", self.el_established_historical);
        info!("Greek new/tech terms recorded in ConLoan: {}", self.el_new_historical);
    }
}

pub struct CorpusValidator {
    resources: ExternalResources,
    dictionaries: NativeDictionaries,
}

impl CorpusValidator {
    pub fn new(resources: ExternalResources, dictionaries: NativeDictionaries) -> Self {
        Self {
            resources,
            dictionaries,
        }
    }

    /// Aggregate the corpus by `(lang, term)` and check each term.
    pub fn validate(&self, entries: &[CleanCorpusEntry]) -> Vec<ValidationRecord> {
        let mut stats: BTreeMap<(Lang, &str), (usize, BTreeSet<&SeedType>)> = BTreeMap::new();
        for e in entries {
            let slot = stats.entry((e.lang, e.term.as_str())).or_default();
            slot.0 += 1;
            slot.1.insert(&e.seed_type);
        }

        stats
            .into_iter()
            .map(|((lang, term), (frequency, types))| {
                let lower = term.to_lowercase();
                let established = types.iter().any(|t| t.is_attested());
                let source_types: BTreeSet<String> = types.iter().map(|t| t.to_string()).collect();
                let flag = |set: &HashSet<String>, l: Lang| u8::from(lang == l && set.contains(&lower));
                ValidationRecord {
                    lang,
                    term: term.to_string(),
                    frequency,
                    category: if established {
                        Category::Established
                    } else {
                        Category::NewTech
                    },
                    source_types: source_types.into_iter().collect::<Vec<_>>().join(", "),
                    is_valid_cognate: flag(&self.resources.ast_cognates, Lang::Asturian),
                    is_valid_integrated: flag(&self.resources.eu_forms, Lang::Basque),
                    is_valid_historical: flag(&self.resources.el_loans, Lang::Greek),
                    in_native_dictionary: self.dictionaries.check(lang, term).map(u8::from),
                }
            })
            .collect()
    }

    /// Validate a clean corpus file and write the CSV report.
    pub fn validate_file(&self, input: &Path, output: &Path) -> Result<ValidationSummary> {
        let JsonlRead { records, malformed } = read_jsonl::<CleanCorpusEntry>(input)?;
        if malformed > 0 {
            warn!(malformed, "skipped malformed corpus lines");
        }
        let report = self.validate(&records);
        info!(terms = report.len(), "validated {}", input.display());

        write_atomic(output, |w| {
            let mut writer = csv::Writer::from_writer(w);
            for record in &report {
                writer.serialize(record)?;
            }
            writer.flush()?;
            Ok(())
        })?;

        let summary = ValidationSummary::from_records(&report);
        summary.log();
        Ok(summary)
    }
}
