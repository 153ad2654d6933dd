//! Pipeline configuration and static linguistic inputs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, Result};
use crate::filter::LanguageFilterConfig;
use crate::generator::{Root, RootKind};

/// Action roots: eligible for verb generation.
pub const ACTION_ROOTS: &[&str] = &[
    "click", "post", "chat", "link", "tag", "tweet", "scan", "format", "hack", "ban", "log",
    "reset", "download", "stream", "like", "scroll", "update", "forward", "spam", "check",
    "spoiler", "troll",
];

/// Entity roots: nouns only, never light verbs or verbal derivation.
pub const ENTITY_ROOTS: &[&str] = &[
    "bug", "server", "cloud", "software", "hardware", "online", "interface", "user", "bot", "app",
    "pixel",
];

lazy_static! {
    /// Conventional Greek spellings of the English roots.
    pub static ref GREEK_TRANSLITERATION: HashMap<&'static str, &'static str> = {
        [
            ("click", "κλικ"),
            ("post", "ποστ"),
            ("chat", "τσατ"),
            ("link", "λινκ"),
            ("tag", "ταγκ"),
            ("tweet", "τουίτ"),
            ("scan", "σκαν"),
            ("format", "φορμάτ"),
            ("hack", "χακ"),
            ("ban", "μπαν"),
            ("log", "λογκ"),
            ("reset", "ρισέτ"),
            ("download", "νταουνλόουντ"),
            ("stream", "στριμ"),
            ("like", "λάικ"),
            ("scroll", "σκρολ"),
            ("update", "απντέιτ"),
            ("forward", "φόργουορντ"),
            ("spam", "σπαμ"),
            ("check", "τσεκ"),
            ("spoiler", "σπόιλερ"),
            ("pixel", "πίξελ"),
            ("bug", "μπαγκ"),
            ("server", "σέρβερ"),
            ("cloud", "κλάουντ"),
            ("software", "σόφτγουερ"),
            ("hardware", "χάρντγουερ"),
            ("online", "ονλάιν"),
            ("interface", "ιντερφέις"),
            ("user", "γιούζερ"),
            ("bot", "μποτ"),
            // clashes with the elided preposition απ'
            ("app", "απ"),
            ("troll", "τρολ"),
        ]
        .into_iter()
        .collect()
    };
}

/// All configured roots, action roots first.
pub fn default_roots() -> Vec<Root> {
    ACTION_ROOTS
        .iter()
        .map(|r| Root::new(*r, RootKind::Action))
        .chain(ENTITY_ROOTS.iter().map(|r| Root::new(*r, RootKind::Entity)))
        .collect()
}

/// Corpus miner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Page titles requested per seed.
    pub max_pages_per_seed: usize,
    /// Sentences must be strictly longer than this (characters).
    pub min_sentence_chars: usize,
    /// Sentences must be strictly shorter than this (characters).
    pub max_sentence_chars: usize,
    /// Seeds mined concurrently. 1 keeps the sequential reference order of work.
    pub workers: usize,
    /// Minimum spacing between requests to the remote source.
    pub request_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            max_pages_per_seed: 5,
            min_sentence_chars: 10,
            max_sentence_chars: 500,
            workers: 1,
            request_interval_ms: 50,
            request_timeout_secs: 5,
        }
    }
}

/// Top-level configuration, loadable from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    /// Directory holding optional Hunspell `.aff`/`.dic` files.
    pub dictionaries_dir: PathBuf,
    pub user_agent: String,
    pub miner: MinerConfig,
    pub language_filter: LanguageFilterConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dictionaries_dir: PathBuf::from("dictionaries"),
            user_agent: "LexicalBorrowingsCorpus/0.1 (academic research)".to_string(),
            miner: MinerConfig::default(),
            language_filter: LanguageFilterConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let s = fs::read_to_string(path)
            .map_err(|e| CorpusError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.miner;
        if m.workers == 0 {
            return Err(CorpusError::Config("miner.workers must be at least 1".into()));
        }
        if m.min_sentence_chars >= m.max_sentence_chars {
            return Err(CorpusError::Config(
                "miner.min_sentence_chars must be below miner.max_sentence_chars".into(),
            ));
        }
        let t = self.language_filter.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(CorpusError::Config(format!(
                "language_filter.threshold {} is outside [0, 1]",
                t
            )));
        }
        Ok(())
    }

    pub fn seeds_file(&self) -> PathBuf {
        self.data_dir.join("raw").join("synthetic_borrowings.csv")
    }

    pub fn lexicon_file(&self) -> PathBuf {
        self.data_dir.join("raw").join("wiktionary_borrowings.csv")
    }

    pub fn mined_file(&self) -> PathBuf {
        self.data_dir.join("mined").join("mined_sentences.jsonl")
    }

    pub fn clean_file(&self) -> PathBuf {
        self.data_dir.join("processed").join("mined_sentences.clean.jsonl")
    }

    pub fn validation_file(&self) -> PathBuf {
        self.data_dir.join("processed").join("corpus_validation.csv")
    }

    pub fn external_dir(&self) -> PathBuf {
        self.data_dir.join("external")
    }
}
