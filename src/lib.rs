//! Corpus of English lexical borrowings in Asturian, Basque and Greek.
//!
//! Generated candidate forms and dictionary-attested loans are searched for
//! in Wikipedia; the retrieved sentences are filtered for English
//! contamination and semantic false positives, then checked against
//! external lexical resources.

pub mod config;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod generator;
pub mod lexicon;
pub mod mediawiki;
pub mod miner;
pub mod model;
pub mod morph;
pub mod persist;
pub mod pipeline;
pub mod seeds;
pub mod validator;

#[cfg(feature = "python")]
mod python;

pub use config::{MinerConfig, PipelineConfig};
pub use error::{CorpusError, Result};
pub use filter::{CleanReport, NoiseFilter, Verdict};
pub use generator::{FormGenerator, Root, RootKind};
pub use lexicon::{LexiconEntry, LexiconSource};
pub use miner::{CorpusMiner, PageSource, SearchSource};
pub use model::{CleanCorpusEntry, Lang, MinedSentence, Pos, Seed};
pub use morph::{IntegrationLevel, MorphType, SeedType, SpellingFidelity};
pub use pipeline::Pipeline;
pub use seeds::SeedRepository;
