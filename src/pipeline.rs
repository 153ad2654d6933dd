//! Stage runners shared by the command line and the integration tests.
//!
//! Every stage reads the previous stage's file and writes its own. A stage
//! whose input is absent logs the fact and does nothing, so `all` can keep
//! going.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{PipelineConfig, default_roots};
use crate::corpus::write_jsonl;
use crate::error::{CorpusError, Result};
use crate::filter::{CleanReport, NoiseFilter};
use crate::generator::{FormGenerator, LanguageRules, RuleSetGenerator, registry};
use crate::lexicon::{LexiconFile, LexiconSource, WiktionaryClient};
use crate::mediawiki::{MediaWikiClient, Throttle};
use crate::miner::{CorpusMiner, PageSource, SearchSource, Wikipedia};
use crate::model::Lang;
use crate::seeds::SeedRepository;
use crate::validator::{CorpusValidator, ExternalResources, NativeDictionaries, ValidationSummary};

/// Turn a missing upstream file into a logged no-op.
pub fn skip_if_missing<T>(stage: &str, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(CorpusError::MissingInput(path)) => {
            warn!(stage, path = %path.display(), "input not found, skipping stage");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Extra rule-set generators from a JSON array of [`LanguageRules`].
pub fn load_rule_sets(path: &Path) -> Result<Vec<Box<dyn FormGenerator>>> {
    let s = fs::read_to_string(path)
        .map_err(|e| CorpusError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    let rules: Vec<LanguageRules> = serde_json::from_str(&s)?;
    Ok(rules
        .into_iter()
        .map(|r| Box::new(RuleSetGenerator::new(r)) as Box<dyn FormGenerator>)
        .collect())
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn client(&self) -> Result<MediaWikiClient> {
        let m = &self.config.miner;
        let throttle = Arc::new(Throttle::new(Duration::from_millis(m.request_interval_ms)));
        MediaWikiClient::new(
            &self.config.user_agent,
            Duration::from_secs(m.request_timeout_secs),
            throttle,
        )
    }

    /// Snapshot every language's attested borrowings from `source`. A
    /// language whose lookup fails is logged and left out.
    pub fn scrape_with(&self, source: &dyn LexiconSource) -> Result<usize> {
        let mut entries = Vec::new();
        for lang in Lang::ALL {
            match source.attested(lang) {
                Ok(found) => entries.extend(found),
                Err(e) => warn!(%lang, error = %e, "lexicon lookup failed"),
            }
        }
        let path = self.config.lexicon_file();
        if entries.is_empty() && path.is_file() {
            warn!(path = %path.display(), "nothing fetched, keeping existing snapshot");
            return Ok(0);
        }
        LexiconFile::write_all(&path, &entries)?;
        info!(entries = entries.len(), "wrote {}", path.display());
        Ok(entries.len())
    }

    /// Snapshot the Wiktionary borrowing categories.
    pub fn scrape(&self) -> Result<usize> {
        self.scrape_with(&WiktionaryClient::new(self.client()?))
    }

    /// Generate synthetic seeds and merge the attested ones from `lexicon`.
    /// A lexicon whose backing file is missing contributes nothing.
    pub fn generate_with(
        &self,
        rules: Option<&Path>,
        lexicon: &dyn LexiconSource,
    ) -> Result<SeedRepository> {
        let mut generators = registry();
        if let Some(path) = rules {
            generators.extend(load_rule_sets(path)?);
        }
        let synthetic = SeedRepository::generate(&generators, &default_roots());
        let attested = skip_if_missing("generate", SeedRepository::attested(lexicon, &Lang::ALL))?
            .unwrap_or_default();

        let repo = SeedRepository::merge(synthetic, attested);
        for (lang, (synthetic, attested)) in repo.counts_by_lang() {
            info!(%lang, synthetic, attested, "seeds");
        }
        let path = self.config.seeds_file();
        repo.save(&path)?;
        info!(seeds = repo.len(), "wrote {}", path.display());
        Ok(repo)
    }

    /// Generate against the lexicon snapshot written by [`Pipeline::scrape`].
    pub fn generate(&self, rules: Option<&Path>) -> Result<SeedRepository> {
        self.generate_with(rules, &LexiconFile::new(self.config.lexicon_file()))
    }

    /// Mine with the given collaborators.
    pub fn mine_with(&self, search: &dyn SearchSource, pages: &dyn PageSource) -> Result<usize> {
        let repo = SeedRepository::load(&self.config.seeds_file())?;
        let miner = CorpusMiner::new(search, pages, self.config.miner.clone());
        let mined = miner.mine(repo.seeds())?;
        let path = self.config.mined_file();
        write_jsonl(&path, &mined)?;
        info!(sentences = mined.len(), "wrote {}", path.display());
        Ok(mined.len())
    }

    /// Mine Wikipedia in each seed's language.
    pub fn mine(&self) -> Result<usize> {
        let wikipedia = Wikipedia::new(self.client()?);
        self.mine_with(&wikipedia, &wikipedia)
    }

    pub fn clean(&self) -> Result<CleanReport> {
        NoiseFilter::from_config(self.config.language_filter.clone())
            .clean_file(&self.config.mined_file(), &self.config.clean_file())
    }

    pub fn validate(&self) -> Result<ValidationSummary> {
        let validator = CorpusValidator::new(
            ExternalResources::load(&self.config.external_dir()),
            NativeDictionaries::load(&self.config.dictionaries_dir),
        );
        validator.validate_file(&self.config.clean_file(), &self.config.validation_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconEntry;
    use crate::model::Pos;
    use crate::morph::{MorphType, SeedType};

    /// Basque borrowings only; Greek lookups fail.
    struct Lexicon;

    impl LexiconSource for Lexicon {
        fn attested(&self, lang: Lang) -> Result<Vec<LexiconEntry>> {
            match lang {
                Lang::Basque => Ok(vec![LexiconEntry {
                    term: "futbol".into(),
                    target_lang: Lang::Basque,
                    origin_lang: "en".into(),
                    source_category: "Category:Basque_terms_borrowed_from_English".into(),
                }]),
                Lang::Greek => Err(CorpusError::Http("timed out".into())),
                Lang::Asturian => Ok(Vec::new()),
            }
        }
    }

    struct NothingFound;

    impl LexiconSource for NothingFound {
        fn attested(&self, _lang: Lang) -> Result<Vec<LexiconEntry>> {
            Ok(Vec::new())
        }
    }

    fn pipeline(dir: &Path) -> Pipeline {
        Pipeline::new(PipelineConfig {
            data_dir: dir.to_path_buf(),
            ..PipelineConfig::default()
        })
    }

    #[test]
    fn test_missing_inputs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path());
        assert!(skip_if_missing("clean", p.clean()).unwrap().is_none());
        assert!(skip_if_missing("validate", p.validate()).unwrap().is_none());
        assert!(!p.config().clean_file().exists());
    }

    #[test]
    fn test_other_errors_propagate() {
        let r: Result<()> = Err(CorpusError::Config("bad".into()));
        assert!(skip_if_missing("x", r).is_err());
    }

    #[test]
    fn test_generate_without_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path());
        let repo = p.generate(None).unwrap();
        assert!(repo.seeds().iter().all(|s| !s.seed_type.is_attested()));
        assert_eq!(SeedRepository::load(&p.config().seeds_file()).unwrap(), repo);
    }

    #[test]
    fn test_scrape_skips_failed_language_then_feeds_generate() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path());
        assert_eq!(p.scrape_with(&Lexicon).unwrap(), 1);

        let repo = p.generate(None).unwrap();
        let futbol = repo.seeds().iter().find(|s| s.term == "futbol").unwrap();
        assert_eq!(futbol.lang, Lang::Basque);
        assert_eq!(futbol.seed_type, SeedType::attested("en"));
    }

    #[test]
    fn test_empty_scrape_keeps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path());
        p.scrape_with(&Lexicon).unwrap();
        let before = fs::read_to_string(p.config().lexicon_file()).unwrap();

        assert_eq!(p.scrape_with(&NothingFound).unwrap(), 0);
        assert_eq!(fs::read_to_string(p.config().lexicon_file()).unwrap(), before);
    }

    #[test]
    fn test_generate_with_injected_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path());
        // the Greek lookup error is not a missing file, so it propagates
        assert!(p.generate_with(None, &Lexicon).is_err());

        let repo = p.generate_with(None, &NothingFound).unwrap();
        assert!(repo.seeds().iter().all(|s| !s.seed_type.is_attested()));
    }

    #[test]
    fn test_generate_with_rules_and_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(dir.path());
        fs::create_dir_all(dir.path().join("raw")).unwrap();
        fs::write(
            p.config().lexicon_file(),
            "term,target_lang,origin_lang,source_category\n\
             futbol,eu,en,Category:Basque_terms_borrowed_from_English\n",
        )
        .unwrap();
        let rules = dir.path().join("rules.json");
        fs::write(
            &rules,
            r#"[{"lang": "eu", "verb_suffixes": [{"suffix": "ifikatu", "tag": "verb_morph_integrated"}]}]"#,
        )
        .unwrap();

        let repo = p.generate(Some(&rules)).unwrap();
        let has = |term: &str| repo.seeds().iter().any(|s| s.term == term);
        assert!(has("futbol"));
        assert!(has("clickifikatu"));
        let clickifikatu = repo.seeds().iter().find(|s| s.term == "clickifikatu").unwrap();
        assert_eq!(clickifikatu.seed_type.morph(), Some(MorphType::VerbMorphIntegrated));
        assert_eq!(clickifikatu.pos, Pos::Verb);
    }
}
