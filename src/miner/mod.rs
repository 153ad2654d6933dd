//! Corpus miner: turns seeds into attested sentences using a search
//! collaborator and a page-content collaborator.

mod wikipedia;

pub use wikipedia::Wikipedia;

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info};

use crate::config::MinerConfig;
use crate::error::{CorpusError, Result};
use crate::model::{Lang, MinedSentence, Seed};

/// Full-text search returning page titles for an exact phrase.
pub trait SearchSource: Send + Sync {
    fn search(&self, phrase: &str, lang: Lang, limit: usize) -> Result<Vec<String>>;
}

/// Plain-text page content. `Ok(None)` means the page has no usable text.
pub trait PageSource: Send + Sync {
    fn fetch(&self, title: &str, lang: Lang) -> Result<Option<String>>;
}

/// Naive punctuation-based sentence segmentation. Abbreviations such as
/// "etc. " split too early.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    boundaries: Vec<char>,
}

impl SentenceSplitter {
    pub fn new(boundaries: impl IntoIterator<Item = char>) -> Self {
        Self {
            boundaries: boundaries.into_iter().collect(),
        }
    }

    /// `. ! ?` everywhere; Greek also ends questions with `;` or U+037E.
    pub fn for_lang(lang: Lang) -> Self {
        match lang {
            Lang::Greek => Self::new(['.', '!', '?', ';', '\u{037E}']),
            Lang::Asturian | Lang::Basque => Self::new(['.', '!', '?']),
        }
    }

    /// Split after a boundary character that is followed by whitespace.
    pub fn split(&self, text: &str) -> Vec<String> {
        let flat = text.replace('\n', " ");
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = flat.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if !self.boundaries.contains(&c) {
                continue;
            }
            if chars.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
                let end = i + c.len_utf8();
                sentences.push(flat[start..end].to_string());
                while let Some(&(_, ws)) = chars.peek() {
                    if !ws.is_whitespace() {
                        break;
                    }
                    chars.next();
                }
                start = chars.peek().map(|&(j, _)| j).unwrap_or(flat.len());
            }
        }
        if start < flat.len() {
            sentences.push(flat[start..].to_string());
        }
        sentences
    }
}

/// Whole-word, case-insensitive occurrence of a seed term.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    pattern: Regex,
}

impl TermMatcher {
    pub fn new(term: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term)))
            .map_err(|e| CorpusError::Parse(format!("bad term pattern for '{}': {}", term, e)))?;
        Ok(Self { pattern })
    }

    pub fn is_match(&self, sentence: &str) -> bool {
        self.pattern.is_match(sentence)
    }
}

pub struct CorpusMiner<'a> {
    search: &'a dyn SearchSource,
    pages: &'a dyn PageSource,
    config: MinerConfig,
}

impl<'a> CorpusMiner<'a> {
    pub fn new(search: &'a dyn SearchSource, pages: &'a dyn PageSource, config: MinerConfig) -> Self {
        Self { search, pages, config }
    }

    fn length_ok(&self, sentence: &str) -> bool {
        let n = sentence.chars().count();
        n > self.config.min_sentence_chars && n < self.config.max_sentence_chars
    }

    /// Sentences for one seed. Search and fetch failures only cost that
    /// seed or page.
    pub fn mine_seed(&self, seed: &Seed) -> Vec<MinedSentence> {
        let titles = match self
            .search
            .search(&seed.term, seed.lang, self.config.max_pages_per_seed)
        {
            Ok(titles) => titles,
            Err(e) => {
                debug!(term = %seed.term, lang = %seed.lang, error = %e, "search failed, skipping seed");
                return Vec::new();
            }
        };
        let matcher = match TermMatcher::new(&seed.term) {
            Ok(m) => m,
            Err(e) => {
                debug!(error = %e, "skipping seed");
                return Vec::new();
            }
        };
        let splitter = SentenceSplitter::for_lang(seed.lang);

        let mut found = Vec::new();
        for title in titles.iter().take(self.config.max_pages_per_seed) {
            let text = match self.pages.fetch(title, seed.lang) {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(e) => {
                    debug!(page = %title, error = %e, "fetch failed, skipping page");
                    continue;
                }
            };
            for sentence in splitter.split(&text) {
                let sentence = sentence.trim();
                if self.length_ok(sentence) && matcher.is_match(sentence) {
                    found.push(MinedSentence::from_seed(seed, sentence, title.as_str()));
                }
            }
        }
        found
    }

    /// Mine every seed. Output follows seed order whatever the worker count.
    pub fn mine(&self, seeds: &[Seed]) -> Result<Vec<MinedSentence>> {
        let per_seed: Vec<Vec<MinedSentence>> = if self.config.workers <= 1 {
            seeds.iter().map(|s| self.mine_seed(s)).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.workers)
                .build()
                .map_err(|e| CorpusError::Config(format!("miner thread pool: {}", e)))?;
            pool.install(|| seeds.par_iter().map(|s| self.mine_seed(s)).collect())
        };

        let hits = per_seed.iter().filter(|v| !v.is_empty()).count();
        let mined: Vec<MinedSentence> = per_seed.into_iter().flatten().collect();
        info!(
            seeds = seeds.len(),
            seeds_with_hits = hits,
            sentences = mined.len(),
            "mining complete"
        );
        Ok(mined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pos;
    use crate::morph::MorphType;
    use std::collections::HashMap;

    struct FakeSearch(HashMap<&'static str, Vec<&'static str>>);

    impl SearchSource for FakeSearch {
        fn search(&self, phrase: &str, _lang: Lang, limit: usize) -> Result<Vec<String>> {
            match self.0.get(phrase) {
                Some(titles) => Ok(titles.iter().take(limit).map(|t| t.to_string()).collect()),
                None => Err(CorpusError::Http("timeout".into())),
            }
        }
    }

    struct FakePages(HashMap<&'static str, Option<&'static str>>);

    impl PageSource for FakePages {
        fn fetch(&self, title: &str, _lang: Lang) -> Result<Option<String>> {
            match self.0.get(title) {
                Some(text) => Ok(text.map(str::to_string)),
                None => Err(CorpusError::Http("503".into())),
            }
        }
    }

    fn collaborators() -> (FakeSearch, FakePages) {
        let search = FakeSearch(HashMap::from([
            ("klik", vec!["Sagua", "Teklatua", "Hutsa", "Galdua"]),
            ("txateatu", vec!["Txata"]),
        ]));
        let pages = FakePages(HashMap::from([
            (
                "Sagua",
                Some("Sagua mugitu eta klik egin.\nBotoian KLIK egiten da gero! Klika ez da hau."),
            ),
            ("Teklatua", Some("Teklatuan ez dago klik hitza hemen? Laburra klik.")),
            ("Hutsa", None),
        ]));
        (search, pages)
    }

    fn seed(term: &str) -> Seed {
        Seed::new(term, "click", Lang::Basque, MorphType::NounRaw, Pos::Noun)
    }

    #[test]
    fn test_split_sentences() {
        let s = SentenceSplitter::for_lang(Lang::Asturian);
        assert_eq!(
            s.split("Primera frase.  Segunda!\nTercera? fin"),
            ["Primera frase.", "Segunda!", "Tercera?", "fin"]
        );
        // no whitespace after the dot: no split
        assert_eq!(s.split("www.example.org es"), ["www.example.org es"]);
    }

    #[test]
    fn test_greek_question_marks_split() {
        let s = SentenceSplitter::for_lang(Lang::Greek);
        assert_eq!(s.split("Τι είναι; Ένα κλικ\u{037E} Ναι."), ["Τι είναι;", "Ένα κλικ\u{037E}", "Ναι."]);
        assert_eq!(SentenceSplitter::for_lang(Lang::Basque).split("a; b"), ["a; b"]);
    }

    #[test]
    fn test_term_matcher_whole_word() {
        let m = TermMatcher::new("klik").unwrap();
        assert!(m.is_match("KLIK egin"));
        assert!(!m.is_match("klika ez"));
        assert!(!m.is_match("aklik"));

        let greek = TermMatcher::new("κλικ").unwrap();
        assert!(greek.is_match("Ένα ΚΛΙΚ εδώ"));
        assert!(!greek.is_match("κλικάρω"));

        let phrase = TermMatcher::new("do click").unwrap();
        assert!(phrase.is_match("I do click."));
    }

    #[test]
    fn test_mine_seed_filters_and_tags() {
        let (search, pages) = collaborators();
        let miner = CorpusMiner::new(&search, &pages, MinerConfig::default());
        let mined = miner.mine_seed(&seed("klik"));

        let sentences: Vec<(&str, &str)> = mined
            .iter()
            .map(|m| (m.sentence.as_str(), m.source_page.as_str()))
            .collect();
        assert_eq!(
            sentences,
            [
                ("Sagua mugitu eta klik egin.", "Sagua"),
                ("Botoian KLIK egiten da gero!", "Sagua"),
                ("Teklatuan ez dago klik hitza hemen?", "Teklatua"),
                ("Laburra klik.", "Teklatua"),
            ]
        );
        assert!(mined.iter().all(|m| m.lemma == "click" && m.lang == Lang::Basque));
    }

    #[test]
    fn test_length_bounds_are_exclusive() {
        let config = MinerConfig {
            min_sentence_chars: 13,
            max_sentence_chars: 30,
            ..MinerConfig::default()
        };
        let (search, pages) = collaborators();
        let miner = CorpusMiner::new(&search, &pages, config);
        assert!(!miner.length_ok("Laburra klik."));
        assert!(miner.length_ok("Laburra klik.."));
        let long = "x".repeat(30);
        assert!(!miner.length_ok(&long));
    }

    #[test]
    fn test_failures_skip_only_the_affected_seed() {
        let (search, pages) = collaborators();
        let miner = CorpusMiner::new(&search, &pages, MinerConfig::default());
        // "txateatu" resolves to a page whose fetch fails; "spam" fails at search
        let mined = miner
            .mine(&[seed("txateatu"), seed("spam"), seed("klik")])
            .unwrap();
        assert_eq!(mined.len(), 4);
        assert!(mined.iter().all(|m| m.term == "klik"));
    }

    #[test]
    fn test_page_limit() {
        let (search, pages) = collaborators();
        let config = MinerConfig {
            max_pages_per_seed: 1,
            ..MinerConfig::default()
        };
        let miner = CorpusMiner::new(&search, &pages, config);
        let mined = miner.mine_seed(&seed("klik"));
        assert!(mined.iter().all(|m| m.source_page == "Sagua"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (search, pages) = collaborators();
        let seeds: Vec<Seed> = ["klik", "spam", "txateatu", "klik", "klik"]
            .iter()
            .enumerate()
            .map(|(i, t)| Seed::new(*t, format!("lemma{}", i), Lang::Basque, MorphType::NounRaw, Pos::Noun))
            .collect();

        let sequential = CorpusMiner::new(&search, &pages, MinerConfig::default())
            .mine(&seeds)
            .unwrap();
        let parallel = CorpusMiner::new(
            &search,
            &pages,
            MinerConfig {
                workers: 4,
                ..MinerConfig::default()
            },
        )
        .mine(&seeds)
        .unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.len(), 12);
    }
}
