//! Language-identity filter: flags sentences that are really English (or
//! reference-list debris) rather than the target language.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use whatlang::Lang as Detected;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\b[a-z]+\b").unwrap();

    /// Function words plus the vocabulary of citation and bibliography
    /// blocks.
    pub static ref ENGLISH_STOPWORDS: HashSet<&'static str> = [
        "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not",
        "on", "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from",
        "they", "we", "say", "her", "she", "or", "an", "will", "my", "one", "all", "would",
        "there", "their", "what", "so", "up", "out", "if", "about", "who", "get", "which",
        "go", "me", "when", "make", "can", "like", "time", "no", "just", "him", "know",
        "take", "people", "into", "year", "your", "good", "some", "could", "them", "see",
        "other", "than", "then", "now", "look", "only", "come", "its", "over", "think",
        "also", "back", "after", "use", "two", "how", "our", "work", "first", "well", "way",
        "even", "new", "want", "because", "any", "these", "give", "day", "most", "us",
        "is", "was", "are", "were", "has", "had", "been",
        "references", "external", "links", "bibliography", "source", "title", "date",
        "author", "publisher", "retrieved", "archived", "original", "page", "pages",
        "volume", "issue", "doi", "isbn", "issn", "pmid", "journal", "university", "press",
        "abstract", "introduction", "conclusion", "chapter",
    ]
    .into_iter()
    .collect();
}

/// Tunables for [`LanguageFilter`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageFilterConfig {
    /// Stopword density above which a sentence is flagged.
    pub threshold: f64,
    /// Sentences with fewer tokens than this use the hit-count rule.
    pub short_sentence_tokens: usize,
    pub short_sentence_hits: usize,
    /// Substrings that flag a sentence outright.
    pub markers: Vec<String>,
    /// Word sets that flag a sentence when all are present.
    pub marker_word_sets: Vec<Vec<String>>,
    /// Also ask whatlang whether the sentence is English.
    pub detect_language: bool,
    pub min_confidence: f64,
}

impl Default for LanguageFilterConfig {
    fn default() -> Self {
        Self {
            threshold: 0.25,
            short_sentence_tokens: 6,
            short_sentence_hits: 2,
            markers: ["references", "retrieved from", "tongue body"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            marker_word_sets: vec![vec!["how".into(), "an".into(), "our".into()]],
            detect_language: false,
            min_confidence: 0.9,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LanguageFilter {
    config: LanguageFilterConfig,
    stopwords: HashSet<String>,
}

impl Default for LanguageFilter {
    fn default() -> Self {
        Self::new(LanguageFilterConfig::default())
    }
}

impl LanguageFilter {
    /// Filter using the built-in English stopword list.
    pub fn new(config: LanguageFilterConfig) -> Self {
        Self::with_stopwords(config, ENGLISH_STOPWORDS.iter().copied())
    }

    /// Markers and marker words are lower-cased to match the lower-cased
    /// sentence.
    pub fn with_stopwords<S: Into<String>>(
        mut config: LanguageFilterConfig,
        stopwords: impl IntoIterator<Item = S>,
    ) -> Self {
        for marker in &mut config.markers {
            *marker = marker.to_lowercase();
        }
        for word in config.marker_word_sets.iter_mut().flatten() {
            *word = word.to_lowercase();
        }
        Self {
            config,
            stopwords: stopwords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn config(&self) -> &LanguageFilterConfig {
        &self.config
    }

    /// Share of tokens that are stopwords, with the raw counts.
    fn density(&self, lower: &str) -> (usize, usize) {
        let mut tokens = 0;
        let mut hits = 0;
        for m in TOKEN.find_iter(lower) {
            tokens += 1;
            if self.stopwords.contains(m.as_str()) {
                hits += 1;
            }
        }
        (tokens, hits)
    }

    pub fn is_off_target(&self, sentence: &str) -> bool {
        let lower = sentence.to_lowercase();
        let (tokens, hits) = self.density(&lower);
        if tokens == 0 {
            return false;
        }

        if self.config.markers.iter().any(|m| lower.contains(m.as_str())) {
            return true;
        }

        let words: HashSet<&str> = TOKEN.find_iter(&lower).map(|m| m.as_str()).collect();
        if self
            .config
            .marker_word_sets
            .iter()
            .any(|set| !set.is_empty() && set.iter().all(|w| words.contains(w.as_str())))
        {
            return true;
        }

        if hits as f64 / tokens as f64 > self.config.threshold {
            return true;
        }
        if tokens < self.config.short_sentence_tokens && hits >= self.config.short_sentence_hits {
            return true;
        }

        self.config.detect_language && self.detected_english(sentence)
    }

    fn detected_english(&self, sentence: &str) -> bool {
        match whatlang::detect(sentence) {
            Some(info) => {
                info.lang() == Detected::Eng
                    && info.is_reliable()
                    && info.confidence() >= self.config.min_confidence
            }
            None => false,
        }
    }
}
