//! Core records: languages, seeds and mined sentences.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::morph::SeedType;

/// Target language of a borrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lang {
    #[serde(rename = "ast")]
    Asturian,
    #[serde(rename = "eu")]
    Basque,
    #[serde(rename = "el")]
    Greek,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Asturian, Lang::Basque, Lang::Greek];

    /// ISO 639 code, also the Wikipedia subdomain.
    pub fn code(self) -> &'static str {
        match self {
            Lang::Asturian => "ast",
            Lang::Basque => "eu",
            Lang::Greek => "el",
        }
    }

    /// English name as used in Wiktionary category titles.
    pub fn english_name(self) -> &'static str {
        match self {
            Lang::Asturian => "Asturian",
            Lang::Basque => "Basque",
            Lang::Greek => "Greek",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ast" => Ok(Lang::Asturian),
            "eu" => Ok(Lang::Basque),
            "el" => Ok(Lang::Greek),
            other => Err(CorpusError::Parse(format!("unknown language code '{}'", other))),
        }
    }
}

/// Part of speech of a seed. Dictionary-sourced seeds are `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pos {
    #[serde(rename = "NOUN")]
    Noun,
    #[serde(rename = "VERB")]
    Verb,
    #[serde(rename = "UNKNOWN", alias = "-")]
    Unknown,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pos::Noun => "NOUN",
            Pos::Verb => "VERB",
            Pos::Unknown => "UNKNOWN",
        })
    }
}

/// A candidate surface form of a borrowed root in a target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    pub term: String,
    pub lemma: String,
    pub lang: Lang,
    #[serde(rename = "type")]
    pub seed_type: SeedType,
    pub pos: Pos,
}

impl Seed {
    pub fn new(
        term: impl Into<String>,
        lemma: impl Into<String>,
        lang: Lang,
        seed_type: impl Into<SeedType>,
        pos: Pos,
    ) -> Self {
        Self {
            term: term.into(),
            lemma: lemma.into(),
            lang,
            seed_type: seed_type.into(),
            pos,
        }
    }

    /// Repository uniqueness key.
    pub fn key(&self) -> (&str, Lang, &SeedType) {
        (&self.term, self.lang, &self.seed_type)
    }
}

/// A sentence retrieved for a seed, tagged with the seed's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinedSentence {
    pub term: String,
    pub lemma: String,
    pub lang: Lang,
    #[serde(rename = "type")]
    pub seed_type: SeedType,
    pub pos: Pos,
    pub sentence: String,
    pub source_page: String,
}

impl MinedSentence {
    pub fn from_seed(seed: &Seed, sentence: impl Into<String>, source_page: impl Into<String>) -> Self {
        Self {
            term: seed.term.clone(),
            lemma: seed.lemma.clone(),
            lang: seed.lang,
            seed_type: seed.seed_type.clone(),
            pos: seed.pos,
            sentence: sentence.into(),
            source_page: source_page.into(),
        }
    }
}

/// A mined sentence that survived both noise filters.
///
/// Only the filter pipeline creates these; the wrapper serializes exactly
/// like the inner record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleanCorpusEntry(MinedSentence);

impl CleanCorpusEntry {
    pub(crate) fn accept(entry: MinedSentence) -> Self {
        Self(entry)
    }

    pub fn into_inner(self) -> MinedSentence {
        self.0
    }
}

impl Deref for CleanCorpusEntry {
    type Target = MinedSentence;

    fn deref(&self) -> &MinedSentence {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::MorphType;

    #[test]
    fn test_lang_codes() {
        for lang in Lang::ALL {
            assert_eq!(lang.code().parse::<Lang>().unwrap(), lang);
        }
        assert!("en".parse::<Lang>().is_err());
    }

    #[test]
    fn test_mined_sentence_field_names() {
        let seed = Seed::new("klik", "click", Lang::Basque, MorphType::NounRaw, Pos::Noun);
        let m = MinedSentence::from_seed(&seed, "Klik egin du.", "Sagua");
        let v: serde_json::Value = serde_json::to_value(&m).unwrap();
        let obj = v.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["lang", "lemma", "pos", "sentence", "source_page", "term", "type"]);
        assert_eq!(obj["lang"], "eu");
        assert_eq!(obj["type"], "noun_raw");
        assert_eq!(obj["pos"], "NOUN");
    }

    #[test]
    fn test_legacy_pos_placeholder() {
        let pos: Pos = serde_json::from_str("\"-\"").unwrap();
        assert_eq!(pos, Pos::Unknown);
    }
}
