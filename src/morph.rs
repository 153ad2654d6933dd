//! Morphological categories shared by the form generators and the
//! integration/spelling classifiers.
//!
//! Every seed carries a [`SeedType`]. Synthetic seeds name the rule that
//! produced them through a [`MorphType`]; attested seeds name the donor
//! language of the dictionary entry they came from. Classification is an
//! exhaustive match over [`MorphType`], so a new category cannot be added
//! without deciding how it is classified.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// Prefix marking dictionary-sourced (attested) seed types.
pub const ATTESTED_PREFIX: &str = "wiktionary_";

/// Rule that produced a synthetic form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphType {
    NounRaw,
    NounPluralNative,
    NounPluralEnglish,
    NounIntegratedSg,
    NounIntegratedPl,
    NounTransliterated,
    CsLatinRaw,
    VerbLightConstruction,
    VerbLightLatin,
    VerbLightGreek,
    VerbMorphPrescriptive,
    VerbMorphDescriptive,
    VerbParticiplePrescriptive,
    VerbParticipleDescriptive,
    VerbMorphIntegrated,
    VerbHabitual,
    VerbMorphAro,
    VerbParticiple,
}

/// Wichmann-style scale of morphological integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationLevel {
    /// Raw code-switch, English morphology kept.
    Unintegrated,
    /// Periphrastic light verb carrying native grammar.
    Accommodated,
    /// Native inflection or derivation on the borrowed stem.
    HighlyIntegrated,
}

/// Whether the English spelling survives in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingFidelity {
    /// Foreignization: the English spelling is preserved.
    Retained,
    /// Nativization: respelled, transliterated or natively inflected.
    Modified,
}

impl MorphType {
    pub const ALL: [MorphType; 18] = [
        MorphType::NounRaw,
        MorphType::NounPluralNative,
        MorphType::NounPluralEnglish,
        MorphType::NounIntegratedSg,
        MorphType::NounIntegratedPl,
        MorphType::NounTransliterated,
        MorphType::CsLatinRaw,
        MorphType::VerbLightConstruction,
        MorphType::VerbLightLatin,
        MorphType::VerbLightGreek,
        MorphType::VerbMorphPrescriptive,
        MorphType::VerbMorphDescriptive,
        MorphType::VerbParticiplePrescriptive,
        MorphType::VerbParticipleDescriptive,
        MorphType::VerbMorphIntegrated,
        MorphType::VerbHabitual,
        MorphType::VerbMorphAro,
        MorphType::VerbParticiple,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MorphType::NounRaw => "noun_raw",
            MorphType::NounPluralNative => "noun_plural_native",
            MorphType::NounPluralEnglish => "noun_plural_english",
            MorphType::NounIntegratedSg => "noun_integrated_sg",
            MorphType::NounIntegratedPl => "noun_integrated_pl",
            MorphType::NounTransliterated => "noun_transliterated",
            MorphType::CsLatinRaw => "cs_latin_raw",
            MorphType::VerbLightConstruction => "verb_light_construction",
            MorphType::VerbLightLatin => "verb_light_latin",
            MorphType::VerbLightGreek => "verb_light_greek",
            MorphType::VerbMorphPrescriptive => "verb_morph_prescriptive",
            MorphType::VerbMorphDescriptive => "verb_morph_descriptive",
            MorphType::VerbParticiplePrescriptive => "verb_participle_prescriptive",
            MorphType::VerbParticipleDescriptive => "verb_participle_descriptive",
            MorphType::VerbMorphIntegrated => "verb_morph_integrated",
            MorphType::VerbHabitual => "verb_habitual",
            MorphType::VerbMorphAro => "verb_morph_aro",
            MorphType::VerbParticiple => "verb_participle",
        }
    }

    pub fn integration_level(self) -> IntegrationLevel {
        match self {
            MorphType::NounRaw | MorphType::NounPluralEnglish | MorphType::CsLatinRaw => {
                IntegrationLevel::Unintegrated
            }
            MorphType::VerbLightConstruction
            | MorphType::VerbLightLatin
            | MorphType::VerbLightGreek => IntegrationLevel::Accommodated,
            MorphType::NounPluralNative
            | MorphType::NounIntegratedSg
            | MorphType::NounIntegratedPl
            | MorphType::NounTransliterated
            | MorphType::VerbMorphPrescriptive
            | MorphType::VerbMorphDescriptive
            | MorphType::VerbParticiplePrescriptive
            | MorphType::VerbParticipleDescriptive
            | MorphType::VerbMorphIntegrated
            | MorphType::VerbHabitual
            | MorphType::VerbMorphAro
            | MorphType::VerbParticiple => IntegrationLevel::HighlyIntegrated,
        }
    }

    pub fn spelling(self) -> SpellingFidelity {
        match self.integration_level() {
            IntegrationLevel::Unintegrated | IntegrationLevel::Accommodated => {
                SpellingFidelity::Retained
            }
            IntegrationLevel::HighlyIntegrated => SpellingFidelity::Modified,
        }
    }
}

impl fmt::Display for MorphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MorphType {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MorphType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CorpusError::Parse(format!("unknown morphological type '{}'", s)))
    }
}

impl fmt::Display for IntegrationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntegrationLevel::Unintegrated => "1. Unintegrated",
            IntegrationLevel::Accommodated => "2. Accommodated (light verb)",
            IntegrationLevel::HighlyIntegrated => "3. Highly integrated",
        })
    }
}

impl fmt::Display for SpellingFidelity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpellingFidelity::Retained => "Retained (foreignization)",
            SpellingFidelity::Modified => "Modified (nativization)",
        })
    }
}

/// The `type` tag of a seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeedType {
    /// Hypothesized form produced by a generator rule.
    Synthetic(MorphType),
    /// Established borrowing listed by the lexicon, with its donor language.
    Attested { origin: String },
}

impl SeedType {
    pub fn attested(origin: impl Into<String>) -> Self {
        SeedType::Attested { origin: origin.into() }
    }

    pub fn is_attested(&self) -> bool {
        matches!(self, SeedType::Attested { .. })
    }

    pub fn morph(&self) -> Option<MorphType> {
        match self {
            SeedType::Synthetic(m) => Some(*m),
            SeedType::Attested { .. } => None,
        }
    }

    /// `None` for attested seeds, which are classified by provenance instead.
    pub fn integration_level(&self) -> Option<IntegrationLevel> {
        self.morph().map(MorphType::integration_level)
    }

    pub fn spelling(&self) -> Option<SpellingFidelity> {
        self.morph().map(MorphType::spelling)
    }
}

impl From<MorphType> for SeedType {
    fn from(m: MorphType) -> Self {
        SeedType::Synthetic(m)
    }
}

impl fmt::Display for SeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedType::Synthetic(m) => f.write_str(m.as_str()),
            SeedType::Attested { origin } => write!(f, "{}{}", ATTESTED_PREFIX, origin),
        }
    }
}

impl FromStr for SeedType {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(ATTESTED_PREFIX) {
            Some(origin) if !origin.is_empty() => Ok(SeedType::attested(origin)),
            Some(_) => Err(CorpusError::Parse(format!("attested type '{}' has no origin", s))),
            None => s.parse::<MorphType>().map(SeedType::Synthetic),
        }
    }
}

impl TryFrom<String> for SeedType {
    type Error = CorpusError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SeedType> for String {
    fn from(t: SeedType) -> Self {
        t.to_string()
    }
}
