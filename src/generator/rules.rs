//! Ordered phonetic rewrites and declarative rule sets.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::{FormGenerator, FormSet, Root, is_vowel, verb_stem};
use crate::model::{Lang, Pos, Seed};
use crate::morph::MorphType;

/// One step of phonetic adaptation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RewriteRule {
    /// Replace every occurrence of `from`.
    Replace { from: String, to: String },
    /// Prepend `vowel` to a word-initial s + consonant cluster (scan -> escan).
    Epenthesis { vowel: String },
    /// Remove accents and other combining marks (φορμάτ -> φορματ).
    StripDiacritics,
}

impl RewriteRule {
    pub fn replace(from: &str, to: &str) -> Self {
        RewriteRule::Replace {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn apply(&self, s: &str) -> String {
        match self {
            RewriteRule::Replace { from, to } if !from.is_empty() => s.replace(from.as_str(), to),
            RewriteRule::Replace { .. } => s.to_string(),
            RewriteRule::Epenthesis { vowel } => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some('s'), Some(c)) if !is_vowel(c) => format!("{}{}", vowel, s),
                    _ => s.to_string(),
                }
            }
            RewriteRule::StripDiacritics => s
                .nfd()
                .filter(|c| !is_combining_mark(*c))
                .nfc()
                .collect(),
        }
    }
}

/// Apply rules once each, in declared order. Later rules see the output of
/// earlier ones.
pub fn apply_rewrites(rules: &[RewriteRule], s: &str) -> String {
    rules
        .iter()
        .fold(s.to_string(), |acc, rule| rule.apply(&acc))
}

/// A suffix and the category of the forms it builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affix {
    pub suffix: String,
    pub tag: MorphType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// `<aux> <stem>`
    Before,
    /// `<stem> <aux>`
    After,
}

/// A native auxiliary forming light verb constructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auxiliary {
    pub word: String,
    pub placement: Placement,
    #[serde(default = "light_construction")]
    pub tag: MorphType,
}

fn light_construction() -> MorphType {
    MorphType::VerbLightConstruction
}

/// Declarative description of a language's borrowing morphology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageRules {
    pub lang: Lang,
    #[serde(default)]
    pub rewrites: Vec<RewriteRule>,
    #[serde(default)]
    pub noun_suffixes: Vec<Affix>,
    #[serde(default)]
    pub auxiliaries: Vec<Auxiliary>,
    #[serde(default)]
    pub verb_suffixes: Vec<Affix>,
    #[serde(default)]
    pub participle_suffixes: Vec<Affix>,
}

/// Generator driven entirely by a [`LanguageRules`] table.
#[derive(Debug, Clone)]
pub struct RuleSetGenerator {
    rules: LanguageRules,
}

impl RuleSetGenerator {
    pub fn new(rules: LanguageRules) -> Self {
        Self { rules }
    }
}

impl FormGenerator for RuleSetGenerator {
    fn lang(&self) -> Lang {
        self.rules.lang
    }

    fn generate(&self, root: &Root) -> Vec<Seed> {
        let mut forms = FormSet::new(self.rules.lang, root);
        let stem = apply_rewrites(&self.rules.rewrites, &root.text);

        forms.push(root.text.as_str(), MorphType::NounRaw, Pos::Noun);
        for affix in &self.rules.noun_suffixes {
            forms.push(format!("{}{}", stem, affix.suffix), affix.tag, Pos::Noun);
        }

        if !root.is_action() {
            return forms.into_seeds();
        }

        for aux in &self.rules.auxiliaries {
            let term = match aux.placement {
                Placement::Before => format!("{} {}", aux.word, stem),
                Placement::After => format!("{} {}", stem, aux.word),
            };
            forms.push(term, aux.tag, Pos::Verb);
        }

        let vstem = verb_stem(&stem);
        for affix in self
            .rules
            .verb_suffixes
            .iter()
            .chain(&self.rules.participle_suffixes)
        {
            forms.push(format!("{}{}", vstem, affix.suffix), affix.tag, Pos::Verb);
        }

        forms.into_seeds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RootKind;

    #[test]
    fn test_rule_order_matters() {
        let rules = [RewriteRule::replace("ck", "k"), RewriteRule::replace("c", "k")];
        assert_eq!(apply_rewrites(&rules, "click"), "klik");

        let reversed = [RewriteRule::replace("c", "k"), RewriteRule::replace("ck", "k")];
        assert_eq!(apply_rewrites(&reversed, "click"), "klikk");
    }

    #[test]
    fn test_epenthesis() {
        let rule = RewriteRule::Epenthesis { vowel: "e".into() };
        assert_eq!(rule.apply("scan"), "escan");
        assert_eq!(rule.apply("spam"), "espam");
        assert_eq!(rule.apply("server"), "server");
        assert_eq!(rule.apply("s"), "s");
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(RewriteRule::StripDiacritics.apply("φορμάτ"), "φορματ");
        assert_eq!(RewriteRule::StripDiacritics.apply("τουίτ"), "τουιτ");
        assert_eq!(RewriteRule::StripDiacritics.apply("κλικ"), "κλικ");
    }

    fn do_ify_rules() -> LanguageRules {
        LanguageRules {
            lang: Lang::Asturian,
            rewrites: vec![],
            noun_suffixes: vec![],
            auxiliaries: vec![Auxiliary {
                word: "do".into(),
                placement: Placement::Before,
                tag: MorphType::VerbLightConstruction,
            }],
            verb_suffixes: vec![Affix {
                suffix: "ify".into(),
                tag: MorphType::VerbMorphIntegrated,
            }],
            participle_suffixes: vec![Affix {
                suffix: "ified".into(),
                tag: MorphType::VerbParticiple,
            }],
        }
    }

    #[test]
    fn test_light_verb_and_suffix_forms() {
        let generator = RuleSetGenerator::new(do_ify_rules());
        let seeds = generator.generate(&Root::new("click", RootKind::Action));
        let find = |term: &str| seeds.iter().find(|s| s.term == term).map(|s| s.seed_type.morph());

        assert_eq!(find("click"), Some(Some(MorphType::NounRaw)));
        assert_eq!(find("clickify"), Some(Some(MorphType::VerbMorphIntegrated)));
        assert_eq!(find("do click"), Some(Some(MorphType::VerbLightConstruction)));
        assert_eq!(find("clickified"), Some(Some(MorphType::VerbParticiple)));
    }

    #[test]
    fn test_entity_root_stops_at_nouns() {
        let generator = RuleSetGenerator::new(do_ify_rules());
        let seeds = generator.generate(&Root::new("server", RootKind::Entity));
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].pos, Pos::Noun);
    }

    #[test]
    fn test_rules_from_json() {
        let json = r#"{
            "lang": "eu",
            "rewrites": [{"rule": "replace", "from": "ck", "to": "k"}, {"rule": "epenthesis", "vowel": "e"}],
            "noun_suffixes": [{"suffix": "a", "tag": "noun_integrated_sg"}],
            "auxiliaries": [{"word": "egin", "placement": "after"}]
        }"#;
        let rules: LanguageRules = serde_json::from_str(json).unwrap();
        assert_eq!(rules.auxiliaries[0].tag, MorphType::VerbLightConstruction);

        let generator = RuleSetGenerator::new(rules);
        let terms: Vec<String> = generator
            .generate(&Root::new("check", RootKind::Action))
            .into_iter()
            .map(|s| s.term)
            .collect();
        assert_eq!(terms, ["check", "cheka", "chek egin"]);
    }
}
