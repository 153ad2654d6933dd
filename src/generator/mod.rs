//! Rule-based generation of hypothesized borrowed forms.
//!
//! Each target language implements [`FormGenerator`]: a pure, deterministic
//! mapping from an English root to the surface forms that root could take
//! once borrowed. Every form is tagged with the [`MorphType`] of the rule
//! that produced it.

mod asturian;
mod basque;
mod greek;
mod rules;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Lang, Pos, Seed};
use crate::morph::MorphType;

pub use asturian::AsturianGenerator;
pub use basque::BasqueGenerator;
pub use greek::GreekGenerator;
pub use rules::{Affix, Auxiliary, LanguageRules, Placement, RewriteRule, RuleSetGenerator, apply_rewrites};

/// Semantic class of a root, fixed at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    /// Denotes an action; verb forms may be generated.
    Action,
    /// Denotes an entity; noun forms only.
    Entity,
}

/// An English lexical item to be borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Root {
    pub text: String,
    pub kind: RootKind,
}

impl Root {
    pub fn new(text: impl Into<String>, kind: RootKind) -> Self {
        Self { text: text.into(), kind }
    }

    pub fn is_action(&self) -> bool {
        self.kind == RootKind::Action
    }
}

/// Capability shared by all per-language generators.
pub trait FormGenerator: Send + Sync {
    fn lang(&self) -> Lang;

    /// Candidate forms for one root. Entity roots never yield verbs.
    fn generate(&self, root: &Root) -> Vec<Seed>;

    fn generate_all(&self, roots: &[Root]) -> Vec<Seed> {
        roots.iter().flat_map(|r| self.generate(r)).collect()
    }
}

/// The built-in generators, one per target language.
pub fn registry() -> Vec<Box<dyn FormGenerator>> {
    vec![
        Box::new(AsturianGenerator),
        Box::new(BasqueGenerator),
        Box::new(GreekGenerator::default()),
    ]
}

/// Forms produced for a single root. Empty terms and repeated
/// `(term, type)` pairs are dropped.
pub(crate) struct FormSet {
    lang: Lang,
    lemma: String,
    seen: HashSet<(String, MorphType)>,
    seeds: Vec<Seed>,
}

impl FormSet {
    pub(crate) fn new(lang: Lang, root: &Root) -> Self {
        Self {
            lang,
            lemma: root.text.clone(),
            seen: HashSet::new(),
            seeds: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, term: impl Into<String>, morph: MorphType, pos: Pos) {
        let term = term.into();
        if term.trim().is_empty() {
            return;
        }
        if self.seen.insert((term.clone(), morph)) {
            self.seeds
                .push(Seed::new(term, self.lemma.as_str(), self.lang, morph, pos));
        }
    }

    pub(crate) fn into_seeds(self) -> Vec<Seed> {
        self.seeds
    }
}

pub(crate) fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

pub(crate) fn ends_in_vowel(s: &str) -> bool {
    s.chars().last().is_some_and(is_vowel)
}

/// Verbal suffixes attach after a silent final `-e` is dropped (like -> lik-).
pub(crate) fn verb_stem(stem: &str) -> &str {
    stem.strip_suffix('e').filter(|s| !s.is_empty()).unwrap_or(stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_roots;

    #[test]
    fn test_generation_is_deterministic() {
        let roots = default_roots();
        for g in registry() {
            assert_eq!(g.generate_all(&roots), g.generate_all(&roots));
        }
    }

    #[test]
    fn test_entity_roots_never_yield_verbs() {
        let roots: Vec<Root> = default_roots()
            .into_iter()
            .filter(|r| r.kind == RootKind::Entity)
            .collect();
        for g in registry() {
            for seed in g.generate_all(&roots) {
                assert_ne!(seed.pos, Pos::Verb, "{} produced verb {:?}", g.lang(), seed);
            }
        }
    }

    #[test]
    fn test_no_empty_or_repeated_forms_per_root() {
        for g in registry() {
            for root in default_roots() {
                let seeds = g.generate(&root);
                let mut seen = HashSet::new();
                for s in &seeds {
                    assert!(!s.term.is_empty());
                    assert_eq!(s.lemma, root.text);
                    assert_eq!(s.lang, g.lang());
                    assert!(seen.insert((s.term.clone(), s.seed_type.clone())));
                }
            }
        }
    }

    #[test]
    fn test_form_set_drops_empty_and_duplicates() {
        let root = Root::new("bug", RootKind::Entity);
        let mut forms = FormSet::new(Lang::Basque, &root);
        forms.push("bug", MorphType::NounRaw, Pos::Noun);
        forms.push("bug", MorphType::NounRaw, Pos::Noun);
        forms.push("bug", MorphType::NounIntegratedSg, Pos::Noun);
        forms.push("  ", MorphType::NounIntegratedPl, Pos::Noun);
        assert_eq!(forms.into_seeds().len(), 2);
    }

    #[test]
    fn test_verb_stem() {
        assert_eq!(verb_stem("like"), "lik");
        assert_eq!(verb_stem("update"), "updat");
        assert_eq!(verb_stem("click"), "click");
        assert_eq!(verb_stem("e"), "e");
    }
}
