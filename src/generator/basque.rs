use lazy_static::lazy_static;

use super::{FormGenerator, FormSet, Root, apply_rewrites, ends_in_vowel, verb_stem};
use crate::generator::RewriteRule;
use crate::model::{Lang, Pos, Seed};
use crate::morph::MorphType;

/// Inflected forms of `egin` ("to do") following the borrowed stem.
const AUXILIARIES: &[&str] = &["egin", "egiten", "egingo", "egin du", "egin zen"];

lazy_static! {
    /// Digraphs first: `ck` must be consumed before the bare `c` rule runs.
    static ref STEM_RULES: Vec<RewriteRule> = vec![
        RewriteRule::replace("ch", "tx"),
        RewriteRule::replace("sh", "x"),
        RewriteRule::replace("ck", "k"),
        RewriteRule::replace("c", "k"),
        RewriteRule::replace("q", "k"),
        RewriteRule::replace("tweet", "tuit"),
        RewriteRule::Epenthesis { vowel: "e".into() },
    ];
}

/// Basque: definite `-a` / plural `-ak`, `egin` light verbs, and `-tu` /
/// `-tzen` verbs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasqueGenerator;

impl FormGenerator for BasqueGenerator {
    fn lang(&self) -> Lang {
        Lang::Basque
    }

    fn generate(&self, root: &Root) -> Vec<Seed> {
        let mut forms = FormSet::new(Lang::Basque, root);
        let stem = apply_rewrites(&STEM_RULES, &root.text.to_lowercase());

        forms.push(root.text.as_str(), MorphType::NounRaw, Pos::Noun);
        let (singular, plural) = if stem.ends_with('a') {
            (stem.clone(), format!("{}k", stem))
        } else {
            (format!("{}a", stem), format!("{}ak", stem))
        };
        forms.push(singular, MorphType::NounIntegratedSg, Pos::Noun);
        forms.push(plural, MorphType::NounIntegratedPl, Pos::Noun);

        if !root.is_action() {
            return forms.into_seeds();
        }

        for aux in AUXILIARIES {
            forms.push(format!("{} {}", stem, aux), MorphType::VerbLightConstruction, Pos::Verb);
        }

        // txat-a-tu: consonant-final stems take a linking vowel
        let vstem = verb_stem(&stem);
        let connector = if ends_in_vowel(vstem) { "" } else { "a" };
        forms.push(
            format!("{}{}tu", vstem, connector),
            MorphType::VerbMorphIntegrated,
            Pos::Verb,
        );
        forms.push(
            format!("{}{}tzen", vstem, connector),
            MorphType::VerbHabitual,
            Pos::Verb,
        );

        forms.into_seeds()
    }
}
