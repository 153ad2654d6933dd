use std::collections::HashMap;

use super::{FormGenerator, FormSet, Root};
use crate::config::GREEK_TRANSLITERATION;
use crate::generator::RewriteRule;
use crate::model::{Lang, Pos, Seed};
use crate::morph::MorphType;

/// Forms of `κάνω` ("to do") preceding the borrowed stem.
const AUXILIARIES: &[&str] = &["κάνω", "κάνει", "έκανε", "κάνοντας"];

/// Greek: Latin-script code-switches plus forms built on a conventional
/// transliteration (`-άρω` verbs, `-αρισμένος` participles).
#[derive(Debug, Clone)]
pub struct GreekGenerator {
    transliteration: HashMap<String, String>,
}

impl Default for GreekGenerator {
    fn default() -> Self {
        Self::with_transliteration(
            GREEK_TRANSLITERATION
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }
}

impl GreekGenerator {
    pub fn with_transliteration(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            transliteration: pairs.into_iter().collect(),
        }
    }
}

impl FormGenerator for GreekGenerator {
    fn lang(&self) -> Lang {
        Lang::Greek
    }

    fn generate(&self, root: &Root) -> Vec<Seed> {
        let mut forms = FormSet::new(Lang::Greek, root);

        forms.push(root.text.as_str(), MorphType::CsLatinRaw, Pos::Noun);
        if root.is_action() {
            for aux in AUXILIARIES {
                forms.push(format!("{} {}", aux, root.text), MorphType::VerbLightLatin, Pos::Verb);
            }
        }

        let Some(greek) = self.transliteration.get(&root.text) else {
            return forms.into_seeds();
        };

        forms.push(greek.as_str(), MorphType::NounTransliterated, Pos::Noun);
        if root.is_action() {
            for aux in AUXILIARIES {
                forms.push(format!("{} {}", aux, greek), MorphType::VerbLightGreek, Pos::Verb);
            }
            // the suffix carries the stress, so the stem loses its tonos
            let bare = RewriteRule::StripDiacritics.apply(greek);
            forms.push(format!("{}άρω", bare), MorphType::VerbMorphAro, Pos::Verb);
            forms.push(format!("{}αρισμένος", bare), MorphType::VerbParticiple, Pos::Verb);
        }

        forms.into_seeds()
    }
}
