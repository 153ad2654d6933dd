use lazy_static::lazy_static;

use super::{FormGenerator, FormSet, Root, apply_rewrites, ends_in_vowel, verb_stem};
use crate::generator::RewriteRule;
use crate::model::{Lang, Pos, Seed};
use crate::morph::MorphType;

/// Paradigm slots of `facer` used in light verb constructions.
const AUXILIARIES: &[&str] = &["facer", "fizo", "fai", "facemos", "faen", "faciendo", "fechu"];

lazy_static! {
    static ref STEM_RULES: Vec<RewriteRule> = vec![
        RewriteRule::Epenthesis { vowel: "e".into() },
        RewriteRule::replace("tweet", "tuit"),
    ];
}

/// Asturian: `-es` plurals, `facer` light verbs, and `-iar` verbs with
/// participle `-iáu`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsturianGenerator;

/// Prescriptive spelling before a front vowel: g -> gu, ck/k -> qu.
fn adapt_spelling(base: &str, suffix: &str) -> String {
    if suffix.starts_with('i') {
        if base.ends_with('g') {
            return format!("{}u{}", base, suffix);
        }
        if let Some(head) = base.strip_suffix("ck").or_else(|| base.strip_suffix('k')) {
            return format!("{}qu{}", head, suffix);
        }
    }
    format!("{}{}", base, suffix)
}

impl FormGenerator for AsturianGenerator {
    fn lang(&self) -> Lang {
        Lang::Asturian
    }

    fn generate(&self, root: &Root) -> Vec<Seed> {
        let mut forms = FormSet::new(Lang::Asturian, root);
        let stem = apply_rewrites(&STEM_RULES, &root.text);

        forms.push(stem.as_str(), MorphType::NounRaw, Pos::Noun);
        let plural_native = if ends_in_vowel(&stem) {
            format!("{}s", stem)
        } else {
            format!("{}es", stem)
        };
        let plural_english = format!("{}s", stem);
        let distinct = plural_english != plural_native;
        forms.push(plural_native, MorphType::NounPluralNative, Pos::Noun);
        if distinct {
            forms.push(plural_english, MorphType::NounPluralEnglish, Pos::Noun);
        }

        if !root.is_action() {
            return forms.into_seeds();
        }

        for aux in AUXILIARIES {
            forms.push(format!("{} {}", aux, stem), MorphType::VerbLightConstruction, Pos::Verb);
            // facer (un) click
            forms.push(format!("{} un {}", aux, stem), MorphType::VerbLightConstruction, Pos::Verb);
        }

        let vstem = verb_stem(&stem);
        let prescriptive = adapt_spelling(vstem, "iar");
        forms.push(prescriptive.as_str(), MorphType::VerbMorphPrescriptive, Pos::Verb);
        forms.push(
            adapt_spelling(vstem, "iáu"),
            MorphType::VerbParticiplePrescriptive,
            Pos::Verb,
        );

        // clickiar next to the prescriptive cliquiar
        let descriptive = format!("{}iar", vstem);
        if descriptive != prescriptive {
            forms.push(descriptive, MorphType::VerbMorphDescriptive, Pos::Verb);
            forms.push(format!("{}iáu", vstem), MorphType::VerbParticipleDescriptive, Pos::Verb);
        }

        forms.into_seeds()
    }
}
