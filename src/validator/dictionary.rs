//! Hunspell lookup for the target languages.
//!
//! Each language's dictionary is optional; a form is only checked when
//! that language's `.aff`/`.dic` pair was found and parsed.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};
use zspell::Dictionary;

use crate::model::Lang;

/// Hunspell file stem per target language.
pub fn dictionary_name(lang: Lang) -> &'static str {
    match lang {
        Lang::Asturian => "ast_ES",
        Lang::Basque => "eu_ES",
        Lang::Greek => "el_GR",
    }
}

#[derive(Default)]
pub struct NativeDictionaries {
    dicts: HashMap<Lang, Dictionary>,
}

impl NativeDictionaries {
    /// Load whatever dictionaries `dict_dir` holds.
    pub fn load(dict_dir: &Path) -> Self {
        let mut dicts = HashMap::new();
        for lang in Lang::ALL {
            if let Some(d) = load_dict(dict_dir, dictionary_name(lang)) {
                dicts.insert(lang, d);
            }
        }
        let loaded = Self { dicts };
        info!("{}", loaded.stats());
        loaded
    }

    pub fn has(&self, lang: Lang) -> bool {
        self.dicts.contains_key(&lang)
    }

    /// `None` when no dictionary is loaded for `lang`. Multi-word forms are
    /// known only if every word is.
    pub fn check(&self, lang: Lang, form: &str) -> Option<bool> {
        let dict = self.dicts.get(&lang)?;
        let mut words = form.split_whitespace().peekable();
        if words.peek().is_none() {
            return Some(false);
        }
        Some(words.all(|w| check_word(dict, w)))
    }

    pub fn stats(&self) -> String {
        format!(
            "Dictionaries loaded: ast={}, eu={}, el={}",
            self.has(Lang::Asturian),
            self.has(Lang::Basque),
            self.has(Lang::Greek)
        )
    }
}

/// Exact form first, then lower-cased.
fn check_word(dict: &Dictionary, word: &str) -> bool {
    if dict.check_word(word) {
        return true;
    }
    let lower = word.to_lowercase();
    lower != word && dict.check_word(&lower)
}

fn load_dict(dict_dir: &Path, name: &str) -> Option<Dictionary> {
    let aff_path = dict_dir.join(format!("{}.aff", name));
    let dic_path = dict_dir.join(format!("{}.dic", name));

    if !aff_path.exists() || !dic_path.exists() {
        warn!(dictionary = name, dir = %dict_dir.display(), "dictionary not found");
        return None;
    }

    let aff_content = match fs::read_to_string(&aff_path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "failed to read {}.aff", name);
            return None;
        }
    };
    let dic_content = match fs::read_to_string(&dic_path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "failed to read {}.dic", name);
            return None;
        }
    };

    match zspell::builder()
        .config_str(&aff_content)
        .dict_str(&dic_content)
        .build()
    {
        Ok(dict) => {
            info!(dictionary = name, "loaded dictionary");
            Some(dict)
        }
        Err(e) => {
            warn!(error = %e, "failed to build dictionary {}", name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "SET UTF-8\n\nSFX N Y 1\nSFX N 0 a .\n";
    const DIC: &str = "3\nordenadore\nsagu\nklik/N\n";

    #[test]
    fn test_missing_directory_loads_nothing() {
        let dicts = NativeDictionaries::load(Path::new("/nonexistent/dictionaries"));
        for lang in Lang::ALL {
            assert!(!dicts.has(lang));
            assert_eq!(dicts.check(lang, "klik"), None);
        }
    }

    #[test]
    fn test_loaded_dictionary_checks_forms() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("eu_ES.aff"), AFF).unwrap();
        fs::write(dir.path().join("eu_ES.dic"), DIC).unwrap();

        let dicts = NativeDictionaries::load(dir.path());
        assert!(dicts.has(Lang::Basque));
        assert!(!dicts.has(Lang::Greek));
        assert_eq!(dicts.check(Lang::Basque, "Klik"), Some(true));
        assert_eq!(dicts.check(Lang::Basque, "klika sagu"), Some(true));
        assert_eq!(dicts.check(Lang::Basque, "klik egin"), Some(false));
        assert_eq!(dicts.check(Lang::Greek, "κλικ"), None);
    }
}
