//! Attested borrowings from Wiktionary's "terms borrowed from" categories.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::mediawiki::MediaWikiClient;
use crate::model::{Lang, Pos, Seed};
use crate::morph::SeedType;
use crate::persist::{require_input, write_atomic};

const WIKTIONARY_API: &str = "https://en.wiktionary.org/w/api.php";

/// Contact languages per target: English is the object of study, the others
/// are the historically dominant donors.
pub const BORROWING_CATEGORIES: &[(Lang, &str, &str)] = &[
    (Lang::Asturian, "en", "English"),
    (Lang::Asturian, "es", "Spanish"),
    (Lang::Basque, "en", "English"),
    (Lang::Basque, "es", "Spanish"),
    (Lang::Basque, "fr", "French"),
    (Lang::Greek, "en", "English"),
    (Lang::Greek, "tr", "Turkish"),
    (Lang::Greek, "fr", "French"),
];

/// One attested borrowing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub term: String,
    pub target_lang: Lang,
    pub origin_lang: String,
    pub source_category: String,
}

impl LexiconEntry {
    /// Attested seed: the entry is its own lemma and carries no part of speech.
    pub fn to_seed(&self) -> Seed {
        Seed::new(
            self.term.as_str(),
            self.term.as_str(),
            self.target_lang,
            SeedType::attested(self.origin_lang.as_str()),
            Pos::Unknown,
        )
    }
}

/// Source of attested borrowings for a target language.
pub trait LexiconSource {
    fn attested(&self, lang: Lang) -> Result<Vec<LexiconEntry>>;
}

/// Local CSV snapshot: `term,target_lang,origin_lang,source_category`.
#[derive(Debug, Clone)]
pub struct LexiconFile {
    path: PathBuf,
}

impl LexiconFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All well-formed rows; malformed rows are skipped.
    pub fn read_all(&self) -> Result<Vec<LexiconEntry>> {
        require_input(&self.path)?;
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut entries = Vec::new();
        for (idx, row) in reader.deserialize::<LexiconEntry>().enumerate() {
            match row {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(row = idx + 1, error = %e, "skipping malformed lexicon row"),
            }
        }
        Ok(entries)
    }

    pub fn write_all(path: &Path, entries: &[LexiconEntry]) -> Result<()> {
        write_atomic(path, |w| {
            let mut writer = csv::Writer::from_writer(w);
            for entry in entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
            Ok(())
        })
    }
}

impl LexiconSource for LexiconFile {
    fn attested(&self, lang: Lang) -> Result<Vec<LexiconEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.target_lang == lang)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    #[serde(rename = "continue")]
    cont: Option<CategoryContinue>,
    query: Option<CategoryQuery>,
}

#[derive(Debug, Deserialize)]
struct CategoryContinue {
    cmcontinue: String,
}

#[derive(Debug, Deserialize)]
struct CategoryQuery {
    categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
struct CategoryMember {
    ns: i64,
    title: String,
}

impl CategoryResponse {
    /// Main-namespace titles on this page and the token for the next one.
    fn into_page(self) -> (Vec<String>, Option<String>) {
        let titles = self
            .query
            .map(|q| {
                q.categorymembers
                    .into_iter()
                    .filter(|m| m.ns == 0)
                    .map(|m| m.title)
                    .collect()
            })
            .unwrap_or_default();
        (titles, self.cont.map(|c| c.cmcontinue))
    }
}

/// Live Wiktionary category scraper.
#[derive(Debug, Clone)]
pub struct WiktionaryClient {
    client: MediaWikiClient,
    page_delay: Duration,
}

impl WiktionaryClient {
    pub fn new(client: MediaWikiClient) -> Self {
        Self {
            client,
            page_delay: Duration::from_millis(100),
        }
    }

    pub fn category_title(lang: Lang, donor_name: &str) -> String {
        format!(
            "Category:{}_terms_borrowed_from_{}",
            lang.english_name(),
            donor_name
        )
    }

    /// Main-namespace members of a category, following continuation tokens.
    pub fn category_members(&self, category: &str) -> Result<Vec<String>> {
        let mut members = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let mut params = vec![
                ("action", "query"),
                ("list", "categorymembers"),
                ("cmtitle", category),
                ("cmlimit", "500"),
                ("format", "json"),
            ];
            if let Some(t) = token.as_deref() {
                params.push(("cmcontinue", t));
            }
            let resp: CategoryResponse = self.client.query(WIKTIONARY_API, &params)?;
            let (titles, next) = resp.into_page();
            members.extend(titles);
            match next {
                Some(t) => {
                    token = Some(t);
                    std::thread::sleep(self.page_delay);
                }
                None => break,
            }
        }
        Ok(members)
    }
}

impl LexiconSource for WiktionaryClient {
    /// Every category configured for `lang`. A failing category is logged
    /// and skipped.
    fn attested(&self, lang: Lang) -> Result<Vec<LexiconEntry>> {
        let mut entries = Vec::new();
        for (target, origin, donor_name) in BORROWING_CATEGORIES.iter().filter(|c| c.0 == lang) {
            let category = Self::category_title(*target, donor_name);
            match self.category_members(&category) {
                Ok(terms) => {
                    info!(%category, count = terms.len(), "fetched category");
                    entries.extend(terms.into_iter().map(|term| LexiconEntry {
                        term,
                        target_lang: *target,
                        origin_lang: origin.to_string(),
                        source_category: category.clone(),
                    }));
                }
                Err(e) => warn!(%category, error = %e, "category fetch failed"),
            }
        }
        Ok(entries)
    }
}
