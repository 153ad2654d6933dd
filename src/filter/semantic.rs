//! Semantic false-positive filter: native homonyms and sentences where a
//! seed is really part of a name or an unrelated sense.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::model::{Lang, MinedSentence};

lazy_static! {
    /// Proper names and titles that contain a root. Matched case-sensitively.
    static ref ENTITY_TRIGGERS: Vec<(&'static str, Vec<&'static str>)> = vec![
        ("scan", vec!["Scania", "Skåne", "VABIS", "Saab", "Volkswagen"]),
        ("ban", vec!["Ki-moon", "Ki-mun", "Ban Ki", "Naciones Xuníes"]),
        ("bug", vec!["Bugs Bunny", "Bunny", "Looney", "Warner", "Disney", "Rabbit"]),
        ("post", vec![
            "Washington Post", "The Post", "New York Post", "post reges", "Post-Newsweek",
            "Post-punk", "post-punk",
        ]),
        ("bot", vec!["Bot.", "Zool.", "Acta Bot", "Nat.,Bot", "Ser. Bot"]),
        ("scroll", vec!["Elder Scrolls", "Mojang", "Scrolls", "Morrowind", "Oblivion"]),
        ("like", vec![
            "Like a Rolling Stone", "Like a Prayer", "Like a Virgin", "Nothing's Shocking",
            "Smells Like Teen Spirit",
        ]),
        ("hack", vec!["Hack-a-Shaq", "Hack and slash", "hack and slash"]),
    ];

    /// Topical context for an unrelated sense. Matched against the
    /// lower-cased sentence.
    static ref CONTEXT_TRIGGERS: Vec<(&'static str, Vec<&'static str>)> = vec![
        ("post", vec![
            "rugbi", "tenis", "fútbol", "gol", "meta", "washington", "huffington", "diariu",
            "periódicu", "oficina",
        ]),
        ("chat", vec![
            "mont-du-chat", "chapelle", "lac", "savoie", "saboya", "comuña", "francia", "oise",
        ]),
        ("bot", vec!["bot.", "zool.", "biol.", "sociedá", "nat.", "ser."]),
        ("bug", vec!["bunny", "looney", "river", "rio"]),
        ("hack", vec!["hack-a-shaq"]),
        ("ban", vec![
            "ki-moon", "ki-mun", "banes", "bans", "jura", "cubanu", "croacia", "croatia",
            "hungary", "hungría", "12th", "xii",
        ]),
        ("log", vec![
            "logarithm", "logaritmo", "les loges", "equation", "ecuación", "ph", "=", "+",
            "funtzio", "matemática",
        ]),
        ("troll", vec![
            "mitoloxía", "mythology", "gnome", "dwarf", "fantasy", "tolkien", "harry potter",
        ]),
        ("check", vec!["republic", "checa", "chess", "xedrez"]),
        ("cloud", vec!["strife", "final fantasy", "saint-cloud"]),
    ];

    static ref DIGITAL_KEYWORDS: Vec<&'static str> = vec![
        "internet", "blog", "web", "rede", "social", "facebook", "twitter", "instagram", "online",
    ];
}

/// Which field of the entry a homonym rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomonymField {
    Term,
    Lemma,
}

/// A seed form that collides with a native word. Entries matching the rule
/// are dropped unless one of the rescue keywords occurs in the sentence; an
/// empty rescue list means always drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomonymRule {
    pub lang: Lang,
    pub field: HomonymField,
    pub words: Vec<String>,
    #[serde(default)]
    pub rescue: Vec<String>,
}

impl HomonymRule {
    pub fn always(lang: Lang, field: HomonymField, words: &[&str]) -> Self {
        Self {
            lang,
            field,
            words: words.iter().map(|w| w.to_string()).collect(),
            rescue: Vec::new(),
        }
    }

    pub fn unless(lang: Lang, field: HomonymField, words: &[&str], rescue: &[&str]) -> Self {
        Self {
            rescue: rescue.iter().map(|w| w.to_string()).collect(),
            ..Self::always(lang, field, words)
        }
    }

    /// `term` and `lemma` are already lower-cased, `lower` is the sentence.
    fn drops(&self, lang: Lang, term: &str, lemma: &str, lower: &str) -> bool {
        if lang != self.lang {
            return false;
        }
        let value = match self.field {
            HomonymField::Term => term,
            HomonymField::Lemma => lemma,
        };
        if !self.words.iter().any(|w| w == value) {
            return false;
        }
        !self.rescue.iter().any(|k| lower.contains(k.as_str()))
    }
}

/// Per-lemma substring triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerTable {
    triggers: HashMap<String, Vec<String>>,
}

impl TriggerTable {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        let triggers = entries
            .into_iter()
            .map(|(lemma, words)| {
                (
                    lemma.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();
        Self { triggers }
    }

    /// First trigger for `lemma` found in `text`.
    pub fn find(&self, lemma: &str, text: &str) -> Option<&str> {
        self.triggers
            .get(lemma)?
            .iter()
            .find(|t| text.contains(t.as_str()))
            .map(String::as_str)
    }
}

fn table(rows: &[(&'static str, Vec<&'static str>)]) -> TriggerTable {
    TriggerTable::new(rows.iter().map(|(k, v)| (*k, v.as_slice())))
}

#[derive(Debug, Clone)]
pub struct SemanticFilter {
    homonyms: Vec<HomonymRule>,
    entities: TriggerTable,
    contexts: TriggerTable,
}

impl Default for SemanticFilter {
    fn default() -> Self {
        let homonyms = vec![
            HomonymRule::always(Lang::Basque, HomonymField::Lemma, &["ban"]),
            // elided preposition απ'
            HomonymRule::always(Lang::Greek, HomonymField::Term, &["απ"]),
            // poste "pole", postiar "to place"
            HomonymRule::unless(
                Lang::Asturian,
                HomonymField::Term,
                &["poste", "postes", "postiar", "postiáu"],
                &DIGITAL_KEYWORDS,
            ),
        ];
        Self::new(homonyms, table(&ENTITY_TRIGGERS), table(&CONTEXT_TRIGGERS))
    }
}

impl SemanticFilter {
    /// `entities` match case-sensitively; `contexts` must be lower-case.
    pub fn new(homonyms: Vec<HomonymRule>, entities: TriggerTable, contexts: TriggerTable) -> Self {
        Self {
            homonyms,
            entities,
            contexts,
        }
    }

    pub fn is_false_positive(&self, entry: &MinedSentence) -> bool {
        let term = entry.term.to_lowercase();
        let lemma = entry.lemma.to_lowercase();
        let lower = entry.sentence.to_lowercase();

        if self
            .homonyms
            .iter()
            .any(|rule| rule.drops(entry.lang, &term, &lemma, &lower))
        {
            return true;
        }
        if self.entities.find(&lemma, &entry.sentence).is_some() {
            return true;
        }
        self.contexts.find(&lemma, &lower).is_some()
    }
}
