//! The seed repository: the single list of terms to search for.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::generator::{FormGenerator, Root};
use crate::lexicon::{LexiconEntry, LexiconSource};
use crate::model::{Lang, Seed};
use crate::persist::{require_input, write_atomic};

/// Deduplicated, insertion-ordered seeds. No two seeds share
/// `(term, lang, type)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedRepository {
    seeds: Vec<Seed>,
}

impl SeedRepository {
    /// Synthetic seeds first, then dictionary-sourced ones; the first
    /// occurrence of a key wins.
    pub fn merge(
        generated: impl IntoIterator<Item = Seed>,
        dictionary_sourced: impl IntoIterator<Item = Seed>,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut seeds = Vec::new();
        for seed in generated.into_iter().chain(dictionary_sourced) {
            if seed.term.trim().is_empty() {
                continue;
            }
            let key = (seed.term.clone(), seed.lang, seed.seed_type.clone());
            if seen.insert(key) {
                seeds.push(seed);
            }
        }
        Self { seeds }
    }

    /// Run every generator over every root.
    pub fn generate(generators: &[Box<dyn FormGenerator>], roots: &[Root]) -> Vec<Seed> {
        generators
            .iter()
            .flat_map(|g| g.generate_all(roots))
            .collect()
    }

    /// Attested seeds for the given target languages, in language order.
    pub fn attested(source: &dyn LexiconSource, langs: &[Lang]) -> Result<Vec<Seed>> {
        let mut seeds = Vec::new();
        for &lang in langs {
            seeds.extend(source.attested(lang)?.iter().map(LexiconEntry::to_seed));
        }
        Ok(seeds)
    }

    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// (synthetic, attested) counts per language.
    pub fn counts_by_lang(&self) -> BTreeMap<Lang, (usize, usize)> {
        let mut counts = BTreeMap::new();
        for seed in &self.seeds {
            let c = counts.entry(seed.lang).or_insert((0, 0));
            if seed.seed_type.is_attested() {
                c.1 += 1;
            } else {
                c.0 += 1;
            }
        }
        counts
    }

    /// Load a seed CSV, skipping malformed rows. Duplicate rows collapse.
    pub fn load(path: &Path) -> Result<Self> {
        require_input(path)?;
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for (idx, row) in reader.deserialize::<Seed>().enumerate() {
            match row {
                Ok(seed) => rows.push(seed),
                Err(e) => warn!(row = idx + 1, error = %e, "skipping malformed seed row"),
            }
        }
        Ok(Self::merge(rows, Vec::new()))
    }

    /// Write `term,lemma,lang,type,pos`.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, |w| {
            let mut writer = csv::Writer::from_writer(w);
            for seed in &self.seeds {
                writer.serialize(seed)?;
            }
            writer.flush()?;
            Ok(())
        })
    }
}

impl IntoIterator for SeedRepository {
    type Item = Seed;
    type IntoIter = std::vec::IntoIter<Seed>;

    fn into_iter(self) -> Self::IntoIter {
        self.seeds.into_iter()
    }
}
