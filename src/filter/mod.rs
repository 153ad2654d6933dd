//! Noise filter: the language-identity check followed by the semantic
//! false-positive check.

mod language;
mod semantic;

pub use language::{ENGLISH_STOPWORDS, LanguageFilter, LanguageFilterConfig};
pub use semantic::{HomonymField, HomonymRule, SemanticFilter, TriggerTable};

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::{JsonlRead, read_jsonl, write_jsonl};
use crate::error::Result;
use crate::model::{CleanCorpusEntry, MinedSentence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    OffTarget,
    FalsePositive,
}

/// Counts from one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub kept: usize,
    pub dropped_off_target: usize,
    pub dropped_false_positive: usize,
    pub malformed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    language: LanguageFilter,
    semantic: SemanticFilter,
}

impl NoiseFilter {
    pub fn new(language: LanguageFilter, semantic: SemanticFilter) -> Self {
        Self { language, semantic }
    }

    pub fn from_config(config: LanguageFilterConfig) -> Self {
        Self::new(LanguageFilter::new(config), SemanticFilter::default())
    }

    pub fn is_off_target(&self, sentence: &str) -> bool {
        self.language.is_off_target(sentence)
    }

    pub fn is_false_positive(&self, entry: &MinedSentence) -> bool {
        self.semantic.is_false_positive(entry)
    }

    pub fn verdict(&self, entry: &MinedSentence) -> Verdict {
        if self.is_off_target(&entry.sentence) {
            Verdict::OffTarget
        } else if self.is_false_positive(entry) {
            Verdict::FalsePositive
        } else {
            Verdict::Keep
        }
    }

    /// Entries that pass both filters, in input order.
    pub fn clean(&self, entries: Vec<MinedSentence>) -> (Vec<CleanCorpusEntry>, CleanReport) {
        let verdicts: Vec<Verdict> = entries.par_iter().map(|e| self.verdict(e)).collect();

        let mut report = CleanReport::default();
        let mut kept = Vec::new();
        for (entry, verdict) in entries.into_iter().zip(verdicts) {
            match verdict {
                Verdict::Keep => kept.push(CleanCorpusEntry::accept(entry)),
                Verdict::OffTarget => report.dropped_off_target += 1,
                Verdict::FalsePositive => report.dropped_false_positive += 1,
            }
        }
        report.kept = kept.len();
        (kept, report)
    }

    /// Clean a mined JSONL file into `output`. Malformed lines are counted
    /// and dropped.
    pub fn clean_file(&self, input: &Path, output: &Path) -> Result<CleanReport> {
        let JsonlRead { records, malformed } = read_jsonl::<MinedSentence>(input)?;
        let (kept, mut report) = self.clean(records);
        report.malformed = malformed;
        write_jsonl(output, &kept)?;
        info!(
            kept = report.kept,
            dropped_off_target = report.dropped_off_target,
            dropped_false_positive = report.dropped_false_positive,
            malformed = report.malformed,
            "cleaned {}",
            input.display()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Lang, Pos, Seed};
    use crate::morph::MorphType;
    use std::fs;

    fn entry(term: &str, lemma: &str, sentence: &str) -> MinedSentence {
        let seed = Seed::new(term, lemma, Lang::Asturian, MorphType::NounRaw, Pos::Noun);
        MinedSentence::from_seed(&seed, sentence, "Páxina")
    }

    #[test]
    fn test_language_checked_first() {
        let f = NoiseFilter::default();
        // off-target and a Bugs Bunny false positive at once
        let e = entry("bug", "bug", "Bugs Bunny is the rabbit of the show.");
        assert_eq!(f.verdict(&e), Verdict::OffTarget);
        let e = entry("bug", "bug", "Bugs Bunny ye un personaxe de dibuxos.");
        assert_eq!(f.verdict(&e), Verdict::FalsePositive);
        let e = entry("bug", "bug", "El programa tien un bug que fai que se zarre.");
        assert_eq!(f.verdict(&e), Verdict::Keep);
    }

    #[test]
    fn test_clean_keeps_order_and_counts() {
        let f = NoiseFilter::default();
        let entries: Vec<MinedSentence> = (0..40)
            .map(|i| match i % 4 {
                0 => entry("clic", "click", &format!("Fai clic equí pa siguir, pasu {i}.")),
                1 => entry("click", "click", "Users can click the button to proceed."),
                2 => entry("scan", "scan", "Scania fabrica camiones en Suecia."),
                _ => entry("chat", "chat", &format!("El chat del foru {i} ta abiertu.")),
            })
            .collect();
        let expected: Vec<String> = entries
            .iter()
            .filter(|e| e.term == "clic" || e.term == "chat")
            .map(|e| e.sentence.clone())
            .collect();

        let (kept, report) = f.clean(entries);
        let got: Vec<String> = kept.iter().map(|e| e.sentence.clone()).collect();
        assert_eq!(got, expected);
        assert_eq!(
            report,
            CleanReport {
                kept: 20,
                dropped_off_target: 10,
                dropped_false_positive: 10,
                malformed: 0,
            }
        );
    }

    #[test]
    fn test_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mined.jsonl");
        let output = dir.path().join("processed").join("clean.jsonl");
        let keep = entry("clic", "click", "Fai clic nel botón pa siguir.");
        let drop = entry("click", "click", "Users can click the button to proceed.");
        fs::write(
            &input,
            format!(
                "{}\nnot json\n\n{}\n",
                serde_json::to_string(&keep).unwrap(),
                serde_json::to_string(&drop).unwrap()
            ),
        )
        .unwrap();

        let report = NoiseFilter::default().clean_file(&input, &output).unwrap();
        assert_eq!(report.kept, 1);
        assert_eq!(report.dropped_off_target, 1);
        assert_eq!(report.malformed, 1);

        let read: JsonlRead<MinedSentence> = read_jsonl(&output).unwrap();
        assert_eq!(read.records, vec![keep]);
    }
}
