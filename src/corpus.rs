//! JSON Lines persistence for mined and cleaned corpora.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::persist::{require_input, write_atomic};

/// Records read from a JSONL file, plus the number of lines that did not
/// decode. Blank lines are neither.
#[derive(Debug)]
pub struct JsonlRead<T> {
    pub records: Vec<T>,
    pub malformed: usize,
}

pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<JsonlRead<T>> {
    require_input(path)?;
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut malformed = 0;
    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line,
            Err(e) => {
                malformed += 1;
                debug!(path = %path.display(), line = idx + 1, error = %e, "skipping undecodable line");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                malformed += 1;
                debug!(path = %path.display(), line = idx + 1, error = %e, "skipping malformed record");
            }
        }
    }
    Ok(JsonlRead { records, malformed })
}

/// One record per line, UTF-8, replacing `path` atomically.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    write_atomic(path, |w| {
        for record in records {
            serde_json::to_writer(&mut *w, record)?;
            w.write_all(b"\n")?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CleanCorpusEntry, Lang, MinedSentence, Pos, Seed};
    use crate::morph::{MorphType, SeedType};
    use std::fs;

    fn sample() -> Vec<MinedSentence> {
        let a = Seed::new("κλικάρω", "click", Lang::Greek, MorphType::VerbMorphAro, Pos::Verb);
        let b = Seed::new("futbol", "futbol", Lang::Basque, SeedType::attested("en"), Pos::Unknown);
        vec![
            MinedSentence::from_seed(&a, "Πρέπει να κλικάρω εδώ για να συνεχίσω.", "Ποντίκι"),
            MinedSentence::from_seed(&b, "Futbol taldea \"Athletic\" da.", "Athletic"),
        ]
    }

    #[test]
    fn test_clean_entries_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed").join("clean.jsonl");
        let entries: Vec<CleanCorpusEntry> = sample().into_iter().map(CleanCorpusEntry::accept).collect();
        write_jsonl(&path, &entries).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        // non-ASCII stays unescaped
        assert!(text.contains("κλικάρω"));

        let read: JsonlRead<CleanCorpusEntry> = read_jsonl(&path).unwrap();
        assert_eq!(read.records, entries);
        assert_eq!(read.malformed, 0);
    }

    #[test]
    fn test_malformed_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mined.jsonl");
        let good = serde_json::to_string(&sample()[0]).unwrap();
        fs::write(&path, format!("{good}\n\n{{not json\n{{\"term\":\"x\"}}\n{good}\n")).unwrap();

        let read: JsonlRead<MinedSentence> = read_jsonl(&path).unwrap();
        assert_eq!(read.records.len(), 2);
        assert_eq!(read.malformed, 2);
    }

    #[test]
    fn test_invalid_utf8_line_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mined.jsonl");
        let good = serde_json::to_string(&sample()[1]).unwrap();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(good.as_bytes());
        bytes.extend_from_slice(b"\n{\"term\":\"\xff\xfe\"}\r\n");
        bytes.extend_from_slice(good.as_bytes());
        bytes.extend_from_slice(b"\r\n");
        fs::write(&path, bytes).unwrap();

        let read: JsonlRead<MinedSentence> = read_jsonl(&path).unwrap();
        assert_eq!(read.records.len(), 2);
        assert_eq!(read.records[1].term, "futbol");
        assert_eq!(read.malformed, 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_jsonl::<MinedSentence>(&dir.path().join("absent.jsonl")).is_err());
    }
}
