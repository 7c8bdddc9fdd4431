use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::{MalformedRecord, Result};

/// Separator between the title, content and url fields of one corpus line.
/// A non-printable control byte the upstream corpus parser guarantees never
/// occurs inside real text.
pub const FIELD_SEPARATOR: char = '\u{3}';

/// One parsed corpus record, before a doc_id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDoc {
    pub title: String,
    pub content: String,
    pub url: String,
}

impl RawDoc {
    /// Split a corpus line on [`FIELD_SEPARATOR`]. Any field count other
    /// than exactly three rejects that line only, not the build.
    pub fn parse(line: &str) -> std::result::Result<RawDoc, MalformedRecord> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        match fields.as_slice() {
            [title, content, url] => Ok(RawDoc {
                title: (*title).to_string(),
                content: (*content).to_string(),
                url: (*url).to_string(),
            }),
            _ => Err(MalformedRecord { found: fields.len() }),
        }
    }
}

/// Lazy line reader over a corpus file, one raw record per physical line.
/// Finite and non-restartable; reopen to iterate again.
pub struct CorpusReader {
    lines: Lines<BufReader<File>>,
}

impl CorpusReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<CorpusReader> {
        let file = File::open(path)?;
        Ok(CorpusReader {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for CorpusReader {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}
