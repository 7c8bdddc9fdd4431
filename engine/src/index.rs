use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::corpus::{CorpusReader, RawDoc};
use crate::error::{EngineError, Result};
use crate::tokenizer::{Tokenizer, WordTokenizer};

pub type DocId = u32;

/// One indexed unit: a pre-parsed page with its tag-stripped body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub doc_id: DocId,
    pub title: String,
    pub content: String,
    pub url: String,
}

/// One (token, document) relevance signal. A document contributes at most
/// one posting per distinct token; repeated occurrences fold into the weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub token: String,
    pub weight: u32,
}

/// Postings for one token, in document build order (ascending doc_id). No
/// score ordering is applied at build time; that is the query layer's job.
pub type PostingList = Vec<Posting>;

/// Relative weight of a token occurrence by field. Title hits count for
/// more than body hits by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub title_weight: u32,
    pub body_weight: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            title_weight: 10,
            body_weight: 1,
        }
    }
}

/// Counters reported by a completed build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub indexed: usize,
    pub skipped: usize,
}

const PROGRESS_INTERVAL: usize = 50;

/// Forward index (documents by dense id) plus inverted index (token to
/// posting list).
///
/// Constructed explicitly and passed by reference to the build pipeline and
/// the query layer. Mutated only by [`IndexStore::build_all`]; afterwards the
/// store is read-only and a shared reference is safe across threads.
pub struct IndexStore {
    documents: Vec<Document>,
    postings: HashMap<String, PostingList>,
    tokenizer: Box<dyn Tokenizer>,
    config: IndexConfig,
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexStore {
    pub fn new() -> Self {
        Self::with_tokenizer(Box::new(WordTokenizer), IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self::with_tokenizer(Box::new(WordTokenizer), config)
    }

    pub fn with_tokenizer(tokenizer: Box<dyn Tokenizer>, config: IndexConfig) -> Self {
        IndexStore {
            documents: Vec::new(),
            postings: HashMap::new(),
            tokenizer,
            config,
        }
    }

    /// Build the full index from a line-oriented corpus file.
    ///
    /// A store that already holds documents is reset once the source opens,
    /// so doc_id assignment restarts at 0; a source that cannot be opened
    /// leaves the store untouched. Malformed records are logged, counted and
    /// skipped; they never fail the build.
    pub fn build_all<P: AsRef<Path>>(&mut self, source: P) -> Result<BuildStats> {
        let reader = CorpusReader::open(source)?;
        self.documents.clear();
        self.postings.clear();

        let mut stats = BuildStats::default();
        for line in reader {
            let line = line?;
            let doc_id = match self.build_forward(&line) {
                Some(doc_id) => doc_id,
                None => {
                    stats.skipped += 1;
                    continue;
                }
            };
            self.build_inverted(doc_id);
            stats.indexed += 1;
            if stats.indexed % PROGRESS_INTERVAL == 0 {
                info!(indexed = stats.indexed, "index build progress");
            }
        }

        info!(
            indexed = stats.indexed,
            skipped = stats.skipped,
            tokens = self.postings.len(),
            "index build complete"
        );
        Ok(stats)
    }

    /// Parse one corpus line and append it to the document store. The
    /// returned doc_id equals the document's position and is the only handle
    /// that stays valid as the store grows.
    fn build_forward(&mut self, line: &str) -> Option<DocId> {
        let raw = match RawDoc::parse(line) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "skipping corpus record");
                return None;
            }
        };
        let doc_id = self.documents.len() as DocId;
        self.documents.push(Document {
            doc_id,
            title: raw.title,
            content: raw.content,
            url: raw.url,
        });
        Some(doc_id)
    }

    /// Tokenize the document's title and content separately, then append one
    /// weighted posting per distinct token.
    fn build_inverted(&mut self, doc_id: DocId) {
        #[derive(Default)]
        struct FieldCounts {
            title: u32,
            body: u32,
        }

        let doc = &self.documents[doc_id as usize];
        let mut counts: HashMap<String, FieldCounts> = HashMap::new();
        for token in self.tokenizer.tokenize(&doc.title) {
            counts.entry(token).or_default().title += 1;
        }
        for token in self.tokenizer.tokenize(&doc.content) {
            counts.entry(token).or_default().body += 1;
        }

        for (token, n) in counts {
            let weight = self.config.title_weight * n.title + self.config.body_weight * n.body;
            let posting = Posting {
                doc_id,
                token: token.clone(),
                weight,
            };
            self.postings.entry(token).or_default().push(posting);
        }
    }

    /// Bounds-checked forward lookup.
    pub fn get_document(&self, doc_id: DocId) -> Result<&Document> {
        self.documents
            .get(doc_id as usize)
            .ok_or(EngineError::DocIdOutOfRange {
                doc_id,
                len: self.documents.len(),
            })
    }

    /// Inverted lookup. A token that was never indexed is `TokenNotFound`;
    /// lookups never insert an empty list.
    pub fn get_posting_list(&self, token: &str) -> Result<&[Posting]> {
        self.postings
            .get(token)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::TokenNotFound(token.to_string()))
    }

    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct tokens across all indexed documents.
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// The segmentation policy this store was built with. A query layer
    /// must tokenize queries the same way the corpus was tokenized.
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }
}
