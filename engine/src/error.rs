use std::io;

use thiserror::Error;

use crate::index::DocId;

/// Errors surfaced by the index engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The corpus source could not be opened or read. Fatal to the build
    /// call that hit it; documents built before the failure stay valid.
    #[error("corpus I/O error: {0}")]
    Io(#[from] io::Error),

    /// A forward lookup past the end of the document store.
    #[error("doc_id {doc_id} out of range, store holds {len} documents")]
    DocIdOutOfRange { doc_id: DocId, len: usize },

    /// A posting-list lookup for a token that was never indexed. Distinct
    /// from a token with no results.
    #[error("token not indexed: {0:?}")]
    TokenNotFound(String),
}

/// A corpus line that did not split into exactly three fields. Absorbed by
/// the build loop (logged and counted), never a build failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected 3 fields, found {found}")]
pub struct MalformedRecord {
    pub found: usize,
}

pub type Result<T> = std::result::Result<T, EngineError>;
