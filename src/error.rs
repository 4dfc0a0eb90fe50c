use std::path::PathBuf;

use crate::vectorizer::side::Side;

/// Errors raised while building or ranking a collection.
///
/// Structural errors are detected before any ranking starts and abort the
/// whole batch. A zero-norm similarity is not an error, it scores 0.
#[derive(thiserror::Error, Debug)]
pub enum RankError {
    /// The collection does not describe contiguous 1-based ids, or a side is empty.
    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),

    /// A single document makes `ln(N)` zero, so document-side IDF has no defined value.
    #[error("degenerate normalization: document-side idf needs at least 2 documents, got {doc_num}")]
    DegenerateNormalization { doc_num: usize },

    /// A query asked for more documents than the corpus holds.
    #[error("query {query_id} requests {requested} documents but the corpus holds {doc_num}")]
    RequestExceedsCorpus {
        query_id: usize,
        requested: usize,
        doc_num: usize,
    },

    /// An id outside `1..=len` was used against a built engine.
    #[error("unknown {side} id {id} (valid range 1..={len})")]
    UnknownId { side: Side, id: usize, len: usize },

    /// Input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file content did not follow the expected layout.
    #[error("parse error at token {position}: {message}")]
    Parse { position: usize, message: String },

    /// A worker pool with the requested thread count could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, RankError>;

impl RankError {
    pub(crate) fn invalid_corpus(message: impl Into<String>) -> Self {
        RankError::InvalidCorpus(message.into())
    }
}
