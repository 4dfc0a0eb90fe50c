/// This crate is a batch TF-IDF ranking engine.
pub mod config;
pub mod error;
pub mod ingest;
pub mod utils;
pub mod vectorizer;

/// Error type and result alias
/// Every structural problem with the input (non-contiguous ids, a single
/// document, a response count larger than the corpus) is reported before any
/// ranking is produced.
pub use error::{RankError, Result};

/// Runtime configuration
/// Controls only scheduling (the size of the rayon pool); the scoring
/// constants are fixed in [`config`].
pub use config::EngineConfig;

/// Input collection
/// Documents and queries as already-normalized token sequences keyed by
/// 1-based id, plus the number of results requested per query.
pub use vectorizer::collection::Collection;

/// Query / document side selector
/// Every table, IDF vector and weight vector belongs to exactly one side.
pub use vectorizer::side::Side;

/// Term Frequency structure
/// Raw counts of the terms of one document or query, with the max frequency
/// used to normalize TF.
pub use vectorizer::term::TermFrequency;

/// Vocabulary
/// The frozen, lexicographically ordered set of all terms. A term's position
/// is its dimension in every vector.
pub use vectorizer::vocabulary::Vocabulary;

/// Document-frequency statistics used for IDF
pub use vectorizer::corpus::Corpus;

/// TF-IDF Retrieval Engine
/// The top-level struct of this crate. It turns a [`Collection`] into dense
/// TF-IDF vectors and ranks documents for each query by cosine similarity.
///
/// `RetrievalEngine<N, E, C>` has the following generic parameters:
/// - `N`: weight scalar (`f32` or `f64`, default `f64`)
/// - `E`: TF-IDF calculation engine (default `DefaultTFIDFEngine`)
/// - `C`: similarity implementation (default `DefaultCompare`)
pub use vectorizer::{IDFVector, RetrievalEngine, WeightVector};

/// TF IDF Calculation Engine Trait
/// Plug in a different weighting by implementing this trait.
/// `DefaultTFIDFEngine` uses max-normalized TF, `ln(N/nt)` IDF normalized by
/// `ln(N)` on the document side, and halves query TF.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Vector comparison trait and its default cosine implementation
pub use vectorizer::compute::compare::{Compare, DefaultCompare};

/// Search Hits and Hit Entry structures
/// - `Hits`: ranked documents of one query, best first, ties by lower id
/// - `HitEntry`: a document id and its similarity
/// - `QueryResult`: a query id with its hits
pub use vectorizer::evaluate::scoring::{HitEntry, Hits, QueryResult};
