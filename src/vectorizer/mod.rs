pub mod collection;
pub mod compute;
pub mod corpus;
pub mod evaluate;
pub mod frequency;
pub mod side;
pub mod term;
pub mod tfidf;
pub mod vocabulary;

use std::sync::Arc;

use log::{debug, info};
use num::Float;
use rayon::{prelude::*, ThreadPool};
use serde::{Deserialize, Serialize};

use crate::{
    config::{self, EngineConfig},
    error::{RankError, Result},
    vectorizer::{
        collection::Collection,
        compute::compare::{Compare, DefaultCompare},
        corpus::Corpus,
        frequency::FrequencyTables,
        side::{PerSide, Side},
        term::TermFrequency,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        vocabulary::Vocabulary,
    },
};

/// IDF values of one side, in vocabulary order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IDFVector<N> {
    /// side these values are scaled for
    pub side: Side,
    /// one value per vocabulary term
    pub idf_vec: Vec<N>,
    /// document count the values were computed from
    pub doc_num: u64,
}

impl<N> IDFVector<N> {
    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }
}

/// Dense TF-IDF weights of one document or query.
/// Always as long as the vocabulary; absent terms hold zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeightVector<N> {
    side: Side,
    weights: Box<[N]>,
}

impl<N> WeightVector<N>
where
    N: Copy,
{
    pub fn new(side: Side, weights: Vec<N>) -> Self {
        Self { side, weights: weights.into_boxed_slice() }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.weights
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        self.weights.iter().copied()
    }
}

/// Batch TF-IDF retrieval engine
///
/// Built once from a validated [`Collection`]: counts terms, freezes the
/// vocabulary, computes both IDF vectors and every dense weight vector.
/// After construction it is immutable and ranking is a pure function of the
/// stored vectors.
///
/// `RetrievalEngine<N, E, C>` has the following generic parameters:
/// - `N`: weight scalar (`f32` or `f64`)
/// - `E`: TF-IDF calculation engine
/// - `C`: similarity implementation
#[derive(Debug, Clone)]
pub struct RetrievalEngine<N = f64, E = DefaultTFIDFEngine, C = DefaultCompare>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
    C: Compare<N> + Send + Sync,
{
    frequencies: FrequencyTables,
    corpus: Corpus,
    idf: PerSide<IDFVector<N>>,
    weights: PerSide<Vec<WeightVector<N>>>,
    response_counts: Vec<usize>,
    pool: Option<Arc<ThreadPool>>,
    _marker: std::marker::PhantomData<(E, C)>,
}

impl<N, E, C> RetrievalEngine<N, E, C>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
    C: Compare<N> + Send + Sync,
{
    /// Build on the global rayon pool
    pub fn build(collection: &Collection) -> Result<Self> {
        Self::build_with_config(collection, EngineConfig::default())
    }

    /// Build with explicit runtime settings
    ///
    /// Fails before any weight is computed when the collection is malformed,
    /// a response count exceeds the document count, or there is exactly one
    /// document.
    pub fn build_with_config(collection: &Collection, config: EngineConfig) -> Result<Self> {
        collection.validate()?;
        let doc_num = collection.doc_num();
        if doc_num == 1 {
            return Err(RankError::DegenerateNormalization { doc_num });
        }
        let pool = config.build_pool()?;
        let mut engine = config::install(pool.as_deref(), || Self::build_validated(collection))?;
        engine.pool = pool;
        Ok(engine)
    }

    fn build_validated(collection: &Collection) -> Result<Self> {
        let frequencies = FrequencyTables::build(collection);
        let corpus = Corpus::from_tables(frequencies.tables(Side::Document));
        let vocabulary = frequencies.vocabulary();

        let idf = PerSide::new(
            E::idf_vec(&corpus, vocabulary, Side::Query)?,
            E::idf_vec(&corpus, vocabulary, Side::Document)?,
        );
        debug!("computed idf over {} terms from {} documents", vocabulary.len(), corpus.get_doc_num());

        let weights = PerSide::new(
            Self::weigh_side(&frequencies, idf.get(Side::Query)),
            Self::weigh_side(&frequencies, idf.get(Side::Document)),
        );
        info!(
            "built {} document and {} query vectors of dimension {}",
            weights.document.len(),
            weights.query.len(),
            vocabulary.len()
        );

        Ok(Self {
            frequencies,
            corpus,
            idf,
            weights,
            response_counts: collection.response_counts(),
            pool: None,
            _marker: std::marker::PhantomData,
        })
    }

    /// Weight every id of `idf.side` in parallel, collected in id order
    fn weigh_side(frequencies: &FrequencyTables, idf: &IDFVector<N>) -> Vec<WeightVector<N>> {
        let vocabulary = frequencies.vocabulary();
        frequencies
            .tables(idf.side)
            .par_iter()
            .zip(frequencies.max_frequencies(idf.side).par_iter())
            .map(|(freq, &max_frequency)| E::weight_vec(freq, max_frequency, vocabulary, idf))
            .collect()
    }

    /// Run `op` on the engine's pool
    pub(crate) fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        config::install(self.pool.as_deref(), op)
    }
}

/// Inspection accessors
impl<N, E, C> RetrievalEngine<N, E, C>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
    C: Compare<N> + Send + Sync,
{
    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.frequencies.vocabulary()
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.frequencies.len(Side::Document)
    }

    #[inline]
    pub fn query_num(&self) -> usize {
        self.frequencies.len(Side::Query)
    }

    /// Raw term counts of the 1-based `id`
    pub fn frequencies(&self, side: Side, id: usize) -> Result<&TermFrequency> {
        self.frequencies.table(side, id)
    }

    /// Max frequency of the 1-based `id`
    pub fn max_frequency(&self, side: Side, id: usize) -> Result<u64> {
        self.frequencies.max_frequency(side, id)
    }

    #[inline]
    pub fn idf(&self, side: Side) -> &IDFVector<N> {
        self.idf.get(side)
    }

    /// Weight vector of the 1-based `id`
    pub fn weights(&self, side: Side, id: usize) -> Result<&WeightVector<N>> {
        let vectors = self.weights.get(side);
        id.checked_sub(1)
            .and_then(|idx| vectors.get(idx))
            .ok_or(RankError::UnknownId { side, id, len: vectors.len() })
    }

    /// All weight vectors of `side` in id order
    #[inline]
    pub fn weight_vectors(&self, side: Side) -> &[WeightVector<N>] {
        self.weights.get(side)
    }

    /// Requested result count of the 1-based `query_id`
    pub fn response_count(&self, query_id: usize) -> Result<usize> {
        query_id
            .checked_sub(1)
            .and_then(|idx| self.response_counts.get(idx))
            .copied()
            .ok_or(RankError::UnknownId {
                side: Side::Query,
                id: query_id,
                len: self.response_counts.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn collection() -> Collection {
        Collection::from_parts(
            vec![vec!["cat", "cat", "dog"], vec!["dog"]],
            vec![vec!["cat"]],
            &[1],
        )
    }

    #[test]
    fn builds_dense_vectors_for_every_id() {
        let engine: RetrievalEngine = RetrievalEngine::build(&collection()).unwrap();
        assert_eq!(engine.doc_num(), 2);
        assert_eq!(engine.query_num(), 1);
        for side in Side::ALL {
            for vector in engine.weight_vectors(side) {
                assert_eq!(vector.len(), engine.vocabulary().len());
                assert_eq!(vector.side(), side);
                assert!(vector.iter().all(|w| w >= 0.0));
            }
        }
    }

    #[test]
    fn document_weights_follow_tf_times_normalized_idf() {
        let engine: RetrievalEngine = RetrievalEngine::build(&collection()).unwrap();
        let doc1 = engine.weights(Side::Document, 1).unwrap().as_slice();
        assert!((doc1[0] - 1.0).abs() < EPS);
        assert!(doc1[1].abs() < EPS);
        assert!(engine.weights(Side::Document, 2).unwrap().iter().all(|w| w.abs() < EPS));
    }

    #[test]
    fn query_weights_are_damped() {
        let engine: RetrievalEngine = RetrievalEngine::build(&collection()).unwrap();
        let query = engine.weights(Side::Query, 1).unwrap().as_slice();
        assert!((query[0] - 0.5 * 2f64.ln()).abs() < EPS);
    }

    #[test]
    fn accessors_reject_out_of_range_ids() {
        let engine: RetrievalEngine = RetrievalEngine::build(&collection()).unwrap();
        assert!(matches!(engine.weights(Side::Document, 0), Err(RankError::UnknownId { .. })));
        assert!(matches!(engine.weights(Side::Query, 2), Err(RankError::UnknownId { .. })));
        assert!(engine.response_count(0).is_err());
        assert_eq!(engine.response_count(1).unwrap(), 1);
        assert_eq!(engine.max_frequency(Side::Document, 1).unwrap(), 2);
        assert_eq!(engine.frequencies(Side::Query, 1).unwrap().term_count("cat"), 1);
    }

    #[test]
    fn single_document_is_degenerate() {
        let collection = Collection::from_parts(vec![vec!["cat"]], vec![vec!["cat"]], &[1]);
        let result: Result<RetrievalEngine> = RetrievalEngine::build(&collection);
        let err = result.unwrap_err();
        assert!(matches!(err, RankError::DegenerateNormalization { doc_num: 1 }));
    }

    #[test]
    fn f32_engine_matches_f64() {
        let wide: RetrievalEngine<f64> = RetrievalEngine::build(&collection()).unwrap();
        let narrow: RetrievalEngine<f32> = RetrievalEngine::build(&collection()).unwrap();
        for (a, b) in wide
            .weights(Side::Document, 1)
            .unwrap()
            .iter()
            .zip(narrow.weights(Side::Document, 1).unwrap().iter())
        {
            assert!((a - b as f64).abs() < 1e-6);
        }
    }

    #[test]
    fn dedicated_pool_gives_same_weights() {
        let shared: RetrievalEngine = RetrievalEngine::build(&collection()).unwrap();
        let pooled: RetrievalEngine =
            RetrievalEngine::build_with_config(&collection(), EngineConfig::new().with_threads(2)).unwrap();
        assert_eq!(shared.weight_vectors(Side::Document), pooled.weight_vectors(Side::Document));
        assert_eq!(shared.weight_vectors(Side::Query), pooled.weight_vectors(Side::Query));
    }
}
