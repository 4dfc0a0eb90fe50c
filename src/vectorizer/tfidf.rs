use num::{Float, NumCast};

use crate::{
    config::QUERY_TF_DAMPING,
    error::{RankError, Result},
    vectorizer::{corpus::Corpus, side::Side, term::TermFrequency, vocabulary::Vocabulary, IDFVector, WeightVector},
};

/// TF-IDF calculation engine
/// Turns document-frequency statistics into IDF vectors and term counts into
/// dense weight vectors. Both are laid out in vocabulary order.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// Build the IDF vector of `side`
    /// # Arguments
    /// * `corpus` - document-frequency statistics
    /// * `vocabulary` - dimension order
    /// * `side` - which side the vector is for
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary, side: Side) -> Result<IDFVector<N>>;

    /// Build the dense weight vector of one document or query
    /// # Arguments
    /// * `freq` - raw counts of the id
    /// * `max_frequency` - largest count of the id, at least 1
    /// * `vocabulary` - dimension order
    /// * `idf` - IDF vector of the same side
    fn weight_vec(
        freq: &TermFrequency,
        max_frequency: u64,
        vocabulary: &Vocabulary,
        idf: &IDFVector<N>,
    ) -> WeightVector<N>;
}

/// Default TF-IDF engine
///
/// - `TF = count / max_frequency`
/// - `IDF = ln(N / nt)`, divided by `ln(N)` on the document side
/// - query weights are additionally scaled by [`QUERY_TF_DAMPING`]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }

    /// IDF of a term found in `doc_freq` of `doc_num` documents.
    /// A term missing from every document counts as found once.
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64, side: Side) -> Result<f64> {
        if doc_num == 0 {
            return Err(RankError::invalid_corpus("idf requested for an empty document set"));
        }
        let nt = doc_freq.max(1) as f64;
        let n = doc_num as f64;
        let raw = (n / nt).ln();
        match side {
            Side::Query => Ok(raw),
            Side::Document => {
                if doc_num == 1 {
                    return Err(RankError::DegenerateNormalization { doc_num: 1 });
                }
                Ok(raw / n.ln())
            }
        }
    }

    /// Normalized term frequency, in `[0, 1]`
    #[inline]
    pub fn tf_calc(count: u64, max_frequency: u64) -> f64 {
        if count == 0 {
            return 0.0;
        }
        count as f64 / max_frequency.max(1) as f64
    }

    /// Extra factor applied to term frequency on `side`
    #[inline]
    pub fn tf_scale(side: Side) -> f64 {
        match side {
            Side::Query => QUERY_TF_DAMPING,
            Side::Document => 1.0,
        }
    }
}

#[inline]
fn cast<N: Float>(value: f64) -> N {
    <N as NumCast>::from(value).unwrap_or_else(N::zero)
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary, side: Side) -> Result<IDFVector<N>> {
        let doc_num = corpus.get_doc_num();
        let mut idf_vec = Vec::with_capacity(vocabulary.len());
        for term in vocabulary.iter() {
            let idf = Self::idf_calc(doc_num, corpus.get_term_count(term), side)?;
            idf_vec.push(cast(idf));
        }
        Ok(IDFVector { side, idf_vec, doc_num })
    }

    fn weight_vec(
        freq: &TermFrequency,
        max_frequency: u64,
        vocabulary: &Vocabulary,
        idf: &IDFVector<N>,
    ) -> WeightVector<N> {
        let scale = Self::tf_scale(idf.side);
        let mut weights = vec![N::zero(); vocabulary.len()];
        for (term, count) in freq.iter() {
            // terms outside the vocabulary have no dimension
            let Some(idx) = vocabulary.index_of(term) else { continue };
            let tf = scale * Self::tf_calc(count, max_frequency);
            weights[idx] = cast::<N>(tf) * idf.idf_vec[idx];
        }
        WeightVector::new(idf.side, weights)
    }
}
