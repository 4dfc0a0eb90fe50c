use log::debug;
use rayon::prelude::*;

use crate::{
    error::{RankError, Result},
    vectorizer::{collection::Collection, side::{PerSide, Side}, term::TermFrequency, vocabulary::Vocabulary},
};

/// Per-id term counts for both sides, the max frequency of every id and the
/// vocabulary they span.
///
/// Index `i` of a side holds id `i + 1`.
#[derive(Debug, Clone)]
pub struct FrequencyTables {
    tables: PerSide<Vec<TermFrequency>>,
    max_frequencies: PerSide<Vec<u64>>,
    vocabulary: Vocabulary,
}

impl FrequencyTables {
    /// Count every token of `collection` and collect the vocabulary.
    ///
    /// Ids are counted in parallel; each table only depends on its own tokens.
    pub fn build(collection: &Collection) -> Self {
        let count_side = |side: Side| -> Vec<TermFrequency> {
            collection
                .token_lists(side)
                .into_par_iter()
                .map(TermFrequency::from)
                .collect()
        };
        let tables = PerSide::new(count_side(Side::Query), count_side(Side::Document));

        let vocabulary = Vocabulary::from_terms(
            tables.document.iter()
                .chain(tables.query.iter())
                .flat_map(|tf| tf.term_set_iter()),
        );

        let max_of = |tables: &[TermFrequency]| -> Vec<u64> {
            tables.par_iter().map(TermFrequency::max_frequency).collect()
        };
        let max_frequencies = PerSide::new(max_of(&tables.query), max_of(&tables.document));

        debug!(
            "counted {} documents and {} queries over {} distinct terms",
            tables.document.len(),
            tables.query.len(),
            vocabulary.len()
        );

        Self { tables, max_frequencies, vocabulary }
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Number of ids on `side`
    #[inline]
    pub fn len(&self, side: Side) -> usize {
        self.tables.get(side).len()
    }

    /// All tables of `side` in id order
    #[inline]
    pub fn tables(&self, side: Side) -> &[TermFrequency] {
        self.tables.get(side)
    }

    /// Table of the 1-based `id`
    pub fn table(&self, side: Side, id: usize) -> Result<&TermFrequency> {
        let idx = self.index(side, id)?;
        Ok(&self.tables.get(side)[idx])
    }

    /// Max frequency of the 1-based `id`, always at least 1
    pub fn max_frequency(&self, side: Side, id: usize) -> Result<u64> {
        let idx = self.index(side, id)?;
        Ok(self.max_frequencies.get(side)[idx])
    }

    /// Max frequencies of `side` in id order
    #[inline]
    pub fn max_frequencies(&self, side: Side) -> &[u64] {
        self.max_frequencies.get(side)
    }

    fn index(&self, side: Side, id: usize) -> Result<usize> {
        let len = self.len(side);
        if id == 0 || id > len {
            return Err(RankError::UnknownId { side, id, len });
        }
        Ok(id - 1)
    }
}
