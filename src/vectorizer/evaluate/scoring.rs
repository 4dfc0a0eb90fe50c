use std::fmt::{self, Debug, Display};

use log::debug;
use num::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{RankError, Result},
    utils::sort::{top_n, Ranked},
    vectorizer::{compute::compare::Compare, side::Side, tfidf::TFIDFEngine, RetrievalEngine},
};

/// A single ranked document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    /// 1-based document id
    pub doc_id: usize,
    /// cosine similarity to the query
    pub score: f64,
}

impl From<Ranked> for HitEntry {
    fn from(ranked: Ranked) -> Self {
        HitEntry { doc_id: ranked.id, score: ranked.score }
    }
}

/// Ranked documents of one query, best first.
/// Equal scores are ordered by ascending document id.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &HitEntry> {
        self.list.iter()
    }

    /// Document ids in rank order
    pub fn doc_ids(&self) -> Vec<usize> {
        self.list.iter().map(|hit| hit.doc_id).collect()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {}: {:.6}", hit.doc_id, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(f, "{:>4}. doc {} ({:.6})", rank + 1, hit.doc_id, hit.score)?;
        }
        Ok(())
    }
}

/// Ranking of one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// 1-based query id
    pub query_id: usize,
    pub hits: Hits,
}

impl<N, E, C> RetrievalEngine<N, E, C>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
    C: Compare<N> + Send + Sync,
{
    /// Cosine similarity of `query_id` against every document, in document id order
    pub fn similarities(&self, query_id: usize) -> Result<Vec<f64>> {
        let query = self.weights(Side::Query, query_id)?.as_slice();
        let scores: Vec<f64> = self.install(|| {
            self.weight_vectors(Side::Document)
                .par_iter()
                .map(|doc| C::cosine_similarity(query, doc.as_slice()))
                .collect()
        });
        Ok(scores)
    }

    /// Top `response_count` documents for `query_id`
    ///
    /// `0` gives an empty result and the document count gives a full ranking.
    pub fn rank_with(&self, query_id: usize, response_count: usize) -> Result<Hits> {
        let doc_num = self.doc_num();
        if response_count > doc_num {
            return Err(RankError::RequestExceedsCorpus {
                query_id,
                requested: response_count,
                doc_num,
            });
        }
        let scores = self.similarities(query_id)?;
        let ranked = scores
            .into_iter()
            .enumerate()
            .map(|(idx, score)| Ranked::new(idx + 1, score));
        Ok(Hits::new(top_n(ranked, response_count).into_iter().map(HitEntry::from).collect()))
    }

    /// Top documents for `query_id` using its own response count
    pub fn rank(&self, query_id: usize) -> Result<Hits> {
        let response_count = self.response_count(query_id)?;
        self.rank_with(query_id, response_count)
    }

    /// Rank every query in id order
    ///
    /// All response counts are checked first so a bad count yields no partial output.
    pub fn rank_all(&self) -> Result<Vec<QueryResult>> {
        let doc_num = self.doc_num();
        for query_id in 1..=self.query_num() {
            let requested = self.response_count(query_id)?;
            if requested > doc_num {
                return Err(RankError::RequestExceedsCorpus { query_id, requested, doc_num });
            }
        }

        (1..=self.query_num())
            .map(|query_id| {
                let hits = self.rank(query_id)?;
                debug!("query {} ranked {} documents", query_id, hits.len());
                Ok(QueryResult { query_id, hits })
            })
            .collect()
    }
}
