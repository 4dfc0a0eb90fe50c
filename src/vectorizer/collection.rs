use std::collections::BTreeMap;

use crate::{error::{RankError, Result}, vectorizer::side::Side};

/// Input collection for a ranking run.
///
/// Holds the already-normalized token sequence of every document and query,
/// keyed by 1-based id, plus the number of results requested per query.
/// Nothing here is weighted yet; call [`Collection::validate`] (or build a
/// `RetrievalEngine`, which validates) before relying on the id layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    documents: BTreeMap<usize, Vec<String>>,
    queries: BTreeMap<usize, Vec<String>>,
    response_counts: BTreeMap<usize, usize>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from positional parts: element `i` gets id `i + 1`.
    pub fn from_parts<D, Q, T>(documents: D, queries: Q, response_counts: &[usize]) -> Self
    where
        D: IntoIterator,
        D::Item: IntoIterator<Item = T>,
        Q: IntoIterator,
        Q::Item: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut collection = Self::new();
        for (idx, tokens) in documents.into_iter().enumerate() {
            collection.add_document(idx + 1, tokens);
        }
        for (idx, tokens) in queries.into_iter().enumerate() {
            collection.add_query(idx + 1, tokens);
        }
        for (idx, &count) in response_counts.iter().enumerate() {
            collection.set_response_count(idx + 1, count);
        }
        collection
    }

    /// Append tokens to a document, registering the id if it is new.
    pub fn add_document<I, T>(&mut self, id: usize, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.documents
            .entry(id)
            .or_default()
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Append tokens to a query, registering the id if it is new.
    pub fn add_query<I, T>(&mut self, id: usize, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.queries
            .entry(id)
            .or_default()
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Set how many documents query `id` should return.
    pub fn set_response_count(&mut self, id: usize, count: usize) -> &mut Self {
        self.response_counts.insert(id, count);
        self
    }

    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    pub fn query_num(&self) -> usize {
        self.queries.len()
    }

    pub fn len(&self, side: Side) -> usize {
        match side {
            Side::Query => self.query_num(),
            Side::Document => self.doc_num(),
        }
    }

    /// Tokens of `id` on `side`, if registered.
    pub fn tokens(&self, side: Side, id: usize) -> Option<&[String]> {
        self.map(side).get(&id).map(Vec::as_slice)
    }

    /// Token sequences of one side in ascending id order.
    pub fn token_lists(&self, side: Side) -> Vec<&[String]> {
        self.map(side).values().map(Vec::as_slice).collect()
    }

    pub fn response_count(&self, query_id: usize) -> Option<usize> {
        self.response_counts.get(&query_id).copied()
    }

    /// Response counts in ascending query id order.
    pub fn response_counts(&self) -> Vec<usize> {
        self.response_counts.values().copied().collect()
    }

    /// Check the id layout and response counts.
    ///
    /// Both sides must be non-empty with ids exactly `1..=len`, and every
    /// query must carry a response count not larger than the document count.
    pub fn validate(&self) -> Result<()> {
        for side in Side::ALL {
            if self.len(side) == 0 {
                return Err(RankError::invalid_corpus(format!("no {side}s in collection")));
            }
            for (expected, &id) in (1..).zip(self.map(side).keys()) {
                if id != expected {
                    return Err(RankError::invalid_corpus(format!(
                        "{side} ids must be contiguous from 1: expected {expected}, found {id}"
                    )));
                }
            }
        }

        for &query_id in self.response_counts.keys() {
            if !self.queries.contains_key(&query_id) {
                return Err(RankError::invalid_corpus(format!(
                    "response count given for unknown query {query_id}"
                )));
            }
        }

        let doc_num = self.doc_num();
        for &query_id in self.queries.keys() {
            let requested = self.response_count(query_id).ok_or_else(|| {
                RankError::invalid_corpus(format!("query {query_id} has no response count"))
            })?;
            if requested > doc_num {
                return Err(RankError::RequestExceedsCorpus {
                    query_id,
                    requested,
                    doc_num,
                });
            }
        }
        Ok(())
    }

    fn map(&self, side: Side) -> &BTreeMap<usize, Vec<String>> {
        match side {
            Side::Query => &self.queries,
            Side::Document => &self.documents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Collection {
        Collection::from_parts(
            vec![vec!["cat", "cat", "dog"], vec!["dog"]],
            vec![vec!["cat"]],
            &[1],
        )
    }

    #[test]
    fn from_parts_assigns_one_based_ids() {
        let collection = small();
        assert_eq!(collection.doc_num(), 2);
        assert_eq!(collection.query_num(), 1);
        assert_eq!(collection.len(Side::Document), 2);
        assert_eq!(collection.tokens(Side::Document, 1).unwrap(), ["cat", "cat", "dog"]);
        assert_eq!(collection.tokens(Side::Document, 0), None);
        assert_eq!(collection.response_count(1), Some(1));
        assert!(collection.validate().is_ok());
    }

    #[test]
    fn add_document_appends_to_existing_id() {
        let mut collection = Collection::new();
        collection.add_document(1, ["a"]).add_document(1, ["b"]);
        assert_eq!(collection.tokens(Side::Document, 1).unwrap(), ["a", "b"]);
    }

    #[test]
    fn gap_in_ids_is_invalid() {
        let mut collection = small();
        collection.add_document(4, ["bird"]);
        let err = collection.validate().unwrap_err();
        assert!(matches!(err, RankError::InvalidCorpus(_)), "{err}");
    }

    #[test]
    fn id_zero_is_invalid() {
        let mut collection = Collection::new();
        collection
            .add_document(0, ["a"])
            .add_document(1, ["b"])
            .add_query(1, ["a"])
            .set_response_count(1, 1);
        assert!(matches!(collection.validate(), Err(RankError::InvalidCorpus(_))));
    }

    #[test]
    fn empty_sides_are_invalid() {
        let no_queries = Collection::from_parts(vec![vec!["a"], vec!["b"]], Vec::<Vec<&str>>::new(), &[]);
        assert!(matches!(no_queries.validate(), Err(RankError::InvalidCorpus(_))));

        let no_docs = Collection::from_parts(Vec::<Vec<&str>>::new(), vec![vec!["a"]], &[0]);
        assert!(matches!(no_docs.validate(), Err(RankError::InvalidCorpus(_))));
    }

    #[test]
    fn missing_or_stray_response_count_is_invalid() {
        let mut missing = Collection::new();
        missing.add_document(1, ["a"]).add_document(2, ["b"]).add_query(1, ["a"]);
        assert!(matches!(missing.validate(), Err(RankError::InvalidCorpus(_))));

        let mut stray = small();
        stray.set_response_count(9, 0);
        assert!(matches!(stray.validate(), Err(RankError::InvalidCorpus(_))));
    }

    #[test]
    fn oversized_request_is_rejected() {
        let mut collection = small();
        collection.set_response_count(1, 3);
        match collection.validate() {
            Err(RankError::RequestExceedsCorpus { query_id, requested, doc_num }) => {
                assert_eq!((query_id, requested, doc_num), (1, 3, 2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_token_sequences_are_allowed() {
        let collection = Collection::from_parts(
            vec![vec![], vec!["a"]],
            vec![Vec::<&str>::new()],
            &[2],
        );
        assert!(collection.validate().is_ok());
        assert!(collection.tokens(Side::Document, 1).unwrap().is_empty());
    }
}
