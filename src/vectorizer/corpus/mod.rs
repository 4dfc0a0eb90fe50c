use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// Document-frequency statistics of the document side.
///
/// Keeps the number of documents and, per term, how many documents contain
/// it. Queries never contribute here; IDF on both sides is measured against
/// the documents only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// number of documents added
    doc_num: u64,
    /// documents containing each term
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the document tables, one `add_set` per document.
    pub fn from_tables(documents: &[TermFrequency]) -> Self {
        let mut corpus = Self::new();
        for doc in documents {
            corpus.add_set(doc.term_set_iter());
        }
        corpus
    }

    /// Add one document's distinct terms
    pub fn add_set<'a, I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.doc_num += 1;
        for term in terms {
            if let Some(count) = self.term_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_counts.insert(term.into(), 1);
            }
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`, 0 for terms never seen in a document
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_documents_not_occurrences() {
        let docs = vec![
            TermFrequency::from(&["cat", "cat", "dog"][..]),
            TermFrequency::from(&["dog"][..]),
            TermFrequency::new(),
        ];
        let corpus = Corpus::from_tables(&docs);
        assert_eq!(corpus.get_doc_num(), 3);
        assert_eq!(corpus.get_term_count("cat"), 1);
        assert_eq!(corpus.get_term_count("dog"), 2);
        assert_eq!(corpus.get_term_count("fish"), 0);
    }
}
