use std::collections::BTreeSet;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Frozen, lexicographically ordered set of every term in the collection.
///
/// A term's position is its dimension in every IDF and weight vector, on
/// both sides. There is no way to add a term after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    /// Collect and sort the distinct terms yielded by `terms`.
    pub fn from_terms<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sorted: BTreeSet<&str> = terms.into_iter().collect();
        Self {
            terms: sorted.into_iter().map(Box::from).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Dimension of `term`
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at dimension `idx`
    #[inline]
    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get_index(idx).map(|t| &**t)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Terms in dimension order
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.terms.iter().map(|t| &**t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_are_sorted_and_deduplicated() {
        let vocab = Vocabulary::from_terms(["dog", "cat", "dog", "ant"]);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["ant", "cat", "dog"]);
        assert_eq!(vocab.index_of("cat"), Some(1));
        assert_eq!(vocab.index_of("eel"), None);
        assert_eq!(vocab.term(2), Some("dog"));
    }

    #[test]
    fn order_is_independent_of_insertion_order() {
        let a = Vocabulary::from_terms(["b", "a", "c"]);
        let b = Vocabulary::from_terms(["c", "b", "a", "a"]);
        assert_eq!(a, b);
    }
}
