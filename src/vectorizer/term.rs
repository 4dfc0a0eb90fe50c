use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::EMPTY_MAX_FREQUENCY;

/// TermFrequency struct
/// Raw occurrence counts of the terms of one document or query.
///
/// Only terms that occur are stored, so every stored count is at least 1 and
/// an absent term has count 0. Iteration follows first-occurrence order.
///
/// # Examples
/// ```
/// use tf_idf_ranker::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_terms(&["cat", "cat", "dog"]);
///
/// assert_eq!(term_freq.term_count("cat"), 2);
/// assert_eq!(term_freq.max_frequency(), 2);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where T: AsRef<str>
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterator over terms and their counts
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Iterator over the distinct terms
    #[inline]
    pub fn term_set_iter(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|s| s.as_str())
    }

    /// Occurrence count of `term`, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Count of the most frequent term.
    /// An empty table reports 1 so it can always be used as a divisor.
    #[inline]
    pub fn max_frequency(&self) -> u64 {
        self.term_count
            .values()
            .copied()
            .max()
            .unwrap_or(EMPTY_MAX_FREQUENCY)
    }
}
