use std::fmt;

use serde::{Deserialize, Serialize};

/// Which half of the collection a table or vector belongs to.
///
/// Queries and documents share the vocabulary but are weighted differently,
/// so every stage takes the side explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Query,
    Document,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Document, Side::Query];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Query => f.write_str("query"),
            Side::Document => f.write_str("document"),
        }
    }
}

/// A pair of values, one per side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub query: T,
    pub document: T,
}

impl<T> PerSide<T> {
    pub fn new(query: T, document: T) -> Self {
        Self { query, document }
    }

    #[inline]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Query => &self.query,
            Side::Document => &self.document,
        }
    }
}
