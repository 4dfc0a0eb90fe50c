//! Ranking constants and runtime configuration.
//!
//! The constants are part of the scoring contract and are not tunable at
//! runtime. Runtime settings only affect how the work is scheduled.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

/// Scale applied to query-side normalized term frequency.
pub const QUERY_TF_DAMPING: f64 = 0.5;

/// Max frequency reported for a document or query with no terms.
pub const EMPTY_MAX_FREQUENCY: u64 = 1;

/// Largest entry count a documents or queries file may declare.
pub const MAX_DECLARED_ENTRIES: usize = 1 << 24;

/// Characters removed from every word during ingestion.
pub const STRIPPED_PUNCTUATION: &[char] = &[',', ';', ':', '.', '?', '!', '\'', '"', ' ', '\n'];

/// Runtime settings for building and ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Worker threads for the parallel phases.
    /// `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Build the dedicated pool, if one is configured.
    pub fn build_pool(&self) -> crate::Result<Option<Arc<ThreadPool>>> {
        match self.threads {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
                Ok(Some(Arc::new(pool)))
            }
            None => Ok(None),
        }
    }
}

/// Run `op` on `pool`, or on the current pool when `None`.
pub(crate) fn install<R, F>(pool: Option<&ThreadPool>, op: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    match pool {
        Some(pool) => pool.install(op),
        None => op(),
    }
}
