//! Configuration for catalog search.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Minimum similarity for a fuzzy match to be accepted.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Number of hits returned when the caller does not ask for a count.
pub const DEFAULT_TOP_K: usize = 5;

/// Configuration for relevance scoring and ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum similarity (0.0 to 1.0) for a fuzzy match.
    pub fuzzy_threshold: f64,

    /// Default number of ranked hits.
    pub default_top_k: usize,
}

impl SearchConfig {
    /// Set the default number of hits.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    /// Set the fuzzy acceptance threshold.
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(SearchError::InvalidArgument(format!(
                "fuzzy_threshold must be within [0, 1], got {}",
                self.fuzzy_threshold
            )));
        }
        if self.default_top_k == 0 {
            return Err(SearchError::InvalidArgument(
                "default_top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            default_top_k: DEFAULT_TOP_K,
        }
    }
}
