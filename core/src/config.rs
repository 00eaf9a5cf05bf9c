use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Ranking knobs. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on documents returned by a top-documents search.
    pub max_result_document_count: usize,
    /// Relevance scores closer than this are tied and ordered by rating.
    pub relevance_epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_result_document_count: MAX_RESULT_DOCUMENT_COUNT,
            relevance_epsilon: RELEVANCE_EPSILON,
        }
    }
}

impl SearchConfig {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_result_document_count == 0 {
            return Err(SearchError::InvalidConfig("max_result_document_count must be positive"));
        }
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(SearchError::InvalidConfig("relevance_epsilon must be a finite non-negative number"));
        }
        Ok(())
    }
}
