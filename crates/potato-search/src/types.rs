//! Result types produced by search providers.

use serde::{Deserialize, Serialize};

/// A single normalized search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Outcome of one search call.
///
/// `Results` always holds at least one entry, in provider order. A search
/// that was never attempted is not represented here; callers model that as
/// the absence of an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Results(Vec<SearchResult>),
    NoResults,
}

impl SearchOutcome {
    /// Wrap a result list, mapping an empty list to `NoResults`.
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        if results.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Results(results)
        }
    }

    /// The results, or an empty slice for `NoResults`.
    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchOutcome::Results(results) => results,
            SearchOutcome::NoResults => &[],
        }
    }

    pub fn has_results(&self) -> bool {
        matches!(self, SearchOutcome::Results(_))
    }
}
