//! The search capability consumed by the chat orchestrator.

use async_trait::async_trait;

use crate::types::SearchOutcome;

/// A web search backend.
///
/// Implementations must not fail loudly: network, timeout and parse
/// problems are reported as [`SearchOutcome::NoResults`].
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query` and return at most the provider's configured number of
    /// results, in provider order.
    async fn search(&self, query: &str) -> SearchOutcome;
}
