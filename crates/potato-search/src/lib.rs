//! Web search client for prompt augmentation.
//!
//! Scrapes an HTML search endpoint and normalizes the markup into a short,
//! ordered list of results. Every failure degrades to
//! [`SearchOutcome::NoResults`]; nothing in this crate returns an error to
//! the caller at request time.

pub mod duckduckgo;
pub mod error;
pub mod provider;
pub mod types;

pub use duckduckgo::DuckDuckGoClient;
pub use error::SearchError;
pub use provider::SearchProvider;
pub use types::{SearchOutcome, SearchResult};
