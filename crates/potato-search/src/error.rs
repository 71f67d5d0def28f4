/// Failures inside the search client.
///
/// These never cross the crate boundary at request time: the client logs
/// them and reports [`crate::SearchOutcome::NoResults`]. Only construction
/// of the client surfaces one directly.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("search request failed: {0}")]
    Request(String),
    #[error("search endpoint returned status {0}")]
    Status(u16),
    #[error("failed to parse search results: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Request(err.to_string())
    }
}
