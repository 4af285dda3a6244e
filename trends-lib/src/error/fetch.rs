//! Fetch error types

use super::ApiError;

/// Terminal failure of a fetch, after retries are exhausted.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// At least one attempt was answered with HTTP 429.
    #[error(
        "The trends provider is rate limiting requests. Wait a few minutes before retrying."
    )]
    RateLimited,

    /// Every attempt failed; carries the cause of the last one.
    #[error("Request failed after retries: {0}")]
    Exhausted(#[source] ApiError),

    /// Every attempt returned an empty table.
    #[error("No data found for these criteria")]
    Empty,

    /// The caller cancelled the fetch.
    #[error("Fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// Returns `true` if this is a rate limit failure.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// Returns the last provider error, if any.
    pub fn cause(&self) -> Option<&ApiError> {
        match self {
            Self::Exhausted(err) => Some(err),
            _ => None,
        }
    }
}
