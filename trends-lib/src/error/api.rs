//! Provider API error types

/// Errors that can occur while talking to the trends provider.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the provider.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Network error during the call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the provider response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// The provider answered but returned an empty table.
    #[error("No data found for these criteria")]
    NoData,
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the provider signalled "too many requests".
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_only_for_429() {
        assert!(ApiError::http(429, "Too Many Requests").is_rate_limited());
        assert!(!ApiError::http(500, "oops").is_rate_limited());
        assert!(!ApiError::NoData.is_rate_limited());
        assert!(!ApiError::parse("bad json").is_rate_limited());
    }
}
