//! Query validation errors

/// Errors raised while normalizing a query, before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No keyword is left after trimming.
    #[error("Enter at least one keyword")]
    Empty,

    /// The date range cannot be queried.
    #[error("Invalid date range: {reason}")]
    InvalidRange {
        /// What is wrong with the range.
        reason: String,
    },
}

impl ValidationError {
    /// Creates a new invalid range error.
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }
}
