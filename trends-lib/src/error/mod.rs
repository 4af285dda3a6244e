//! Error types

mod api;
mod fetch;
mod validation;

pub use api::*;
pub use fetch::*;
pub use validation::*;

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The query was rejected before reaching the provider.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Provider error outside of a fetch (client construction, etc.).
    #[error(transparent)]
    Api(#[from] ApiError),
}
