//! Request normalization
//!
//! Turns raw form input (keywords, country, date range) into a validated
//! [`Query`] with a provider timeframe and a stable [`CacheKey`].

mod key;
mod normalize;
mod timeframe;

pub use key::CacheKey;
pub use normalize::*;
pub use timeframe::Timeframe;

/// Maximum number of keywords the provider compares at once.
pub const MAX_KEYWORDS: usize = 5;

/// Longest date range accepted, in days.
pub const MAX_SPAN_DAYS: i64 = 365;

/// Provider category sent with every request (all categories).
pub const CATEGORY_ALL: u32 = 0;

/// Non-fatal issue found while normalizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// More than [`MAX_KEYWORDS`] keywords were supplied; only the first ones
    /// are kept.
    TooManyKeywords {
        /// How many non-blank keywords were supplied.
        supplied: usize,
        /// How many were kept.
        kept: usize,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyKeywords { supplied, kept } => write!(
                f,
                "At most {} keywords are allowed ({} supplied). Only the first {} are used.",
                MAX_KEYWORDS, supplied, kept
            ),
        }
    }
}

/// A validated interest-over-time query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    keywords: Vec<String>,
    country: String,
    timeframe: Timeframe,
    warnings: Vec<Warning>,
}

impl Query {
    /// The keywords, trimmed, in input order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Upper-cased country code.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// The requested date range.
    pub fn timeframe(&self) -> &Timeframe {
        &self.timeframe
    }

    /// Warnings raised while normalizing.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Deterministic cache key for this query.
    ///
    /// Keyword order does not matter.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::for_interest(&self.keywords, &self.country, &self.timeframe)
    }
}
