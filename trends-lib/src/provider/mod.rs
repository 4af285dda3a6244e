//! Remote trends provider
//!
//! The client talks to the provider through the [`TrendsProvider`] trait so
//! the retry and cache logic can be exercised without a network.

mod config;
mod google;
mod wire;

pub use config::ProviderConfig;
pub use google::GoogleTrendsProvider;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::RelatedQueries;
use crate::model::TrendsResult;
use crate::query::CATEGORY_ALL;
use crate::query::Query;

/// Timeframe used for related-query lookups.
pub const RELATED_TIMEFRAME: &str = "today 5-y";

/// Provider request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsRequest {
    /// Keywords to compare.
    pub keywords: Vec<String>,
    /// Provider category (0 = all categories).
    pub category: u32,
    /// Country code, empty for worldwide.
    pub geo: String,
    /// Provider timeframe string.
    pub timeframe: String,
}

impl TrendsRequest {
    /// Builds the interest-over-time payload of a query.
    pub fn from_query(query: &Query) -> Self {
        Self {
            keywords: query.keywords().to_vec(),
            category: CATEGORY_ALL,
            geo: query.country().to_string(),
            timeframe: query.timeframe().to_string(),
        }
    }

    /// Builds the payload of a related-queries lookup.
    pub fn related(keyword: impl Into<String>, geo: impl Into<String>) -> Self {
        Self {
            keywords: vec![keyword.into()],
            category: CATEGORY_ALL,
            geo: geo.into(),
            timeframe: RELATED_TIMEFRAME.to_string(),
        }
    }
}

/// A source of trends data.
///
/// Implementations perform exactly one remote exchange per call; pacing,
/// retries and caching belong to [`TrendsClient`](crate::TrendsClient).
#[async_trait]
pub trait TrendsProvider: Send + Sync {
    /// Fetches the interest-over-time table for the request.
    ///
    /// An empty table is returned as `Ok`; the caller decides what that means.
    async fn interest_over_time(&self, request: &TrendsRequest) -> Result<TrendsResult, ApiError>;

    /// Fetches top and rising queries related to the request's first keyword.
    async fn related_queries(&self, request: &TrendsRequest) -> Result<RelatedQueries, ApiError>;
}

impl std::fmt::Display for TrendsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let geo = if self.geo.is_empty() { "worldwide" } else { &self.geo };
        write!(
            f,
            "keywords=[{}] geo={} timeframe={}",
            self.keywords.join(", "),
            geo,
            self.timeframe
        )
    }
}
