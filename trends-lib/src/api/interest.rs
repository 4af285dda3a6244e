//! Interest over time

use tokio_util::sync::CancellationToken;

use crate::TrendsClient;
use crate::error::FetchError;
use crate::model::TrendsResult;
use crate::provider::TrendsRequest;
use crate::query::Query;
use crate::response::Response;

impl TrendsClient {
    /// Fetches the interest-over-time table of a normalized query.
    ///
    /// A result cached for an equivalent query (same keyword set, country and
    /// timeframe) is returned without contacting the provider. Otherwise the
    /// provider is called up to [`RetryConfig::max_attempts`] times, with the
    /// configured pacing before each attempt, and a successful table is
    /// cached.
    ///
    /// # Errors
    ///
    /// - [`FetchError::RateLimited`] if any attempt was answered with HTTP 429
    /// - [`FetchError::Empty`] if every attempt returned an empty table
    /// - [`FetchError::Exhausted`] with the last cause otherwise
    ///
    /// [`RetryConfig::max_attempts`]: crate::rate_limit::RetryConfig::max_attempts
    pub async fn fetch_interest_over_time(
        &self,
        query: &Query,
    ) -> Result<Response<TrendsResult>, FetchError> {
        self.fetch_interest_over_time_with_cancel(query, CancellationToken::new())
            .await
    }

    /// Same as [`fetch_interest_over_time`](Self::fetch_interest_over_time),
    /// returning [`FetchError::Cancelled`] as soon as `cancel` fires.
    ///
    /// The cache is left untouched by a cancelled fetch.
    pub async fn fetch_interest_over_time_with_cancel(
        &self,
        query: &Query,
        cancel: CancellationToken,
    ) -> Result<Response<TrendsResult>, FetchError> {
        let key = query.cache_key();
        let request = TrendsRequest::from_query(query);
        let provider = &self.inner.provider;

        self.fetch_cached(&key, &request, &cancel, || {
            provider.interest_over_time(&request)
        })
        .await
    }
}
