//! Related queries

use crate::TrendsClient;
use crate::error::Error;
use crate::error::ValidationError;
use crate::model::RelatedQueries;
use crate::provider::TrendsRequest;
use crate::query::CacheKey;
use crate::response::Response;

impl TrendsClient {
    /// Fetches the top and rising queries related to `keyword` in a country
    /// over the last five years.
    ///
    /// Shares the cache and the retry policy of
    /// [`fetch_interest_over_time`](Self::fetch_interest_over_time).
    pub async fn fetch_related_queries(
        &self,
        keyword: &str,
        country: &str,
    ) -> Result<Response<RelatedQueries>, Error> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ValidationError::Empty.into());
        }

        let country = country.trim().to_ascii_uppercase();
        let key = CacheKey::for_related(keyword, &country);
        let request = TrendsRequest::related(keyword, country);
        let provider = &self.inner.provider;
        let cancel = tokio_util::sync::CancellationToken::new();

        let response = self
            .fetch_cached(&key, &request, &cancel, || provider.related_queries(&request))
            .await?;
        Ok(response)
    }
}
