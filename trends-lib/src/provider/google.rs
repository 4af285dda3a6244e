//! Google Trends provider

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use tokio::sync::OnceCell;
use url::Url;

use super::ProviderConfig;
use super::TrendsProvider;
use super::TrendsRequest;
use super::wire;
use crate::error::ApiError;
use crate::model::RelatedQueries;
use crate::model::TrendsResult;

const EXPLORE_PATH: &str = "/trends/api/explore";
const MULTILINE_PATH: &str = "/trends/api/widgetdata/multiline";
const RELATED_PATH: &str = "/trends/api/widgetdata/relatedsearches";

/// [`TrendsProvider`] backed by the public Google Trends endpoints.
///
/// Each call runs the explore request to obtain a widget token, then fetches
/// the widget data with it. The provider requires a session cookie, which is
/// obtained once from the home page and kept in the client's cookie store.
///
/// # Example
///
/// ```ignore
/// use trends_lib::provider::{GoogleTrendsProvider, ProviderConfig};
///
/// let provider = GoogleTrendsProvider::new(ProviderConfig::default())?;
/// ```
pub struct GoogleTrendsProvider {
    client: Client,
    config: ProviderConfig,
    session: OnceCell<()>,
}

impl GoogleTrendsProvider {
    /// Creates a provider with its own HTTP client.
    pub fn new(config: ProviderConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a provider around an existing HTTP client.
    ///
    /// The client should have a cookie store enabled.
    pub fn with_client(client: Client, config: ProviderConfig) -> Self {
        Self {
            client,
            config,
            session: OnceCell::new(),
        }
    }

    /// Returns the provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let base = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;

        let tz = self.config.tz.to_string();
        url.query_pairs_mut()
            .append_pair("hl", &self.config.hl)
            .append_pair("tz", &tz)
            .extend_pairs(params);
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String, ApiError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::http(status.as_u16(), wire::excerpt(&body)))
        }
    }

    /// Visits the home page once to pick up the session cookie.
    async fn ensure_session(&self, geo: &str) -> Result<(), ApiError> {
        self.session
            .get_or_try_init(|| async {
                let base = self.config.base_url.trim_end_matches('/');
                let mut url = Url::parse(&format!("{base}/"))
                    .map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
                url.query_pairs_mut().append_pair("geo", geo);

                debug!("Requesting provider session cookie");
                self.get_text(url).await.map(|_| ())
            })
            .await
            .map(|_| ())
    }

    /// Runs the explore request and returns the widget matching `prefix`.
    async fn explore(
        &self,
        request: &TrendsRequest,
        prefix: &str,
    ) -> Result<wire::Widget, ApiError> {
        self.ensure_session(&request.geo).await?;

        let req = wire::explore_request(request)?;
        let url = self.url(EXPLORE_PATH, &[("req", req.as_str())])?;
        let body = self.get_text(url).await?;
        wire::find_widget(&body, prefix)
    }

    async fn widget_data(&self, path: &str, widget: &wire::Widget) -> Result<String, ApiError> {
        let (req, token) = widget.request_and_token()?;
        let url = self.url(path, &[("req", req.as_str()), ("token", token.as_str())])?;
        self.get_text(url).await
    }
}

#[async_trait]
impl TrendsProvider for GoogleTrendsProvider {
    async fn interest_over_time(&self, request: &TrendsRequest) -> Result<TrendsResult, ApiError> {
        let widget = self.explore(request, wire::WIDGET_TIMESERIES).await?;
        let body = self.widget_data(MULTILINE_PATH, &widget).await?;
        wire::parse_timeline(&body, &request.keywords)
    }

    async fn related_queries(&self, request: &TrendsRequest) -> Result<RelatedQueries, ApiError> {
        let keyword = request
            .keywords
            .first()
            .ok_or_else(|| ApiError::parse("related queries need a keyword"))?;

        let widget = self.explore(request, wire::WIDGET_RELATED_QUERIES).await?;
        let body = self.widget_data(RELATED_PATH, &widget).await?;
        wire::parse_related(&body, keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base: &str) -> GoogleTrendsProvider {
        GoogleTrendsProvider::new(ProviderConfig::default().with_base_url(base)).unwrap()
    }

    #[test]
    fn test_url_carries_locale_and_params() {
        let provider = provider("https://trends.example.com/");
        let url = provider
            .url(EXPLORE_PATH, &[("req", r#"{"a":1}"#)])
            .unwrap();

        assert_eq!(url.path(), "/trends/api/explore");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("hl".to_string(), "fr-FR".to_string()),
                ("tz".to_string(), "360".to_string()),
                ("req".to_string(), r#"{"a":1}"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let provider = provider("not a url");
        assert!(matches!(
            provider.url(EXPLORE_PATH, &[]),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
