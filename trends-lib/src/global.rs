//! Process-wide shared client

use std::sync::OnceLock;

use crate::TrendsClient;
use crate::error::ApiError;
use crate::provider::ProviderConfig;

static SHARED: OnceLock<TrendsClient> = OnceLock::new();

/// Returns the process-wide client, creating a Google Trends client with the
/// default configuration on first use.
///
/// All handles share one cache and one request limiter.
pub fn shared_client() -> Result<TrendsClient, ApiError> {
    if let Some(client) = SHARED.get() {
        return Ok(client.clone());
    }
    let client = TrendsClient::google(ProviderConfig::default())?;
    Ok(SHARED.get_or_init(|| client).clone())
}

/// Installs `client` as the process-wide client.
///
/// Must run before the first [`shared_client`] call. Returns the client back
/// if one is already installed.
pub fn init_shared_client(client: TrendsClient) -> Result<(), TrendsClient> {
    SHARED.set(client)
}
