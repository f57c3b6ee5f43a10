use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::exchange_rate::ExchangeRateTable;
use crate::models::settings::DEFAULT_EXCHANGE_RATE_URL;
use super::traits::ExchangeRateProvider;

const PROVIDER_NAME: &str = "ExchangeRate-API";

/// exchangerate-api.com provider for the page's conversion table.
///
/// - **Free**: No API key for the `v4/latest` endpoint.
/// - **Base**: USD; every rate is "units of X per 1 USD".
/// - Fetched once per page mount, never refreshed.
pub struct ExchangeRateApiProvider {
    client: Client,
    url: String,
}

impl ExchangeRateApiProvider {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_EXCHANGE_RATE_URL, 30)
    }

    /// Provider for a custom endpoint (a mirror, or a local stub server).
    pub fn with_url(url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for ExchangeRateApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── exchangerate-api response types ─────────────────────────────────

#[derive(Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// Parse a `v4/latest` response body into a rate table.
pub fn parse_latest_rates(body: &str) -> Result<ExchangeRateTable, CoreError> {
    let resp: LatestRatesResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER_NAME.into(),
        message: format!("Failed to parse latest rates: {e}"),
    })?;

    if resp.rates.is_empty() {
        return Err(CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: "Response contained no rates".into(),
        });
    }

    Ok(ExchangeRateTable::from_rates(resp.rates))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ExchangeRateProvider for ExchangeRateApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn latest_rates(&self) -> Result<ExchangeRateTable, CoreError> {
        debug!(url = %self.url, "fetching exchange rates");

        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_latest_rates(&body)
    }
}
