use async_trait::async_trait;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::settings::DEFAULT_API_BASE_URL;
use crate::models::transaction::TransactionPage;
use super::traits::{TransactionsApi, TransactionsQuery};

const PROVIDER_NAME: &str = "Transactions API";

/// HTTP client for the portfolio backend's `GET /transactions` endpoint.
///
/// Response shape: `{ "data": [Transaction], "total": number }`.
pub struct HttpTransactionsApi {
    client: Client,
    base_url: String,
}

impl HttpTransactionsApi {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of the transactions listing endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/transactions", self.base_url)
    }
}

impl Default for HttpTransactionsApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, 30)
    }
}

/// Parse a `GET /transactions` response body.
pub fn parse_transactions_page(body: &str) -> Result<TransactionPage, CoreError> {
    serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER_NAME.into(),
        message: format!("Failed to parse transactions page: {e}"),
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionsApi for HttpTransactionsApi {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_page(&self, query: &TransactionsQuery) -> Result<TransactionPage, CoreError> {
        debug!(
            portfolio_id = query.portfolio_id,
            page = query.page,
            per_page = query.per_page,
            "fetching transactions"
        );

        let body = self
            .client
            .get(self.endpoint())
            .query(&[
                ("portfolio_id", query.portfolio_id.to_string()),
                ("page", query.page.to_string()),
                ("per_page", query.per_page.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_transactions_page(&body)
    }
}
