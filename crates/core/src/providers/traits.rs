use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::exchange_rate::ExchangeRateTable;
use crate::models::transaction::TransactionPage;

/// Parameters of one `GET /transactions` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionsQuery {
    pub portfolio_id: i64,
    /// 1-indexed
    pub page: u32,
    /// One of 10, 25, 50
    pub per_page: u32,
}

/// Remote source of paged transaction records.
///
/// The HTTP client implements this; tests plug in mocks so the page
/// controller can run without a server.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TransactionsApi: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch one page of transactions for a portfolio.
    async fn fetch_page(&self, query: &TransactionsQuery) -> Result<TransactionPage, CoreError>;
}

/// Remote source of the latest USD-based exchange rates.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ExchangeRateProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Latest rates relative to USD.
    async fn latest_rates(&self) -> Result<ExchangeRateTable, CoreError>;
}
