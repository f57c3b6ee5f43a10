pub mod errors;
pub mod logging;
pub mod models;
pub mod providers;
pub mod services;
pub mod stores;

use models::{
    enriched::EnrichedTransaction,
    exchange_rate::ExchangeRateTable,
    page::{DisplayMode, PageSize, PageState},
    settings::Settings,
    transaction::{Transaction, TransactionPage},
    view::PageView,
};
use providers::{
    exchange_rate_api::ExchangeRateApiProvider,
    traits::{ExchangeRateProvider, TransactionsApi, TransactionsQuery},
    transactions_api::HttpTransactionsApi,
};
use services::{enrichment_service::EnrichmentService, view_service::ViewService};
use stores::{modal::ModalStore, portfolio::SelectedPortfolio, Stores};
use tracing::{debug, error, info, warn};

use errors::CoreError;

/// A transactions request handed out by `TransactionsPage::begin_fetch`.
///
/// The sequence number ties the eventual response back to the request so a
/// response overtaken by a newer request can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionsRequest {
    pub seq: u64,
    pub query: TransactionsQuery,
}

/// Controller of the transactions page.
/// Owns the page state and the loaded rows, talks to both APIs and derives
/// the `PageView` to render.
#[must_use]
pub struct TransactionsPage {
    transactions_api: Box<dyn TransactionsApi>,
    rate_provider: Box<dyn ExchangeRateProvider>,
    stores: Stores,
    state: PageState,
    transactions: Vec<Transaction>,
    exchange_rates: ExchangeRateTable,
    enrichment_service: EnrichmentService,
    view_service: ViewService,
    /// Sequence number of the most recently issued transactions request.
    latest_request: u64,
}

impl std::fmt::Debug for TransactionsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionsPage")
            .field("transactions_api", &self.transactions_api.name())
            .field("rate_provider", &self.rate_provider.name())
            .field("state", &self.state)
            .field("rows", &self.transactions.len())
            .field("rates", &self.exchange_rates.len())
            .field("latest_request", &self.latest_request)
            .finish()
    }
}

impl TransactionsPage {
    /// Create a page over the given API clients and stores.
    pub fn new(
        transactions_api: Box<dyn TransactionsApi>,
        rate_provider: Box<dyn ExchangeRateProvider>,
        stores: Stores,
        settings: &Settings,
    ) -> Self {
        Self {
            transactions_api,
            rate_provider,
            stores,
            state: PageState::new(settings.default_page_size, settings.default_display_mode),
            transactions: Vec::new(),
            exchange_rates: ExchangeRateTable::default(),
            enrichment_service: EnrichmentService::new(),
            view_service: ViewService::new(),
            latest_request: 0,
        }
    }

    /// Create a page wired to the real HTTP clients described by `settings`.
    pub fn from_settings(settings: &Settings, stores: Stores) -> Self {
        let transactions_api =
            HttpTransactionsApi::new(settings.api_base_url.clone(), settings.request_timeout_secs);
        let rate_provider = ExchangeRateApiProvider::with_url(
            settings.exchange_rate_url.clone(),
            settings.request_timeout_secs,
        );
        Self::new(
            Box::new(transactions_api),
            Box::new(rate_provider),
            stores,
            settings,
        )
    }

    // ── Lifecycle & Fetching ────────────────────────────────────────

    /// First load: exchange rates once, then the current page.
    /// Failures are logged and leave the defaults in place.
    pub async fn mount(&mut self) {
        if let Err(e) = self.fetch_exchange_rates().await {
            debug!(error = %e, "mount continues with the default rate table");
        }
        if let Err(e) = self.fetch_transactions().await {
            debug!(error = %e, "mount continues without transactions");
        }
    }

    /// Load the rate table. On failure the table keeps its previous value
    /// (`{USD: 1}` before the first success).
    pub async fn fetch_exchange_rates(&mut self) -> Result<(), CoreError> {
        match self.rate_provider.latest_rates().await {
            Ok(rates) => {
                info!(provider = self.rate_provider.name(), count = rates.len(), "exchange rates loaded");
                self.exchange_rates = rates;
                Ok(())
            }
            Err(e) => {
                error!(provider = self.rate_provider.name(), error = %e, "failed to load exchange rates");
                Err(e)
            }
        }
    }

    /// Fetch the current page for the selected portfolio and apply it.
    ///
    /// Without a selected portfolio the list is cleared and nothing is sent.
    /// A failed request is logged and leaves the loaded rows untouched.
    pub async fn fetch_transactions(&mut self) -> Result<(), CoreError> {
        let Some(request) = self.begin_fetch() else {
            return Ok(());
        };
        let result = self.transactions_api.fetch_page(&request.query).await;
        self.apply_fetch(request, result).map(|_| ())
    }

    /// First half of a transactions fetch: issue a new request for the
    /// current portfolio/page/page size, superseding any in flight.
    ///
    /// Returns `None` (after clearing the rows) when no portfolio is selected.
    pub fn begin_fetch(&mut self) -> Option<TransactionsRequest> {
        self.latest_request += 1;

        let Some(portfolio) = self.stores.portfolio.selected() else {
            self.transactions.clear();
            self.state.total_count = 0;
            return None;
        };

        Some(TransactionsRequest {
            seq: self.latest_request,
            query: TransactionsQuery {
                portfolio_id: portfolio.portfolio_id,
                page: self.state.page,
                per_page: self.state.page_size.get(),
            },
        })
    }

    /// Second half of a transactions fetch: apply the response to `request`.
    ///
    /// Returns `Ok(false)` when a newer request has been issued since, in which
    /// case the response is dropped whether it succeeded or not.
    pub fn apply_fetch(
        &mut self,
        request: TransactionsRequest,
        result: Result<TransactionPage, CoreError>,
    ) -> Result<bool, CoreError> {
        if request.seq != self.latest_request {
            warn!(
                seq = request.seq,
                latest = self.latest_request,
                "dropping response of superseded transactions request"
            );
            return Ok(false);
        }

        match result {
            Ok(page) => {
                debug!(
                    portfolio_id = request.query.portfolio_id,
                    page = request.query.page,
                    rows = page.data.len(),
                    "transactions loaded"
                );
                self.state.total_count = page.total_count();
                self.transactions = page.data;
                Ok(true)
            }
            Err(e) => {
                error!(
                    provider = self.transactions_api.name(),
                    portfolio_id = request.query.portfolio_id,
                    page = request.query.page,
                    error = %e,
                    "failed to load transactions"
                );
                Err(e)
            }
        }
    }

    // ── Stores ──────────────────────────────────────────────────────

    /// Switch portfolios. A new portfolio starts on page 1 with nothing
    /// selected; the list is re-fetched if the selection actually changed.
    pub async fn select_portfolio(
        &mut self,
        portfolio: Option<SelectedPortfolio>,
    ) -> Result<(), CoreError> {
        if !self.stores.portfolio.set_selected(portfolio) {
            return Ok(());
        }
        self.state.page = 1;
        self.state.selection.clear();
        self.state.single_delete_target = None;
        self.fetch_transactions().await
    }

    /// Change the currency converted mode renders into.
    pub fn set_preferred_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        self.stores.currency.set_selected(currency)
    }

    #[must_use]
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    #[must_use]
    pub fn modal(&self) -> &ModalStore {
        &self.stores.modal
    }

    // ── Pagination ──────────────────────────────────────────────────

    /// Go to `page`, clamped into `[1, last page]`. Re-fetches on change.
    pub async fn set_page(&mut self, page: u32) -> Result<(), CoreError> {
        let target = self.state.pagination().clamp(page);
        if target == self.state.page {
            return Ok(());
        }
        self.state.page = target;
        self.fetch_transactions().await
    }

    pub async fn first_page(&mut self) -> Result<(), CoreError> {
        self.set_page(1).await
    }

    pub async fn previous_page(&mut self) -> Result<(), CoreError> {
        self.set_page(self.state.page.saturating_sub(1)).await
    }

    pub async fn next_page(&mut self) -> Result<(), CoreError> {
        self.set_page(self.state.page.saturating_add(1)).await
    }

    pub async fn last_page(&mut self) -> Result<(), CoreError> {
        let last = self.state.pagination().last_page();
        self.set_page(last).await
    }

    /// Change rows per page. Always goes back to page 1, since the old page
    /// number may not exist at the new size.
    pub async fn set_page_size(&mut self, page_size: PageSize) -> Result<(), CoreError> {
        let changed = page_size != self.state.page_size || self.state.page != 1;
        self.state.page_size = page_size;
        self.state.page = 1;
        if changed {
            self.fetch_transactions().await
        } else {
            Ok(())
        }
    }

    /// `set_page_size` from a raw value (e.g., a select box). Only 10, 25 and 50 are accepted.
    pub async fn set_page_size_value(&mut self, per_page: u32) -> Result<(), CoreError> {
        let page_size = PageSize::try_from(per_page)?;
        self.set_page_size(page_size).await
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Flip a single row's checkbox.
    pub fn toggle_selection(&mut self, transaction_id: i64) {
        if !self.state.selection.remove(&transaction_id) {
            self.state.selection.insert(transaction_id);
        }
    }

    /// Header checkbox: select every loaded row, or clear the selection.
    /// Rows on other pages are not affected by "select all".
    pub fn set_all_selected(&mut self, selected: bool) {
        if selected {
            self.state.selection = self.transactions.iter().map(|t| t.transaction_id).collect();
        } else {
            self.state.selection.clear();
        }
    }

    /// The header checkbox is checked when rows are loaded and all of them are selected.
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        !self.transactions.is_empty()
            && self
                .transactions
                .iter()
                .all(|t| self.state.selection.contains(&t.transaction_id))
    }

    #[must_use]
    pub fn selected_ids(&self) -> Vec<i64> {
        self.state.selection.iter().copied().collect()
    }

    // ── Delete & Add Dialogs ────────────────────────────────────────

    /// Open the delete dialog for every selected row.
    /// Returns the ids the dialog should delete.
    pub fn request_bulk_delete(&mut self) -> Result<Vec<i64>, CoreError> {
        if self.state.selection.is_empty() {
            return Err(CoreError::ValidationError(
                "No transactions selected for deletion".into(),
            ));
        }
        self.state.single_delete_target = None;
        self.stores.modal.set_transactions_delete_open(true);
        Ok(self.delete_targets())
    }

    /// Open the delete dialog for one loaded row (the per-row trash button).
    pub fn request_single_delete(&mut self, transaction_id: i64) -> Result<(), CoreError> {
        if !self.transactions.iter().any(|t| t.transaction_id == transaction_id) {
            return Err(CoreError::TransactionNotFound(transaction_id));
        }
        self.state.single_delete_target = Some(transaction_id);
        self.stores.modal.set_transactions_delete_open(true);
        Ok(())
    }

    /// Ids the delete dialog acts on: the single target if set, otherwise the selection.
    #[must_use]
    pub fn delete_targets(&self) -> Vec<i64> {
        match self.state.single_delete_target {
            Some(id) => vec![id],
            None => self.selected_ids(),
        }
    }

    /// Delete dialog dismissed without deleting.
    pub fn cancel_delete(&mut self) {
        self.state.single_delete_target = None;
        self.stores.modal.set_transactions_delete_open(false);
    }

    /// Delete dialog finished: clear selection and target, then reload the page.
    pub async fn on_deletion_success(&mut self) -> Result<(), CoreError> {
        self.state.selection.clear();
        self.state.single_delete_target = None;
        self.stores.modal.set_transactions_delete_open(false);
        self.fetch_transactions().await
    }

    pub fn open_add_dialog(&mut self) {
        self.stores.modal.set_investments_open(true);
    }

    /// Add dialog finished: close it and reload the page.
    pub async fn on_add_success(&mut self) -> Result<(), CoreError> {
        self.stores.modal.set_investments_open(false);
        self.fetch_transactions().await
    }

    // ── Display ─────────────────────────────────────────────────────

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state.display_mode = mode;
    }

    /// Derive everything the page renders from the current state.
    #[must_use]
    pub fn view(&self) -> PageView {
        self.view_service.build(
            &self.state,
            &self.transactions,
            &self.exchange_rates,
            self.stores.currency.selected(),
        )
    }

    /// Loaded rows with their derived figures.
    #[must_use]
    pub fn enriched_transactions(&self) -> Vec<EnrichedTransaction> {
        self.enrichment_service.enrich(&self.transactions)
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.state.total_count
    }

    #[must_use]
    pub fn exchange_rates(&self) -> &ExchangeRateTable {
        &self.exchange_rates
    }
}
