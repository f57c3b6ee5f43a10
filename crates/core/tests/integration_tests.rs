// ═══════════════════════════════════════════════════════════════════
// Integration Tests — TransactionsPage controller over mock APIs
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use transactions_page_core::errors::CoreError;
use transactions_page_core::models::exchange_rate::ExchangeRateTable;
use transactions_page_core::models::page::{DisplayMode, PageSize};
use transactions_page_core::models::settings::Settings;
use transactions_page_core::models::transaction::{
    FinancialProduct, Sector, Transaction, TransactionKind, TransactionPage,
};
use transactions_page_core::models::view::TOTAL_PLACEHOLDER;
use transactions_page_core::providers::traits::{
    ExchangeRateProvider, TransactionsApi, TransactionsQuery,
};
use transactions_page_core::stores::portfolio::{PortfolioStore, SelectedPortfolio};
use transactions_page_core::stores::Stores;
use transactions_page_core::TransactionsPage;

// ═══════════════════════════════════════════════════════════════════
// Mock APIs (for testing without real HTTP calls)
// ═══════════════════════════════════════════════════════════════════

fn tx(id: i64, kind: TransactionKind, price: f64, quantity: f64, currency: &str) -> Transaction {
    Transaction {
        transaction_id: id,
        transaction_type: kind,
        financial_product: FinancialProduct {
            product_name: format!("Product {id}"),
            ticker: format!("T{id}"),
            sector: Sector {
                sector_id: 1,
                sector_name: "Technology".into(),
            },
        },
        created_at: "2025-01-15T10:00:00Z".into(),
        quantity,
        price,
        currency_code: currency.into(),
        profit_rate: None,
    }
}

/// Serves `total` generated purchase rows in USD, paged like the real API.
/// Records every query; can be switched to failing mode.
#[derive(Clone)]
struct MockTransactionsApi {
    total: u64,
    calls: Arc<Mutex<Vec<TransactionsQuery>>>,
    fail: Arc<Mutex<bool>>,
    fixed: Option<Vec<Transaction>>,
}

impl MockTransactionsApi {
    fn with_total(total: u64) -> Self {
        Self {
            total,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(Mutex::new(false)),
            fixed: None,
        }
    }

    fn with_rows(rows: Vec<Transaction>) -> Self {
        Self {
            total: rows.len() as u64,
            fixed: Some(rows),
            ..Self::with_total(0)
        }
    }

    fn calls(&self) -> Vec<TransactionsQuery> {
        self.calls.lock().unwrap().clone()
    }

    fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl TransactionsApi for MockTransactionsApi {
    fn name(&self) -> &str {
        "MockTransactions"
    }

    async fn fetch_page(&self, query: &TransactionsQuery) -> Result<TransactionPage, CoreError> {
        self.calls.lock().unwrap().push(*query);
        if *self.fail.lock().unwrap() {
            return Err(CoreError::Network("connection reset".into()));
        }
        if let Some(rows) = &self.fixed {
            return Ok(TransactionPage {
                data: rows.clone(),
                total: Some(self.total),
            });
        }

        let start = u64::from(query.page - 1) * u64::from(query.per_page) + 1;
        let end = (start + u64::from(query.per_page) - 1).min(self.total);
        let data = (start..=end)
            .map(|id| tx(id as i64, TransactionKind::Purchase, 10.0, 1.0, "USD"))
            .collect();
        Ok(TransactionPage {
            data,
            total: Some(self.total),
        })
    }
}

struct MockRates {
    fail: bool,
}

#[async_trait]
impl ExchangeRateProvider for MockRates {
    fn name(&self) -> &str {
        "MockRates"
    }

    async fn latest_rates(&self) -> Result<ExchangeRateTable, CoreError> {
        if self.fail {
            return Err(CoreError::Network("timeout".into()));
        }
        Ok(ExchangeRateTable::from_rates(HashMap::from([
            ("EUR".to_string(), 0.9),
            ("KRW".to_string(), 1350.0),
        ])))
    }
}

fn stores_with_portfolio(id: i64) -> Stores {
    Stores {
        portfolio: PortfolioStore::new(Some(SelectedPortfolio::new(id, "Main"))),
        ..Stores::default()
    }
}

fn page_with(api: &MockTransactionsApi, rates_fail: bool, stores: Stores) -> TransactionsPage {
    TransactionsPage::new(
        Box::new(api.clone()),
        Box::new(MockRates { fail: rates_fail }),
        stores,
        &Settings::default(),
    )
}

// ═══════════════════════════════════════════════════════════════════
// Mount & fetching
// ═══════════════════════════════════════════════════════════════════

mod fetching {
    use super::*;

    #[tokio::test]
    async fn mount_loads_rates_and_first_page() {
        let api = MockTransactionsApi::with_total(47);
        let mut page = page_with(&api, false, stores_with_portfolio(7));

        page.mount().await;

        assert_eq!(page.exchange_rates().rate("KRW"), Some(1350.0));
        assert_eq!(page.transactions().len(), 10);
        assert_eq!(page.total_count(), 47);
        assert_eq!(
            api.calls(),
            vec![TransactionsQuery {
                portfolio_id: 7,
                page: 1,
                per_page: 10
            }]
        );
    }

    #[tokio::test]
    async fn no_portfolio_means_no_request() {
        let api = MockTransactionsApi::with_total(47);
        let mut page = page_with(&api, false, Stores::default());

        page.mount().await;

        assert!(api.calls().is_empty());
        assert!(page.transactions().is_empty());
        assert_eq!(page.total_count(), 0);
    }

    #[tokio::test]
    async fn deselecting_portfolio_clears_rows() {
        let api = MockTransactionsApi::with_total(12);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;
        assert_eq!(page.transactions().len(), 10);

        page.select_portfolio(None).await.unwrap();

        assert!(page.transactions().is_empty());
        assert_eq!(page.total_count(), 0);
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn switching_portfolio_resets_page_and_selection() {
        let api = MockTransactionsApi::with_total(47);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;
        page.set_page(3).await.unwrap();
        page.toggle_selection(21);

        page.select_portfolio(Some(SelectedPortfolio::new(2, "Other")))
            .await
            .unwrap();

        assert_eq!(page.state().page, 1);
        assert!(page.selected_ids().is_empty());
        let last = *api.calls().last().unwrap();
        assert_eq!(last.portfolio_id, 2);
        assert_eq!(last.page, 1);
    }

    #[tokio::test]
    async fn reselecting_same_portfolio_does_not_refetch() {
        let api = MockTransactionsApi::with_total(5);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.select_portfolio(Some(SelectedPortfolio::new(1, "Main")))
            .await
            .unwrap();

        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_rows() {
        let api = MockTransactionsApi::with_total(47);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;
        let before: Vec<i64> = page.transactions().iter().map(|t| t.transaction_id).collect();

        api.set_failing(true);
        let result = page.fetch_transactions().await;

        assert!(matches!(result, Err(CoreError::Network(_))));
        let after: Vec<i64> = page.transactions().iter().map(|t| t.transaction_id).collect();
        assert_eq!(before, after);
        assert_eq!(page.total_count(), 47);
    }

    #[tokio::test]
    async fn failed_rate_fetch_keeps_usd_default() {
        let api = MockTransactionsApi::with_total(3);
        let mut page = page_with(&api, true, stores_with_portfolio(1));

        page.mount().await;

        assert_eq!(page.exchange_rates(), &ExchangeRateTable::default());
        // rows still load
        assert_eq!(page.transactions().len(), 3);
    }

    #[tokio::test]
    async fn mount_survives_both_fetches_failing() {
        let api = MockTransactionsApi::with_total(3);
        api.set_failing(true);
        let mut page = page_with(&api, true, stores_with_portfolio(1));

        page.mount().await;

        // transactions were still requested after the rate failure
        assert_eq!(api.calls().len(), 1);
        assert_eq!(page.exchange_rates(), &ExchangeRateTable::default());
        assert!(page.transactions().is_empty());
        assert_eq!(page.total_count(), 0);
    }

    #[tokio::test]
    async fn add_success_refetches_and_closes_dialog() {
        let api = MockTransactionsApi::with_total(3);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.open_add_dialog();
        assert!(page.modal().is_investments_open());

        page.on_add_success().await.unwrap();
        assert!(!page.modal().is_investments_open());
        assert_eq!(api.calls().len(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Out-of-order responses
// ═══════════════════════════════════════════════════════════════════

mod sequencing {
    use super::*;

    fn page_of(ids: &[i64], total: u64) -> TransactionPage {
        TransactionPage {
            data: ids
                .iter()
                .map(|id| tx(*id, TransactionKind::Purchase, 1.0, 1.0, "USD"))
                .collect(),
            total: Some(total),
        }
    }

    #[test]
    fn stale_response_is_dropped() {
        let api = MockTransactionsApi::with_total(0);
        let mut page = page_with(&api, false, stores_with_portfolio(1));

        let first = page.begin_fetch().unwrap();
        let second = page.begin_fetch().unwrap();
        assert!(second.seq > first.seq);

        // Newer response lands first, older one afterwards
        assert!(page.apply_fetch(second, Ok(page_of(&[2], 20))).unwrap());
        assert!(!page.apply_fetch(first, Ok(page_of(&[1], 10))).unwrap());

        assert_eq!(page.transactions()[0].transaction_id, 2);
        assert_eq!(page.total_count(), 20);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let api = MockTransactionsApi::with_total(0);
        let mut page = page_with(&api, false, stores_with_portfolio(1));

        let first = page.begin_fetch().unwrap();
        let second = page.begin_fetch().unwrap();
        page.apply_fetch(second, Ok(page_of(&[5], 1))).unwrap();

        let outcome = page.apply_fetch(first, Err(CoreError::Network("late".into())));
        assert!(matches!(outcome, Ok(false)));
        assert_eq!(page.transactions().len(), 1);
    }

    #[tokio::test]
    async fn response_after_deselect_is_dropped() {
        let api = MockTransactionsApi::with_total(0);
        let mut page = page_with(&api, false, stores_with_portfolio(1));

        let in_flight = page.begin_fetch().unwrap();
        page.select_portfolio(None).await.unwrap();

        assert!(!page.apply_fetch(in_flight, Ok(page_of(&[1], 1))).unwrap());
        assert!(page.transactions().is_empty());
    }

    #[test]
    fn request_carries_current_query() {
        let api = MockTransactionsApi::with_total(0);
        let mut page = page_with(&api, false, stores_with_portfolio(42));
        let request = page.begin_fetch().unwrap();
        assert_eq!(
            request.query,
            TransactionsQuery {
                portfolio_id: 42,
                page: 1,
                per_page: 10
            }
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Pagination
// ═══════════════════════════════════════════════════════════════════

mod pagination {
    use super::*;

    #[tokio::test]
    async fn last_page_range() {
        let api = MockTransactionsApi::with_total(47);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.last_page().await.unwrap();

        let view = page.view();
        assert_eq!(view.pagination.page, 5);
        assert_eq!(view.pagination.total_pages, 5);
        assert_eq!((view.pagination.range_start, view.pagination.range_end), (41, 47));
        assert_eq!(page.transactions().len(), 7);
    }

    #[tokio::test]
    async fn navigation_clamps() {
        let api = MockTransactionsApi::with_total(47);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.previous_page().await.unwrap();
        assert_eq!(page.state().page, 1);

        page.set_page(99).await.unwrap();
        assert_eq!(page.state().page, 5);

        page.next_page().await.unwrap();
        assert_eq!(page.state().page, 5);

        page.set_page(0).await.unwrap();
        assert_eq!(page.state().page, 1);

        page.next_page().await.unwrap();
        assert_eq!(page.state().page, 2);

        page.first_page().await.unwrap();
        assert_eq!(page.state().page, 1);

        // mount, ->5, ->1, ->2, ->1: no-op moves send nothing
        let pages: Vec<u32> = api.calls().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 5, 1, 2, 1]);
    }

    #[tokio::test]
    async fn page_size_change_resets_to_first_page() {
        let api = MockTransactionsApi::with_total(120);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;
        page.set_page(4).await.unwrap();

        page.set_page_size(PageSize::TwentyFive).await.unwrap();

        assert_eq!(page.state().page, 1);
        assert_eq!(page.state().page_size, PageSize::TwentyFive);
        let last = *api.calls().last().unwrap();
        assert_eq!((last.page, last.per_page), (1, 25));
        assert_eq!(page.transactions().len(), 25);
    }

    #[tokio::test]
    async fn same_page_size_on_later_page_still_resets() {
        let api = MockTransactionsApi::with_total(120);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;
        page.set_page(3).await.unwrap();

        page.set_page_size(PageSize::Ten).await.unwrap();

        assert_eq!(page.state().page, 1);
        assert_eq!(api.calls().last().unwrap().page, 1);
    }

    #[tokio::test]
    async fn raw_page_size_validation() {
        let api = MockTransactionsApi::with_total(120);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        assert!(page.set_page_size_value(30).await.is_err());
        assert_eq!(page.state().page_size, PageSize::Ten);

        page.set_page_size_value(50).await.unwrap();
        assert_eq!(page.state().page_size, PageSize::Fifty);
    }

    #[tokio::test]
    async fn window_slides_with_current_page() {
        let api = MockTransactionsApi::with_total(200);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.set_page(10).await.unwrap();
        assert_eq!(page.view().pagination.page_numbers, vec![8, 9, 10, 11, 12]);

        page.last_page().await.unwrap();
        assert_eq!(page.view().pagination.page_numbers, vec![16, 17, 18, 19, 20]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Selection & delete flow
// ═══════════════════════════════════════════════════════════════════

mod selection {
    use super::*;

    #[tokio::test]
    async fn select_all_then_deselect_one() {
        let api = MockTransactionsApi::with_total(3);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.set_all_selected(true);
        assert!(page.is_all_selected());
        assert!(page.view().header_checked);

        page.toggle_selection(2);
        assert!(!page.is_all_selected());
        assert!(!page.view().header_checked);
        assert_eq!(page.selected_ids(), vec![1, 3]);
    }

    #[tokio::test]
    async fn select_all_only_covers_loaded_rows() {
        let api = MockTransactionsApi::with_total(47);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.set_all_selected(true);
        assert_eq!(page.selected_ids(), (1..=10).collect::<Vec<i64>>());

        page.set_all_selected(false);
        assert!(page.selected_ids().is_empty());
    }

    #[test]
    fn header_unchecked_with_no_rows() {
        let api = MockTransactionsApi::with_total(0);
        let mut page = page_with(&api, false, Stores::default());
        page.set_all_selected(true);
        assert!(!page.is_all_selected());
        assert!(!page.view().header_checked);
    }

    #[tokio::test]
    async fn bulk_delete_flow() {
        let api = MockTransactionsApi::with_total(3);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.toggle_selection(1);
        page.toggle_selection(3);
        let targets = page.request_bulk_delete().unwrap();
        assert_eq!(targets, vec![1, 3]);
        assert!(page.modal().is_transactions_delete_open());

        page.on_deletion_success().await.unwrap();
        assert!(page.selected_ids().is_empty());
        assert_eq!(page.state().single_delete_target, None);
        assert!(!page.modal().is_transactions_delete_open());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn bulk_delete_needs_a_selection() {
        let api = MockTransactionsApi::with_total(3);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        assert!(matches!(
            page.request_bulk_delete(),
            Err(CoreError::ValidationError(_))
        ));
        assert!(!page.modal().is_transactions_delete_open());
    }

    #[tokio::test]
    async fn single_delete_takes_precedence() {
        let api = MockTransactionsApi::with_total(3);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.toggle_selection(1);
        page.toggle_selection(2);
        page.request_single_delete(3).unwrap();

        assert_eq!(page.delete_targets(), vec![3]);
        assert!(page.modal().is_transactions_delete_open());

        page.on_deletion_success().await.unwrap();
        assert!(page.delete_targets().is_empty());
    }

    #[tokio::test]
    async fn single_delete_of_unknown_row() {
        let api = MockTransactionsApi::with_total(3);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        assert!(matches!(
            page.request_single_delete(99),
            Err(CoreError::TransactionNotFound(99))
        ));
        assert_eq!(page.state().single_delete_target, None);
    }

    #[tokio::test]
    async fn cancel_clears_single_target_but_keeps_selection() {
        let api = MockTransactionsApi::with_total(3);
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.toggle_selection(1);
        page.request_single_delete(2).unwrap();
        page.cancel_delete();

        assert!(!page.modal().is_transactions_delete_open());
        assert_eq!(page.delete_targets(), vec![1]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// View derivation through the controller
// ═══════════════════════════════════════════════════════════════════

mod view {
    use super::*;

    fn mixed_rows() -> Vec<Transaction> {
        vec![
            tx(1, TransactionKind::Purchase, 10.0, 2.0, "USD"),
            tx(2, TransactionKind::Sale, 15.0, 2.0, "USD"),
            tx(3, TransactionKind::Purchase, 1350.0, 1.0, "KRW"),
        ]
    }

    #[tokio::test]
    async fn converted_mode_uses_preferred_currency() {
        let api = MockTransactionsApi::with_rows(mixed_rows());
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;
        page.set_preferred_currency("krw").unwrap();

        let view = page.view();
        assert_eq!(view.display_mode, DisplayMode::Converted);
        assert_eq!(view.preferred_currency, "KRW");
        assert_eq!(view.rows[0].price, "₩13,500");
        let summary = view.summary.unwrap();
        // 20 USD + 1,350 KRW
        assert_eq!(summary.purchases[0].display, "₩28,350");
    }

    #[tokio::test]
    async fn original_mode_footer_placeholder_when_mixed() {
        let api = MockTransactionsApi::with_rows(mixed_rows());
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        page.set_display_mode(DisplayMode::Original);
        let view = page.view();
        assert_eq!(view.footer.display, TOTAL_PLACEHOLDER);
        assert_eq!(view.summary.unwrap().purchases.len(), 2);
    }

    #[tokio::test]
    async fn display_mode_does_not_touch_enrichment() {
        let api = MockTransactionsApi::with_rows(mixed_rows());
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        page.mount().await;

        let before = page.enriched_transactions();
        page.set_display_mode(DisplayMode::Original);
        assert_eq!(before, page.enriched_transactions());

        // blended baseline: 20 + 1350
        assert_eq!(before[1].total_profit_value(), Some(30.0 - 1370.0));
    }

    #[tokio::test]
    async fn invalid_preferred_currency_rejected() {
        let api = MockTransactionsApi::with_rows(mixed_rows());
        let mut page = page_with(&api, false, stores_with_portfolio(1));
        assert!(page.set_preferred_currency("won!").is_err());
        assert_eq!(page.stores().currency.selected(), "USD");
    }

    #[test]
    fn settings_drive_initial_state() {
        let settings = Settings {
            default_page_size: PageSize::Fifty,
            default_display_mode: DisplayMode::Original,
            preferred_currency: "EUR".into(),
            ..Settings::default()
        };
        let stores = Stores::from_settings(&settings).unwrap();
        let page = TransactionsPage::from_settings(&settings, stores);

        assert_eq!(page.state().page_size, PageSize::Fifty);
        assert_eq!(page.state().display_mode, DisplayMode::Original);
        assert_eq!(page.view().preferred_currency, "EUR");
        assert!(format!("{:?}", page).contains("Transactions API"));
    }
}
