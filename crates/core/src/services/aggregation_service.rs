use std::collections::{BTreeMap, BTreeSet};

use crate::models::enriched::EnrichedTransaction;
use crate::models::exchange_rate::ExchangeRateTable;
use crate::models::page::DisplayMode;
use crate::models::transaction::{Transaction, TransactionKind};

use super::currency_service::CurrencyService;

/// Totals over the loaded page: per-currency purchase/sale sums, converted
/// sums and realized profit.
pub struct AggregationService {
    currency_service: CurrencyService,
}

impl AggregationService {
    pub fn new() -> Self {
        Self {
            currency_service: CurrencyService::new(),
        }
    }

    /// Sum `price × quantity` per currency over transactions of `kind`.
    /// Only currencies that actually occur are present; ordered by code.
    pub fn sum_by_currency(
        &self,
        transactions: &[Transaction],
        kind: &TransactionKind,
    ) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for tx in transactions.iter().filter(|t| &t.transaction_type == kind) {
            *totals.entry(tx.currency_code.clone()).or_insert(0.0) += tx.trade_value();
        }
        totals
    }

    /// Convert every per-currency total into `target_currency` and add them up.
    pub fn sum_converted(
        &self,
        currency_totals: &BTreeMap<String, f64>,
        target_currency: &str,
        rates: &ExchangeRateTable,
    ) -> f64 {
        currency_totals
            .iter()
            .map(|(currency, total)| {
                self.currency_service
                    .convert(*total, currency, target_currency, rates)
            })
            .sum()
    }

    /// Total realized profit over sale rows that have one.
    ///
    /// In `Original` mode the raw values are added as-is; in `Converted` mode
    /// each value is first converted from its row currency to `target_currency`.
    pub fn total_realized_profit(
        &self,
        enriched: &[EnrichedTransaction],
        mode: DisplayMode,
        target_currency: &str,
        rates: &ExchangeRateTable,
    ) -> f64 {
        enriched
            .iter()
            .filter(|e| e.transaction.is_sale())
            .filter_map(|e| e.total_profit_value().map(|v| (v, &e.transaction.currency_code)))
            .map(|(value, currency)| match mode {
                DisplayMode::Original => value,
                DisplayMode::Converted => {
                    self.currency_service
                        .convert(value, currency, target_currency, rates)
                }
            })
            .sum()
    }

    /// Distinct currency codes among the transactions.
    pub fn distinct_currencies(&self, transactions: &[Transaction]) -> BTreeSet<String> {
        transactions
            .iter()
            .map(|t| t.currency_code.clone())
            .collect()
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
