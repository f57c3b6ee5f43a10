use crate::models::enriched::EnrichedTransaction;
use crate::models::exchange_rate::ExchangeRateTable;
use crate::models::page::{DisplayMode, PageState};
use crate::models::transaction::{Transaction, TransactionKind};
use crate::models::view::{
    FooterView, PageView, PaginationView, SummaryView, TotalLine, TransactionRow,
    TOTAL_PLACEHOLDER,
};

use super::aggregation_service::AggregationService;
use super::currency_service::CurrencyService;
use super::enrichment_service::EnrichmentService;
use super::format_service::FormatService;

/// Builds the complete `PageView` from page state and the loaded rows.
///
/// Nothing is cached between calls: enrichment and aggregation run again on
/// every build, so the view always matches the state it was built from.
pub struct ViewService {
    enrichment_service: EnrichmentService,
    aggregation_service: AggregationService,
    currency_service: CurrencyService,
    format_service: FormatService,
}

impl ViewService {
    pub fn new() -> Self {
        Self {
            enrichment_service: EnrichmentService::new(),
            aggregation_service: AggregationService::new(),
            currency_service: CurrencyService::new(),
            format_service: FormatService::new(),
        }
    }

    pub fn build(
        &self,
        state: &PageState,
        transactions: &[Transaction],
        rates: &ExchangeRateTable,
        preferred_currency: &str,
    ) -> PageView {
        let enriched = self.enrichment_service.enrich(transactions);
        let mode = state.display_mode;

        let rows: Vec<TransactionRow> = enriched
            .iter()
            .map(|e| self.build_row(e, state, rates, preferred_currency))
            .collect();

        let header_checked = !rows.is_empty() && rows.iter().all(|r| r.selected);

        let summary = if state.selection.is_empty() {
            Some(self.build_summary(transactions, mode, rates, preferred_currency))
        } else {
            None
        };

        let footer = self.build_footer(&enriched, transactions, mode, rates, preferred_currency);

        PageView {
            display_mode: mode,
            preferred_currency: preferred_currency.to_string(),
            rows,
            header_checked,
            selected_count: state.selection.len(),
            summary,
            footer,
            pagination: self.build_pagination(state),
        }
    }

    fn build_row(
        &self,
        enriched: &EnrichedTransaction,
        state: &PageState,
        rates: &ExchangeRateTable,
        preferred_currency: &str,
    ) -> TransactionRow {
        let tx = &enriched.transaction;
        let mode = state.display_mode;
        let currency = tx.currency_code.as_str();
        let display = |amount: f64| {
            self.format_service
                .display_amount(amount, currency, mode, preferred_currency, rates)
        };

        // The API's own profit rate, shown under the summary for sales
        let api_rate = tx
            .profit_rate
            .filter(|r| tx.is_sale() && *r != 0.0 && r.is_finite());
        let profit_rate_amount = api_rate.map(|r| display(tx.price * tx.quantity * r / 100.0));
        let profit_rate = api_rate.map(|r| self.format_service.format_signed_percent(r));

        let (total_profit, total_profit_rate) = match enriched.total_profit {
            Some(profit) if tx.is_sale() => {
                let shown = match mode {
                    DisplayMode::Converted => (
                        self.currency_service
                            .convert(profit.value, currency, preferred_currency, rates),
                        preferred_currency,
                    ),
                    DisplayMode::Original => (profit.value, currency),
                };
                (
                    Some(self.format_service.format_currency(shown.0, shown.1)),
                    Some(self.format_service.format_signed_percent(profit.rate)),
                )
            }
            _ => (None, None),
        };

        TransactionRow {
            id: tx.transaction_id,
            kind: tx.transaction_type.clone(),
            product_name: tx.financial_product.product_name.clone(),
            ticker: tx.financial_product.ticker.clone(),
            date: self.format_service.format_date(&tx.created_at),
            quantity: tx.quantity,
            price: display(tx.price),
            summary: display(enriched.signed_value),
            summary_is_gain: enriched.signed_value >= 0.0,
            profit_rate_amount,
            profit_rate,
            total_profit,
            total_profit_rate,
            total_profit_is_gain: enriched.total_profit_value().unwrap_or(0.0) >= 0.0,
            selected: state.selection.contains(&tx.transaction_id),
        }
    }

    fn build_summary(
        &self,
        transactions: &[Transaction],
        mode: DisplayMode,
        rates: &ExchangeRateTable,
        preferred_currency: &str,
    ) -> SummaryView {
        let lines = |kind: TransactionKind| -> Vec<TotalLine> {
            let totals = self.aggregation_service.sum_by_currency(transactions, &kind);
            match mode {
                DisplayMode::Original => totals
                    .into_iter()
                    .map(|(currency, amount)| TotalLine {
                        display: self.format_service.format_currency(amount, &currency),
                        currency,
                        amount,
                    })
                    .collect(),
                DisplayMode::Converted => {
                    let amount = self.aggregation_service.sum_converted(
                        &totals,
                        preferred_currency,
                        rates,
                    );
                    vec![TotalLine {
                        currency: preferred_currency.to_string(),
                        amount,
                        display: self.format_service.format_currency(amount, preferred_currency),
                    }]
                }
            }
        };

        SummaryView {
            purchases: lines(TransactionKind::Purchase),
            sales: lines(TransactionKind::Sale),
        }
    }

    fn build_footer(
        &self,
        enriched: &[EnrichedTransaction],
        transactions: &[Transaction],
        mode: DisplayMode,
        rates: &ExchangeRateTable,
        preferred_currency: &str,
    ) -> FooterView {
        let total = self.aggregation_service.total_realized_profit(
            enriched,
            mode,
            preferred_currency,
            rates,
        );

        let currency = match mode {
            DisplayMode::Converted => preferred_currency.to_string(),
            DisplayMode::Original => {
                let currencies = self.aggregation_service.distinct_currencies(transactions);
                if currencies.len() > 1 {
                    return FooterView {
                        amount: None,
                        display: TOTAL_PLACEHOLDER.to_string(),
                        is_gain: true,
                    };
                }
                currencies
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| preferred_currency.to_string())
            }
        };

        FooterView {
            amount: Some(total),
            display: self.format_service.format_currency(total, &currency),
            is_gain: total >= 0.0,
        }
    }

    fn build_pagination(&self, state: &PageState) -> PaginationView {
        let pagination = state.pagination();
        let (range_start, range_end) = pagination.display_range();
        PaginationView {
            page: pagination.page,
            total_pages: pagination.total_pages(),
            page_numbers: pagination.page_window(),
            range_start,
            range_end,
            total_count: pagination.total_count,
            first_disabled: pagination.is_first(),
            previous_disabled: pagination.is_first(),
            next_disabled: pagination.is_last(),
            last_disabled: pagination.is_last(),
        }
    }
}

impl Default for ViewService {
    fn default() -> Self {
        Self::new()
    }
}
