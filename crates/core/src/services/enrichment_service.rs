use crate::models::enriched::{EnrichedTransaction, RealizedProfit};
use crate::models::transaction::{Transaction, TransactionKind};

/// Derives per-row figures (trade value, signed cash flow, realized profit)
/// from the transactions currently loaded on the page.
///
/// Pure business logic — no I/O. Recomputed on every view pass.
pub struct EnrichmentService;

impl EnrichmentService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of `price × quantity` over all purchases.
    ///
    /// Amounts are added as plain numbers whatever their currency, so a page
    /// mixing currencies gets a blended baseline.
    pub fn aggregate_purchase_total(&self, transactions: &[Transaction]) -> f64 {
        transactions
            .iter()
            .filter(|t| t.is_purchase())
            .map(Transaction::trade_value)
            .sum()
    }

    /// Enrich every transaction. Output has the same length and order as the input.
    pub fn enrich(&self, transactions: &[Transaction]) -> Vec<EnrichedTransaction> {
        let purchase_total = self.aggregate_purchase_total(transactions);

        transactions
            .iter()
            .map(|tx| {
                let trade_value = tx.trade_value();
                let signed_value = match tx.transaction_type {
                    TransactionKind::Purchase => -trade_value,
                    TransactionKind::Sale => trade_value,
                    TransactionKind::Other(_) => 0.0,
                };

                let total_profit = if tx.is_sale() && purchase_total > 0.0 {
                    let value = signed_value - purchase_total;
                    Some(RealizedProfit {
                        value,
                        rate: value / purchase_total * 100.0,
                    })
                } else {
                    None
                };

                EnrichedTransaction {
                    transaction: tx.clone(),
                    trade_value,
                    signed_value,
                    total_profit,
                }
            })
            .collect()
    }
}

impl Default for EnrichmentService {
    fn default() -> Self {
        Self::new()
    }
}
