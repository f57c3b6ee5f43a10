use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Realized profit of a sale row against the page's aggregate purchase total.
/// Value and rate always exist together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealizedProfit {
    /// `signed_value - aggregate_purchase_total`
    pub value: f64,
    /// `value / aggregate_purchase_total * 100`
    pub rate: f64,
}

/// A transaction plus the figures derived from it on every view pass.
/// Never stored; identity is the source transaction's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    pub transaction: Transaction,

    /// `price × quantity`
    pub trade_value: f64,

    /// Cash flow: negative for purchases, positive for sales, zero otherwise
    pub signed_value: f64,

    /// Only for sales, and only when the page holds purchases to measure against
    pub total_profit: Option<RealizedProfit>,
}

impl EnrichedTransaction {
    pub fn id(&self) -> i64 {
        self.transaction.transaction_id
    }

    pub fn total_profit_value(&self) -> Option<f64> {
        self.total_profit.map(|p| p.value)
    }

    pub fn total_profit_rate(&self) -> Option<f64> {
        self.total_profit.map(|p| p.rate)
    }
}
