use serde::{Deserialize, Serialize};

use super::page::DisplayMode;
use super::transaction::TransactionKind;

/// Shown in the "total profit" column of rows without a realized profit.
pub const ROW_PLACEHOLDER: &str = "----";

/// Shown in the footer when an original-mode total would blend currencies.
pub const TOTAL_PLACEHOLDER: &str = "---";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub kind: TransactionKind,
    pub product_name: String,
    pub ticker: String,
    /// `dd/mm/yyyy`, empty when the timestamp could not be read
    pub date: String,
    pub quantity: f64,
    pub price: String,
    /// Signed trade value (negative for purchases)
    pub summary: String,
    pub summary_is_gain: bool,
    /// Amount implied by the API's own profit rate, sales only
    pub profit_rate_amount: Option<String>,
    /// The API's profit rate as a signed percent, sales only
    pub profit_rate: Option<String>,
    pub total_profit: Option<String>,
    pub total_profit_rate: Option<String>,
    pub total_profit_is_gain: bool,
    pub selected: bool,
}

impl TransactionRow {
    /// Text for the total-profit column.
    pub fn total_profit_text(&self) -> &str {
        self.total_profit.as_deref().unwrap_or(ROW_PLACEHOLDER)
    }
}

/// One line of the purchase/sale summary box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalLine {
    pub currency: String,
    pub amount: f64,
    pub display: String,
}

/// Purchase and sale totals above the table. Shown only while nothing is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    /// One line per currency in original mode, one converted line otherwise
    pub purchases: Vec<TotalLine>,
    pub sales: Vec<TotalLine>,
}

/// Footer total of realized profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterView {
    /// `None` when the total would blend currencies
    pub amount: Option<f64>,
    pub display: String,
    pub is_gain: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationView {
    pub page: u32,
    pub total_pages: u32,
    pub page_numbers: Vec<u32>,
    pub range_start: u64,
    pub range_end: u64,
    pub total_count: u64,
    pub first_disabled: bool,
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub last_disabled: bool,
}

/// Everything the page renders, derived from the controller's current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub display_mode: DisplayMode,
    pub preferred_currency: String,
    pub rows: Vec<TransactionRow>,
    pub header_checked: bool,
    pub selected_count: usize,
    /// `None` while rows are selected (the delete bar replaces the summary)
    pub summary: Option<SummaryView>,
    pub footer: FooterView,
    pub pagination: PaginationView,
}

impl PageView {
    /// The bulk-delete bar is visible whenever something is selected.
    pub fn delete_bar_visible(&self) -> bool {
        self.selected_count > 0
    }
}
