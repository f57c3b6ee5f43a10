use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

use crate::models::exchange_rate::ExchangeRateTable;
use crate::models::page::DisplayMode;

use super::currency_service::CurrencyService;

/// Turns amounts, rates and timestamps into the strings the page displays.
pub struct FormatService {
    currency_service: CurrencyService,
}

impl FormatService {
    pub fn new() -> Self {
        Self {
            currency_service: CurrencyService::new(),
        }
    }

    /// Format a money amount, e.g. `-$1,234.50`, `₩1,500,000`, `CHF 12.00`.
    ///
    /// KRW and JPY have no minor unit; everything else shows two decimals.
    pub fn format_currency(&self, amount: f64, currency: &str) -> String {
        let code = currency.trim().to_uppercase();
        let decimals: u32 = match code.as_str() {
            "KRW" | "JPY" => 0,
            _ => 2,
        };

        let scale = 10u64.pow(decimals);
        let scaled = (amount.abs() * scale as f64).round();
        let scaled = if scaled.is_finite() { scaled as u64 } else { 0 };
        let whole = (scaled / scale).to_formatted_string(&Locale::en);

        let number = if decimals == 0 {
            whole
        } else {
            format!("{whole}.{:0width$}", scaled % scale, width = decimals as usize)
        };

        let sign = if amount < 0.0 && scaled > 0 { "-" } else { "" };
        format!("{sign}{}{number}", currency_prefix(&code))
    }

    /// Signed percent with two decimals: `+12.34%`, `-3.00%`, `0.00%`.
    pub fn format_signed_percent(&self, rate: f64) -> String {
        let sign = if rate > 0.0 { "+" } else { "" };
        format!("{sign}{rate:.2}%")
    }

    /// `dd/mm/yyyy` from an ISO timestamp (`2024-03-05` or `2024-03-05T10:00:00Z`).
    /// Returns an empty string when the date part cannot be read.
    pub fn format_date(&self, created_at: &str) -> String {
        created_at
            .get(..10)
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }

    /// Format an amount the way the current display mode wants it: in its own
    /// currency (original) or converted into `preferred_currency` (converted).
    pub fn display_amount(
        &self,
        amount: f64,
        currency: &str,
        mode: DisplayMode,
        preferred_currency: &str,
        rates: &ExchangeRateTable,
    ) -> String {
        match mode {
            DisplayMode::Original => self.format_currency(amount, currency),
            DisplayMode::Converted => {
                let converted =
                    self.currency_service
                        .convert(amount, currency, preferred_currency, rates);
                self.format_currency(converted, preferred_currency)
            }
        }
    }
}

impl Default for FormatService {
    fn default() -> Self {
        Self::new()
    }
}

fn currency_prefix(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "KRW" => "₩".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        "CNY" => "CN¥".to_string(),
        "INR" => "₹".to_string(),
        other => format!("{other} "),
    }
}
