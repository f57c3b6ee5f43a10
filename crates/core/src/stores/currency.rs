use tracing::warn;

use crate::errors::CoreError;

/// Currencies the page knows how to format with a proper symbol.
pub const SUPPORTED_CURRENCIES: [&str; 11] = [
    "USD", "KRW", "EUR", "GBP", "JPY", "CAD", "AUD", "CNY", "CHF", "INR", "SGD",
];

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&code)
}

/// Holds the user's preferred display currency.
#[derive(Debug, Clone)]
pub struct CurrencyStore {
    selected: String,
}

impl CurrencyStore {
    /// Create a store with a validated currency code.
    pub fn new(currency: &str) -> Result<Self, CoreError> {
        Ok(Self {
            selected: normalize(currency)?,
        })
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Set the preferred currency. The code must be exactly 3 ASCII letters;
    /// it is trimmed and uppercased before being stored.
    pub fn set_selected(&mut self, currency: &str) -> Result<(), CoreError> {
        self.selected = normalize(currency)?;
        Ok(())
    }
}

impl Default for CurrencyStore {
    fn default() -> Self {
        Self {
            selected: "USD".to_string(),
        }
    }
}

fn normalize(currency: &str) -> Result<String, CoreError> {
    let trimmed = currency.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::ValidationError(format!(
            "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, KRW, EUR)"
        )));
    }
    if !is_supported(&trimmed) {
        warn!(currency = %trimmed, "preferred currency has no display symbol, amounts will use the code");
    }
    Ok(trimmed)
}
