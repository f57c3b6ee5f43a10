use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The base currency every rate in an `ExchangeRateTable` is expressed against.
pub const BASE_CURRENCY: &str = "USD";

/// Currency code → multiplier relative to `BASE_CURRENCY` (which is always 1).
///
/// Loaded once per page mount and treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawExchangeRateTable")]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    /// Build a table from raw rates. Codes are uppercased and the base entry
    /// is pinned to 1 regardless of what the source reported.
    pub fn from_rates(rates: HashMap<String, f64>) -> Self {
        let mut rates: HashMap<String, f64> = rates
            .into_iter()
            .map(|(code, rate)| (code.trim().to_uppercase(), rate))
            .collect();
        rates.insert(BASE_CURRENCY.to_string(), 1.0);
        Self { rates }
    }

    /// A table with no entries at all; every conversion falls back to identity.
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Usable rate for a currency. Zero, negative and non-finite rates
    /// count as missing.
    pub fn rate(&self, currency: &str) -> Option<f64> {
        self.rates
            .get(currency)
            .or_else(|| self.rates.get(&currency.to_uppercase()))
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.rate(currency).is_some()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Serialized shape of a table; deserialization goes through `from_rates`.
#[derive(Deserialize)]
struct RawExchangeRateTable {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

impl From<RawExchangeRateTable> for ExchangeRateTable {
    fn from(raw: RawExchangeRateTable) -> Self {
        Self::from_rates(raw.rates)
    }
}

impl Default for ExchangeRateTable {
    /// `{USD: 1}` — the table before (or after a failed) rate fetch.
    fn default() -> Self {
        Self::from_rates(HashMap::new())
    }
}
