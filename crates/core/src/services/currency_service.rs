use crate::models::exchange_rate::ExchangeRateTable;

/// Converts amounts between currencies through the USD-based rate table.
///
/// Pure: the same amount, currencies and table always give the same result.
/// A currency missing from the table is not an error; the amount passes
/// through unchanged so the page degrades to showing raw figures.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert `amount` from `from_currency` to `to_currency`.
    /// E.g., convert(100.0, "EUR", "KRW", rates) → amount / EUR rate × KRW rate
    pub fn convert(
        &self,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
        rates: &ExchangeRateTable,
    ) -> f64 {
        let (Some(from_rate), Some(to_rate)) = (rates.rate(from_currency), rates.rate(to_currency))
        else {
            return amount;
        };

        // Same currency → exact identity, no division round trip
        if from_currency.eq_ignore_ascii_case(to_currency) {
            return amount;
        }

        let base_amount = amount / from_rate;
        base_amount * to_rate
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
