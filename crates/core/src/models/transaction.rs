use serde::{Deserialize, Deserializer, Serialize};

/// Kind of a portfolio transaction.
///
/// The transactions API sends localized labels ("구매" / "판매"); English
/// spellings are accepted as well. Anything else is kept verbatim as `Other`
/// so the label can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    /// Acquisition of a position
    Purchase,
    /// Disposal of a position
    Sale,
    /// Unrecognized label from the API
    Other(String),
}

pub const PURCHASE_LABEL: &str = "구매";
pub const SALE_LABEL: &str = "판매";

impl TransactionKind {
    /// The label as the API sends it.
    pub fn label(&self) -> &str {
        match self {
            TransactionKind::Purchase => PURCHASE_LABEL,
            TransactionKind::Sale => SALE_LABEL,
            TransactionKind::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionKind {
    fn from(raw: String) -> Self {
        match raw.trim() {
            PURCHASE_LABEL => TransactionKind::Purchase,
            SALE_LABEL => TransactionKind::Sale,
            s if s.eq_ignore_ascii_case("purchase") || s.eq_ignore_ascii_case("buy") => {
                TransactionKind::Purchase
            }
            s if s.eq_ignore_ascii_case("sale") || s.eq_ignore_ascii_case("sell") => {
                TransactionKind::Sale
            }
            _ => TransactionKind::Other(raw),
        }
    }
}

impl From<&str> for TransactionKind {
    fn from(raw: &str) -> Self {
        TransactionKind::from(raw.to_string())
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        kind.label().to_string()
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub sector_id: i64,
    pub sector_name: String,
}

/// The financial product a transaction refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProduct {
    pub product_name: String,
    pub ticker: String,
    pub sector: Sector,
}

/// A single transaction record as returned by the transactions API.
/// Read-only from this crate's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,

    pub transaction_type: TransactionKind,

    pub financial_product: FinancialProduct,

    /// ISO timestamp, kept as sent (date-only or full date-time)
    pub created_at: String,

    #[serde(deserialize_with = "number_or_string")]
    pub quantity: f64,

    /// Unit price in `currency_code`
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,

    pub currency_code: String,

    /// Profit rate in percent, reported by the API for some sale transactions
    #[serde(
        rename = "profitRate",
        alias = "profit_rate",
        default,
        deserialize_with = "optional_number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub profit_rate: Option<f64>,
}

impl Transaction {
    /// `price × quantity`, always in the transaction's own currency.
    pub fn trade_value(&self) -> f64 {
        self.price * self.quantity
    }

    pub fn is_purchase(&self) -> bool {
        self.transaction_type == TransactionKind::Purchase
    }

    pub fn is_sale(&self) -> bool {
        self.transaction_type == TransactionKind::Sale
    }
}

/// One page of transactions as returned by `GET /transactions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub data: Vec<Transaction>,

    /// Total number of transactions across all pages. Older API versions omit it.
    #[serde(default)]
    pub total: Option<u64>,
}

impl TransactionPage {
    /// Total row count; falls back to the length of this page when the API
    /// reports nothing (or zero) for a non-empty page.
    pub fn total_count(&self) -> u64 {
        match self.total {
            Some(total) if total > 0 => total,
            _ => self.data.len() as u64,
        }
    }
}

// ── Lenient numeric fields ──────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid number: {s:?}"))),
        }
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_f64()
}

fn optional_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(value) => value.into_f64().map(Some),
        None => Ok(None),
    }
}
