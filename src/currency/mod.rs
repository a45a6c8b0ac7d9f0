//! Currency normalization: the rate provider seam and the converter built on it.

pub mod converter;
pub mod exchange_rate_api;
pub mod rate_table;

pub use converter::{CurrencyChange, CurrencyConverter};
pub use exchange_rate_api::ExchangeRateApiProvider;
pub use rate_table::RateTable;

use crate::errors::RateUnavailableError;

/// Currencies offered to users when picking a conversion target. Expense
/// currencies themselves are free text and are not checked against this list.
pub const KNOWN_CURRENCIES: [&str; 32] = [
    "HUF", "JOD", "EUR", "USD", "JPY", "GBP", "AUD", "CAD", "CHF", "CNY", "SEK", "NZD", "MXN",
    "BHD", "KWD", "SGD", "NOK", "KRW", "TRY", "RUB", "INR", "BRL", "ZAR", "DKK", "PLN", "TWD",
    "THB", "IDR", "CZK", "AED", "CLP", "PHP",
];

/// Source of conversion rates: units of `to` per one unit of `from`.
///
/// Implementations talk to unreliable collaborators, so callers must handle
/// the error path.
pub trait RateProvider: Send + Sync {
    fn rate(&self, from: &str, to: &str) -> Result<f64, RateUnavailableError>;
}

impl<F> RateProvider for F
where
    F: Fn(&str, &str) -> Result<f64, RateUnavailableError> + Send + Sync,
{
    fn rate(&self, from: &str, to: &str) -> Result<f64, RateUnavailableError> {
        self(from, to)
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn is_known_currency(code: &str) -> bool {
    let code = normalize_code(code);
    KNOWN_CURRENCIES.iter().any(|known| *known == code)
}
