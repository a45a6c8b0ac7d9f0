use std::collections::HashMap;

use super::{normalize_code, RateProvider};
use crate::errors::RateUnavailableError;

/// Fixed in-memory rates. Same-currency pairs resolve to parity and a missing
/// pair falls back to the inverse of its reverse.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(String, String), f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, from: &str, to: &str, rate: f64) -> Self {
        self.add_rate(from, to, rate);
        self
    }

    pub fn add_rate(&mut self, from: &str, to: &str, rate: f64) {
        self.rates.insert(pair_key(from, to), rate);
    }

    pub fn remove_rate(&mut self, from: &str, to: &str) -> Option<f64> {
        self.rates.remove(&pair_key(from, to))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateProvider for RateTable {
    fn rate(&self, from: &str, to: &str) -> Result<f64, RateUnavailableError> {
        if normalize_code(from) == normalize_code(to) {
            return Ok(1.0);
        }
        if let Some(rate) = self.rates.get(&pair_key(from, to)) {
            return Ok(*rate);
        }
        if let Some(rate) = self.rates.get(&pair_key(to, from)) {
            return Ok(if *rate == 0.0 { 0.0 } else { 1.0 / rate });
        }
        Err(RateUnavailableError::MissingRate {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

fn pair_key(from: &str, to: &str) -> (String, String) {
    (normalize_code(from), normalize_code(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_needs_no_entry() {
        let table = RateTable::new();
        assert_eq!(table.rate("huf", "HUF").unwrap(), 1.0);
    }

    #[test]
    fn direct_and_inverse_lookups() {
        let table = RateTable::new().with_rate("EUR", "USD", 1.25);
        assert_eq!(table.rate("eur", "usd").unwrap(), 1.25);
        assert!((table.rate("USD", "EUR").unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn zero_rate_inverts_to_zero() {
        let table = RateTable::new().with_rate("ABC", "XYZ", 0.0);
        assert_eq!(table.rate("XYZ", "ABC").unwrap(), 0.0);
    }

    #[test]
    fn tiny_rate_still_inverts() {
        let table = RateTable::new().with_rate("ABC", "XYZ", 1e-20);
        let inverse = table.rate("XYZ", "ABC").unwrap();
        assert!((inverse / 1e20 - 1.0).abs() < 1e-12, "{inverse}");
    }

    #[test]
    fn unknown_pair_is_unavailable() {
        let mut table = RateTable::new().with_rate("EUR", "USD", 1.1);
        assert_eq!(table.remove_rate("EUR", "USD"), Some(1.1));
        assert!(table.is_empty());
        let err = table.rate("EUR", "USD").unwrap_err();
        assert!(matches!(err, RateUnavailableError::MissingRate { .. }));
    }
}
