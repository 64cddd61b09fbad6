//! USD → display currency conversion

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Unsupported currency: {0}")]
    Unsupported(String),
}

/// Converts USD amounts using a table of units-per-USD rates
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyConverter {
    rates: BTreeMap<String, f64>,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new(BTreeMap::from([
            ("USD".to_string(), 1.0),
            ("SEK".to_string(), 10.83),
        ]))
    }
}

impl CurrencyConverter {
    /// Rates are keyed by currency code, case-insensitively
    pub fn new(rates: BTreeMap<String, f64>) -> Self {
        Self {
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.to_uppercase(), rate))
                .collect(),
        }
    }

    pub fn supports(&self, currency: &str) -> bool {
        self.rates.contains_key(&currency.to_uppercase())
    }

    pub fn convert(&self, usd: f64, currency: &str) -> Result<f64, CurrencyError> {
        self.rates
            .get(&currency.to_uppercase())
            .map(|rate| usd * rate)
            .ok_or_else(|| CurrencyError::Unsupported(currency.to_uppercase()))
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}
