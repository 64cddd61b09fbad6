//! Presentation-level configuration
//!
//! Resolved output settings: CLI flags layered over the `[output]` section.

use crate::output::console::ConsoleFormatter;
use crate::output::currency::{CurrencyConverter, CurrencyError};
use crossval_domain::OutputFormat;
use std::collections::BTreeMap;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Display currency for costs
    pub currency: String,
    /// Units of each currency per USD
    pub rates: BTreeMap<String, f64>,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            currency: "SEK".to_string(),
            rates: BTreeMap::from([("USD".to_string(), 1.0), ("SEK".to_string(), 10.83)]),
            show_progress: true,
        }
    }
}

impl OutputConfig {
    pub fn converter(&self) -> CurrencyConverter {
        CurrencyConverter::new(self.rates.clone())
    }

    /// Fail early when the currency has no rate
    pub fn ensure_currency(&self) -> Result<(), CurrencyError> {
        if self.converter().supports(&self.currency) {
            Ok(())
        } else {
            Err(CurrencyError::Unsupported(self.currency.to_uppercase()))
        }
    }

    /// Turn off ANSI colors process-wide when disabled
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }

    pub fn formatter(&self) -> ConsoleFormatter {
        ConsoleFormatter::new(self.converter(), &self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_currency_is_supported() {
        assert!(OutputConfig::default().ensure_currency().is_ok());
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let config = OutputConfig {
            currency: "eur".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.ensure_currency(),
            Err(CurrencyError::Unsupported("EUR".to_string()))
        );
    }
}
