//! Token pricing lookup.
//!
//! Prices are expressed per million tokens. A cost computed as
//! `tokens * price` is therefore in "per-million units"; divide by
//! [`UNITS_PER_CURRENCY`] to get the amount in the pricing currency (USD).

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Divisor that turns an aggregate cost into USD.
pub const UNITS_PER_CURRENCY: f64 = 1_000_000.0;

/// Input/output price pair for one model (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenPricing {
    /// USD per million input tokens
    pub input: f64,
    /// USD per million output tokens
    pub output: f64,
}

impl TokenPricing {
    pub fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }

    /// Cost of one call: input-cost + output-cost
    pub fn cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        input_tokens as f64 * self.input + output_tokens as f64 * self.output
    }
}

/// Model id → pricing table, loaded once and shared read-only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTable {
    prices: HashMap<String, TokenPricing>,
}

impl PricingTable {
    pub fn new(prices: HashMap<String, TokenPricing>) -> Self {
        Self { prices }
    }

    /// Built-in prices for the models referenced by the default rosters
    pub fn builtin() -> Self {
        let prices = [
            ("claude-3-5-haiku-latest", 0.8, 4.0),
            ("claude-3-5-sonnet-latest", 3.0, 15.0),
            ("claude-3-7-sonnet-latest", 3.0, 15.0),
            ("gpt-4o-mini", 0.15, 0.6),
            ("gpt-4o", 2.5, 10.0),
            ("o1", 15.0, 60.0),
            ("mistral-small-latest", 0.1, 0.3),
            ("mistral-large-latest", 2.0, 6.0),
            ("gemini-2.0-flash", 0.1, 0.4),
            // No published price for the thinking preview; billed like flash.
            ("gemini-2.0-flash-thinking-exp", 0.1, 0.4),
        ]
        .into_iter()
        .map(|(model, input, output)| (model.to_string(), TokenPricing::new(input, output)))
        .collect();

        Self { prices }
    }

    /// Look up the pricing for a model
    pub fn get_pricing(&self, model: &str) -> Result<TokenPricing, DomainError> {
        self.prices
            .get(model)
            .copied()
            .ok_or_else(|| DomainError::UnknownModel(model.to_string()))
    }

    pub fn contains(&self, model: &str) -> bool {
        self.prices.contains_key(model)
    }

    /// Add or replace a model's pricing
    pub fn with_model(mut self, model: impl Into<String>, pricing: TokenPricing) -> Self {
        self.prices.insert(model.into(), pricing);
        self
    }

    /// Overlay another table on top of this one
    pub fn merged(mut self, overrides: PricingTable) -> Self {
        self.prices.extend(overrides.prices);
        self
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }
}
