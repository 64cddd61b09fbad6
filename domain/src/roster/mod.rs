//! Model roster selection by performance mode.
//!
//! A roster is an ordered list of backends. Order is configuration, not
//! incidental: it fixes which backend answers, which fact-check and which
//! summarizes.

use crate::core::error::DomainError;
use crate::core::model::ModelDescriptor;
use std::collections::BTreeMap;

/// Mode used when none is requested
pub const DEFAULT_MODE: &str = "fast";

/// Performance mode → ordered roster table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    modes: BTreeMap<String, Vec<ModelDescriptor>>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        let mut modes = BTreeMap::new();
        modes.insert(
            "fast".to_string(),
            vec![
                ModelDescriptor::claude("claude-3-5-haiku-latest"),
                ModelDescriptor::openai("gpt-4o-mini"),
                ModelDescriptor::gemini("gemini-2.0-flash"),
            ],
        );
        modes.insert(
            "comprehensive".to_string(),
            vec![
                ModelDescriptor::claude("claude-3-5-sonnet-latest"),
                ModelDescriptor::openai("gpt-4o"),
                ModelDescriptor::gemini("gemini-2.0-flash-thinking-exp"),
            ],
        );
        modes.insert(
            "max".to_string(),
            vec![
                ModelDescriptor::claude("claude-3-7-sonnet-latest"),
                ModelDescriptor::openai("o1"),
                ModelDescriptor::mistral("mistral-large-latest"),
                ModelDescriptor::gemini("gemini-2.0-flash-thinking-exp"),
            ],
        );
        Self { modes }
    }
}

impl RosterConfig {
    pub fn new(modes: BTreeMap<String, Vec<ModelDescriptor>>) -> Self {
        Self { modes }
    }

    /// Add or replace one mode's roster
    pub fn with_mode(mut self, mode: impl Into<String>, roster: Vec<ModelDescriptor>) -> Self {
        self.modes.insert(mode.into(), roster);
        self
    }

    /// Overlay configured modes on top of this table
    pub fn merged(mut self, overrides: RosterConfig) -> Self {
        self.modes.extend(overrides.modes);
        self
    }

    /// Configured roster for a mode tag, exact match only
    pub fn roster_for(&self, mode: &str) -> Option<&[ModelDescriptor]> {
        self.modes.get(mode).map(Vec::as_slice)
    }

    pub fn modes(&self) -> impl Iterator<Item = (&str, &[ModelDescriptor])> {
        self.modes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Resolves a performance mode tag to an ordered roster.
///
/// Unknown tags are rejected with [`DomainError::UnknownPerformanceMode`];
/// there is no fallback mode.
#[derive(Debug, Clone)]
pub struct RosterSelector {
    config: RosterConfig,
}

impl RosterSelector {
    pub fn new(config: RosterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Normalize a mode tag, expanding the single-letter shorthands.
    ///
    /// A single letter expands to the unique configured mode starting with
    /// it; anything else is lowercased and trimmed.
    pub fn normalize(&self, mode: &str) -> String {
        let mode = mode.trim().to_lowercase();
        if mode.chars().count() == 1 {
            let mut candidates = self
                .config
                .modes
                .keys()
                .filter(|name| name.starts_with(mode.as_str()));
            if let (Some(only), None) = (candidates.next(), candidates.next()) {
                return only.clone();
            }
        }
        mode
    }

    /// Ordered roster for a performance mode
    pub fn select_roster(&self, mode: &str) -> Result<Vec<ModelDescriptor>, DomainError> {
        let normalized = self.normalize(mode);
        let roster = self
            .config
            .roster_for(&normalized)
            .ok_or_else(|| DomainError::UnknownPerformanceMode(mode.trim().to_string()))?;

        if roster.is_empty() {
            return Err(DomainError::EmptyRoster(normalized));
        }
        Ok(roster.to_vec())
    }
}

impl Default for RosterSelector {
    fn default() -> Self {
        Self::new(RosterConfig::default())
    }
}
