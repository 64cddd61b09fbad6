//! Performance modes and pricing from TOML (`[[modes.<tag>]]`, `[pricing.<model>]`)

use crossval_domain::{
    ConfigIssue, ConfigIssueCode, ModelDescriptor, PricingTable, ProviderKind, RosterConfig,
    TokenPricing,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One roster entry as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModelEntry {
    pub provider: String,
    pub model: String,
}

/// Mode tag → ordered roster entries
pub type FileModesConfig = BTreeMap<String, Vec<FileModelEntry>>;

/// Per-million-token prices from the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileTokenPricing {
    pub input: f64,
    pub output: f64,
}

/// Model id → price overrides
pub type FilePricingConfig = BTreeMap<String, FileTokenPricing>;

/// Parse configured modes into a roster table.
///
/// Returns the modes that parsed cleanly, plus issues for the ones that did
/// not. A mode with any bad entry is left out entirely so it can never run
/// with a silently shortened roster.
pub fn parse_modes(modes: &FileModesConfig) -> (RosterConfig, Vec<ConfigIssue>) {
    let mut parsed = BTreeMap::new();
    let mut issues = Vec::new();

    for (mode, entries) in modes {
        if entries.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyRoster { mode: mode.clone() },
                format!("modes.{mode}: roster is empty"),
            ));
            continue;
        }

        let mut roster = Vec::with_capacity(entries.len());
        let mut valid = true;
        for (i, entry) in entries.iter().enumerate() {
            if entry.model.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: format!("modes.{mode}[{i}].model"),
                    },
                    format!("modes.{mode}[{i}]: model name cannot be empty"),
                ));
                valid = false;
                continue;
            }
            match entry.provider.parse::<ProviderKind>() {
                Ok(provider) => roster.push(ModelDescriptor::new(provider, entry.model.trim())),
                Err(_) => {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::UnknownProvider {
                            mode: mode.clone(),
                            provider: entry.provider.clone(),
                        },
                        format!(
                            "modes.{mode}[{i}]: unknown provider '{}' (expected claude, openai, mistral or gemini)",
                            entry.provider
                        ),
                    ));
                    valid = false;
                }
            }
        }

        if valid {
            parsed.insert(mode.clone(), roster);
        }
    }

    (RosterConfig::new(parsed), issues)
}

/// Parse configured prices into a table of overrides
pub fn parse_pricing(pricing: &FilePricingConfig) -> (PricingTable, Vec<ConfigIssue>) {
    let mut table = PricingTable::default();
    let mut issues = Vec::new();

    for (model, price) in pricing {
        if model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "pricing".to_string(),
                },
                "pricing: model name cannot be empty",
            ));
            continue;
        }
        table = table.with_model(model.trim(), TokenPricing::new(price.input, price.output));
    }

    (table, issues)
}
