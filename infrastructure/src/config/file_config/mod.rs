//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod behavior;
mod modes;
mod output;
mod prompts;
mod providers;

pub use behavior::FileBehaviorConfig;
pub use modes::{
    FileModelEntry, FileModesConfig, FilePricingConfig, FileTokenPricing, parse_modes,
    parse_pricing,
};
pub use output::{DEFAULT_CURRENCY, FileOutputConfig};
pub use prompts::FilePromptsConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig};

use crate::providers::ProviderSettings;
use crossval_application::BehaviorConfig;
use crossval_domain::{
    ConfigIssue, ConfigIssueCode, PricingTable, PromptCatalog, ProviderKind, RosterConfig,
    RosterSelector,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Returned when the configuration has at least one error-level issue
#[derive(Error, Debug)]
#[error("invalid configuration:\n{}", format_issues(.0))]
pub struct ConfigValidationError(pub Vec<ConfigIssue>);

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {}", i.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default mode and timeout
    pub behavior: FileBehaviorConfig,
    /// Extra or replacement performance modes
    pub modes: FileModesConfig,
    /// Extra or replacement model prices
    pub pricing: FilePricingConfig,
    /// Prompt overrides
    pub prompts: FilePromptsConfig,
    /// Vendor endpoints and credentials
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Built-in modes with configured modes layered on top
    pub fn roster_config(&self) -> RosterConfig {
        RosterConfig::default().merged(parse_modes(&self.modes).0)
    }

    pub fn roster_selector(&self) -> RosterSelector {
        RosterSelector::new(self.roster_config())
    }

    /// Built-in prices with configured prices layered on top
    pub fn pricing_table(&self) -> PricingTable {
        PricingTable::builtin().merged(parse_pricing(&self.pricing).0)
    }

    pub fn prompt_catalog(&self) -> PromptCatalog {
        self.prompts.to_catalog()
    }

    pub fn behavior_config(&self) -> BehaviorConfig {
        self.behavior.to_behavior_config()
    }

    pub fn provider_settings(&self, kind: ProviderKind) -> ProviderSettings {
        self.providers.settings(kind)
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks, in order:
    /// 1. Mode entries (empty rosters, empty model names, unknown providers)
    /// 2. Pricing keys
    /// 3. Prompt completeness
    /// 4. The default mode exists
    /// 5. Every roster model has a price
    /// 6. API keys for the default mode's providers (warnings only)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1-2. Parse validation
        issues.extend(parse_modes(&self.modes).1);
        issues.extend(parse_pricing(&self.pricing).1);

        // 3. Prompts
        if let Err(e) = self.prompt_catalog().ensure_complete() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::IncompletePrompts {
                    role: e.to_string(),
                },
                format!("prompts: {e}"),
            ));
        }

        // 4. Default mode
        let selector = self.roster_selector();
        let default_roster = selector.select_roster(&self.behavior.default_mode);
        if default_roster.is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownDefaultMode {
                    mode: self.behavior.default_mode.clone(),
                },
                format!(
                    "behavior.default_mode: '{}' is not a configured mode",
                    self.behavior.default_mode
                ),
            ));
        }

        // 5. Pricing coverage
        let pricing = self.pricing_table();
        for (mode, roster) in selector.config().modes() {
            for descriptor in roster {
                if !pricing.contains(&descriptor.model) {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::UnpricedModel {
                            mode: mode.to_string(),
                            model: descriptor.model.clone(),
                        },
                        format!(
                            "modes.{mode}: model '{}' has no [pricing] entry; this mode will fail to start",
                            descriptor.model
                        ),
                    ));
                }
            }
        }

        // 6. Credentials
        if let Ok(roster) = default_roster {
            let providers: BTreeSet<&str> = roster.iter().map(|d| d.provider.as_str()).collect();
            for kind in ProviderKind::all() {
                if !providers.contains(kind.as_str()) {
                    continue;
                }
                let settings = self.provider_settings(kind);
                if settings.resolve_api_key().is_none() {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::MissingApiKey {
                            provider: kind.to_string(),
                            env: settings.api_key_env.clone(),
                        },
                        format!(
                            "providers.{kind}: no API key ({} is not set)",
                            settings.api_key_env
                        ),
                    ));
                }
            }
        }

        issues
    }

    /// Fail on error-level issues, passing warnings back to the caller
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossval_domain::{ModelDescriptor, OutputFormat, TokenPricing};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[behavior]
default_mode = "cheap"
timeout_seconds = 30

[[modes.cheap]]
provider = "mistral"
model = "mistral-small-latest"

[[modes.cheap]]
provider = "gemini"
model = "gemini-2.0-flash"

[pricing.my-local-model]
input = 0.0
output = 0.0

[prompts]
initial_system = "You are a concise research assistant."

[providers.openai]
base_url = "http://localhost:8080"

[output]
format = "full"
color = false
currency = "USD"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.behavior.default_mode, "cheap");
        assert_eq!(config.behavior.timeout_seconds, Some(30));
        assert_eq!(config.modes["cheap"].len(), 2);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert_eq!(config.output.currency, "USD");

        let roster = config.roster_selector().select_roster("cheap").unwrap();
        assert_eq!(roster[0], ModelDescriptor::mistral("mistral-small-latest"));
        // Built-in modes survive
        assert!(config.roster_config().roster_for("max").is_some());

        assert_eq!(
            config.pricing_table().get_pricing("my-local-model").unwrap(),
            TokenPricing::new(0.0, 0.0)
        );
        assert_eq!(
            config
                .provider_settings(ProviderKind::OpenAi)
                .base_url,
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.behavior.default_mode, "fast");
        assert!(config.modes.is_empty());
        assert!(config.output.color);
        assert!(config.output.transcript);
        assert_eq!(config.roster_config(), RosterConfig::default());
    }

    #[test]
    fn test_validate_default_config_has_no_errors() {
        let config = FileConfig::default();
        // Missing API keys depend on the environment and are warnings only
        assert!(config.validate().iter().all(|i| !i.is_error()));
        assert!(config.ensure_valid().is_ok());
    }

    #[test]
    fn test_validate_unknown_default_mode() {
        let config: FileConfig = toml::from_str(
            r#"
[behavior]
default_mode = "turbo"
"#,
        )
        .unwrap();

        let err = config.ensure_valid().unwrap_err();
        assert!(err.0.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::UnknownDefaultMode { mode } if mode == "turbo"
        )));
        assert!(err.to_string().contains("'turbo' is not a configured mode"));
    }

    #[test]
    fn test_validate_unpriced_model_is_warning() {
        let config: FileConfig = toml::from_str(
            r#"
[[modes.local]]
provider = "openai"
model = "llama-3-70b"
"#,
        )
        .unwrap();

        let issues = config.validate();
        let unpriced: Vec<_> = issues
            .iter()
            .filter(|i| matches!(i.code, ConfigIssueCode::UnpricedModel { .. }))
            .collect();
        assert_eq!(unpriced.len(), 1);
        assert!(!unpriced[0].is_error());
    }

    #[test]
    fn test_validate_incomplete_prompts() {
        let config: FileConfig = toml::from_str(
            r#"
[prompts]
validate_template = "Check {original_question}"
"#,
        )
        .unwrap();

        assert!(config.validate().iter().any(|i| i.is_error()
            && matches!(i.code, ConfigIssueCode::IncompletePrompts { .. })));
    }
}
