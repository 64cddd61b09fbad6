//! Output configuration from TOML (`[output]` section)

use crossval_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default display currency
pub const DEFAULT_CURRENCY: &str = "SEK";

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Currency the total cost is shown in
    pub currency: String,
    /// Units of each currency per USD
    pub rates: BTreeMap<String, f64>,
    /// Write a text transcript after each run
    pub transcript: bool,
    /// Directory transcripts are written to
    pub transcript_dir: PathBuf,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            currency: DEFAULT_CURRENCY.to_string(),
            rates: BTreeMap::from([("USD".to_string(), 1.0), ("SEK".to_string(), 10.83)]),
            transcript: true,
            transcript_dir: PathBuf::from(crate::transcript::DEFAULT_TRANSCRIPT_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "json"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.currency, "SEK");
    }

    #[test]
    fn test_default_rates() {
        let config = FileOutputConfig::default();
        assert_eq!(config.rates.get("SEK"), Some(&10.83));
        assert_eq!(config.rates.get("USD"), Some(&1.0));
        assert_eq!(config.transcript_dir, PathBuf::from("outputs"));
    }
}
