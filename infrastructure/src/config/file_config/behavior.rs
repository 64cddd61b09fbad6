//! Behavior configuration from TOML (`[behavior]` section)

use crossval_application::BehaviorConfig;
use crossval_domain::DEFAULT_MODE;
use serde::{Deserialize, Serialize};

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Performance mode used when `--mode` is not given
    pub default_mode: String,
    /// Per-call timeout in seconds; 0 disables it
    pub timeout_seconds: Option<u64>,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            default_mode: DEFAULT_MODE.to_string(),
            timeout_seconds: Some(120),
        }
    }
}

impl FileBehaviorConfig {
    pub fn to_behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.timeout_seconds)
    }
}
