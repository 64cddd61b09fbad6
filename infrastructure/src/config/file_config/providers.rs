//! Provider configuration from TOML (`[providers.<name>]` sections)

use crate::providers::ProviderSettings;
use crossval_domain::ProviderKind;
use serde::{Deserialize, Serialize};

/// Raw settings for one vendor; unset fields keep the built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key
    pub api_key_env: Option<String>,
    /// Direct API key (the environment variable is preferred)
    pub api_key: Option<String>,
    /// Base URL, e.g. for a proxy or compatible gateway
    pub base_url: Option<String>,
    /// Max tokens per response
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub claude: FileProviderConfig,
    pub openai: FileProviderConfig,
    pub mistral: FileProviderConfig,
    pub gemini: FileProviderConfig,
}

impl FileProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &FileProviderConfig {
        match kind {
            ProviderKind::Claude => &self.claude,
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Mistral => &self.mistral,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    /// Built-in settings for `kind` with the configured fields applied
    pub fn settings(&self, kind: ProviderKind) -> ProviderSettings {
        let file = self.get(kind);
        let defaults = ProviderSettings::defaults(kind);
        ProviderSettings {
            api_key_env: file.api_key_env.clone().unwrap_or(defaults.api_key_env),
            api_key: file.api_key.clone(),
            base_url: file.base_url.clone().unwrap_or(defaults.base_url),
            max_tokens: file.max_tokens.or(defaults.max_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config: FileProvidersConfig = toml::from_str(
            r#"
[claude]
max_tokens = 2048

[mistral]
base_url = "http://localhost:8080"
api_key_env = "MY_MISTRAL_KEY"
"#,
        )
        .unwrap();

        let claude = config.settings(ProviderKind::Claude);
        assert_eq!(claude.max_tokens, Some(2048));
        assert_eq!(claude.api_key_env, "ANTHROPIC_API_KEY");

        let mistral = config.settings(ProviderKind::Mistral);
        assert_eq!(mistral.base_url, "http://localhost:8080");
        assert_eq!(mistral.api_key_env, "MY_MISTRAL_KEY");
        assert_eq!(mistral.max_tokens, None);
    }

    #[test]
    fn test_defaults_match_builtin_settings() {
        let config = FileProvidersConfig::default();
        for kind in ProviderKind::all() {
            assert_eq!(config.settings(kind), ProviderSettings::defaults(kind));
        }
    }
}
