//! Configuration file loading for llm-crossval
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./crossval.toml` or `./.crossval.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/llm-crossval/config.toml`
//! 4. Fallback: `~/.config/llm-crossval/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_CURRENCY, FileBehaviorConfig, FileConfig, FileModelEntry,
    FileModesConfig, FileOutputConfig, FilePricingConfig, FilePromptsConfig, FileProviderConfig,
    FileProvidersConfig, FileTokenPricing,
};
pub use loader::ConfigLoader;
