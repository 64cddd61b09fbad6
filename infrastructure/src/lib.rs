//! Infrastructure layer for llm-crossval
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: vendor HTTP clients, transcript and event
//! writers, and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod transcript;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, DEFAULT_CURRENCY, FileBehaviorConfig, FileConfig,
    FileOutputConfig, FilePromptsConfig, FileProvidersConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{
    ChatCompletionsClient, ClaudeClient, ClientBuildError, ClientFactory, GeminiClient,
    ProviderSettings,
};
pub use transcript::{DEFAULT_TRANSCRIPT_DIR, TextTranscriptWriter};
