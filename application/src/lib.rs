//! Application layer for llm-crossval
//!
//! This crate contains the validation use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_client::{LlmClient, ProviderError},
    progress::{NoProgress, ValidationProgress},
    transcript::TranscriptSink,
};
pub use use_cases::run_validation::{
    RunValidationError, RunValidationInput, RunValidationOutput, RunValidationUseCase,
};
