//! Presentation layer for llm-crossval
//!
//! This crate contains CLI definitions, question input, output formatters,
//! and progress reporters.

pub mod cli;
pub mod config;
pub mod input;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::OutputConfig;
pub use input::{InputError, QuestionPrompt, read_question_file, resolve_question};
pub use output::console::ConsoleFormatter;
pub use output::currency::{CurrencyConverter, CurrencyError};
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
