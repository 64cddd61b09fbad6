//! Prompt domain
//!
//! Role-resolved system prompts and user-prompt templates.

pub mod catalog;
mod template;

pub use catalog::{PromptCatalog, RolePrompt};
pub use template::PromptTemplate;
