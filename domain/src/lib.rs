//! Domain layer for llm-crossval
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Cross-validation
//!
//! A question is routed through an ordered **roster** of LLM backends. Each
//! backend plays a **role** fixed by its position:
//!
//! - **Initial** (first): answers the question
//! - **Validate** (middle): fact-checks the most recent answer
//! - **Summarize** (last): distills the whole discussion into one answer
//!
//! Every successful stage becomes a [`StageResult`]; failed stages are
//! skipped and recorded as [`StageFailure`]s.

pub mod config;
pub mod core;
pub mod pricing;
pub mod prompt;
pub mod roster;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    model::{ModelDescriptor, ProviderKind},
    question::Question,
};
pub use pricing::{PricingTable, TokenPricing, UNITS_PER_CURRENCY};
pub use prompt::{PromptCatalog, PromptTemplate, RolePrompt};
pub use roster::{DEFAULT_MODE, RosterConfig, RosterSelector};
pub use validation::{
    FailureKind, LlmAnswer, PipelineState, Role, StageFailure, StageResult, ValidationReport,
    role_for_position,
};
