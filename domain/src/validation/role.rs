//! Roles a backend can play in a validation run.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The purpose of one backend invocation, fixed by its roster position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Produce a fresh answer to the question
    Initial,
    /// Fact-check a prior answer against the original question
    Validate,
    /// Distill the whole discussion into one final answer
    Summarize,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Initial => "initial",
            Role::Validate => "validate",
            Role::Summarize => "summarize",
        }
    }

    /// Verb used in progress messages ("Asking gpt-4o...")
    pub fn action(&self) -> &'static str {
        match self {
            Role::Initial => "Asking",
            Role::Validate => "Fact-checking with",
            Role::Summarize => "Summarizing with",
        }
    }

    pub fn all() -> [Role; 3] {
        [Role::Initial, Role::Validate, Role::Summarize]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" | "default" => Ok(Role::Initial),
            "validate" | "validation" => Ok(Role::Validate),
            "summarize" | "summary" => Ok(Role::Summarize),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// Role for roster position `index` in a roster of `len` backends.
///
/// Position 0 is always [`Role::Initial`], including the single-backend case.
/// The last position of a longer roster is [`Role::Summarize`], everything in
/// between is [`Role::Validate`].
pub fn role_for_position(index: usize, len: usize) -> Role {
    debug_assert!(index < len, "position {index} outside roster of {len}");
    if index == 0 {
        Role::Initial
    } else if index + 1 == len {
        Role::Summarize
    } else {
        Role::Validate
    }
}

/// Pipeline state for a position, used by progress reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    AwaitingInitial,
    AwaitingValidation,
    AwaitingSummary,
    Done,
}

impl PipelineState {
    /// State of a pipeline about to run position `index` of `len`
    pub fn at(index: usize, len: usize) -> Self {
        if index >= len {
            return PipelineState::Done;
        }
        match role_for_position(index, len) {
            Role::Initial => PipelineState::AwaitingInitial,
            Role::Validate => PipelineState::AwaitingValidation,
            Role::Summarize => PipelineState::AwaitingSummary,
        }
    }
}
