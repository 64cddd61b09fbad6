//! Per-stage value objects of a validation run.
//!
//! - [`LlmAnswer`] - text plus the backend's raw response, as returned by one call
//! - [`StageResult`] - durable record of a stage that succeeded
//! - [`StageFailure`] - record of a stage that was skipped

use crate::validation::role::Role;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one backend invocation
///
/// `raw` is the backend's response body, kept only so the adapter that
/// produced it can compute the cost. The pipeline never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmAnswer {
    pub text: String,
    pub raw: Value,
}

impl LlmAnswer {
    pub fn new(text: impl Into<String>, raw: Value) -> Self {
        Self {
            text: text.into(),
            raw,
        }
    }
}

/// One successful pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    /// The original question, identical across a run
    pub question: String,
    /// Display name of the producing backend
    pub model_name: String,
    pub answer: String,
    /// Cost in per-million units (see [`crate::pricing`])
    pub cost: f64,
    pub timestamp: DateTime<Local>,
    pub role: Role,
    /// Roster position that produced this result
    pub position: usize,
    #[serde(default)]
    pub duration_ms: u64,
}

impl StageResult {
    /// Create a result stamped with the current local time.
    ///
    /// Role and position default to the initial stage; the pipeline sets them
    /// with [`StageResult::for_stage`].
    pub fn new(
        question: impl Into<String>,
        model_name: impl Into<String>,
        answer: impl Into<String>,
        cost: f64,
    ) -> Self {
        Self {
            question: question.into(),
            model_name: model_name.into(),
            answer: answer.into(),
            cost,
            timestamp: Local::now(),
            role: Role::Initial,
            position: 0,
            duration_ms: 0,
        }
    }

    pub fn for_stage(mut self, position: usize, role: Role) -> Self {
        self.position = position;
        self.role = role;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Render prior stages as the discussion fed to a summarizer.
    ///
    /// Each stage becomes `Question: …\nAnswer: …`; stages are separated by a
    /// blank line.
    pub fn render_discussion(discussion: &[StageResult]) -> String {
        discussion
            .iter()
            .map(|r| format!("Question: {}\nAnswer: {}", r.question, r.answer))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Why a stage produced no result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The backend call or its cost calculation failed
    Provider,
    /// The backend call exceeded the per-call timeout
    Timeout,
    /// No earlier stage produced an answer to validate or summarize
    NoReferenceAnswer,
}

/// A skipped pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageFailure {
    pub position: usize,
    pub role: Role,
    pub model_name: String,
    pub kind: FailureKind,
    pub reason: String,
}

impl StageFailure {
    pub fn new(
        position: usize,
        role: Role,
        model_name: impl Into<String>,
        kind: FailureKind,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            position,
            role,
            model_name: model_name.into(),
            kind,
            reason: reason.into(),
        }
    }
}
