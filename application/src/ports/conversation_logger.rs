//! Port for structured stage-event logging.
//!
//! Defines the [`ConversationLogger`] trait for recording pipeline events
//! (stage started, succeeded, failed, skipped) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the run in a
//! machine-readable format (JSONL).

use crossval_domain::{Role, StageFailure, StageResult, ValidationReport};
use serde_json::{Value, json};

/// A structured pipeline event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "stage_started", "stage_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn stage_started(position: usize, role: Role, model: &str) -> Self {
        Self::new(
            "stage_started",
            json!({ "position": position, "role": role, "model": model }),
        )
    }

    pub fn stage_succeeded(result: &StageResult) -> Self {
        Self::new(
            "stage_succeeded",
            json!({
                "position": result.position,
                "role": result.role,
                "model": result.model_name,
                "cost": result.cost,
                "duration_ms": result.duration_ms,
                "bytes": result.answer.len(),
                "answer": result.answer,
            }),
        )
    }

    pub fn stage_failed(failure: &StageFailure) -> Self {
        let event_type = match failure.kind {
            crossval_domain::FailureKind::NoReferenceAnswer => "stage_skipped",
            _ => "stage_failed",
        };
        Self::new(
            event_type,
            json!({
                "position": failure.position,
                "role": failure.role,
                "model": failure.model_name,
                "kind": failure.kind,
                "reason": failure.reason,
            }),
        )
    }

    pub fn pipeline_finished(report: &ValidationReport) -> Self {
        Self::new(
            "pipeline_finished",
            json!({
                "question": report.question,
                "roster": report.roster,
                "succeeded": report.results.len(),
                "failed": report.failures.len(),
                "total_cost": report.total_cost(),
                "elapsed_ms": report.elapsed_ms,
            }),
        )
    }
}

/// Port for logging pipeline events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// `log` is synchronous and infallible; a logging failure never affects the
/// run.
pub trait ConversationLogger: Send + Sync {
    /// Record a pipeline event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossval_domain::FailureKind;

    #[test]
    fn test_no_reference_answer_is_logged_as_skip() {
        let failure = StageFailure::new(
            1,
            Role::Validate,
            "gpt-4o",
            FailureKind::NoReferenceAnswer,
            "initial stage failed",
        );
        let event = ConversationEvent::stage_failed(&failure);
        assert_eq!(event.event_type, "stage_skipped");
        assert_eq!(event.payload["role"], "validate");
        assert_eq!(event.payload["kind"], "no_reference_answer");
    }

    #[test]
    fn test_provider_failure_event() {
        let failure = StageFailure::new(0, Role::Initial, "m", FailureKind::Provider, "503");
        let event = ConversationEvent::stage_failed(&failure);
        assert_eq!(event.event_type, "stage_failed");
        assert_eq!(event.payload["reason"], "503");
    }

    #[test]
    fn test_stage_succeeded_payload() {
        let result = StageResult::new("Q", "m", "Paris", 2.5).for_stage(0, Role::Initial);
        let event = ConversationEvent::stage_succeeded(&result);
        assert_eq!(event.payload["bytes"], 5);
        assert_eq!(event.payload["cost"], 2.5);
    }
}
