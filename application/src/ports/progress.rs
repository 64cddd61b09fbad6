//! Progress notification port
//!
//! Defines the interface for reporting progress during a validation run.

use crossval_domain::{Role, ValidationReport};

/// Callback for progress updates during a validation run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait ValidationProgress: Send + Sync {
    /// Called once before the first stage
    fn on_run_start(&self, _roster_size: usize) {}

    /// Called when a stage starts
    fn on_stage_start(&self, position: usize, role: Role, model: &str);

    /// Called when a stage finishes, successfully or not
    fn on_stage_complete(&self, position: usize, role: Role, model: &str, success: bool);

    /// Called once after the last stage
    fn on_run_complete(&self, _report: &ValidationReport) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ValidationProgress for NoProgress {
    fn on_stage_start(&self, _position: usize, _role: Role, _model: &str) {}
    fn on_stage_complete(&self, _position: usize, _role: Role, _model: &str, _success: bool) {}
}
