//! Validation domain
//!
//! Roles, per-stage records and the aggregate report of a cross-validation run.

pub mod report;
pub mod role;
pub mod stage;

pub use report::ValidationReport;
pub use role::{PipelineState, Role, role_for_position};
pub use stage::{FailureKind, LlmAnswer, StageFailure, StageResult};
