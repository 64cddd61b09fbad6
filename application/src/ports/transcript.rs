//! Transcript persistence port.

use crossval_domain::StageResult;
use std::path::PathBuf;

/// Writes a human-readable transcript of a run.
///
/// A failing sink never fails the run; the pipeline logs the error and
/// returns its results unchanged.
pub trait TranscriptSink: Send + Sync {
    /// Persist the results, returning where they were written
    fn save(&self, results: &[StageResult]) -> std::io::Result<PathBuf>;
}
