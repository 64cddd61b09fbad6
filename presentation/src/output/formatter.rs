//! Output formatter trait

use crossval_domain::{OutputFormat, ValidationReport};

/// Trait for formatting validation reports
pub trait OutputFormatter {
    /// Final answer and total cost only
    fn format_answer(&self, report: &ValidationReport) -> String;

    /// Every stage, failures, and timing
    fn format_full(&self, report: &ValidationReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &ValidationReport) -> String;

    fn render(&self, report: &ValidationReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => self.format_answer(report),
            OutputFormat::Full => self.format_full(report),
            OutputFormat::Json => self.format_json(report),
        }
    }
}
