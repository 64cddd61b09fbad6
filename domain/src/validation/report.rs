//! Aggregate outcome of a validation run.

use crate::pricing::UNITS_PER_CURRENCY;
use crate::validation::role::Role;
use crate::validation::stage::{StageFailure, StageResult};
use serde::{Deserialize, Serialize};

/// Complete result of a validation run (cost and timing report)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub question: String,
    /// Display names of every roster member, in order
    pub roster: Vec<String>,
    /// Successful stages in roster order
    pub results: Vec<StageResult>,
    /// Skipped stages in roster order
    pub failures: Vec<StageFailure>,
    /// Wall time of the whole run
    pub elapsed_ms: u64,
}

impl ValidationReport {
    pub fn new(
        question: impl Into<String>,
        roster: Vec<String>,
        results: Vec<StageResult>,
        failures: Vec<StageFailure>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            question: question.into(),
            roster,
            results,
            failures,
            elapsed_ms,
        }
    }

    /// Sum of every stage's cost, in per-million units
    pub fn total_cost(&self) -> f64 {
        self.results.iter().map(|r| r.cost).sum()
    }

    /// Total cost in the pricing currency (USD)
    pub fn total_cost_usd(&self) -> f64 {
        self.total_cost() / UNITS_PER_CURRENCY
    }

    /// The answer to display: the last successful stage
    pub fn final_answer(&self) -> Option<&StageResult> {
        self.results.last()
    }

    /// True when the final answer came from the summarizing backend
    pub fn is_summarized(&self) -> bool {
        self.final_answer()
            .is_some_and(|r| r.role == Role::Summarize)
    }

    /// True when every roster position produced a result
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.results.len() == self.roster.len()
    }

    pub fn into_results(self) -> Vec<StageResult> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::stage::FailureKind;

    fn report(results: Vec<StageResult>, failures: Vec<StageFailure>) -> ValidationReport {
        ValidationReport::new(
            "What is the capital of France?",
            vec!["A".into(), "B".into(), "C".into()],
            results,
            failures,
            12,
        )
    }

    #[test]
    fn test_total_cost_is_linear() {
        let r = report(
            vec![
                StageResult::new("Q", "A", "Paris", 0.002),
                StageResult::new("Q", "B", "Paris, confirmed", 0.001).for_stage(1, Role::Validate),
                StageResult::new("Q", "C", "Paris", 0.0015).for_stage(2, Role::Summarize),
            ],
            vec![],
        );
        assert!((r.total_cost() - 0.0045).abs() < 1e-12);
        assert!(r.is_complete());
        assert!(r.is_summarized());
    }

    #[test]
    fn test_total_cost_usd_divides_by_a_million() {
        let r = report(vec![StageResult::new("Q", "A", "x", 3_000_000.0)], vec![]);
        assert!((r.total_cost_usd() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_report() {
        let r = report(
            vec![],
            vec![StageFailure::new(
                0,
                Role::Initial,
                "A",
                FailureKind::Provider,
                "boom",
            )],
        );
        assert!(r.final_answer().is_none());
        assert!(!r.is_summarized());
        assert!(!r.is_complete());
        assert_eq!(r.total_cost(), 0.0);
    }
}
