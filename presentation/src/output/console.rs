//! Console output formatter for validation reports

use crate::output::currency::CurrencyConverter;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use crossval_domain::{Role, StageFailure, StageResult, UNITS_PER_CURRENCY, ValidationReport};

/// Formats validation reports for console display
pub struct ConsoleFormatter {
    converter: CurrencyConverter,
    currency: String,
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new(CurrencyConverter::default(), "SEK")
    }
}

enum Stage<'a> {
    Succeeded(&'a StageResult),
    Failed(&'a StageFailure),
}

impl ConsoleFormatter {
    pub fn new(converter: CurrencyConverter, currency: impl Into<String>) -> Self {
        Self {
            converter,
            currency: currency.into().to_uppercase(),
        }
    }

    /// Convert USD into the display currency, falling back to USD
    fn money(&self, usd: f64) -> (f64, &str) {
        match self.converter.convert(usd, &self.currency) {
            Ok(amount) => (amount, self.currency.as_str()),
            Err(_) => (usd, "USD"),
        }
    }

    fn total_line(&self, report: &ValidationReport) -> String {
        let (amount, currency) = self.money(report.total_cost_usd());
        format!("{} {:.3} {}", "Total cost:".bold(), amount, currency)
    }

    fn role_label(role: Role) -> &'static str {
        match role {
            Role::Initial => "initial answer",
            Role::Validate => "fact check",
            Role::Summarize => "summary",
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{}\n{}\n", line.cyan(), title.cyan().bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("── {} ──", title).yellow().bold())
    }

    /// Successful and failed stages merged back into roster order
    fn stages(report: &ValidationReport) -> Vec<(usize, Stage<'_>)> {
        let mut stages: Vec<(usize, Stage<'_>)> = report
            .results
            .iter()
            .map(|r| (r.position, Stage::Succeeded(r)))
            .chain(
                report
                    .failures
                    .iter()
                    .map(|f| (f.position, Stage::Failed(f))),
            )
            .collect();
        stages.sort_by_key(|(position, _)| *position);
        stages
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_answer(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        match report.final_answer() {
            Some(result) => {
                output.push_str(result.answer.trim_end());
                output.push('\n');
            }
            None => {
                output.push_str(&format!("{}\n", "No model produced an answer.".red().bold()));
            }
        }

        output.push_str("\n---\n");
        output.push_str(&self.total_line(report));
        output.push('\n');
        output
    }

    fn format_full(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Cross-validation Results"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            report.question
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Models:".cyan().bold(),
            report.roster.join(" -> ")
        ));

        for (position, stage) in Self::stages(report) {
            match stage {
                Stage::Succeeded(result) => {
                    let (cost, currency) = self.money(result.cost / UNITS_PER_CURRENCY);
                    output.push_str(&Self::section_header(&format!(
                        "{}. {} ({})",
                        position + 1,
                        result.model_name,
                        Self::role_label(result.role)
                    )));
                    output.push_str(result.answer.trim_end());
                    output.push_str(&format!(
                        "\n{}\n",
                        format!("{:.3} {} · {} ms", cost, currency, result.duration_ms).dimmed()
                    ));
                }
                Stage::Failed(failure) => {
                    output.push_str(&format!(
                        "\n{}\n{} {}\n",
                        format!(
                            "── {}. {} ({}) ──",
                            position + 1,
                            failure.model_name,
                            Self::role_label(failure.role)
                        )
                        .red()
                        .bold(),
                        "Skipped:".red(),
                        failure.reason
                    ));
                }
            }
        }

        output.push_str(&Self::section_header("Final Answer"));
        match report.final_answer() {
            Some(result) => {
                output.push_str(result.answer.trim_end());
                output.push('\n');
            }
            None => output.push_str(&format!("{}\n", "No model produced an answer.".red())),
        }

        output.push('\n');
        output.push_str(&format!(
            "{} {}/{} stages, {} ms\n",
            "Completed:".bold(),
            report.results.len(),
            report.roster.len(),
            report.elapsed_ms
        ));
        output.push_str(&self.total_line(report));
        output.push('\n');
        output
    }

    fn format_json(&self, report: &ValidationReport) -> String {
        let (amount, currency) = self.money(report.total_cost_usd());
        let mut value = serde_json::to_value(report).unwrap_or_default();
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "final_answer".to_string(),
                serde_json::json!(report.final_answer().map(|r| &r.answer)),
            );
            map.insert("total_cost".to_string(), serde_json::json!(amount));
            map.insert("currency".to_string(), serde_json::json!(currency));
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossval_domain::FailureKind;

    fn report() -> ValidationReport {
        ValidationReport::new(
            "What is the capital of France?",
            vec!["A".into(), "B".into(), "C".into()],
            vec![
                StageResult::new("What is the capital of France?", "A", "Paris", 2000.0)
                    .for_stage(0, Role::Initial),
                StageResult::new("What is the capital of France?", "C", "Paris.", 1500.0)
                    .for_stage(2, Role::Summarize),
            ],
            vec![StageFailure::new(
                1,
                Role::Validate,
                "B",
                FailureKind::Provider,
                "Connection error: refused",
            )],
            1234,
        )
    }

    fn plain() -> ConsoleFormatter {
        colored::control::set_override(false);
        ConsoleFormatter::default()
    }

    #[test]
    fn test_answer_shows_last_result_and_sek_total() {
        let output = plain().format_answer(&report());
        assert!(output.starts_with("Paris.\n"));
        // 3500 units = 0.0035 USD = 0.037905 SEK
        assert!(output.contains("Total cost: 0.038 SEK"));
    }

    #[test]
    fn test_answer_with_no_results() {
        let empty = ValidationReport::new("Q", vec!["A".into()], vec![], vec![], 5);
        let output = plain().format_answer(&empty);
        assert!(output.contains("No model produced an answer."));
        assert!(output.contains("0.000 SEK"));
    }

    #[test]
    fn test_full_lists_stages_in_roster_order() {
        let output = plain().format_full(&report());
        let a = output.find("1. A (initial answer)").unwrap();
        let b = output.find("2. B (fact check)").unwrap();
        let c = output.find("3. C (summary)").unwrap();
        assert!(a < b && b < c);
        assert!(output.contains("Skipped: Connection error: refused"));
        assert!(output.contains("Completed: 2/3 stages, 1234 ms"));
    }

    #[test]
    fn test_json_includes_totals() {
        let formatter = ConsoleFormatter::new(CurrencyConverter::default(), "usd");
        let json: serde_json::Value =
            serde_json::from_str(&formatter.format_json(&report())).unwrap();
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["final_answer"], "Paris.");
        assert!((json["total_cost"].as_f64().unwrap() - 0.0035).abs() < 1e-12);
        assert_eq!(json["failures"][0]["kind"], "provider");
    }

    #[test]
    fn test_unknown_currency_falls_back_to_usd() {
        let formatter = ConsoleFormatter::new(CurrencyConverter::default(), "EUR");
        colored::control::set_override(false);
        assert!(formatter.format_answer(&report()).trim_end().ends_with(" USD"));
    }
}
