//! CLI command definitions

use clap::{Parser, ValueEnum};
use crossval_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer and total cost
    Answer,
    /// Every stage, failures, and timing
    Full,
    /// JSON report
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => DomainOutputFormat::Answer,
            OutputFormat::Full => DomainOutputFormat::Full,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for llm-crossval
#[derive(Parser, Debug)]
#[command(name = "llm-crossval")]
#[command(author, version, about = "Cross-validate an answer across multiple LLMs")]
#[command(long_about = r#"
llm-crossval sends a question through an ordered roster of LLMs:

1. Initial:   the first model answers the question
2. Validate:  each middle model fact-checks the most recent answer
3. Summarize: the last model turns the discussion into one final answer

A model that fails is skipped and the run continues with the next one.

Performance modes (built in): fast, comprehensive, max.
Single letters work too: -m f, -m c.

Configuration files are loaded from (in priority order):
1. --config <path>                      Explicit config file
2. ./crossval.toml                      Project-level config
3. ~/.config/llm-crossval/config.toml   Global config

Example:
  llm-crossval "What is the capital of France?"
  llm-crossval -m comprehensive --file question.txt
  llm-crossval -m max -o full --currency USD "Explain the CAP theorem"
"#)]
pub struct Cli {
    /// The question to cross-validate (prompted for when omitted)
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// Performance mode (defaults to behavior.default_mode)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Output format (defaults to output.format, then "answer")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Currency for the total cost (defaults to output.currency)
    #[arg(long, value_name = "CODE")]
    pub currency: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Don't write a transcript file
    #[arg(long)]
    pub no_transcript: bool,

    /// Directory for the JSONL stage-event log
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_question_and_mode() {
        let cli = Cli::try_parse_from(["llm-crossval", "-m", "c", "-vv", "What is Rust?"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("What is Rust?"));
        assert_eq!(cli.mode.as_deref(), Some("c"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_file_conflicts_with_question() {
        let result = Cli::try_parse_from(["llm-crossval", "--file", "q.txt", "What is Rust?"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        let cli = Cli::try_parse_from(["llm-crossval", "-o", "json", "Q"]).unwrap();
        assert_eq!(
            DomainOutputFormat::from(cli.output.unwrap()),
            DomainOutputFormat::Json
        );
    }
}
