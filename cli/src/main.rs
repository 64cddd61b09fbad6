//! CLI entrypoint for llm-crossval
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use crossval_application::{
    ConversationLogger, NoProgress, RunValidationInput, RunValidationUseCase, ValidationProgress,
};
use crossval_domain::ProviderKind;
use crossval_infrastructure::{
    ClientFactory, ConfigLoader, FileConfig, JsonlConversationLogger, TextTranscriptWriter,
};
use crossval_presentation::{
    Cli, OutputConfig, OutputFormatter, ProgressReporter, SimpleProgress, resolve_question,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging: `-v` count wins, then `RUST_LOG`, then warn
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let name = path
                .file_name()
                .context("--log-file must name a file")?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    for issue in config.ensure_valid()? {
        warn!("{}", issue.message);
    }
    Ok(config)
}

fn output_config(cli: &Cli, config: &FileConfig) -> OutputConfig {
    OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
        currency: cli
            .currency
            .clone()
            .unwrap_or_else(|| config.output.currency.clone()),
        rates: config.output.rates.clone(),
        show_progress: !cli.quiet,
    }
}

fn client_factory(config: &FileConfig) -> Result<ClientFactory> {
    let mut factory = ClientFactory::new(config.pricing_table(), config.prompt_catalog())?;
    for kind in ProviderKind::all() {
        factory = factory.with_provider(kind, config.provider_settings(kind));
    }
    Ok(factory)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting llm-crossval");

    let config = load_config(&cli)?;
    let output = output_config(&cli, &config);
    output.ensure_currency()?;
    output.apply_color();

    // Select the roster before asking for the question so a bad mode fails fast
    let mode = cli
        .mode
        .clone()
        .unwrap_or_else(|| config.behavior.default_mode.clone());
    let selector = config.roster_selector();
    let roster = selector.select_roster(&mode)?;
    info!("Mode '{}': {} models", selector.normalize(&mode), roster.len());

    // === Dependency Injection ===
    let clients = client_factory(&config)?.build_roster(&roster)?;

    let question = resolve_question(cli.question.clone(), cli.file.as_deref())?;

    let mut use_case = RunValidationUseCase::new().with_behavior(config.behavior_config());
    if config.output.transcript && !cli.no_transcript {
        use_case = use_case.with_transcript(Arc::new(TextTranscriptWriter::new(
            config.output.transcript_dir.clone(),
        )));
    }
    if let Some(dir) = &cli.log_dir {
        match JsonlConversationLogger::in_dir(dir) {
            Some(logger) => {
                info!("Writing stage events to {}", logger.path().display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                use_case = use_case.with_logger(logger);
            }
            None => warn!("Stage event log disabled"),
        }
    }

    let progress: Box<dyn ValidationProgress> = if !output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let result = use_case
        .execute_with_progress(RunValidationInput::new(question, clients), progress.as_ref())
        .await?;

    println!(
        "{}",
        output.formatter().render(&result.report, output.format)
    );

    if let Some(path) = &result.transcript
        && output.show_progress
    {
        eprintln!("Transcript saved to {}", path.display());
    }

    if result.report.results.is_empty() {
        bail!("No model produced an answer");
    }

    Ok(())
}
