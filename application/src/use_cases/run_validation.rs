//! Run Validation use case
//!
//! Drives an ordered roster of backends through the role rotation:
//! the first backend answers, middle backends fact-check the most recent
//! answer, and the last backend summarizes everything that succeeded.
//!
//! Stages run strictly in sequence because each one consumes the previous
//! stage's output. A failing stage is logged and skipped; the run always
//! visits every roster position exactly once.

use crate::config::BehaviorConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_client::{LlmClient, ProviderError};
use crate::ports::progress::{NoProgress, ValidationProgress};
use crate::ports::transcript::TranscriptSink;
use crossval_domain::{
    DomainError, FailureKind, LlmAnswer, PipelineState, Question, Role, StageFailure,
    StageResult, ValidationReport, role_for_position,
};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a run before any backend is invoked
#[derive(Error, Debug)]
pub enum RunValidationError {
    #[error("No models configured")]
    NoModels,

    #[error("Invalid question: {0}")]
    InvalidQuestion(#[from] DomainError),
}

/// Input for the RunValidation use case
#[derive(Clone)]
pub struct RunValidationInput {
    /// The question to cross-validate
    pub question: Question,
    /// Backends in role order
    pub roster: Vec<Arc<dyn LlmClient>>,
}

impl RunValidationInput {
    pub fn new(question: Question, roster: Vec<Arc<dyn LlmClient>>) -> Self {
        Self { question, roster }
    }

    /// Build an input from raw text, rejecting a blank question
    pub fn try_new(
        question: impl Into<String>,
        roster: Vec<Arc<dyn LlmClient>>,
    ) -> Result<Self, RunValidationError> {
        Ok(Self::new(Question::try_new(question)?, roster))
    }
}

/// Output of a run: the report, plus where the transcript went (if anywhere)
#[derive(Debug, Clone)]
pub struct RunValidationOutput {
    pub report: ValidationReport,
    pub transcript: Option<PathBuf>,
}

/// Use case for running a cross-validation pipeline
pub struct RunValidationUseCase {
    behavior: BehaviorConfig,
    logger: Arc<dyn ConversationLogger>,
    transcript: Option<Arc<dyn TranscriptSink>>,
}

impl Default for RunValidationUseCase {
    fn default() -> Self {
        Self::new()
    }
}

impl RunValidationUseCase {
    pub fn new() -> Self {
        Self {
            behavior: BehaviorConfig::default(),
            logger: Arc::new(NoConversationLogger),
            transcript: None,
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_transcript(mut self, sink: Arc<dyn TranscriptSink>) -> Self {
        self.transcript = Some(sink);
        self
    }

    /// Run the pipeline and return only the successful stages
    pub async fn validate(
        &self,
        roster: Vec<Arc<dyn LlmClient>>,
        question: impl Into<String>,
    ) -> Result<Vec<StageResult>, RunValidationError> {
        let output = self
            .execute(RunValidationInput::try_new(question, roster)?)
            .await?;
        Ok(output.report.into_results())
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunValidationInput,
    ) -> Result<RunValidationOutput, RunValidationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunValidationInput,
        progress: &dyn ValidationProgress,
    ) -> Result<RunValidationOutput, RunValidationError> {
        if input.roster.is_empty() {
            return Err(RunValidationError::NoModels);
        }

        let started = Instant::now();
        let question = input.question.content();
        let total = input.roster.len();

        info!("Starting validation with {} models", total);
        progress.on_run_start(total);

        let mut results: Vec<StageResult> = Vec::new();
        let mut failures: Vec<StageFailure> = Vec::new();
        // Most recent successful answer; never rolled back on failure.
        let mut reference: Option<String> = None;

        for (position, client) in input.roster.iter().enumerate() {
            let role = role_for_position(position, total);
            let name = client.display_name().to_string();
            debug!(state = ?PipelineState::at(position, total), "Stage {}", position);

            info!("{} {}...", role.action(), name);
            progress.on_stage_start(position, role, &name);
            self.logger
                .log(ConversationEvent::stage_started(position, role, &name));

            let stage_started = Instant::now();
            let outcome = self
                .run_stage(client.as_ref(), role, question, reference.as_deref(), &results)
                .await;
            let duration_ms = stage_started.elapsed().as_millis() as u64;

            match outcome {
                Ok((answer, cost)) => {
                    debug!(
                        model = %name,
                        cost,
                        duration_ms,
                        "Stage {} ({}) succeeded",
                        position,
                        role
                    );
                    let result = StageResult::new(question, &name, answer.text, cost)
                        .for_stage(position, role)
                        .with_duration_ms(duration_ms);
                    reference = Some(result.answer.clone());
                    self.logger.log(ConversationEvent::stage_succeeded(&result));
                    progress.on_stage_complete(position, role, &name, true);
                    results.push(result);
                }
                Err(e) => {
                    let kind = match &e {
                        ProviderError::Timeout(_) => FailureKind::Timeout,
                        ProviderError::NoReferenceAnswer(_) => FailureKind::NoReferenceAnswer,
                        _ => FailureKind::Provider,
                    };
                    warn!("Error with {}: {}. Continuing to next model.", name, e);
                    let failure = StageFailure::new(position, role, &name, kind, e.to_string());
                    self.logger.log(ConversationEvent::stage_failed(&failure));
                    progress.on_stage_complete(position, role, &name, false);
                    failures.push(failure);
                }
            }
        }

        let report = ValidationReport::new(
            question,
            input
                .roster
                .iter()
                .map(|c| c.display_name().to_string())
                .collect(),
            results,
            failures,
            started.elapsed().as_millis() as u64,
        );

        info!(
            "Validation finished: {}/{} stages succeeded",
            report.results.len(),
            total
        );
        self.logger
            .log(ConversationEvent::pipeline_finished(&report));
        progress.on_run_complete(&report);

        let transcript = self.save_transcript(&report.results);

        Ok(RunValidationOutput { report, transcript })
    }

    /// Run one roster position and price its answer
    async fn run_stage(
        &self,
        client: &dyn LlmClient,
        role: Role,
        question: &str,
        reference: Option<&str>,
        discussion: &[StageResult],
    ) -> Result<(LlmAnswer, f64), ProviderError> {
        let answer = match role {
            Role::Initial => self.bounded(client.ask_question(question, role)).await?,
            Role::Validate => {
                let previous = reference.ok_or_else(|| {
                    ProviderError::NoReferenceAnswer(
                        "no earlier stage produced an answer to fact-check".to_string(),
                    )
                })?;
                self.bounded(client.validate_answer(question, previous))
                    .await?
            }
            Role::Summarize => {
                if discussion.is_empty() {
                    return Err(ProviderError::NoReferenceAnswer(
                        "no earlier stage produced an answer to summarize".to_string(),
                    ));
                }
                self.bounded(client.summarize_answer(discussion)).await?
            }
        };

        let cost = client.calculate_cost(&answer.raw)?;
        Ok((answer, cost))
    }

    /// Apply the per-call timeout, if configured
    async fn bounded<F>(&self, call: F) -> Result<LlmAnswer, ProviderError>
    where
        F: Future<Output = Result<LlmAnswer, ProviderError>>,
    {
        match self.behavior.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| ProviderError::Timeout(limit))?,
            None => call.await,
        }
    }

    fn save_transcript(&self, results: &[StageResult]) -> Option<PathBuf> {
        let sink = self.transcript.as_ref()?;
        if results.is_empty() {
            debug!("No results, skipping transcript");
            return None;
        }
        match sink.save(results) {
            Ok(path) => {
                info!("Transcript saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Could not save transcript: {}", e);
                None
            }
        }
    }
}
