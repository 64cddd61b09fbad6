//! LLM client port
//!
//! Defines the capability set every backend exposes to the validation
//! pipeline, regardless of vendor.

use async_trait::async_trait;
use crossval_domain::{DomainError, LlmAnswer, PromptCatalog, Role, StageResult};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from a single backend call.
///
/// Recovered locally by the pipeline: the stage is skipped and the run
/// continues with the next roster position.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing usage field: {0}")]
    MissingUsage(String),

    #[error("Timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("No reference answer: {0}")]
    NoReferenceAnswer(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] DomainError),
}

impl ProviderError {
    /// Classify an HTTP error status the way every vendor reports it
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => ProviderError::AuthenticationFailed(body),
            429 => ProviderError::QuotaExceeded(body),
            _ => ProviderError::RequestFailed { status, body },
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}

/// One configured backend.
///
/// Implementations translate to their vendor's request/response shape; the
/// pipeline only ever sees [`LlmAnswer`]s. Implementations do not retry.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier sent to the vendor and used for pricing
    fn model_name(&self) -> &str;

    /// Stable name recorded in `StageResult::model_name` and reports
    fn display_name(&self) -> &str {
        self.model_name()
    }

    /// Prompt table used to resolve system prompts and templates
    fn prompts(&self) -> &PromptCatalog;

    /// Send `question` with the system prompt resolved for `role`
    async fn ask_question(&self, question: &str, role: Role) -> Result<LlmAnswer, ProviderError>;

    /// Cost of a call from the raw response this client returned.
    ///
    /// Missing usage fields are [`ProviderError::MissingUsage`].
    fn calculate_cost(&self, raw: &Value) -> Result<f64, ProviderError>;

    /// Fact-check `previous_answer` against the original question
    async fn validate_answer(
        &self,
        original_question: &str,
        previous_answer: &str,
    ) -> Result<LlmAnswer, ProviderError> {
        let prompt = self
            .prompts()
            .validation_prompt(original_question, previous_answer)?;
        self.ask_question(&prompt, Role::Validate).await
    }

    /// Distill earlier stages into one final answer
    async fn summarize_answer(
        &self,
        discussion: &[StageResult],
    ) -> Result<LlmAnswer, ProviderError> {
        let first = discussion.first().ok_or_else(|| {
            ProviderError::NoReferenceAnswer("discussion to summarize is empty".to_string())
        })?;
        let prompt = self.prompts().summary_prompt(
            &first.question,
            &StageResult::render_discussion(discussion),
        )?;
        self.ask_question(&prompt, Role::Summarize).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Echoes prompts back and records what it was sent
    struct EchoClient {
        prompts: PromptCatalog,
        sent: Mutex<Vec<(String, Role)>>,
    }

    impl EchoClient {
        fn new() -> Self {
            Self {
                prompts: PromptCatalog::default(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for EchoClient {
        fn model_name(&self) -> &str {
            "echo-1"
        }

        fn prompts(&self) -> &PromptCatalog {
            &self.prompts
        }

        async fn ask_question(
            &self,
            question: &str,
            role: Role,
        ) -> Result<LlmAnswer, ProviderError> {
            self.sent.lock().unwrap().push((question.to_string(), role));
            Ok(LlmAnswer::new(question, json!({})))
        }

        fn calculate_cost(&self, _raw: &Value) -> Result<f64, ProviderError> {
            Ok(0.0)
        }
    }

    #[tokio::test]
    async fn test_validate_answer_uses_validation_template() {
        let client = EchoClient::new();
        client.validate_answer("Q?", "Paris").await.unwrap();

        let sent = client.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, Role::Validate);
        assert!(sent[0].0.contains("\"Q?\""));
        assert!(sent[0].0.contains("\"Paris\""));
    }

    #[tokio::test]
    async fn test_summarize_answer_renders_discussion() {
        let client = EchoClient::new();
        let discussion = vec![
            StageResult::new("Q?", "a", "Paris", 0.0),
            StageResult::new("Q?", "b", "Paris, confirmed", 0.0),
        ];
        client.summarize_answer(&discussion).await.unwrap();

        let sent = client.sent.lock().unwrap();
        assert_eq!(sent[0].1, Role::Summarize);
        assert!(
            sent[0]
                .0
                .contains("Question: Q?\nAnswer: Paris\n\nQuestion: Q?\nAnswer: Paris, confirmed")
        );
    }

    #[tokio::test]
    async fn test_summarize_empty_discussion_is_no_reference_answer() {
        let client = EchoClient::new();
        let err = client.summarize_answer(&[]).await.unwrap_err();
        assert!(matches!(err, ProviderError::NoReferenceAnswer(_)));
        assert!(client.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            ProviderError::from_status(401, "bad key"),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ProviderError::from_status(429, "slow down"),
            ProviderError::QuotaExceeded(_)
        ));
        assert!(matches!(
            ProviderError::from_status(500, "oops"),
            ProviderError::RequestFailed { status: 500, .. }
        ));
    }

    #[test]
    fn test_timeout_display() {
        let err = ProviderError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Timed out after 30s");
        assert!(err.is_timeout());
    }
}
