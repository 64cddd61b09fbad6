//! Anthropic Messages API adapter

use super::BackendContext;
use super::http;
use async_trait::async_trait;
use crossval_application::{LlmClient, ProviderError};
use crossval_domain::{LlmAnswer, PromptCatalog, Role};
use serde_json::{Value, json};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
const API_VERSION: &str = "2023-06-01";

/// Claude backend
pub struct ClaudeClient {
    ctx: BackendContext,
}

impl ClaudeClient {
    pub fn new(ctx: BackendContext) -> Self {
        Self { ctx }
    }

    pub fn request_body(&self, system: &str, question: &str) -> Value {
        json!({
            "model": self.ctx.model,
            "max_tokens": self.ctx.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "system": system,
            "messages": [{
                "role": "user",
                "content": question
            }]
        })
    }

    /// Concatenate the text blocks of a Messages response
    pub fn extract_text(raw: &Value) -> Result<String, ProviderError> {
        let blocks = raw["content"]
            .as_array()
            .ok_or_else(|| ProviderError::MalformedResponse("missing content".to_string()))?;
        let text: String = blocks
            .iter()
            .filter(|b| b["type"] == "text")
            .filter_map(|b| b["text"].as_str())
            .collect();
        if text.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "no text block in content".to_string(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmClient for ClaudeClient {
    fn model_name(&self) -> &str {
        &self.ctx.model
    }

    fn prompts(&self) -> &PromptCatalog {
        &self.ctx.prompts
    }

    async fn ask_question(&self, question: &str, role: Role) -> Result<LlmAnswer, ProviderError> {
        let system = self.ctx.prompts.system_prompt(role)?;
        let url = self.ctx.url("/v1/messages");
        debug!(model = %self.ctx.model, %role, "POST {}", url);

        let raw = http::send_json(
            self.ctx
                .http
                .post(&url)
                .header("x-api-key", &self.ctx.api_key)
                .header("anthropic-version", API_VERSION)
                .header("content-type", "application/json")
                .json(&self.request_body(system, question)),
        )
        .await?;

        let text = Self::extract_text(&raw)?;
        Ok(LlmAnswer::new(text, raw))
    }

    fn calculate_cost(&self, raw: &Value) -> Result<f64, ProviderError> {
        http::priced(
            raw,
            &self.ctx.pricing,
            "/usage/input_tokens",
            "/usage/output_tokens",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_support::context;
    use crossval_domain::TokenPricing;

    fn client() -> ClaudeClient {
        ClaudeClient::new(context("claude-3-5-haiku-latest", TokenPricing::new(0.8, 4.0)))
    }

    #[test]
    fn test_request_body_shape() {
        let body = client().request_body("You are a research assistant.", "Q?");
        assert_eq!(body["model"], "claude-3-5-haiku-latest");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["system"], "You are a research assistant.");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Q?");
    }

    #[test]
    fn test_extract_text_joins_text_blocks() {
        let raw = json!({
            "content": [
                { "type": "text", "text": "Paris" },
                { "type": "tool_use", "id": "x" },
                { "type": "text", "text": " is the capital." }
            ]
        });
        assert_eq!(
            ClaudeClient::extract_text(&raw).unwrap(),
            "Paris is the capital."
        );
    }

    #[test]
    fn test_extract_text_without_content_is_malformed() {
        let err = ClaudeClient::extract_text(&json!({ "error": "x" })).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn test_cost_from_usage() {
        let raw = json!({ "usage": { "input_tokens": 1000, "output_tokens": 500 } });
        assert_eq!(client().calculate_cost(&raw).unwrap(), 1000.0 * 0.8 + 500.0 * 4.0);
    }

    #[test]
    fn test_cost_without_usage_fails() {
        let err = client().calculate_cost(&json!({})).unwrap_err();
        assert!(matches!(err, ProviderError::MissingUsage(_)));
    }
}
