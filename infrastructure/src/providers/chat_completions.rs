//! OpenAI-compatible chat completions adapter, used for OpenAI and Mistral

use super::BackendContext;
use super::http;
use async_trait::async_trait;
use crossval_application::{LlmClient, ProviderError};
use crossval_domain::{LlmAnswer, PromptCatalog, ProviderKind, Role};
use serde_json::{Value, json};
use tracing::debug;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Chat completions backend
pub struct ChatCompletionsClient {
    provider: ProviderKind,
    ctx: BackendContext,
}

impl ChatCompletionsClient {
    pub fn new(provider: ProviderKind, ctx: BackendContext) -> Self {
        Self { provider, ctx }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn request_body(&self, system: &str, question: &str) -> Value {
        let mut body = json!({
            "model": self.ctx.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": question }
            ]
        });
        if let Some(max_tokens) = self.ctx.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }

    pub fn extract_text(raw: &Value) -> Result<String, ProviderError> {
        raw.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    fn model_name(&self) -> &str {
        &self.ctx.model
    }

    fn prompts(&self) -> &PromptCatalog {
        &self.ctx.prompts
    }

    async fn ask_question(&self, question: &str, role: Role) -> Result<LlmAnswer, ProviderError> {
        let system = self.ctx.prompts.system_prompt(role)?;
        let url = self.ctx.url(COMPLETIONS_PATH);
        debug!(provider = %self.provider, model = %self.ctx.model, %role, "POST {}", url);

        let raw = http::send_json(
            self.ctx
                .http
                .post(&url)
                .bearer_auth(&self.ctx.api_key)
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
            "/usage/prompt_tokens",
            "/usage/completion_tokens",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_support::context;
    use crossval_domain::TokenPricing;

    fn client(max_tokens: Option<u32>) -> ChatCompletionsClient {
        let mut ctx = context("gpt-4o-mini", TokenPricing::new(0.15, 0.6));
        ctx.max_tokens = max_tokens;
        ChatCompletionsClient::new(ProviderKind::OpenAi, ctx)
    }

    #[test]
    fn test_request_body_puts_system_prompt_first() {
        let body = client(None).request_body("You are an experienced fact checker.", "Check this");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are an experienced fact checker.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Check this");
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_request_body_includes_configured_cap() {
        let body = client(Some(256)).request_body("s", "q");
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn test_extract_text() {
        let raw = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Paris" } }],
            "usage": { "prompt_tokens": 20, "completion_tokens": 2 }
        });
        assert_eq!(ChatCompletionsClient::extract_text(&raw).unwrap(), "Paris");
    }

    #[test]
    fn test_extract_text_null_content_is_malformed() {
        let raw = json!({ "choices": [{ "message": { "content": null } }] });
        assert!(matches!(
            ChatCompletionsClient::extract_text(&raw),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_cost_from_prompt_and_completion_tokens() {
        let raw = json!({ "usage": { "prompt_tokens": 200, "completion_tokens": 100 } });
        let cost = client(None).calculate_cost(&raw).unwrap();
        assert!((cost - (200.0 * 0.15 + 100.0 * 0.6)).abs() < 1e-9);
    }

    #[test]
    fn test_mistral_uses_same_codec() {
        let ctx = context("mistral-small-latest", TokenPricing::new(0.1, 0.3));
        let client = ChatCompletionsClient::new(ProviderKind::Mistral, ctx);
        assert_eq!(client.provider(), ProviderKind::Mistral);
        let raw = json!({ "usage": { "prompt_tokens": 10, "completion_tokens": 10 } });
        assert!((client.calculate_cost(&raw).unwrap() - 4.0).abs() < 1e-9);
    }
}
