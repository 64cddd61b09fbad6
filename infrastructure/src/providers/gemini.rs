//! Google Gemini `generateContent` adapter

use super::BackendContext;
use super::http;
use async_trait::async_trait;
use crossval_application::{LlmClient, ProviderError};
use crossval_domain::{LlmAnswer, PromptCatalog, Role};
use serde_json::{Value, json};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini backend
pub struct GeminiClient {
    ctx: BackendContext,
}

impl GeminiClient {
    pub fn new(ctx: BackendContext) -> Self {
        Self { ctx }
    }

    pub fn request_body(&self, system: &str, question: &str) -> Value {
        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{
                "role": "user",
                "parts": [{ "text": question }]
            }]
        });
        if let Some(max_tokens) = self.ctx.max_tokens {
            body["generationConfig"] = json!({ "maxOutputTokens": max_tokens });
        }
        body
    }

    /// Concatenate the text parts of the first candidate
    pub fn extract_text(raw: &Value) -> Result<String, ProviderError> {
        let parts = raw
            .pointer("/candidates/0/content/parts")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing candidates[0].content.parts".to_string())
            })?;
        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        if text.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "candidate has no text".to_string(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn model_name(&self) -> &str {
        &self.ctx.model
    }

    fn prompts(&self) -> &PromptCatalog {
        &self.ctx.prompts
    }

    async fn ask_question(&self, question: &str, role: Role) -> Result<LlmAnswer, ProviderError> {
        let system = self.ctx.prompts.system_prompt(role)?;
        let url = self
            .ctx
            .url(&format!("/v1beta/models/{}:generateContent", self.ctx.model));
        debug!(model = %self.ctx.model, %role, "POST {}", url);

        let raw = http::send_json(
            self.ctx
                .http
                .post(&url)
                .header("x-goog-api-key", &self.ctx.api_key)
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
            "/usageMetadata/promptTokenCount",
            "/usageMetadata/candidatesTokenCount",
        )
    }
}
