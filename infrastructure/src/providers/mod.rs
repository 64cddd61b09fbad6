//! Vendor adapters implementing the [`LlmClient`] port.
//!
//! Every adapter speaks to its vendor over HTTPS with `reqwest` and hands the
//! pipeline an [`LlmAnswer`](crossval_domain::LlmAnswer) whose `raw` field is
//! the vendor's JSON body, so pricing can read the usage fields afterwards.
//!
//! | Provider | Endpoint                                   | Usage fields                                   |
//! |----------|--------------------------------------------|------------------------------------------------|
//! | claude   | `/v1/messages`                             | `usage.input_tokens` / `output_tokens`         |
//! | openai   | `/v1/chat/completions`                     | `usage.prompt_tokens` / `completion_tokens`    |
//! | mistral  | `/v1/chat/completions`                     | `usage.prompt_tokens` / `completion_tokens`    |
//! | gemini   | `/v1beta/models/{model}:generateContent`   | `usageMetadata.promptTokenCount` / `candidatesTokenCount` |

pub mod chat_completions;
pub mod claude;
pub mod gemini;
mod http;

pub use chat_completions::ChatCompletionsClient;
pub use claude::ClaudeClient;
pub use gemini::GeminiClient;

use crossval_application::LlmClient;
use crossval_domain::{
    DomainError, ModelDescriptor, PricingTable, PromptCatalog, ProviderKind, TokenPricing,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while turning a roster into clients.
///
/// All of these surface before any backend is invoked.
#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("No API key for {provider}: set {env} or providers.{provider}.api_key")]
    MissingApiKey { provider: String, env: String },

    #[error("Could not create HTTP client: {0}")]
    Http(String),
}

/// Connection settings for one vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Environment variable the API key is read from
    pub api_key_env: String,
    /// Explicit key; takes precedence over the environment
    pub api_key: Option<String>,
    pub base_url: String,
    /// Response token cap; `None` leaves it to the vendor
    pub max_tokens: Option<u32>,
}

impl ProviderSettings {
    /// Built-in settings for a vendor
    pub fn defaults(kind: ProviderKind) -> Self {
        let (env, url, max_tokens) = match kind {
            ProviderKind::Claude => (
                "ANTHROPIC_API_KEY",
                claude::DEFAULT_BASE_URL,
                Some(claude::DEFAULT_MAX_TOKENS),
            ),
            ProviderKind::OpenAi => ("OPENAI_API_KEY", chat_completions::OPENAI_BASE_URL, None),
            ProviderKind::Mistral => ("MISTRAL_API_KEY", chat_completions::MISTRAL_BASE_URL, None),
            ProviderKind::Gemini => ("GEMINI_API_KEY", gemini::DEFAULT_BASE_URL, None),
        };
        Self {
            api_key_env: env.to_string(),
            api_key: None,
            base_url: url.to_string(),
            max_tokens,
        }
    }

    /// The explicit key if set, otherwise the environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }
}

/// Everything one adapter instance needs to make and price calls
#[derive(Debug, Clone)]
pub struct BackendContext {
    pub http: reqwest::Client,
    pub model: String,
    pub pricing: TokenPricing,
    pub prompts: Arc<PromptCatalog>,
    pub api_key: String,
    pub base_url: String,
    pub max_tokens: Option<u32>,
}

impl BackendContext {
    /// Join the base URL and an endpoint path without doubling slashes
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Builds [`LlmClient`]s for roster entries.
///
/// Pricing and prompts are shared read-only by every client it builds.
pub struct ClientFactory {
    http: reqwest::Client,
    pricing: PricingTable,
    prompts: Arc<PromptCatalog>,
    providers: HashMap<ProviderKind, ProviderSettings>,
}

impl ClientFactory {
    pub fn new(pricing: PricingTable, prompts: PromptCatalog) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientBuildError::Http(e.to_string()))?;
        let providers = ProviderKind::all()
            .into_iter()
            .map(|kind| (kind, ProviderSettings::defaults(kind)))
            .collect();
        Ok(Self {
            http,
            pricing,
            prompts: Arc::new(prompts),
            providers,
        })
    }

    /// Override the settings for one vendor
    pub fn with_provider(mut self, kind: ProviderKind, settings: ProviderSettings) -> Self {
        self.providers.insert(kind, settings);
        self
    }

    pub fn settings(&self, kind: ProviderKind) -> ProviderSettings {
        self.providers
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| ProviderSettings::defaults(kind))
    }

    /// Build one client, checking pricing and credentials up front
    pub fn build(&self, descriptor: &ModelDescriptor) -> Result<Arc<dyn LlmClient>, ClientBuildError> {
        let pricing = self.pricing.get_pricing(&descriptor.model)?;
        let settings = self.settings(descriptor.provider);
        let api_key =
            settings
                .resolve_api_key()
                .ok_or_else(|| ClientBuildError::MissingApiKey {
                    provider: descriptor.provider.to_string(),
                    env: settings.api_key_env.clone(),
                })?;

        debug!("Building {} client for {}", descriptor.provider, descriptor.model);

        let context = BackendContext {
            http: self.http.clone(),
            model: descriptor.model.clone(),
            pricing,
            prompts: Arc::clone(&self.prompts),
            api_key,
            base_url: settings.base_url,
            max_tokens: settings.max_tokens,
        };

        let client: Arc<dyn LlmClient> = match descriptor.provider {
            ProviderKind::Claude => Arc::new(ClaudeClient::new(context)),
            ProviderKind::OpenAi | ProviderKind::Mistral => {
                Arc::new(ChatCompletionsClient::new(descriptor.provider, context))
            }
            ProviderKind::Gemini => Arc::new(GeminiClient::new(context)),
        };
        Ok(client)
    }

    /// Build every client of a roster, failing on the first bad entry
    pub fn build_roster(
        &self,
        roster: &[ModelDescriptor],
    ) -> Result<Vec<Arc<dyn LlmClient>>, ClientBuildError> {
        roster.iter().map(|d| self.build(d)).collect()
    }
}
