//! Provider and model value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// LLM vendors that can take part in a validation roster (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Anthropic Messages API
    Claude,
    /// OpenAI chat completions
    OpenAi,
    /// Mistral chat API
    Mistral,
    /// Google Gemini generateContent
    Gemini,
}

impl ProviderKind {
    /// Get the configuration identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "claude",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Mistral => "mistral",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Human-readable vendor name used in progress output
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "Claude",
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Mistral => "Mistral",
            ProviderKind::Gemini => "Gemini",
        }
    }

    pub fn all() -> [ProviderKind; 4] {
        [
            ProviderKind::Claude,
            ProviderKind::OpenAi,
            ProviderKind::Mistral,
            ProviderKind::Gemini,
        ]
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ProviderKind::Claude),
            "openai" => Ok(ProviderKind::OpenAi),
            "mistral" => Ok(ProviderKind::Mistral),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

impl Serialize for ProviderKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One backend instance in a roster: which vendor, which model (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub provider: ProviderKind,
    pub model: String,
}

impl ModelDescriptor {
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn claude(model: impl Into<String>) -> Self {
        Self::new(ProviderKind::Claude, model)
    }

    pub fn openai(model: impl Into<String>) -> Self {
        Self::new(ProviderKind::OpenAi, model)
    }

    pub fn mistral(model: impl Into<String>) -> Self {
        Self::new(ProviderKind::Mistral, model)
    }

    pub fn gemini(model: impl Into<String>) -> Self {
        Self::new(ProviderKind::Gemini, model)
    }
}

impl std::fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}
