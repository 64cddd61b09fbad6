//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are configuration or programming errors. They are surfaced before
/// any backend is invoked and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Model {0} not found in pricing configuration")]
    UnknownModel(String),

    #[error("Performance mode {0} not found in configuration")]
    UnknownPerformanceMode(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Roster for mode {0} is empty")]
    EmptyRoster(String),
}

impl DomainError {
    /// Check if this error was caused by a lookup against static configuration
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownRole(_)
                | DomainError::UnknownModel(_)
                | DomainError::UnknownPerformanceMode(_)
                | DomainError::UnknownProvider(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_display() {
        let error = DomainError::UnknownModel("gpt-9".to_string());
        assert_eq!(
            error.to_string(),
            "Model gpt-9 not found in pricing configuration"
        );
    }

    #[test]
    fn test_is_lookup_failure() {
        assert!(DomainError::UnknownRole("critic".to_string()).is_lookup_failure());
        assert!(DomainError::UnknownPerformanceMode("turbo".to_string()).is_lookup_failure());
        assert!(!DomainError::InvalidQuestion("empty".to_string()).is_lookup_failure());
        assert!(!DomainError::EmptyRoster("fast".to_string()).is_lookup_failure());
    }
}
