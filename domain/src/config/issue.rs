//! Configuration issues detected before a run starts.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A roster entry or pricing key has an empty model name.
    EmptyModelName { field: String },
    /// A roster entry names a model with no pricing entry.
    UnpricedModel { mode: String, model: String },
    /// A roster entry names a provider no adapter exists for.
    UnknownProvider { mode: String, provider: String },
    /// `behavior.default_mode` is not a configured mode.
    UnknownDefaultMode { mode: String },
    /// A mode has no roster entries.
    EmptyRoster { mode: String },
    /// Prompt overrides leave a role unresolvable or drop a required slot.
    IncompletePrompts { role: String },
    /// A provider API key variable is unset for a provider used by a roster.
    MissingApiKey { provider: String, env: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
