//! Application-level configuration.
//!
//! This module provides configuration types that control how the validation
//! pipeline behaves, such as the per-call timeout.

use std::time::Duration;

/// Application behavior configuration.
///
/// Controls runtime behavior of the pipeline. There is no retry policy: a
/// call that exceeds the timeout is a failed stage like any other.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Maximum time to wait for one backend call before giving up on it.
    pub timeout: Option<Duration>,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None` or zero, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        assert!(BehaviorConfig::default().timeout.is_none());
    }

    #[test]
    fn test_zero_seconds_disables_timeout() {
        assert!(BehaviorConfig::from_timeout_seconds(Some(0)).timeout.is_none());
        assert_eq!(
            BehaviorConfig::from_timeout_seconds(Some(90)).timeout,
            Some(Duration::from_secs(90))
        );
    }
}
