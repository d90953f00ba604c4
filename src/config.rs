// src/config.rs
// =============================================================================
// Tunable parameters for one batch of URL checks.
//
// Defaults: 10 probes in flight, 5 second per-request timeout, redirects
// followed (up to 10 hops), no overall batch deadline.
// The CLI fills this struct from flags / LINK_STATUS_* environment variables.
// =============================================================================

use crate::error::CheckError;
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Redirect hops followed when `follow_redirects` is on.
pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Maximum number of probes in flight at once (the admission gate size).
    pub concurrency: usize,
    /// Deadline for a single probe.
    pub request_timeout: Duration,
    /// Follow 3xx responses and classify the final status. When off, the
    /// 301/302 itself is reported.
    pub follow_redirects: bool,
    pub user_agent: String,
    /// Abort the whole batch with `CheckError::BatchAborted` after this long.
    pub batch_timeout: Option<Duration>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            follow_redirects: true,
            user_agent: format!("link-status/{}", env!("CARGO_PKG_VERSION")),
            batch_timeout: None,
        }
    }
}

impl CheckerConfig {
    pub fn validate(&self) -> Result<(), CheckError> {
        if self.concurrency == 0 {
            return Err(CheckError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CheckError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if matches!(self.batch_timeout, Some(d) if d.is_zero()) {
            return Err(CheckError::InvalidConfig(
                "batch timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.follow_redirects);
        assert!(config.batch_timeout.is_none());
        assert!(config.user_agent.starts_with("link-status/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = CheckerConfig {
            concurrency: 0,
            ..CheckerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CheckError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let config = CheckerConfig {
            request_timeout: Duration::ZERO,
            ..CheckerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CheckerConfig {
            batch_timeout: Some(Duration::ZERO),
            ..CheckerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
