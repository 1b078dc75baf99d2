use std::time::Duration;

use crate::core::config::QueryConfig;
use crate::core::error::AppError;

/// Hard cap on read retries after the first attempt
pub const MAX_QUERY_RETRIES: u32 = 2;

/// Caching and retry policy applied to every query
#[derive(Debug, Clone)]
pub struct QueryPolicy {
    /// Results younger than this are served without a network call
    pub stale_time: Duration,
    /// Unused entries older than this are pruned
    pub cache_time: Duration,
    /// Retries after the initial attempt (total attempts = 1 + max_retries)
    pub max_retries: u32,
    /// First retry delay; doubles per attempt
    pub retry_base_delay: Duration,
    pub max_retry_delay: Duration,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self::from(&QueryConfig::default())
    }
}

impl From<&QueryConfig> for QueryPolicy {
    fn from(config: &QueryConfig) -> Self {
        Self {
            stale_time: config.stale_time,
            cache_time: config.cache_time,
            max_retries: config.max_retries.min(MAX_QUERY_RETRIES),
            retry_base_delay: config.retry_base_delay,
            max_retry_delay: Duration::from_secs(30),
        }
    }
}

impl QueryPolicy {
    /// Policy for tests: no sleeping between retries
    pub fn fast() -> Self {
        Self {
            retry_base_delay: Duration::from_millis(1),
            max_retry_delay: Duration::from_millis(5),
            ..Self::default()
        }
    }

    /// `attempt` is zero-based: 0 means the initial request just failed
    pub fn should_retry(&self, attempt: u32, error: &AppError) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }

    /// `min(base * 2^attempt, max)`
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.retry_base_delay
            .saturating_mul(factor)
            .min(self.max_retry_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_retries_unauthorized() {
        let policy = QueryPolicy::default();
        let err = AppError::from_status(401, None);
        assert!(!policy.should_retry(0, &err));
    }

    #[test]
    fn test_bounded_retries_for_transient_errors() {
        let policy = QueryPolicy::default();
        let err = AppError::Transport("reset".into());
        assert!(policy.should_retry(0, &err));
        assert!(policy.should_retry(1, &err));
        assert!(!policy.should_retry(2, &err));
    }

    #[test]
    fn test_config_cannot_raise_retry_cap() {
        let config = QueryConfig {
            max_retries: 10,
            ..QueryConfig::default()
        };
        assert_eq!(QueryPolicy::from(&config).max_retries, MAX_QUERY_RETRIES);
    }

    #[test]
    fn test_exponential_delay_is_capped() {
        let policy = QueryPolicy::default();
        assert_eq!(policy.retry_delay(0), Duration::from_secs(1));
        assert_eq!(policy.retry_delay(1), Duration::from_secs(2));
        assert_eq!(policy.retry_delay(10), Duration::from_secs(30));
    }
}
