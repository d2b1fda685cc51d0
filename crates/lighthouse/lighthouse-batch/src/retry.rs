//! Exponential backoff between unit attempts.

use std::time::Duration;

use lighthouse_core::config::BatchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &BatchConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
            backoff_max: Duration::from_millis(config.backoff_max_ms),
        }
    }

    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            backoff_base: Duration::ZERO,
            backoff_max: Duration::ZERO,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// `min(base * 2^attempt, max)`, where `attempt` counts from 0.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.backoff_base
            .checked_mul(factor)
            .unwrap_or(self.backoff_max)
            .min(self.backoff_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        let policy = RetryPolicy {
            max_retries: 10,
            backoff_base: Duration::from_millis(10),
            backoff_max: Duration::from_millis(100),
        };
        let delays: Vec<u128> = (0..6).map(|a| policy.backoff(a).as_millis()).collect();
        assert_eq!(delays, vec![10, 20, 40, 80, 100, 100]);
        assert_eq!(policy.backoff(40), Duration::from_millis(100));
        assert_eq!(policy.max_attempts(), 11);
    }

    #[test]
    fn defaults_come_from_batch_config() {
        let policy = RetryPolicy::from_config(&BatchConfig::default());
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.backoff(0), Duration::from_millis(10));
        assert_eq!(RetryPolicy::no_retry().max_attempts(), 1);
    }
}
