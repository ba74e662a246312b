//! Backoff schedule for transient provider failures

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the engine's retry behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts allowed within one call, including the first
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds)
    pub initial_delay_ms: u64,

    /// Multiplier applied to the delay after each retry
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1_000,
            backoff_multiplier: 1.5,
        }
    }
}

impl RetryPolicy {
    /// The delay preceding retry number `retry` (0-based)
    ///
    /// The engine resets `retry` to 0 when it downgrades tiers, which is
    /// what resets the backoff to its initial value.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let millis = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(retry as i32);
        Duration::from_millis(millis as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay_ms, 1_000);
        assert_eq!(policy.backoff_multiplier, 1.5);
    }

    #[test]
    fn test_backoff_schedule_grows() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0).as_millis(), 1_000);
        assert_eq!(policy.delay_for(1).as_millis(), 1_500);
        assert_eq!(policy.delay_for(2).as_millis(), 2_250);
    }
}
