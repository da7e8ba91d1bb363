// Reconnect backoff policy
//
// Kept as a plain value object so the delay schedule is testable without
// timers; the stream loop owns the actual sleeping.

use std::time::Duration;

/// Exponential backoff schedule for event-stream reconnection.
///
/// Delay before attempt `n` (1-indexed) is `base_delay * 2^(n-1)`. There is
/// deliberately no jitter and no per-delay cap: the attempt ceiling alone
/// bounds total retry time, and the schedule stays predictable.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the first reconnection attempt. Default: 1s.
    pub base_delay: Duration,

    /// Maximum consecutive attempts before giving up. Default: 5.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_attempts: 5,
        }
    }
}

impl RetryPolicy {
    /// Delay before the given attempt (1-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2_u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Whether the given attempt number is past the ceiling.
    pub fn is_exhausted(&self, attempt: u32) -> bool {
        attempt > self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 5);
    }

    #[test]
    fn delay_sequence_doubles_from_base() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(1000),
            max_attempts: 5,
        };

        let delays: Vec<u64> = (1..=5)
            .map(|n| policy.delay_for(n).as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 16000]);
    }

    #[test]
    fn exhaustion_boundary() {
        let policy = RetryPolicy::default();
        assert!(!policy.is_exhausted(4));
        assert!(!policy.is_exhausted(5));
        assert!(policy.is_exhausted(6));
    }

    #[test]
    fn no_delay_cap() {
        let policy = RetryPolicy {
            base_delay: Duration::from_secs(1),
            max_attempts: 20,
        };
        // Attempt 11 would be capped by jittered-backoff schemes; here it
        // keeps doubling.
        assert_eq!(policy.delay_for(11), Duration::from_secs(1024));
    }
}
