//! Engine configuration

use std::time::Duration;
use warden_reasoning::RetryPolicy;

/// Tunables for one engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deadline for each fan-out task (specialist or stance)
    pub task_deadline: Duration,
    /// Per-attempt timeout for reasoning calls
    pub reasoning_timeout: Duration,
    /// Retry policy for reasoning calls
    pub reasoning_retry: RetryPolicy,
    /// Consecutive reasoning failures before the circuit opens
    pub breaker_threshold: u32,
    /// How long the circuit stays open before a probe
    pub breaker_reset: Duration,
    /// Whether completed runs are memoized
    pub cache_enabled: bool,
    /// Cache entry lifetime
    pub cache_ttl: Duration,
    /// Maximum cached runs
    pub cache_capacity: u64,
    /// Validation score below which the artifact is flagged in logs
    pub min_validation_score: u8,
}

impl EngineConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With per-task deadline
    #[must_use]
    pub fn with_task_deadline(mut self, deadline: Duration) -> Self {
        self.task_deadline = deadline;
        self
    }

    /// With reasoning retry policy
    #[must_use]
    pub fn with_reasoning_retry(mut self, policy: RetryPolicy) -> Self {
        self.reasoning_retry = policy;
        self
    }

    /// With caching toggled
    #[must_use]
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            task_deadline: Duration::from_secs(90),
            reasoning_timeout: Duration::from_secs(60),
            reasoning_retry: RetryPolicy::default(),
            breaker_threshold: 5,
            breaker_reset: Duration::from_secs(60),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(30 * 60),
            cache_capacity: 100,
            min_validation_score: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = EngineConfig::new();
        assert!(config.task_deadline > config.reasoning_timeout);
        assert!(config.cache_enabled);
        assert_eq!(config.min_validation_score, 60);
    }

    #[test]
    fn builder_overrides() {
        let config = EngineConfig::new()
            .with_task_deadline(Duration::from_secs(5))
            .with_cache(false);
        assert_eq!(config.task_deadline, Duration::from_secs(5));
        assert!(!config.cache_enabled);
    }
}
