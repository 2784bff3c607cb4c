//! Retry and circuit-breaker plumbing for reasoning calls

use crate::error::ReasoningError;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Bounded exponential-backoff retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per attempt
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after a given 1-based failed attempt.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2_u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Run `op` until it succeeds or attempts are exhausted.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ReasoningError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, ReasoningError>>,
    {
        let mut last: Option<ReasoningError> = None;
        for attempt in 1..=self.max_attempts.max(1) {
            match op().await {
                Ok(value) => return Ok(value),
                // An open breaker will not close between attempts; bail out.
                Err(ReasoningError::CircuitOpen) => return Err(ReasoningError::CircuitOpen),
                Err(err) => {
                    tracing::debug!(attempt, error = %err, "reasoning attempt failed");
                    last = Some(err);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.delay_after(attempt)).await;
                    }
                }
            }
        }
        Err(ReasoningError::RetriesExhausted {
            attempts: self.max_attempts.max(1),
            last: Box::new(last.unwrap_or(ReasoningError::Unavailable)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakerState {
    Closed,
    Open { since: Instant },
    HalfOpen,
}

/// Closed/open/half-open circuit breaker.
///
/// Opens after `threshold` consecutive failures; after `reset_after` a probe
/// call is allowed through (half-open) and its outcome decides the state.
#[derive(Debug)]
pub struct CircuitBreaker {
    threshold: u32,
    reset_after: Duration,
    inner: Mutex<BreakerInner>,
}

#[derive(Debug)]
struct BreakerInner {
    state: BreakerState,
    failures: u32,
}

impl CircuitBreaker {
    /// Breaker that opens after `threshold` consecutive failures and probes
    /// again after `reset_after`.
    #[must_use]
    pub fn new(threshold: u32, reset_after: Duration) -> Self {
        CircuitBreaker {
            threshold: threshold.max(1),
            reset_after,
            inner: Mutex::new(BreakerInner {
                state: BreakerState::Closed,
                failures: 0,
            }),
        }
    }

    /// Whether a call may proceed right now.
    ///
    /// # Errors
    /// Returns [`ReasoningError::CircuitOpen`] while the breaker is open.
    pub fn check(&self) -> Result<(), ReasoningError> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match inner.state {
            BreakerState::Closed | BreakerState::HalfOpen => Ok(()),
            BreakerState::Open { since } => {
                if since.elapsed() >= self.reset_after {
                    inner.state = BreakerState::HalfOpen;
                    inner.failures = 0;
                    Ok(())
                } else {
                    Err(ReasoningError::CircuitOpen)
                }
            }
        }
    }

    /// Record a successful call.
    pub fn record_success(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.state = BreakerState::Closed;
        inner.failures = 0;
    }

    /// Record a failed call.
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match inner.state {
            BreakerState::HalfOpen => {
                inner.state = BreakerState::Open { since: Instant::now() };
            }
            _ => {
                inner.failures += 1;
                if inner.failures >= self.threshold {
                    tracing::warn!(failures = inner.failures, "reasoning circuit opened");
                    inner.state = BreakerState::Open { since: Instant::now() };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(3), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_succeeds_on_later_attempt() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result = policy
            .run(|| {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt < 3 {
                        Err(ReasoningError::Status(503))
                    } else {
                        Ok("recovered")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_exhaustion_reports_last_error() {
        let policy = RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(10),
        };

        let result: Result<(), _> = policy.run(|| async { Err(ReasoningError::Status(500)) }).await;
        match result.unwrap_err() {
            ReasoningError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, ReasoningError::Status(500)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn open_circuit_short_circuits_retry() {
        let policy = RetryPolicy::default();
        let result: Result<(), _> = policy.run(|| async { Err(ReasoningError::CircuitOpen) }).await;
        assert!(matches!(result.unwrap_err(), ReasoningError::CircuitOpen));
    }

    #[test]
    fn breaker_opens_after_threshold() {
        let breaker = CircuitBreaker::new(2, Duration::from_secs(60));
        assert!(breaker.check().is_ok());

        breaker.record_failure();
        assert!(breaker.check().is_ok());
        breaker.record_failure();
        assert!(matches!(breaker.check(), Err(ReasoningError::CircuitOpen)));
    }

    #[test]
    fn breaker_probes_after_reset_window() {
        let breaker = CircuitBreaker::new(1, Duration::from_millis(0));
        breaker.record_failure();

        // Zero reset window: next check transitions to half-open.
        assert!(breaker.check().is_ok());
        breaker.record_success();
        assert!(breaker.check().is_ok());
    }

    #[test]
    fn success_resets_failure_count() {
        let breaker = CircuitBreaker::new(2, Duration::from_secs(60));
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();

        // One failure since the success; threshold of two not reached.
        assert!(breaker.check().is_ok());
    }
}
