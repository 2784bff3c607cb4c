//! Reasoning transport errors
//!
//! These never abort a pipeline run: the aggregator converts them into
//! degraded stance proposals.

/// Errors from the reasoning-service transport.
#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    /// Network/transport failure
    #[error("transport failed: {0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("service returned status {0}")]
    Status(u16),

    /// One attempt exceeded its deadline
    #[error("reasoning call timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Circuit breaker is open; call was not attempted
    #[error("circuit breaker open")]
    CircuitOpen,

    /// All retry attempts exhausted
    #[error("retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made
        attempts: u32,
        /// Final attempt's error
        last: Box<ReasoningError>,
    },

    /// No transport configured (offline/degraded operation)
    #[error("reasoning service unavailable")]
    Unavailable,
}

impl From<reqwest::Error> for ReasoningError {
    fn from(err: reqwest::Error) -> Self {
        ReasoningError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert!(ReasoningError::Status(503).to_string().contains("503"));
        assert!(ReasoningError::CircuitOpen.to_string().contains("circuit"));
        let err = ReasoningError::RetriesExhausted {
            attempts: 3,
            last: Box::new(ReasoningError::Unavailable),
        };
        assert!(err.to_string().contains("3 attempts"));
    }
}
