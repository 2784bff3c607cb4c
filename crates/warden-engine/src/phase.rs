//! Pipeline phase state machine
//!
//! One run walks the phases strictly forward; `Failed` is reachable from
//! any non-terminal phase on an unrecoverable input error. No loops, no
//! re-entrancy within a run.

use serde::{Deserialize, Serialize};

/// Pipeline phases in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Build graph, risk profile, regulatory mapping
    ContextAnalysis,
    /// Fan out to specialists and reasoning stances
    ProposalGathering,
    /// Pairwise conflict detection
    ConflictDetection,
    /// Priority-table negotiation
    ConflictResolution,
    /// Four-tier synthesis
    Synthesis,
    /// Structural and coverage checks
    Validation,
    /// Terminal artifact assembly
    ConfigBuild,
    /// Run complete
    Done,
    /// Unrecoverable input error
    Failed,
}

/// Phase transition errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PhaseError {
    /// Transition not in the allowed table
    #[error("illegal phase transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Current phase
        from: Phase,
        /// Requested phase
        to: Phase,
    },
}

/// Phases reachable from `from`.
#[must_use]
pub fn allowed_transitions(from: Phase) -> Vec<Phase> {
    use Phase::*;
    match from {
        ContextAnalysis => vec![ProposalGathering, Failed],
        ProposalGathering => vec![ConflictDetection, Failed],
        ConflictDetection => vec![ConflictResolution, Failed],
        ConflictResolution => vec![Synthesis, Failed],
        Synthesis => vec![Validation, Failed],
        Validation => vec![ConfigBuild, Failed],
        ConfigBuild => vec![Done, Failed],
        Done | Failed => vec![],
    }
}

/// Validate a transition against the allowed table.
///
/// # Errors
/// Returns [`PhaseError::IllegalTransition`] for any move not in the table.
pub fn validate_transition(from: Phase, to: Phase) -> Result<(), PhaseError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(PhaseError::IllegalTransition { from, to })
    }
}

/// Tracks the current phase of one run.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTracker {
    current: Phase,
}

impl PhaseTracker {
    /// A fresh run starts in context analysis.
    #[must_use]
    pub fn new() -> Self {
        PhaseTracker {
            current: Phase::ContextAnalysis,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn current(&self) -> Phase {
        self.current
    }

    /// Move to the next phase.
    ///
    /// # Errors
    /// Returns [`PhaseError::IllegalTransition`] for out-of-order moves.
    pub fn advance(&mut self, to: Phase) -> Result<(), PhaseError> {
        validate_transition(self.current, to)?;
        tracing::debug!(from = ?self.current, to = ?to, "phase transition");
        self.current = to;
        Ok(())
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
