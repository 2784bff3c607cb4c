//! Conflicts between proposals and their resolutions

use crate::guardrail::{Guardrail, Severity};
use serde::{Deserialize, Serialize};

/// What kind of incompatibility a conflict is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Same type, divergent configuration values
    ParameterMismatch,
    /// Performance vs. cost tension, both critical
    TradeoffConflict,
    /// Oversight vs. performance tension, both critical
    EfficiencyConflict,
    /// Anything else
    GeneralConflict,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConflictKind::ParameterMismatch => "parameter_mismatch",
            ConflictKind::TradeoffConflict => "tradeoff_conflict",
            ConflictKind::EfficiencyConflict => "efficiency_conflict",
            ConflictKind::GeneralConflict => "general_conflict",
        };
        f.write_str(s)
    }
}

/// One conflicting rule pair with its conflict kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictingPair {
    /// Rule from the first participant
    pub first: Guardrail,
    /// Rule from the second participant
    pub second: Guardrail,
    /// Kind of incompatibility for this pair
    pub kind: ConflictKind,
}

/// A detected incompatibility between two proposals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Source names of the two proposals involved
    pub participants: [String; 2],
    /// What went wrong
    pub description: String,
    /// Every conflicting rule pair between the two proposals
    pub pairs: Vec<ConflictingPair>,
    /// Aggregate severity across the pairs
    pub severity: Severity,
}

/// Resolution strategy, selected once per run from context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Mission-critical systems: most restrictive rule wins
    ConservativeSafety,
    /// EU high-risk systems: compliance and oversight win
    ComplianceFocused,
    /// Everything else: priority order wins, equals merge
    #[default]
    BalancedPractical,
}

impl std::fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResolutionStrategy::ConservativeSafety => "conservative_safety",
            ResolutionStrategy::ComplianceFocused => "compliance_focused",
            ResolutionStrategy::BalancedPractical => "balanced_practical",
        };
        f.write_str(s)
    }
}

/// The pipeline's answer to one conflict. Exactly one per conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolution {
    /// The conflict's description, for traceability
    pub conflict_description: String,
    /// Participants of the resolved conflict
    pub participants: [String; 2],
    /// Strategy that produced this resolution
    pub approach: ResolutionStrategy,
    /// Surviving/merged guardrails; never empty
    pub resolved_guardrails: Vec<Guardrail>,
    /// Why the resolution went this way
    pub rationale: String,
    /// What was given up
    pub tradeoffs: Vec<String>,
}
