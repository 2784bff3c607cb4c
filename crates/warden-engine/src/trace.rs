//! Reasoning trace assembly

use warden_guardrail::{
    AgentProposal, ConflictResolution, ReasoningTrace, ResolvedConflictNote, SourceContribution,
};

/// Standing assumptions recorded on every artifact.
const ASSUMPTIONS: [&str; 3] = [
    "assessment answers accurately reflect the deployment",
    "the regulatory landscape stays stable during implementation",
    "the organization can implement the proposed controls",
];

/// Build the trace documenting why the final rule set looks as it does.
#[must_use]
pub fn build_trace(
    proposals: &[AgentProposal],
    resolutions: &[ConflictResolution],
) -> ReasoningTrace {
    ReasoningTrace {
        contributions: proposals
            .iter()
            .map(|p| SourceContribution {
                source: p.source.clone(),
                key_insights: p.insights.clone(),
                proposed_rules: p.guardrails.len(),
            })
            .collect(),
        conflicts_resolved: resolutions
            .iter()
            .map(|r| ResolvedConflictNote {
                description: r.conflict_description.clone(),
                approach: r.approach.to_string(),
                tradeoffs: r.tradeoffs.clone(),
            })
            .collect(),
        assumptions: ASSUMPTIONS.iter().map(ToString::to_string).collect(),
    }
}
