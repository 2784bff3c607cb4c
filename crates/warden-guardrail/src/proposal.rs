//! Proposals
//!
//! The unit of output from every proposal source (specialist or reasoning
//! stance). Proposals are created once and never mutated; a failing source
//! yields a degraded proposal rather than an error.

use crate::guardrail::Guardrail;
use serde::{Deserialize, Serialize};

/// A candidate guardrail set from one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProposal {
    /// Proposing source name (specialist name or stance label)
    pub source: String,
    /// Candidate guardrails
    pub guardrails: Vec<Guardrail>,
    /// Free-text observations worth surfacing
    pub insights: Vec<String>,
    /// Problems the source could not resolve itself
    pub concerns: Vec<String>,
    /// Follow-up actions the source recommends
    pub recommendations: Vec<String>,
    /// Source self-confidence in [0, 100]
    pub confidence: f64,
}

impl AgentProposal {
    /// A new proposal with clamped confidence.
    #[must_use]
    pub fn new(source: impl Into<String>, guardrails: Vec<Guardrail>, confidence: f64) -> Self {
        AgentProposal {
            source: source.into(),
            guardrails,
            insights: Vec::new(),
            concerns: Vec::new(),
            recommendations: Vec::new(),
            confidence: confidence.clamp(0.0, 100.0),
        }
    }

    /// The degraded proposal a failed source collapses to: no guardrails,
    /// zero confidence, and the failure reason recorded as a concern.
    #[must_use]
    pub fn degraded(source: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AgentProposal {
            source: source.into(),
            guardrails: Vec::new(),
            insights: Vec::new(),
            concerns: vec![format!("analysis failed: {reason}")],
            recommendations: Vec::new(),
            confidence: 0.0,
        }
    }

    /// With insights
    #[must_use]
    pub fn with_insights(mut self, insights: Vec<String>) -> Self {
        self.insights = insights;
        self
    }

    /// With concerns
    #[must_use]
    pub fn with_concerns(mut self, concerns: Vec<String>) -> Self {
        self.concerns = concerns;
        self
    }

    /// With recommendations
    #[must_use]
    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Whether this proposal came from a failed source.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.guardrails.is_empty()
            && self.confidence == 0.0
            && self.concerns.iter().any(|c| c.starts_with("analysis failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guardrail::{GuardrailType, Severity};

    #[test]
    fn confidence_is_clamped() {
        let p = AgentProposal::new("risk", Vec::new(), 140.0);
        assert!((p.confidence - 100.0).abs() < f64::EPSILON);

        let p = AgentProposal::new("risk", Vec::new(), -5.0);
        assert!(p.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn degraded_proposal_shape() {
        let p = AgentProposal::degraded("compliance", "registry lookup failed");

        assert!(p.is_degraded());
        assert!(p.guardrails.is_empty());
        assert_eq!(p.concerns, vec!["analysis failed: registry lookup failed"]);
        assert!(p.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn healthy_proposal_is_not_degraded() {
        let g = Guardrail::new(GuardrailType::Security, Severity::High, "INPUT_VALIDATION", "security");
        let p = AgentProposal::new("security", vec![g], 75.0);
        assert!(!p.is_degraded());
    }
}
