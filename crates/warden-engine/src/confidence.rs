//! Confidence scoring
//!
//! Overall confidence is the even split between the specialist mean and the
//! reasoning-stance mean, each normalized to [0, 1]. Degraded sources count
//! as zero rather than being excluded, so a run with nothing but failures
//! scores zero. Context complexity is a separate scalar, not a confidence.

use warden_assessment::{EnrichedContext, RiskLevel};
use warden_guardrail::{AgentProposal, ConfidenceScore};

/// Prefix distinguishing reasoning-stance sources from specialists.
const REASONING_PREFIX: &str = "reasoning:";

/// Aggregates per-source confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// Create a scorer.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Score one run's proposals.
    #[must_use]
    pub fn score(&self, proposals: &[AgentProposal]) -> ConfidenceScore {
        let (stances, specialists): (Vec<&AgentProposal>, Vec<&AgentProposal>) = proposals
            .iter()
            .partition(|p| p.source.starts_with(REASONING_PREFIX));

        let specialist_mean = normalized_mean(&specialists);
        let reasoning_mean = normalized_mean(&stances);
        let overall = (0.5 * specialist_mean + 0.5 * reasoning_mean).clamp(0.0, 1.0);

        let mut uncertainties = vec![
            "emerging regulations may require updates".to_string(),
            "long-term model behavior under edge cases".to_string(),
        ];
        let degraded = proposals.iter().filter(|p| p.is_degraded()).count();
        if degraded > 0 {
            uncertainties.push(format!("{degraded} proposal sources degraded during this run"));
        }

        ConfidenceScore {
            overall,
            specialist_mean,
            reasoning_mean,
            uncertainties,
        }
    }

    /// Context-complexity scalar in [0, 10]: risk bucket (0-3), regulatory
    /// count bucket (0-3), technical complexity divided by three, and a
    /// stakeholder bucket (0-2).
    #[must_use]
    pub fn context_complexity(&self, context: &EnrichedContext) -> f64 {
        let risk_bucket = match context.risk_profile.overall {
            RiskLevel::Critical => 3.0,
            RiskLevel::High => 2.0,
            RiskLevel::Medium => 1.0,
            RiskLevel::Low => 0.0,
        };

        let regulations = context.regulatory.applicable.len();
        let regulatory_bucket = if regulations > 3 {
            3.0
        } else if regulations > 1 {
            2.0
        } else if regulations > 0 {
            1.0
        } else {
            0.0
        };

        let technical = f64::from(context.assessment.technical.complexity() / 3);

        let stakeholders = context.assessment.business.stakeholder_groups.len();
        let stakeholder_bucket = if stakeholders > 5 {
            2.0
        } else if stakeholders > 3 {
            1.0
        } else {
            0.0
        };

        (risk_bucket + regulatory_bucket + technical + stakeholder_bucket).clamp(0.0, 10.0)
    }
}

/// Mean confidence normalized to [0, 1]; empty input means zero.
fn normalized_mean(proposals: &[&AgentProposal]) -> f64 {
    if proposals.is_empty() {
        return 0.0;
    }
    let sum: f64 = proposals
        .iter()
        .map(|p| (p.confidence / 100.0).clamp(0.0, 1.0))
        .sum();
    sum / proposals.len() as f64
}
