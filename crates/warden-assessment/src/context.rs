//! Enriched context
//!
//! The immutable bundle every specialist and reasoning stance reads. Built
//! once during context analysis and shared read-only across the fan-out.

use crate::graph::{ContextGraph, ContextGraphBuilder};
use crate::model::{Assessment, OrganizationPolicies};
use crate::regulatory::{RegulatoryClassifier, RegulatoryMapping};
use crate::risk::{RiskPriority, RiskProfile, RiskProfiler};
use crate::temporal::TemporalAnalysis;
use serde::{Deserialize, Serialize};

/// A cross-cutting concern inferred from the context graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossCuttingConcern {
    /// What interacts with what
    pub concern: String,
    /// Suggested mitigation
    pub mitigation: String,
    /// Edge weight that produced it
    pub severity: f64,
}

/// Everything a proposal source may read about one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedContext {
    /// The normalized intake record
    pub assessment: Assessment,
    /// Risk-relationship graph
    pub graph: ContextGraph,
    /// Six-dimension risk profile
    pub risk_profile: RiskProfile,
    /// Applicable regulations and EU tier
    pub regulatory: RegulatoryMapping,
    /// Lifecycle analysis
    pub temporal: TemporalAnalysis,
    /// Scored risk signals with required rule names
    pub risk_priorities: Vec<RiskPriority>,
    /// Organization-wide policies, when supplied
    pub policies: OrganizationPolicies,
}

impl EnrichedContext {
    /// Run context analysis: graph, risk profile, regulatory mapping,
    /// temporal analysis, and risk priorities. Pure and deterministic.
    #[must_use]
    pub fn build(assessment: Assessment, policies: OrganizationPolicies) -> Self {
        let profiler = RiskProfiler::new();
        let graph = ContextGraphBuilder::new().build(&assessment);
        let risk_profile = profiler.profile(&assessment);
        let regulatory = RegulatoryClassifier::new().map(&assessment);
        let temporal = TemporalAnalysis::analyze(&assessment);
        let risk_priorities = profiler.prioritize(&assessment);

        tracing::info!(
            use_case = %assessment.use_case_id,
            overall_risk = %risk_profile.overall,
            priorities = risk_priorities.len(),
            "context analysis complete"
        );

        EnrichedContext {
            assessment,
            graph,
            risk_profile,
            regulatory,
            temporal,
            risk_priorities,
            policies,
        }
    }

    /// Concerns implied by strong risk-increasing edges in the graph.
    #[must_use]
    pub fn cross_cutting_concerns(&self) -> Vec<CrossCuttingConcern> {
        self.graph
            .strong_risk_edges(0.7)
            .into_iter()
            .map(|edge| CrossCuttingConcern {
                concern: format!("{} significantly impacts {}", edge.source, edge.target),
                mitigation: format!(
                    "add monitoring for {} when {} changes",
                    edge.target, edge.source
                ),
                severity: edge.weight,
            })
            .collect()
    }
}
