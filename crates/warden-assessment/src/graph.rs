//! Context graph construction
//!
//! Builds the risk-relationship graph once per run from the normalized
//! assessment. Node importance is a weighted accumulation of fixed risk
//! signals; edges come from a fixed trigger table so the rule set is
//! auditable and testable, not buried in conditionals.

use crate::model::{Assessment, FailureImpact, Section, SystemCriticality};
use serde::{Deserialize, Serialize};

/// Relationship kind carried by a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRelation {
    /// Source obliges the target (e.g. sensitive data requires compliance)
    Requires,
    /// Source raises the target's risk
    IncreasesRisk,
    /// Source magnifies the target's weight
    Amplifies,
    /// Source reduces the target's risk
    Mitigates,
}

/// One node per assessment section present in the intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Section this node represents
    pub section: Section,
    /// Importance in [0, 1]
    pub importance: f64,
}

/// A causal relationship between two sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Originating section
    pub source: Section,
    /// Affected section
    pub target: Section,
    /// Relationship kind
    pub relation: EdgeRelation,
    /// Strength in [0, 1]
    pub weight: f64,
    /// Why the edge exists
    pub rationale: String,
}

/// The per-run risk-relationship graph. Built once, read-only afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextGraph {
    /// Section nodes with importance scores
    pub nodes: Vec<GraphNode>,
    /// Triggered relationship edges
    pub edges: Vec<GraphEdge>,
}

impl ContextGraph {
    /// Importance of a section, if it has a node.
    #[must_use]
    pub fn importance(&self, section: Section) -> Option<f64> {
        self.nodes
            .iter()
            .find(|n| n.section == section)
            .map(|n| n.importance)
    }

    /// Edges whose relation increases risk with weight above `threshold`.
    #[must_use]
    pub fn strong_risk_edges(&self, threshold: f64) -> Vec<&GraphEdge> {
        self.edges
            .iter()
            .filter(|e| e.relation == EdgeRelation::IncreasesRisk && e.weight > threshold)
            .collect()
    }
}

/// A single row of the edge-trigger table.
struct EdgeRule {
    source: Section,
    target: Section,
    relation: EdgeRelation,
    weight: f64,
    rationale: &'static str,
    applies: fn(&Assessment) -> bool,
}

/// Fixed edge-trigger table. Order determines edge order in the graph.
static EDGE_RULES: &[EdgeRule] = &[
    EdgeRule {
        source: Section::Technical,
        target: Section::Risk,
        relation: EdgeRelation::IncreasesRisk,
        weight: 0.8,
        rationale: "High technical complexity increases operational and failure risks",
        applies: |a| a.technical.complexity() > 7,
    },
    EdgeRule {
        source: Section::Data,
        target: Section::Compliance,
        relation: EdgeRelation::Requires,
        weight: 1.0,
        rationale: "Sensitive data categories carry mandatory protection regimes",
        applies: |a| a.data.has_sensitive_data(),
    },
    EdgeRule {
        source: Section::Data,
        target: Section::Compliance,
        relation: EdgeRelation::Requires,
        weight: 0.8,
        rationale: "Personal data triggers data-protection obligations",
        applies: |a| a.data.has_personal_data() && !a.data.has_sensitive_data(),
    },
    EdgeRule {
        source: Section::Business,
        target: Section::Ethical,
        relation: EdgeRelation::Amplifies,
        weight: 0.9,
        rationale: "Public-facing systems carry higher ethical responsibilities",
        applies: |a| a.business.is_public_facing(),
    },
    EdgeRule {
        source: Section::Business,
        target: Section::Risk,
        relation: EdgeRelation::Amplifies,
        weight: 0.9,
        rationale: "Mission-critical systems amplify every failure mode",
        applies: |a| a.business.system_criticality == SystemCriticality::MissionCritical,
    },
    EdgeRule {
        source: Section::Data,
        target: Section::Risk,
        relation: EdgeRelation::IncreasesRisk,
        weight: 0.7,
        rationale: "Cross-border transfers add jurisdictional exposure",
        applies: |a| a.data.cross_border_transfer,
    },
    EdgeRule {
        source: Section::Budget,
        target: Section::Risk,
        relation: EdgeRelation::IncreasesRisk,
        weight: 0.6,
        rationale: "Very high token volume makes cost overrun a material risk",
        applies: |a| a.budget.monthly_token_volume > 1_000_000,
    },
    EdgeRule {
        source: Section::Ethical,
        target: Section::Risk,
        relation: EdgeRelation::Mitigates,
        weight: 0.5,
        rationale: "Active human oversight reduces automation risk",
        applies: |a| a.ethical.oversight_required(),
    },
];

/// Builds the context graph for one assessment. Deterministic and pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextGraphBuilder;

impl ContextGraphBuilder {
    /// Create a builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build nodes for every intake section plus all triggered edges.
    #[must_use]
    pub fn build(&self, assessment: &Assessment) -> ContextGraph {
        let nodes = Section::INTAKE
            .iter()
            .map(|&section| GraphNode {
                section,
                importance: section_importance(assessment, section),
            })
            .collect();

        let edges = EDGE_RULES
            .iter()
            .filter(|rule| (rule.applies)(assessment))
            .map(|rule| GraphEdge {
                source: rule.source,
                target: rule.target,
                relation: rule.relation,
                weight: rule.weight,
                rationale: rule.rationale.to_string(),
            })
            .collect();

        let graph = ContextGraph { nodes, edges };
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "context graph built"
        );
        graph
    }
}

/// Importance weights. Each applies when its signal is present in the
/// section's data; the sum is clamped to [0, 1] over a 0.5 baseline.
mod weight {
    pub(super) const BASELINE: f64 = 0.5;
    pub(super) const MISSION_CRITICAL: f64 = 0.3;
    pub(super) const CATASTROPHIC_FAILURE: f64 = 0.3;
    pub(super) const HIGH_COMPLEXITY: f64 = 0.2;
    pub(super) const SENSITIVE_DATA: f64 = 0.3;
    pub(super) const PERSONAL_DATA: f64 = 0.2;
    pub(super) const PUBLIC_EXPOSURE: f64 = 0.2;
    pub(super) const PER_JURISDICTION: f64 = 0.1;
    pub(super) const JURISDICTION_CAP: usize = 3;
}

fn section_importance(assessment: &Assessment, section: Section) -> f64 {
    let mut importance = weight::BASELINE;

    match section {
        Section::Technical => {
            if assessment.technical.complexity() > 8 {
                importance += weight::HIGH_COMPLEXITY;
            }
        }
        Section::Business => {
            if assessment.business.system_criticality == SystemCriticality::MissionCritical {
                importance += weight::MISSION_CRITICAL;
            }
            if assessment.business.failure_impact == FailureImpact::Catastrophic {
                importance += weight::CATASTROPHIC_FAILURE;
            }
            if assessment.business.is_public_facing() {
                importance += weight::PUBLIC_EXPOSURE;
            }
        }
        Section::Ethical => {
            if assessment.business.is_public_facing() {
                importance += weight::PUBLIC_EXPOSURE;
            }
            if !assessment.ethical.vulnerable_populations.is_empty() {
                importance += weight::SENSITIVE_DATA;
            }
        }
        Section::Risk => {
            let jurisdictions = assessment
                .risk
                .jurisdictions
                .len()
                .min(weight::JURISDICTION_CAP);
            importance += weight::PER_JURISDICTION * jurisdictions as f64;
            if assessment.business.failure_impact >= FailureImpact::Severe {
                importance += weight::HIGH_COMPLEXITY;
            }
        }
        Section::Data => {
            if assessment.data.has_sensitive_data() {
                importance += weight::SENSITIVE_DATA;
            }
            if assessment.data.has_personal_data() {
                importance += weight::PERSONAL_DATA;
            }
        }
        Section::Roadmap => {
            if assessment.roadmap.project_stage.is_early() {
                importance += weight::HIGH_COMPLEXITY;
            }
        }
        Section::Budget => {
            if assessment.budget.monthly_token_volume > 1_000_000 {
                importance += weight::HIGH_COMPLEXITY;
            }
        }
        Section::Compliance => {}
    }

    importance.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusinessProfile, DataProfile, TechnicalProfile};

    fn assessment() -> Assessment {
        Assessment {
            use_case_id: "uc-graph".to_string(),
            ..Assessment::default()
        }
    }

    #[test]
    fn builds_one_node_per_intake_section() {
        let graph = ContextGraphBuilder::new().build(&assessment());
        assert_eq!(graph.nodes.len(), Section::INTAKE.len());
        assert!(graph.nodes.iter().all(|n| (0.0..=1.0).contains(&n.importance)));
    }

    #[test]
    fn complexity_trigger_emits_risk_edge() {
        let mut a = assessment();
        a.technical = TechnicalProfile {
            technical_complexity: Some(8),
            ..TechnicalProfile::default()
        };

        let graph = ContextGraphBuilder::new().build(&a);
        let edge = graph
            .edges
            .iter()
            .find(|e| e.source == Section::Technical && e.target == Section::Risk)
            .expect("complexity edge");
        assert_eq!(edge.relation, EdgeRelation::IncreasesRisk);
        assert!((edge.weight - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn sensitive_data_requires_compliance() {
        let mut a = assessment();
        a.data = DataProfile {
            data_types: vec!["Health/Medical Records".to_string()],
            ..DataProfile::default()
        };

        let graph = ContextGraphBuilder::new().build(&a);
        let edge = graph
            .edges
            .iter()
            .find(|e| e.source == Section::Data && e.target == Section::Compliance)
            .expect("compliance edge");
        assert_eq!(edge.relation, EdgeRelation::Requires);
        assert!((edge.weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_assessment_triggers_only_oversight_mitigation() {
        // Default oversight level is unset, which still reads as "required".
        let graph = ContextGraphBuilder::new().build(&assessment());
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].relation, EdgeRelation::Mitigates);
    }

    #[test]
    fn importance_accumulates_and_clamps() {
        let mut a = assessment();
        a.business = BusinessProfile {
            system_criticality: SystemCriticality::MissionCritical,
            failure_impact: FailureImpact::Catastrophic,
            user_categories: vec!["General Public".to_string()],
            ..BusinessProfile::default()
        };

        let graph = ContextGraphBuilder::new().build(&a);
        // 0.5 + 0.3 + 0.3 + 0.2 clamps to 1.0
        assert!((graph.importance(Section::Business).unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn strong_risk_edges_filters_by_weight() {
        let mut a = assessment();
        a.technical.technical_complexity = Some(9);
        a.budget.monthly_token_volume = 2_000_000;

        let graph = ContextGraphBuilder::new().build(&a);
        let strong = graph.strong_risk_edges(0.7);
        assert_eq!(strong.len(), 1);
        assert_eq!(strong[0].source, Section::Technical);
    }
}
