//! Testing utilities for the Warden workspace
//!
//! Shared assessment fixtures and proposal builders.

#![allow(missing_docs)]

use warden_assessment::{
    Assessment, EnrichedContext, OrganizationPolicies, ProjectPhase, SystemCriticality,
};
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

/// Smallest valid assessment.
pub fn minimal_assessment() -> Assessment {
    Assessment {
        use_case_id: "uc-test".to_string(),
        use_case_title: "Test Use Case".to_string(),
        ..Assessment::default()
    }
}

/// Mission-critical system handling sensitive data with strict latency.
pub fn mission_critical_assessment() -> Assessment {
    let mut a = minimal_assessment();
    a.business.system_criticality = SystemCriticality::MissionCritical;
    a.business.availability_requirement = Some("99.99%".to_string());
    a.business.response_time_requirement = Some("1-5s".to_string());
    a.data.data_types = vec![
        "Health/Medical Records".to_string(),
        "Personal Data".to_string(),
    ];
    a.technical.technical_complexity = Some(8);
    a
}

/// EU-jurisdiction generative-AI system without high-risk markers.
pub fn eu_genai_assessment() -> Assessment {
    let mut a = minimal_assessment();
    a.risk.jurisdictions = vec!["European Union".to_string()];
    a.technical.model_types = vec!["Generative AI".to_string()];
    a
}

/// High-token-volume public chatbot in proof-of-concept.
pub fn high_volume_assessment() -> Assessment {
    let mut a = minimal_assessment();
    a.budget.monthly_token_volume = 5_000_000;
    a.technical.avg_input_tokens = 3_000;
    a.technical.avg_output_tokens = 1_500;
    a.business.user_categories = vec!["General Public".to_string()];
    a.roadmap.project_stage = ProjectPhase::ProofOfConcept;
    a
}

/// Enriched context for an arbitrary assessment with empty policies.
pub fn context_for(assessment: Assessment) -> EnrichedContext {
    EnrichedContext::build(assessment, OrganizationPolicies::default())
}

/// Enriched context for the minimal assessment.
pub fn minimal_context() -> EnrichedContext {
    context_for(minimal_assessment())
}

/// A one-guardrail proposal for conflict/synthesis tests.
pub fn proposal_with_rule(
    source: &str,
    guardrail_type: GuardrailType,
    severity: Severity,
    rule: &str,
) -> AgentProposal {
    let guardrail = Guardrail::new(guardrail_type, severity, rule, source)
        .with_description(format!("{rule} proposed by {source}"))
        .with_rationale("test fixture");
    AgentProposal::new(source, vec![guardrail], 80.0)
}
