//! Compliance specialist
//!
//! Reads the regulatory mapping computed during context analysis and turns
//! obligations into enforceable rules.

use crate::specialist::{confidence, Specialist};
use serde_json::json;
use warden_assessment::{EnrichedContext, EuRiskClass};
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

/// Regulatory-obligation analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceExpert;

impl Specialist for ComplianceExpert {
    fn name(&self) -> &'static str {
        "compliance"
    }

    fn analyze(&self, context: &EnrichedContext) -> AgentProposal {
        let source = self.name();
        let regulatory = &context.regulatory;

        let mut guardrails = Vec::new();
        let mut insights = Vec::new();
        let mut concerns = Vec::new();
        let mut recommendations = Vec::new();

        match regulatory.eu_classification {
            Some(EuRiskClass::Prohibited) => {
                guardrails.push(
                    Guardrail::new(GuardrailType::Compliance, Severity::Critical, "DEPLOYMENT_BLOCK", source)
                        .with_description("System falls under a prohibited practice and must not deploy")
                        .with_rationale("EU AI Act Article 5 classification"),
                );
                concerns.push("assessment matches a prohibited AI practice".to_string());
            }
            Some(EuRiskClass::HighRisk) => {
                guardrails.push(
                    Guardrail::new(
                        GuardrailType::Compliance,
                        Severity::Critical,
                        "CONFORMITY_ASSESSMENT",
                        source,
                    )
                    .with_description("Complete a conformity assessment before production")
                    .with_rationale("high-risk classification under the EU AI Act")
                    .with_config("documentation", json!("technical_file")),
                );
                guardrails.push(
                    Guardrail::new(GuardrailType::Compliance, Severity::Critical, "AUDIT_TRAIL", source)
                        .with_description("Record-keeping across the system lifecycle")
                        .with_rationale("high-risk systems must keep auditable records")
                        .with_config("retention_years", json!(10))
                        .with_monitoring("audit_log_gaps", "0", "daily"),
                );
                guardrails.push(
                    Guardrail::new(
                        GuardrailType::HumanOversight,
                        Severity::Critical,
                        "MANDATED_HUMAN_OVERSIGHT",
                        source,
                    )
                    .with_description("Human oversight over consequential outputs")
                    .with_rationale("high-risk systems require effective human oversight")
                    .with_config("oversight_level", json!("high")),
                );
                insights.push("high-risk EU classification drives a full compliance program".to_string());
            }
            Some(EuRiskClass::LimitedRisk) => {
                guardrails.push(
                    Guardrail::new(GuardrailType::Compliance, Severity::High, "AI_INTERACTION_DISCLOSURE", source)
                        .with_description("Tell users they are interacting with an AI system")
                        .with_rationale("limited-risk transparency obligation"),
                );
            }
            Some(EuRiskClass::MinimalRisk) | None => {}
        }

        if regulatory.applicable.iter().any(|r| r == "GDPR") {
            guardrails.push(
                Guardrail::new(GuardrailType::Compliance, Severity::Critical, "GDPR_COMPLIANCE", source)
                    .with_description("Data-subject rights and lawful-basis controls")
                    .with_rationale("personal data in scope of the GDPR")
                    .with_config("dpia_required", json!(true))
                    .with_config("lawful_basis", json!("documented")),
            );
            recommendations.push("run a data-protection impact assessment before launch".to_string());
        }

        for sector in &context.assessment.risk.sector_specific {
            if sector.contains("Healthcare") || sector.contains("HIPAA") {
                guardrails.push(
                    Guardrail::new(GuardrailType::Compliance, Severity::Critical, "HIPAA_COMPLIANCE", source)
                        .with_description("PHI safeguards per the HIPAA Security Rule")
                        .with_rationale("healthcare sector regime declared"),
                );
            }
        }

        if context.assessment.risk.jurisdictions.is_empty() {
            concerns.push(
                "no jurisdictions declared; compliance coverage cannot be fully determined".to_string(),
            );
        }

        let signals = usize::from(!context.assessment.risk.jurisdictions.is_empty())
            + usize::from(!context.policies.compliance_frameworks.is_empty())
            + usize::from(guardrails.len() > 2);

        AgentProposal::new(source, guardrails, confidence(60.0, signals))
            .with_insights(insights)
            .with_concerns(concerns)
            .with_recommendations(recommendations)
    }
}
