//! Ethics specialist

use crate::specialist::{confidence, Specialist};
use serde_json::json;
use warden_assessment::EnrichedContext;
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

/// Fairness, oversight, and harm analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthicsAdvisor;

impl Specialist for EthicsAdvisor {
    fn name(&self) -> &'static str {
        "ethics"
    }

    fn analyze(&self, context: &EnrichedContext) -> AgentProposal {
        let source = self.name();
        let ethical = &context.assessment.ethical;
        let business = &context.assessment.business;

        let mut guardrails = Vec::new();
        let mut insights = Vec::new();
        let mut concerns = Vec::new();

        if ethical.bias_testing.as_deref() == Some("None") || ethical.bias_testing.is_none() {
            let severity = if business.is_public_facing() {
                Severity::Critical
            } else {
                Severity::High
            };
            guardrails.push(
                Guardrail::new(GuardrailType::BiasMitigation, severity, "BIAS_TESTING_PROGRAM", source)
                    .with_description("Establish recurring bias testing across user segments")
                    .with_rationale("no bias testing is in place")
                    .with_config("cadence", json!("quarterly"))
                    .with_monitoring("fairness_metric_drift", "0.05", "weekly"),
            );
            concerns.push("model ships without bias testing".to_string());
        }

        if ethical.automation_level.as_deref() == Some("Fully Automated") {
            guardrails.push(
                Guardrail::new(
                    GuardrailType::HumanOversight,
                    Severity::Critical,
                    "HUMAN_REVIEW_CHECKPOINT",
                    source,
                )
                .with_description("Human review before consequential automated decisions")
                .with_rationale("fully automated decision-making declared")
                .with_config("oversight_level", json!("high")),
            );
            guardrails.push(
                Guardrail::new(GuardrailType::Ethical, Severity::High, "DECISION_EXPLAINABILITY", source)
                    .with_description("Produce human-readable explanations for decisions")
                    .with_rationale("affected individuals must be able to contest outcomes"),
            );
        }

        if !ethical.vulnerable_populations.is_empty() {
            guardrails.push(
                Guardrail::new(
                    GuardrailType::Ethical,
                    Severity::Critical,
                    "VULNERABLE_POPULATION_SAFEGUARDS",
                    source,
                )
                .with_description("Extra safeguards for declared vulnerable groups")
                .with_rationale(format!(
                    "vulnerable populations in scope: {}",
                    ethical.vulnerable_populations.join(", ")
                )),
            );
            insights.push("vulnerable populations raise the duty of care".to_string());
        }

        if business.is_public_facing() {
            guardrails.push(
                Guardrail::new(GuardrailType::ContentSafety, Severity::High, "CONTENT_MODERATION", source)
                    .with_description("Moderate generated content before public display")
                    .with_rationale("public output carries reputational and harm risk")
                    .with_monitoring("flagged_content_rate", "1%", "1h"),
            );
        }

        let signals = usize::from(ethical.bias_testing.is_some())
            + usize::from(ethical.automation_level.is_some())
            + usize::from(ethical.human_oversight_level.is_some());

        AgentProposal::new(source, guardrails, confidence(60.0, signals))
            .with_insights(insights)
            .with_concerns(concerns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::{context_for, high_volume_assessment, minimal_assessment};

    #[test]
    fn missing_bias_testing_always_flagged() {
        let proposal = EthicsAdvisor.analyze(&context_for(minimal_assessment()));
        let bias = proposal
            .guardrails
            .iter()
            .find(|g| g.rule == "BIAS_TESTING_PROGRAM")
            .expect("bias rule");
        assert_eq!(bias.severity, Severity::High);
    }

    #[test]
    fn public_facing_escalates_bias_and_adds_moderation() {
        let proposal = EthicsAdvisor.analyze(&context_for(high_volume_assessment()));

        let bias = proposal
            .guardrails
            .iter()
            .find(|g| g.rule == "BIAS_TESTING_PROGRAM")
            .unwrap();
        assert_eq!(bias.severity, Severity::Critical);
        assert!(proposal.guardrails.iter().any(|g| g.rule == "CONTENT_MODERATION"));
    }

    #[test]
    fn full_automation_requires_oversight() {
        let mut a = minimal_assessment();
        a.ethical.automation_level = Some("Fully Automated".to_string());

        let proposal = EthicsAdvisor.analyze(&context_for(a));
        let review = proposal
            .guardrails
            .iter()
            .find(|g| g.rule == "HUMAN_REVIEW_CHECKPOINT")
            .unwrap();
        assert_eq!(review.guardrail_type, GuardrailType::HumanOversight);
        assert_eq!(review.severity, Severity::Critical);
    }
}
