//! Risk analyst specialist
//!
//! Works from the precomputed risk profile and priority table rather than
//! re-deriving signals from raw answers.

use crate::specialist::{confidence, Specialist};
use serde_json::json;
use warden_assessment::{EnrichedContext, RiskCategory, RiskLevel};
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

/// Aggregate-risk analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAnalyst;

impl Specialist for RiskAnalyst {
    fn name(&self) -> &'static str {
        "risk"
    }

    fn analyze(&self, context: &EnrichedContext) -> AgentProposal {
        let source = self.name();
        let profile = &context.risk_profile;

        let mut guardrails = Vec::new();
        let mut insights = Vec::new();
        let mut concerns = Vec::new();

        if profile.overall.is_elevated() {
            guardrails.push(
                Guardrail::new(GuardrailType::Business, Severity::High, "RISK_REVIEW_BOARD", source)
                    .with_description("Standing risk review with sign-off before stage changes")
                    .with_rationale(format!("overall risk level is {}", profile.overall))
                    .with_config("review_cadence", json!("monthly")),
            );
            guardrails.push(
                Guardrail::new(GuardrailType::Business, Severity::High, "INCIDENT_RESPONSE_PLAN", source)
                    .with_description("Documented incident response with named owners")
                    .with_rationale("elevated risk demands rehearsed response paths")
                    .with_monitoring("incident_drill_age_days", "90", "weekly"),
            );
        }

        // Agent-category priorities surface resilience rules.
        let agent_signals: Vec<_> = context
            .risk_priorities
            .iter()
            .filter(|p| p.category == RiskCategory::Agent)
            .collect();
        if !agent_signals.is_empty() {
            guardrails.push(
                Guardrail::new(GuardrailType::AgentBehavior, Severity::High, "FAILURE_ISOLATION", source)
                    .with_description("Isolate agent failures behind circuit breakers")
                    .with_rationale("agentic risk signals scored high")
                    .with_config("circuit_breaker", json!(true)),
            );
        }

        for priority in &context.risk_priorities {
            if priority.severity == RiskLevel::Critical {
                concerns.push(format!("critical risk signal: {}", priority.name));
            }
        }
        if !context.risk_priorities.is_empty() {
            insights.push(format!(
                "{} prioritized risk signals, {} critical",
                context.risk_priorities.len(),
                concerns.len()
            ));
        }

        let signals = usize::from(!context.assessment.risk.technical_risks.is_empty())
            + usize::from(!context.assessment.risk.business_risks.is_empty())
            + usize::from(!context.assessment.risk.model_risks.is_empty());

        AgentProposal::new(source, guardrails, confidence(55.0, signals))
            .with_insights(insights)
            .with_concerns(concerns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::{context_for, minimal_context, mission_critical_assessment};

    #[test]
    fn elevated_risk_adds_governance_rules() {
        let proposal = RiskAnalyst.analyze(&context_for(mission_critical_assessment()));

        assert!(proposal.guardrails.iter().any(|g| g.rule == "RISK_REVIEW_BOARD"));
        assert!(proposal.guardrails.iter().any(|g| g.rule == "INCIDENT_RESPONSE_PLAN"));
    }

    #[test]
    fn critical_priorities_become_concerns() {
        let proposal = RiskAnalyst.analyze(&context_for(mission_critical_assessment()));
        assert!(proposal
            .concerns
            .iter()
            .any(|c| c.contains("Sensitive Data Handling")));
    }

    #[test]
    fn agent_risks_add_isolation() {
        let mut a = warden_test_utils::minimal_assessment();
        a.risk.agent_risks.insert("Cascading Failures".to_string(), 4);

        let proposal = RiskAnalyst.analyze(&context_for(a));
        assert!(proposal.guardrails.iter().any(|g| g.rule == "FAILURE_ISOLATION"));
    }

    #[test]
    fn quiet_on_low_risk() {
        let proposal = RiskAnalyst.analyze(&minimal_context());
        assert!(proposal.guardrails.is_empty());
        assert!(proposal.concerns.is_empty());
    }
}
