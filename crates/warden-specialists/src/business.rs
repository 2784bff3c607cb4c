//! Business strategy specialist

use crate::specialist::{confidence, Specialist};
use serde_json::json;
use warden_assessment::{EnrichedContext, SystemCriticality};
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

/// Continuity, quality-bar, and capacity analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessStrategist;

impl Specialist for BusinessStrategist {
    fn name(&self) -> &'static str {
        "business"
    }

    fn analyze(&self, context: &EnrichedContext) -> AgentProposal {
        let source = self.name();
        let business = &context.assessment.business;

        let mut guardrails = Vec::new();
        let mut insights = Vec::new();
        let mut recommendations = Vec::new();

        if business.system_criticality == SystemCriticality::MissionCritical {
            guardrails.push(
                Guardrail::new(GuardrailType::Business, Severity::Critical, "BUSINESS_CONTINUITY_PLAN", source)
                    .with_description("Failover and disaster-recovery procedures")
                    .with_rationale("mission-critical designation")
                    .with_config("rto_minutes", json!(15))
                    .with_config("rpo_minutes", json!(5)),
            );
            insights.push("mission-critical designation makes continuity planning mandatory".to_string());
        }

        if let Some(rate) = business.max_hallucination_rate {
            guardrails.push(
                Guardrail::new(
                    GuardrailType::ContentSafety,
                    Severity::High,
                    "HALLUCINATION_RATE_CEILING",
                    source,
                )
                .with_description("Hold hallucination rate under the declared ceiling")
                .with_rationale(format!("business tolerates at most {rate}% hallucinations"))
                .with_config("max_rate_percent", json!(rate))
                .with_monitoring("hallucination_rate", format!("{rate}%"), "daily"),
            );
        }

        if business.concurrent_users.is_some() {
            guardrails.push(
                Guardrail::new(GuardrailType::Business, Severity::Medium, "CAPACITY_PLANNING", source)
                    .with_description("Plan capacity against declared concurrency")
                    .with_rationale(format!(
                        "declared concurrency: {}",
                        business.concurrent_users.as_deref().unwrap_or_default()
                    )),
            );
        }

        if context.assessment.budget.payback_period_months.unwrap_or(0) > 24 {
            guardrails.push(
                Guardrail::new(GuardrailType::Business, Severity::Medium, "ROI_TRACKING", source)
                    .with_description("Track realized value against the long payback horizon")
                    .with_rationale("payback beyond two years needs visible progress"),
            );
            recommendations.push("review value realization quarterly given the long payback".to_string());
        }

        let signals = usize::from(business.availability_requirement.is_some())
            + usize::from(business.concurrent_users.is_some())
            + usize::from(!business.user_categories.is_empty());

        AgentProposal::new(source, guardrails, confidence(55.0, signals))
            .with_insights(insights)
            .with_recommendations(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::{context_for, minimal_context, mission_critical_assessment};

    #[test]
    fn mission_critical_gets_continuity_plan() {
        let proposal = BusinessStrategist.analyze(&context_for(mission_critical_assessment()));
        let plan = proposal
            .guardrails
            .iter()
            .find(|g| g.rule == "BUSINESS_CONTINUITY_PLAN")
            .expect("continuity plan");
        assert_eq!(plan.severity, Severity::Critical);
    }

    #[test]
    fn hallucination_ceiling_from_declared_rate() {
        let mut a = warden_test_utils::minimal_assessment();
        a.business.max_hallucination_rate = Some(2.0);

        let proposal = BusinessStrategist.analyze(&context_for(a));
        let ceiling = proposal
            .guardrails
            .iter()
            .find(|g| g.rule == "HALLUCINATION_RATE_CEILING")
            .unwrap();
        assert_eq!(ceiling.guardrail_type, GuardrailType::ContentSafety);
        assert_eq!(ceiling.implementation.monitoring[0].threshold, "2%");
    }

    #[test]
    fn standard_system_is_quiet() {
        let proposal = BusinessStrategist.analyze(&minimal_context());
        assert!(proposal.guardrails.is_empty());
    }
}
