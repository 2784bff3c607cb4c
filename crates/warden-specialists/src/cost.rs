//! Cost optimization specialist
//!
//! Token budgets, spend ceilings, and caching opportunities. Thresholds are
//! fixed: one million monthly tokens marks the critical budget tier, 2,000
//! average input tokens triggers context optimization, 1,000 average output
//! tokens triggers output control.

use crate::specialist::{confidence, Specialist};
use serde_json::json;
use warden_assessment::EnrichedContext;
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

const CRITICAL_MONTHLY_TOKENS: u64 = 1_000_000;
const HIGH_INPUT_TOKENS: u64 = 2_000;
const HIGH_OUTPUT_TOKENS: u64 = 1_000;

/// Cost and resource-efficiency analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostOptimizer;

impl Specialist for CostOptimizer {
    fn name(&self) -> &'static str {
        "cost_optimization"
    }

    fn analyze(&self, context: &EnrichedContext) -> AgentProposal {
        let source = self.name();
        let budget = &context.assessment.budget;
        let technical = &context.assessment.technical;

        let mut guardrails = Vec::new();
        let mut insights = Vec::new();
        let mut concerns = Vec::new();
        let mut recommendations = Vec::new();

        if budget.monthly_token_volume > 0 {
            let severity = if budget.monthly_token_volume > CRITICAL_MONTHLY_TOKENS {
                Severity::Critical
            } else {
                Severity::High
            };
            guardrails.push(
                Guardrail::new(GuardrailType::CostControl, severity, "TOKEN_BUDGET_MONITORING", source)
                    .with_description("Monitor and alert on token usage against the monthly budget")
                    .with_rationale(format!(
                        "monthly token volume of {} declared",
                        budget.monthly_token_volume
                    ))
                    .with_config("monthly_budget", json!(budget.monthly_token_volume))
                    .with_config(
                        "alert_thresholds",
                        json!({"warning": 0.7, "critical": 0.9, "hard_limit": 1.0}),
                    )
                    .with_monitoring("token_usage_percentage", "80%", "daily"),
            );
        }

        if technical.avg_input_tokens > HIGH_INPUT_TOKENS {
            guardrails.push(
                Guardrail::new(GuardrailType::CostControl, Severity::High, "CONTEXT_OPTIMIZATION", source)
                    .with_description("Compress and window prompt context")
                    .with_rationale(format!(
                        "average input of {} tokens per request",
                        technical.avg_input_tokens
                    ))
                    .with_config("max_context_tokens", json!(technical.avg_input_tokens.min(4_000)))
                    .with_config("compression_ratio", json!(0.6)),
            );
            insights.push(format!(
                "context optimization can cut token usage materially at {} average input tokens",
                technical.avg_input_tokens
            ));
        }

        if technical.avg_output_tokens > HIGH_OUTPUT_TOKENS {
            guardrails.push(
                Guardrail::new(GuardrailType::CostControl, Severity::Medium, "OUTPUT_LENGTH_CONTROL", source)
                    .with_description("Cap completion length to manage spend")
                    .with_rationale(format!(
                        "average output of {} tokens per request",
                        technical.avg_output_tokens
                    ))
                    .with_config(
                        "max_output_tokens",
                        json!((technical.avg_output_tokens as f64 * 0.8).min(2_000.0) as u64),
                    ),
            );
        }

        if budget.budget_range.is_some() || budget.total_investment.is_some() {
            let ceiling = budget.total_investment.unwrap_or(0.0);
            guardrails.push(
                Guardrail::new(GuardrailType::CostControl, Severity::Critical, "BUDGET_ENFORCEMENT", source)
                    .with_description("Enforce spend limits with hard stops")
                    .with_rationale(format!(
                        "declared budget {}",
                        budget.budget_range.as_deref().unwrap_or("(total investment)")
                    ))
                    .with_config("monthly_limit", json!(ceiling / 12.0))
                    .with_config("enforcement_mode", json!("hard_stop"))
                    .with_monitoring("monthly_spend", format!("{}", ceiling / 12.0), "daily"),
            );
            if ceiling > 100_000.0 {
                concerns.push("significant committed spend requires strict cost controls".to_string());
            }
        }

        if technical.rag_architecture.is_some() {
            guardrails.push(
                Guardrail::new(GuardrailType::CostControl, Severity::Medium, "EMBEDDING_CACHING", source)
                    .with_description("Cache embeddings to avoid recomputation")
                    .with_rationale("RAG architecture declared")
                    .with_config("update_frequency", json!("weekly")),
            );
            insights.push("embedding caching reduces RAG recomputation cost".to_string());
        }

        if !technical.batch_processing && budget.monthly_token_volume > 0 {
            guardrails.push(
                Guardrail::new(GuardrailType::CostControl, Severity::Low, "BATCH_PROCESSING", source)
                    .with_description("Batch non-urgent requests")
                    .with_rationale("batch APIs discount non-interactive workloads")
                    .with_config("min_batch_size", json!(5)),
            );
            recommendations
                .push("route non-urgent requests through a batch API for cost savings".to_string());
        }

        let signals = usize::from(budget.monthly_token_volume > 0)
            + usize::from(budget.budget_range.is_some())
            + usize::from(technical.avg_input_tokens > 0);

        AgentProposal::new(source, guardrails, confidence(60.0, signals))
            .with_insights(insights)
            .with_concerns(concerns)
            .with_recommendations(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::{context_for, high_volume_assessment, minimal_context};

    #[test]
    fn high_volume_triggers_critical_budget_rule() {
        let proposal = CostOptimizer.analyze(&context_for(high_volume_assessment()));

        let budget = proposal
            .guardrails
            .iter()
            .find(|g| g.rule == "TOKEN_BUDGET_MONITORING")
            .expect("token budget rule");
        assert_eq!(budget.severity, Severity::Critical);
        assert_eq!(budget.guardrail_type, GuardrailType::CostControl);
        assert!(!budget.implementation.monitoring.is_empty());
    }

    #[test]
    fn large_contexts_trigger_optimization() {
        let proposal = CostOptimizer.analyze(&context_for(high_volume_assessment()));

        assert!(proposal.guardrails.iter().any(|g| g.rule == "CONTEXT_OPTIMIZATION"));
        assert!(proposal.guardrails.iter().any(|g| g.rule == "OUTPUT_LENGTH_CONTROL"));
        assert!(!proposal.insights.is_empty());
    }

    #[test]
    fn minimal_assessment_yields_no_cost_rules() {
        let proposal = CostOptimizer.analyze(&minimal_context());
        assert!(proposal.guardrails.is_empty());
        assert!(!proposal.is_degraded());
    }

    #[test]
    fn deterministic_output() {
        let ctx = context_for(high_volume_assessment());
        let first = CostOptimizer.analyze(&ctx);
        let second = CostOptimizer.analyze(&ctx);
        assert_eq!(first, second);
    }
}
