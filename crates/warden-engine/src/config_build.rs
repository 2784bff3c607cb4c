//! Implementation-config assembly
//!
//! Groups the deduplicated final rule set into the five deployment tiers,
//! infers the target platform, and derives rollback triggers from the
//! assessment. Critical severity outranks type when grouping; rules marked
//! as phase-relaxing are additionally listed in the evolutionary tier.

use crate::templates::RELAXES_AT_PHASE;
use warden_assessment::{EnrichedContext, SystemCriticality};
use warden_guardrail::{
    DeploymentPlan, GuardrailType, ImplementationConfig, MonitoringRequirement, Platform,
    RollbackPlan, RuleTiers, Severity, SynthesizedGuardrails,
};

/// Builds the deployment-ready configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplementationConfigBuilder;

impl ImplementationConfigBuilder {
    /// Create a builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Assemble the configuration from synthesized tiers and context.
    #[must_use]
    pub fn build(
        &self,
        tiers: &SynthesizedGuardrails,
        context: &EnrichedContext,
    ) -> ImplementationConfig {
        let mut rules = RuleTiers::default();

        for guardrail in tiers.iter() {
            if guardrail
                .implementation
                .configuration
                .contains_key(RELAXES_AT_PHASE)
            {
                rules.evolutionary.push(guardrail.clone());
            }

            if guardrail.severity == Severity::Critical {
                rules.critical.push(guardrail.clone());
                continue;
            }
            match guardrail.guardrail_type {
                GuardrailType::Ethical
                | GuardrailType::BiasMitigation
                | GuardrailType::ContentSafety
                | GuardrailType::HumanOversight => rules.ethical.push(guardrail.clone()),
                GuardrailType::CostControl => rules.economic.push(guardrail.clone()),
                _ => rules.operational.push(guardrail.clone()),
            }
        }

        ImplementationConfig {
            platform: Platform::infer(context.assessment.technical.model_provider.as_deref()),
            monitoring: collect_monitoring(tiers),
            deployment: DeploymentPlan {
                stages: DeploymentPlan::default().stages,
                rollback: RollbackPlan {
                    triggers: rollback_triggers(context),
                    strategy: "gradual".to_string(),
                },
            },
            rules,
        }
    }
}

/// Union of every rule's monitoring entries, deduplicated by
/// `(metric, threshold)`.
fn collect_monitoring(tiers: &SynthesizedGuardrails) -> Vec<MonitoringRequirement> {
    let mut monitoring: Vec<MonitoringRequirement> = Vec::new();
    for guardrail in tiers.iter() {
        for entry in &guardrail.implementation.monitoring {
            if !monitoring.iter().any(|m| m.key() == entry.key()) {
                monitoring.push(entry.clone());
            }
        }
    }
    monitoring
}

fn rollback_triggers(context: &EnrichedContext) -> Vec<String> {
    let mut triggers = vec!["error_rate > 5%".to_string(), "latency > 2000ms".to_string()];

    if context.assessment.business.system_criticality == SystemCriticality::MissionCritical {
        triggers.push("availability < 99.9%".to_string());
        triggers.push("data_loss_detected".to_string());
    }

    if let Some(rate) = context.assessment.business.max_hallucination_rate {
        triggers.push(format!("hallucination_rate > {rate}%"));
    }

    triggers
}
