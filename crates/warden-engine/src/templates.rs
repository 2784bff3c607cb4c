//! Contextual rule templates
//!
//! Fixed template constructors for the contextual synthesis tier. Three
//! triggers, each a documented constant rule:
//! - elevated overall risk -> enhanced monitoring
//! - EU high-risk classification -> mandatory compliance bundle
//! - early lifecycle phase -> increased human oversight

use serde_json::json;
use warden_assessment::EnrichedContext;
use warden_guardrail::{Guardrail, GuardrailType, Severity};

/// Source label recorded on template-generated rules.
const SOURCE: &str = "contextual";

/// Configuration marker identifying rules expected to relax as the system
/// matures; the config builder groups these into the evolutionary tier.
pub const RELAXES_AT_PHASE: &str = "relaxes_at_phase";

/// Generate the contextual tier for one run.
#[must_use]
pub fn contextual_guardrails(context: &EnrichedContext) -> Vec<Guardrail> {
    let mut guardrails = Vec::new();

    if context.risk_profile.overall.is_elevated() {
        guardrails.push(
            Guardrail::new(GuardrailType::Performance, Severity::High, "ENHANCED_RISK_MONITORING", SOURCE)
                .with_description("Comprehensive monitoring for a high-risk profile")
                .with_rationale(format!(
                    "overall risk level is {}",
                    context.risk_profile.overall
                ))
                .with_config("monitoring_level", json!("comprehensive"))
                .with_config("alert_threshold", json!("sensitive"))
                .with_monitoring("system_health", "95%", "1m"),
        );
    }

    if context.regulatory.is_eu_high_risk() {
        guardrails.push(
            Guardrail::new(
                GuardrailType::Compliance,
                Severity::Critical,
                "EU_AI_ACT_HIGH_RISK_CONTROLS",
                SOURCE,
            )
            .with_description("Mandatory controls for high-risk AI systems")
            .with_rationale("classified high-risk under the EU AI Act")
            .with_config("human_oversight", json!("mandatory"))
            .with_config("transparency_level", json!("high"))
            .with_config("audit_trail", json!("comprehensive"))
            .with_monitoring("compliance_status", "100%", "1h"),
        );
    }

    if context.temporal.current_phase.is_early() {
        guardrails.push(
            Guardrail::new(
                GuardrailType::HumanOversight,
                Severity::High,
                "EARLY_PHASE_OVERSIGHT",
                SOURCE,
            )
            .with_description("Human review of critical decisions during early phases")
            .with_rationale(format!(
                "system is in the {:?} phase",
                context.temporal.current_phase
            ))
            .with_config("oversight_level", json!("high"))
            .with_config("approval_required", json!(true))
            .with_config(RELAXES_AT_PHASE, json!("production"))
            .with_monitoring("human_review_rate", "100%", "1h"),
        );
    }

    guardrails
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::{
        context_for, eu_genai_assessment, minimal_assessment, mission_critical_assessment,
    };

    #[test]
    fn minimal_context_gets_only_early_phase_template() {
        // Default phase is discovery, so the oversight template fires.
        let guardrails = contextual_guardrails(&context_for(minimal_assessment()));
        assert_eq!(guardrails.len(), 1);
        assert_eq!(guardrails[0].rule, "EARLY_PHASE_OVERSIGHT");
        assert!(guardrails[0]
            .implementation
            .configuration
            .contains_key(RELAXES_AT_PHASE));
    }

    #[test]
    fn mission_critical_fires_risk_template() {
        let guardrails = contextual_guardrails(&context_for(mission_critical_assessment()));
        assert!(guardrails.iter().any(|g| g.rule == "ENHANCED_RISK_MONITORING"));
    }

    #[test]
    fn eu_high_risk_fires_compliance_bundle() {
        let mut a = eu_genai_assessment();
        a.business.user_categories = vec!["Healthcare Providers".to_string()];

        let guardrails = contextual_guardrails(&context_for(a));
        let bundle = guardrails
            .iter()
            .find(|g| g.rule == "EU_AI_ACT_HIGH_RISK_CONTROLS")
            .expect("compliance bundle");
        assert_eq!(bundle.severity, Severity::Critical);
    }

    #[test]
    fn production_phase_drops_oversight_template() {
        let mut a = minimal_assessment();
        a.roadmap.project_stage = warden_assessment::ProjectPhase::Production;

        let guardrails = contextual_guardrails(&context_for(a));
        assert!(!guardrails.iter().any(|g| g.rule == "EARLY_PHASE_OVERSIGHT"));
    }
}
