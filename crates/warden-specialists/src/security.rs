//! Security architecture specialist

use crate::specialist::{confidence, Specialist};
use serde_json::json;
use warden_assessment::EnrichedContext;
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

/// Attack-surface analyzer: injection defense, input validation, and
/// security controls around sensitive data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityArchitect;

impl Specialist for SecurityArchitect {
    fn name(&self) -> &'static str {
        "security"
    }

    fn analyze(&self, context: &EnrichedContext) -> AgentProposal {
        let source = self.name();
        let assessment = &context.assessment;

        let mut guardrails = Vec::new();
        let mut insights = Vec::new();
        let mut concerns = Vec::new();

        let generative = assessment
            .technical
            .model_types
            .iter()
            .any(|t| t == "Generative AI" || t == "Large Language Model (LLM)");

        if generative {
            let injection_risk = assessment
                .risk
                .model_risks
                .get("Prompt Injection Vulnerability")
                .copied()
                .unwrap_or(0);
            let severity = if injection_risk >= 4 || assessment.business.is_public_facing() {
                Severity::Critical
            } else {
                Severity::High
            };
            guardrails.push(
                Guardrail::new(GuardrailType::Security, severity, "PROMPT_INJECTION_DEFENSE", source)
                    .with_description("Layered detection and blocking of prompt injection")
                    .with_rationale("generative models accept adversarial natural language")
                    .with_config("max_input_length", json!(4_000))
                    .with_config("quarantine_suspicious", json!(true))
                    .with_monitoring("injection_attempts_blocked", "10", "5m"),
            );
            guardrails.push(
                Guardrail::new(GuardrailType::Security, Severity::Critical, "JAILBREAK_PREVENTION", source)
                    .with_description("Detect attempts to bypass safety controls")
                    .with_rationale("jailbreaks compromise every downstream control")
                    .with_config("behavioral_monitoring", json!(true))
                    .with_monitoring("jailbreak_attempts", "3", "1h"),
            );
            guardrails.push(
                Guardrail::new(GuardrailType::Security, Severity::High, "OUTPUT_VALIDATION", source)
                    .with_description("Validate and sanitize model output before use")
                    .with_rationale("model output is untrusted input to downstream systems"),
            );
        }

        if assessment.business.is_public_facing() {
            guardrails.push(
                Guardrail::new(GuardrailType::Security, Severity::High, "INPUT_SANITIZATION", source)
                    .with_description("Sanitize all public input before model calls")
                    .with_rationale("public exposure widens the attack surface")
                    .with_config("encoding_validation", json!(true)),
            );
            insights.push("public exposure makes input handling the primary attack surface".to_string());
        }

        if assessment.data.has_sensitive_data() {
            guardrails.push(
                Guardrail::new(GuardrailType::Security, Severity::Critical, "SECURITY_AUDIT_LOGGING", source)
                    .with_description("Tamper-evident logging of all access to sensitive data")
                    .with_rationale("sensitive data requires forensic traceability")
                    .with_monitoring("audit_log_write_failures", "0", "realtime"),
            );
        }

        if assessment.technical.agent_architecture.is_some() {
            guardrails.push(
                Guardrail::new(GuardrailType::AgentBehavior, Severity::High, "ACTION_ALLOWLIST", source)
                    .with_description("Restrict agent tool use to an explicit allowlist")
                    .with_rationale("autonomous tool use must be bounded"),
            );
            concerns.push("agentic architecture declared; unbounded tool access is a risk".to_string());
        }

        let signals = usize::from(generative)
            + usize::from(assessment.data.has_sensitive_data())
            + usize::from(!assessment.risk.model_risks.is_empty());

        AgentProposal::new(source, guardrails, confidence(60.0, signals))
            .with_insights(insights)
            .with_concerns(concerns)
    }
}
