//! Data governance specialist
//!
//! Encryption, access control, retention, residency, and drift monitoring
//! driven by the data-readiness section.

use crate::specialist::{confidence, Specialist};
use serde_json::json;
use warden_assessment::EnrichedContext;
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

const DRIFT_HIGH_SCORE: u8 = 3;
const DRIFT_CRITICAL_SCORE: u8 = 4;
const LOW_QUALITY_SCORE: u8 = 8;

/// Data protection and lifecycle analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataGovernanceSpecialist;

impl Specialist for DataGovernanceSpecialist {
    fn name(&self) -> &'static str {
        "data_governance"
    }

    fn analyze(&self, context: &EnrichedContext) -> AgentProposal {
        let source = self.name();
        let data = &context.assessment.data;
        let ethical = &context.assessment.ethical;

        let mut guardrails = Vec::new();
        let mut insights = Vec::new();
        let mut concerns = Vec::new();

        if data.has_sensitive_data() {
            guardrails.push(
                Guardrail::new(GuardrailType::DataProtection, Severity::Critical, "DATA_ENCRYPTION", source)
                    .with_description("Encrypt sensitive data at rest and in transit")
                    .with_rationale("sensitive data categories declared")
                    .with_config("at_rest", json!("AES-256"))
                    .with_config("in_transit", json!("TLS 1.3"))
                    .with_monitoring("unencrypted_access_attempts", "0", "realtime"),
            );
            guardrails.push(
                Guardrail::new(
                    GuardrailType::DataProtection,
                    Severity::Critical,
                    "DATA_ACCESS_CONTROL",
                    source,
                )
                .with_description("Role-based access control over sensitive records")
                .with_rationale("sensitive data must be reachable on a need-to-know basis only")
                .with_config("model", json!("rbac"))
                .with_config("audit_all_access", json!(true)),
            );
            guardrails.push(
                Guardrail::new(GuardrailType::DataProtection, Severity::High, "PII_DETECTION_MASKING", source)
                    .with_description("Detect and mask personal identifiers in model traffic")
                    .with_rationale("prompts and completions can leak identifiers")
                    .with_config("masking_strategy", json!("tokenize")),
            );
            insights.push("sensitive data categories put this system in the highest protection tier".to_string());
        }

        if !ethical.data_minimization && !data.data_types.is_empty() {
            guardrails.push(
                Guardrail::new(
                    GuardrailType::DataProtection,
                    Severity::High,
                    "DATA_MINIMIZATION_POLICY",
                    source,
                )
                .with_description("Collect and retain only fields the use case needs")
                .with_rationale("no data-minimization policy is in place")
                .with_config("review_frequency", json!("quarterly")),
            );
            concerns.push("data minimization is not enabled".to_string());
        }

        if data.data_retention.is_some() {
            guardrails.push(
                Guardrail::new(GuardrailType::DataProtection, Severity::High, "DATA_RETENTION_POLICY", source)
                    .with_description("Enforce the declared retention schedule")
                    .with_rationale(format!(
                        "declared retention: {}",
                        data.data_retention.as_deref().unwrap_or_default()
                    ))
                    .with_config("schedule", json!(data.data_retention)),
            );
        }

        if data.cross_border_transfer {
            guardrails.push(
                Guardrail::new(
                    GuardrailType::DataProtection,
                    Severity::Critical,
                    "CROSS_BORDER_DATA_CONTROL",
                    source,
                )
                .with_description("Gate transfers on approved legal mechanisms")
                .with_rationale("data crosses jurisdictional borders")
                .with_config("mechanisms", json!(["standard_contractual_clauses"]))
                .with_monitoring("unapproved_transfers", "0", "daily"),
            );
            guardrails.push(
                Guardrail::new(GuardrailType::DataProtection, Severity::High, "DATA_RESIDENCY", source)
                    .with_description("Pin storage locations to approved regions")
                    .with_rationale("residency obligations follow the data subjects"),
            );
        }

        if let Some(&drift) = context.assessment.risk.model_risks.get("Model Drift/Degradation") {
            if drift >= DRIFT_HIGH_SCORE {
                let severity = if drift >= DRIFT_CRITICAL_SCORE {
                    Severity::Critical
                } else {
                    Severity::High
                };
                guardrails.push(
                    Guardrail::new(GuardrailType::DataProtection, severity, "MODEL_DRIFT_MONITORING", source)
                        .with_description("Track model quality against a frozen baseline")
                        .with_rationale(format!("declared drift risk score {drift}/5"))
                        .with_monitoring("drift_score", "0.1", "daily"),
                );
            }
        }

        if data.data_quality_score.is_some_and(|score| score < LOW_QUALITY_SCORE) {
            guardrails.push(
                Guardrail::new(
                    GuardrailType::DataProtection,
                    Severity::Medium,
                    "DATA_QUALITY_MONITORING",
                    source,
                )
                .with_description("Monitor completeness and accuracy of source data")
                .with_rationale("declared data quality below target"),
            );
        }

        let signals = usize::from(!data.data_types.is_empty())
            + usize::from(data.data_retention.is_some())
            + usize::from(data.data_quality_score.is_some());

        AgentProposal::new(source, guardrails, confidence(60.0, signals))
            .with_insights(insights)
            .with_concerns(concerns)
    }
}
