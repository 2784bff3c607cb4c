//! Terminal artifact types
//!
//! `GuardrailsConfig` is the one output every run produces, degraded or not.
//! It is immutable once built; the downstream evaluation generator reads it
//! and nothing else.

use crate::guardrail::{Guardrail, MonitoringRequirement};
use crate::report::ValidationReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Target enforcement platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// OpenAI-hosted models
    Openai,
    /// Anthropic-hosted models
    Anthropic,
    /// Google-hosted models
    Google,
    /// AWS Bedrock
    Aws,
    /// Azure OpenAI
    Azure,
    /// No single platform
    #[default]
    MultiPlatform,
}

impl Platform {
    /// Infer the platform from a declared model-provider string.
    #[must_use]
    pub fn infer(provider: Option<&str>) -> Self {
        let Some(provider) = provider else {
            return Platform::MultiPlatform;
        };
        let provider = provider.to_ascii_lowercase();
        // "Azure OpenAI" must resolve to Azure, so azure is checked first.
        if provider.contains("azure") {
            Platform::Azure
        } else if provider.contains("openai") {
            Platform::Openai
        } else if provider.contains("anthropic") {
            Platform::Anthropic
        } else if provider.contains("google") {
            Platform::Google
        } else if provider.contains("aws") {
            Platform::Aws
        } else {
            Platform::MultiPlatform
        }
    }
}

/// The five deployment-ready rule groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTiers {
    /// Critical-severity rules
    pub critical: Vec<Guardrail>,
    /// Performance/cost/operational rules
    pub operational: Vec<Guardrail>,
    /// Ethics/bias/oversight/content rules
    pub ethical: Vec<Guardrail>,
    /// Budget rules
    pub economic: Vec<Guardrail>,
    /// Rules expected to loosen or tighten as the system matures
    pub evolutionary: Vec<Guardrail>,
}

impl RuleTiers {
    /// Total rules across groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.critical.len()
            + self.operational.len()
            + self.ethical.len()
            + self.economic.len()
            + self.evolutionary.len()
    }

    /// Whether every group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rollback posture for the deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollbackPlan {
    /// Conditions that trigger a rollback
    pub triggers: Vec<String>,
    /// How the rollback is executed
    pub strategy: String,
}

/// Staged rollout description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    /// Rollout stages in order
    pub stages: Vec<String>,
    /// Rollback posture
    pub rollback: RollbackPlan,
}

impl Default for DeploymentPlan {
    fn default() -> Self {
        DeploymentPlan {
            stages: vec![
                "development".to_string(),
                "staging".to_string(),
                "production".to_string(),
            ],
            rollback: RollbackPlan::default(),
        }
    }
}

/// Deployment-ready configuration grouping the final rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationConfig {
    /// Target platform
    pub platform: Platform,
    /// Grouped rules
    pub rules: RuleTiers,
    /// Rollout plan
    pub deployment: DeploymentPlan,
    /// Deduplicated monitoring requirements across all rules
    pub monitoring: Vec<MonitoringRequirement>,
}

/// One source's contribution to the run, for the reasoning trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContribution {
    /// Source name
    pub source: String,
    /// Insights it surfaced
    pub key_insights: Vec<String>,
    /// How many rules it proposed
    pub proposed_rules: usize,
}

/// Summary of one resolved conflict, for the reasoning trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConflictNote {
    /// What conflicted
    pub description: String,
    /// Strategy applied
    pub approach: String,
    /// What was given up
    pub tradeoffs: Vec<String>,
}

/// Why the final rule set looks the way it does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasoningTrace {
    /// Per-source contributions
    pub contributions: Vec<SourceContribution>,
    /// Conflict-resolution summaries
    pub conflicts_resolved: Vec<ResolvedConflictNote>,
    /// Standing assumptions behind the synthesis
    pub assumptions: Vec<String>,
}

/// Aggregated confidence in the produced rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// `0.5 × mean(specialists) + 0.5 × mean(stances)`, in [0, 1]
    pub overall: f64,
    /// Mean specialist confidence in [0, 1]
    pub specialist_mean: f64,
    /// Mean reasoning-stance confidence in [0, 1]
    pub reasoning_mean: f64,
    /// Known unknowns worth flagging to the caller
    pub uncertainties: Vec<String>,
}

/// Run provenance. The only non-deterministic values in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// When the artifact was produced
    pub generated_at: DateTime<Utc>,
    /// Engine version
    pub version: String,
    /// Unique run id
    pub run_id: Ulid,
    /// Every proposal source that participated
    pub sources: Vec<String>,
    /// Context-complexity scalar in [0, 10]
    pub context_complexity: f64,
}

/// The terminal artifact of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailsConfig {
    /// Deployment-ready rule groups
    pub implementation: ImplementationConfig,
    /// Why the rules look the way they do
    pub reasoning: ReasoningTrace,
    /// Aggregated confidence
    pub confidence: ConfidenceScore,
    /// Validator verdict
    pub validation: ValidationReport,
    /// Run provenance
    pub metadata: RunMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_inference() {
        assert_eq!(Platform::infer(Some("OpenAI")), Platform::Openai);
        assert_eq!(Platform::infer(Some("Azure OpenAI Service")), Platform::Azure);
        assert_eq!(Platform::infer(Some("Anthropic")), Platform::Anthropic);
        assert_eq!(Platform::infer(Some("on-prem llama")), Platform::MultiPlatform);
        assert_eq!(Platform::infer(None), Platform::MultiPlatform);
    }

    #[test]
    fn azure_wins_over_openai_substring() {
        assert_eq!(Platform::infer(Some("azure")), Platform::Azure);
        assert_eq!(Platform::infer(Some("Azure OpenAI")), Platform::Azure);
    }

    #[test]
    fn default_deployment_stages() {
        let plan = DeploymentPlan::default();
        assert_eq!(plan.stages, vec!["development", "staging", "production"]);
    }

    #[test]
    fn rule_tiers_len() {
        use crate::guardrail::{Guardrail, GuardrailType, Severity};
        let tiers = RuleTiers {
            critical: vec![Guardrail::new(GuardrailType::Security, Severity::Critical, "A", "s")],
            economic: vec![Guardrail::new(GuardrailType::CostControl, Severity::Medium, "B", "s")],
            ..RuleTiers::default()
        };
        assert_eq!(tiers.len(), 2);
        assert!(!tiers.is_empty());
    }
}
