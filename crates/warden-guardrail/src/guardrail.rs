//! Core guardrail types
//!
//! A guardrail is one enforceable rule for an AI deployment. Identity for
//! deduplication is the `(type, rule)` key, never the id; ids are
//! content-addressed so identical inputs always produce identical output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Enforcement severity of a guardrail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nice to have
    Low,
    /// Should be enforced
    #[default]
    Medium,
    /// Must be enforced
    High,
    /// Deployment-blocking
    Critical,
}

impl Severity {
    /// Numeric score, 1..=4.
    #[must_use]
    pub fn score(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Guardrail category.
///
/// Closed set matching the conflict-priority table, with `Other` preserving
/// forward compatibility for source-specific categories without losing
/// exhaustiveness checking everywhere the known ones are handled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GuardrailType {
    /// Legal/regulatory obligation
    Compliance,
    /// Protection of stored or processed data
    DataProtection,
    /// Output content safety
    ContentSafety,
    /// Human-in-the-loop requirements
    HumanOversight,
    /// Ethical conduct requirements
    Ethical,
    /// Security controls
    Security,
    /// Fairness and bias controls
    BiasMitigation,
    /// Business/operational needs
    Business,
    /// Latency/availability/throughput targets
    Performance,
    /// Budget and spend controls
    CostControl,
    /// Agentic behavior boundaries
    AgentBehavior,
    /// Any category outside the priority table
    Other(String),
}

impl GuardrailType {
    /// Resolution priority from the fixed table; `Other` ranks below
    /// everything.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            GuardrailType::Compliance => 10,
            GuardrailType::DataProtection => 9,
            GuardrailType::ContentSafety => 9,
            GuardrailType::HumanOversight => 8,
            GuardrailType::Ethical => 8,
            GuardrailType::Security => 7,
            GuardrailType::BiasMitigation => 7,
            GuardrailType::Business => 6,
            GuardrailType::Performance => 5,
            GuardrailType::CostControl => 4,
            GuardrailType::AgentBehavior => 3,
            GuardrailType::Other(_) => 0,
        }
    }

    /// Strict position in the priority order, for tie-breaks between types
    /// sharing a priority value. Lower rank wins.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            GuardrailType::Compliance => 0,
            GuardrailType::DataProtection => 1,
            GuardrailType::ContentSafety => 2,
            GuardrailType::HumanOversight => 3,
            GuardrailType::Ethical => 4,
            GuardrailType::Security => 5,
            GuardrailType::BiasMitigation => 6,
            GuardrailType::Business => 7,
            GuardrailType::Performance => 8,
            GuardrailType::CostControl => 9,
            GuardrailType::AgentBehavior => 10,
            GuardrailType::Other(_) => 11,
        }
    }

    /// Stable string form.
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            GuardrailType::Compliance => Cow::Borrowed("compliance"),
            GuardrailType::DataProtection => Cow::Borrowed("data_protection"),
            GuardrailType::ContentSafety => Cow::Borrowed("content_safety"),
            GuardrailType::HumanOversight => Cow::Borrowed("human_oversight"),
            GuardrailType::Ethical => Cow::Borrowed("ethical"),
            GuardrailType::Security => Cow::Borrowed("security"),
            GuardrailType::BiasMitigation => Cow::Borrowed("bias_mitigation"),
            GuardrailType::Business => Cow::Borrowed("business"),
            GuardrailType::Performance => Cow::Borrowed("performance"),
            GuardrailType::CostControl => Cow::Borrowed("cost_control"),
            GuardrailType::AgentBehavior => Cow::Borrowed("agent_behavior"),
            GuardrailType::Other(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<&str> for GuardrailType {
    fn from(s: &str) -> Self {
        match s {
            "compliance" => GuardrailType::Compliance,
            "data_protection" => GuardrailType::DataProtection,
            "content_safety" => GuardrailType::ContentSafety,
            "human_oversight" => GuardrailType::HumanOversight,
            "ethical" => GuardrailType::Ethical,
            "security" => GuardrailType::Security,
            "bias_mitigation" => GuardrailType::BiasMitigation,
            "business" => GuardrailType::Business,
            "performance" => GuardrailType::Performance,
            "cost_control" => GuardrailType::CostControl,
            "agent_behavior" => GuardrailType::AgentBehavior,
            other => GuardrailType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for GuardrailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl Serialize for GuardrailType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

impl<'de> Deserialize<'de> for GuardrailType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(GuardrailType::from(s.as_str()))
    }
}

/// Content-addressed guardrail identifier.
///
/// Hash of the guardrail's identity inputs, so identical inputs always yield
/// identical ids and merged/resolved rules are reproducible across runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GuardrailId(String);

impl GuardrailId {
    const PREFIX: &'static str = "grd";
    /// Hex chars kept from the digest.
    const DIGEST_LEN: usize = 16;

    /// Derive an id from a guardrail's identity inputs.
    #[must_use]
    pub fn derive(guardrail_type: &GuardrailType, rule: &str, provenance: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(guardrail_type.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(rule.as_bytes());
        hasher.update(b"\0");
        hasher.update(provenance.as_bytes());
        let digest = hasher.finalize().to_hex();
        GuardrailId(format!("{}-{}", Self::PREFIX, &digest.as_str()[..Self::DIGEST_LEN]))
    }

    /// Derive an id for a rule produced by resolving other rules: hash of the
    /// sorted source ids plus the resolution method.
    #[must_use]
    pub fn derive_resolved(sources: &[&GuardrailId], method: &str) -> Self {
        let mut ids: Vec<&str> = sources.iter().map(|id| id.0.as_str()).collect();
        ids.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        for id in ids {
            hasher.update(id.as_bytes());
            hasher.update(b"\0");
        }
        hasher.update(method.as_bytes());
        let digest = hasher.finalize().to_hex();
        GuardrailId(format!("{}-{}", Self::PREFIX, &digest.as_str()[..Self::DIGEST_LEN]))
    }

    /// The id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuardrailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dedup identity: `(type, rule)`. Never the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuardrailKey {
    /// Category
    pub guardrail_type: GuardrailType,
    /// Stable rule name
    pub rule: String,
}

/// A metric a guardrail requires watching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringRequirement {
    /// Metric name
    pub metric: String,
    /// Alert threshold (free-form: "80%", "5/hour", "10")
    pub threshold: String,
    /// Evaluation cadence ("realtime", "5m", "daily")
    pub frequency: String,
}

impl MonitoringRequirement {
    /// Dedup identity for monitoring entries.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.metric, &self.threshold)
    }
}

/// How a guardrail is enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardrailImplementation {
    /// Target platforms; `["all"]` when platform-agnostic
    pub platforms: Vec<String>,
    /// Typed-free enforcement parameters, deterministically ordered
    pub configuration: IndexMap<String, serde_json::Value>,
    /// Metrics this guardrail requires
    pub monitoring: Vec<MonitoringRequirement>,
}

impl GuardrailImplementation {
    /// Platform-agnostic implementation with no configuration.
    #[must_use]
    pub fn all_platforms() -> Self {
        GuardrailImplementation {
            platforms: vec!["all".to_string()],
            configuration: IndexMap::new(),
            monitoring: Vec::new(),
        }
    }
}

/// One enforceable rule for an AI deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardrail {
    /// Content-addressed id, globally unique within a run
    pub id: GuardrailId,
    /// Category
    pub guardrail_type: GuardrailType,
    /// Enforcement severity
    pub severity: Severity,
    /// Stable rule identifier, e.g. `TOKEN_BUDGET_MONITORING`
    pub rule: String,
    /// What the rule enforces
    pub description: String,
    /// Why it exists
    pub rationale: String,
    /// How it is enforced
    pub implementation: GuardrailImplementation,
}

impl Guardrail {
    /// Build a guardrail, deriving its content-addressed id from type, rule,
    /// and the proposing source.
    #[must_use]
    pub fn new(
        guardrail_type: GuardrailType,
        severity: Severity,
        rule: impl Into<String>,
        source: &str,
    ) -> Self {
        let rule = rule.into();
        let id = GuardrailId::derive(&guardrail_type, &rule, source);
        Guardrail {
            id,
            guardrail_type,
            severity,
            rule,
            description: String::new(),
            rationale: String::new(),
            implementation: GuardrailImplementation::all_platforms(),
        }
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With rationale
    #[must_use]
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// With a configuration entry
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.implementation.configuration.insert(key.into(), value);
        self
    }

    /// With a monitoring requirement
    #[must_use]
    pub fn with_monitoring(
        mut self,
        metric: impl Into<String>,
        threshold: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        self.implementation.monitoring.push(MonitoringRequirement {
            metric: metric.into(),
            threshold: threshold.into(),
            frequency: frequency.into(),
        });
        self
    }

    /// Dedup key.
    #[must_use]
    pub fn key(&self) -> GuardrailKey {
        GuardrailKey {
            guardrail_type: self.guardrail_type.clone(),
            rule: self.rule.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert_eq!(Severity::Critical.score(), 4);
        assert_eq!(Severity::Low.score(), 1);
    }

    #[test]
    fn type_roundtrips_through_strings() {
        for name in [
            "compliance",
            "data_protection",
            "human_oversight",
            "cost_control",
        ] {
            let t = GuardrailType::from(name);
            assert_eq!(t.as_str(), name);
            assert!(!matches!(t, GuardrailType::Other(_)));
        }

        let custom = GuardrailType::from("hallucination_control");
        assert!(matches!(custom, GuardrailType::Other(_)));
        assert_eq!(custom.as_str(), "hallucination_control");
        assert_eq!(custom.priority(), 0);
    }

    #[test]
    fn type_serde_as_plain_string() {
        let json = serde_json::to_string(&GuardrailType::DataProtection).unwrap();
        assert_eq!(json, "\"data_protection\"");

        let back: GuardrailType = serde_json::from_str("\"performance\"").unwrap();
        assert_eq!(back, GuardrailType::Performance);
    }

    #[test]
    fn compliance_outranks_everything() {
        let compliance = GuardrailType::Compliance;
        for other in [
            GuardrailType::DataProtection,
            GuardrailType::Performance,
            GuardrailType::Other("custom".to_string()),
        ] {
            assert!(compliance.priority() > other.priority());
            assert!(compliance.rank() < other.rank());
        }
    }

    #[test]
    fn ids_are_deterministic() {
        let a = GuardrailId::derive(&GuardrailType::Security, "INPUT_SANITIZATION", "security");
        let b = GuardrailId::derive(&GuardrailType::Security, "INPUT_SANITIZATION", "security");
        let c = GuardrailId::derive(&GuardrailType::Security, "INPUT_SANITIZATION", "ethics");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_str().starts_with("grd-"));
    }

    #[test]
    fn resolved_ids_ignore_source_order() {
        let x = GuardrailId::derive(&GuardrailType::Performance, "A", "s1");
        let y = GuardrailId::derive(&GuardrailType::CostControl, "B", "s2");

        let forward = GuardrailId::derive_resolved(&[&x, &y], "merge");
        let reverse = GuardrailId::derive_resolved(&[&y, &x], "merge");
        let other_method = GuardrailId::derive_resolved(&[&x, &y], "severity");

        assert_eq!(forward, reverse);
        assert_ne!(forward, other_method);
    }

    #[test]
    fn builder_produces_complete_guardrail() {
        let g = Guardrail::new(
            GuardrailType::CostControl,
            Severity::High,
            "TOKEN_BUDGET_MONITORING",
            "cost_optimization",
        )
        .with_description("Monitor and alert on token usage")
        .with_rationale("Monthly volume exceeds one million tokens")
        .with_config("monthly_budget", serde_json::json!(2_000_000))
        .with_monitoring("token_usage_percentage", "80%", "daily");

        assert_eq!(g.rule, "TOKEN_BUDGET_MONITORING");
        assert_eq!(g.implementation.platforms, vec!["all"]);
        assert_eq!(g.implementation.monitoring.len(), 1);
        assert_eq!(g.key().guardrail_type, GuardrailType::CostControl);
    }

    #[test]
    fn key_equality_ignores_everything_but_type_and_rule() {
        let a = Guardrail::new(GuardrailType::DataProtection, Severity::Critical, "DATA_ENCRYPTION", "s1")
            .with_description("one");
        let b = Guardrail::new(GuardrailType::DataProtection, Severity::Low, "DATA_ENCRYPTION", "s2")
            .with_description("two");

        assert_eq!(a.key(), b.key());
        assert_ne!(a.id, b.id);
    }
}
