//! Risk profiling
//!
//! Two pure computations over the normalized assessment:
//!
//! - [`RiskProfiler::profile`] — six named risk dimensions in [0, 1] with an
//!   overall level bucketed from the maximum dimension.
//! - [`RiskProfiler::prioritize`] — a fixed table mapping scored risk signals
//!   to the guardrail rule names that must exist to cover them.

use crate::model::{Assessment, FailureImpact, SystemCriticality};
use serde::{Deserialize, Serialize};

/// Bucketed risk level derived from dimension scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Max dimension below 0.25
    #[default]
    Low,
    /// Max dimension in [0.25, 0.5)
    Medium,
    /// Max dimension in [0.5, 0.75)
    High,
    /// Max dimension at or above 0.75
    Critical,
}

impl RiskLevel {
    /// Bucket a [0, 1] score at the 0.25 / 0.5 / 0.75 thresholds.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            RiskLevel::Critical
        } else if score >= 0.5 {
            RiskLevel::High
        } else if score >= 0.25 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Whether the level warrants the contextual high-risk templates.
    #[must_use]
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Six named risk dimensions, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskDimensions {
    /// Model/system complexity risk
    pub technical: f64,
    /// Jurisdictional exposure
    pub regulatory: f64,
    /// Fairness and harm risk
    pub ethical: f64,
    /// Availability/criticality risk
    pub operational: f64,
    /// Public-trust risk
    pub reputational: f64,
    /// Budget exposure
    pub financial: f64,
}

impl RiskDimensions {
    /// Largest dimension score.
    #[must_use]
    pub fn max(&self) -> f64 {
        [
            self.technical,
            self.regulatory,
            self.ethical,
            self.operational,
            self.reputational,
            self.financial,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

/// Complete risk profile for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Overall level, bucketed from the max dimension
    pub overall: RiskLevel,
    /// The individual dimension scores
    pub dimensions: RiskDimensions,
}

/// Where a prioritized risk signal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Model-level signal (hallucination, injection, drift, ...)
    Model,
    /// Agentic signal (cascading failures, runaway loops, ...)
    Agent,
    /// Named technical risk
    Technical,
    /// Named business risk
    Business,
    /// Performance requirement treated as risk
    Performance,
    /// Cost/budget signal
    Cost,
    /// Data sensitivity signal
    Data,
}

/// A scored risk signal and the guardrail rules required to cover it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPriority {
    /// Signal name
    pub name: String,
    /// 1..=5 score
    pub score: f64,
    /// Signal category
    pub category: RiskCategory,
    /// Rule names that must appear in the synthesized output
    pub required_rules: Vec<String>,
    /// Critical when score >= 4, high otherwise
    pub severity: RiskLevel,
}

/// Scores at or above this are high priority.
const HIGH_THRESHOLD: f64 = 3.0;
/// Scores at or above this are critical priority.
const CRITICAL_THRESHOLD: f64 = 4.0;

/// Known model-risk signals and the rules that cover them.
static MODEL_RISK_RULES: &[(&str, &[&str])] = &[
    (
        "Prompt Injection Vulnerability",
        &["INPUT_SANITIZATION", "JAILBREAK_DETECTION", "OUTPUT_VALIDATION"],
    ),
    (
        "Model Hallucination Impact",
        &["FACT_VERIFICATION", "CONFIDENCE_THRESHOLDING", "SOURCE_ATTRIBUTION"],
    ),
    (
        "Model Drift/Degradation",
        &["DRIFT_MONITORING", "ACCURACY_TRACKING", "ROLLBACK_MECHANISM"],
    ),
    (
        "Adversarial Inputs",
        &["ADVERSARIAL_DETECTION", "INPUT_VALIDATION", "ANOMALY_DETECTION"],
    ),
    (
        "Data Poisoning Risk",
        &["DATA_VALIDATION", "TRAINING_DATA_AUDIT", "MODEL_VERSIONING"],
    ),
];

/// Known agentic-risk signals and the rules that cover them.
static AGENT_RISK_RULES: &[(&str, &[&str])] = &[
    (
        "Cascading Failures",
        &["CIRCUIT_BREAKERS", "GRACEFUL_DEGRADATION", "FAILURE_ISOLATION"],
    ),
    (
        "Resource Exhaustion",
        &["RESOURCE_LIMITS", "RATE_LIMITING", "QUOTA_MANAGEMENT"],
    ),
    (
        "Unauthorized Actions",
        &["ACTION_VALIDATION", "PERMISSION_CHECKS", "AUDIT_LOGGING"],
    ),
    (
        "Infinite Loops/Recursion",
        &["LOOP_DETECTION", "TIMEOUT_CONTROLS", "RECURSION_LIMITS"],
    ),
];

/// Pure risk computations over one assessment.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskProfiler;

impl RiskProfiler {
    /// Create a profiler.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the six-dimension risk profile.
    #[must_use]
    pub fn profile(&self, assessment: &Assessment) -> RiskProfile {
        let dimensions = RiskDimensions {
            technical: technical_risk(assessment),
            regulatory: regulatory_risk(assessment),
            ethical: ethical_risk(assessment),
            operational: operational_risk(assessment),
            reputational: reputational_risk(assessment),
            financial: financial_risk(assessment),
        };

        RiskProfile {
            overall: RiskLevel::from_score(dimensions.max()),
            dimensions,
        }
    }

    /// Run the fixed priority tables over every risk signal in the
    /// assessment. Sorted critical-first, then by descending score.
    #[must_use]
    pub fn prioritize(&self, assessment: &Assessment) -> Vec<RiskPriority> {
        let mut priorities = Vec::new();

        scored_table_priorities(
            &assessment.risk.model_risks,
            MODEL_RISK_RULES,
            RiskCategory::Model,
            "GENERAL_MODEL_PROTECTION",
            &mut priorities,
        );
        scored_table_priorities(
            &assessment.risk.agent_risks,
            AGENT_RISK_RULES,
            RiskCategory::Agent,
            "AGENT_CONTROL",
            &mut priorities,
        );

        for item in &assessment.risk.technical_risks {
            named_risk_priority(item, RiskCategory::Technical, "TECHNICAL_MONITORING", &mut priorities);
        }
        for item in &assessment.risk.business_risks {
            named_risk_priority(item, RiskCategory::Business, "BUSINESS_MONITORING", &mut priorities);
        }

        performance_priorities(assessment, &mut priorities);
        cost_priorities(assessment, &mut priorities);
        data_priorities(assessment, &mut priorities);

        priorities.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal))
        });
        priorities
    }

    /// Rule names required by every critical priority, deduplicated in
    /// first-seen order.
    #[must_use]
    pub fn critical_rules(&self, priorities: &[RiskPriority]) -> Vec<String> {
        let mut rules = Vec::new();
        for priority in priorities.iter().filter(|p| p.severity == RiskLevel::Critical) {
            for rule in &priority.required_rules {
                if !rules.contains(rule) {
                    rules.push(rule.clone());
                }
            }
        }
        rules
    }
}

fn severity_for(score: f64) -> RiskLevel {
    if score >= CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else {
        RiskLevel::High
    }
}

fn scored_table_priorities(
    scores: &std::collections::BTreeMap<String, u8>,
    table: &[(&str, &[&str])],
    category: RiskCategory,
    fallback_rule: &str,
    out: &mut Vec<RiskPriority>,
) {
    for (name, &score) in scores {
        let score = f64::from(score);
        if score < HIGH_THRESHOLD {
            continue;
        }
        let required_rules = table
            .iter()
            .find(|(known, _)| *known == name.as_str())
            .map_or_else(
                || vec![fallback_rule.to_string()],
                |(_, rules)| rules.iter().map(ToString::to_string).collect(),
            );
        out.push(RiskPriority {
            name: name.clone(),
            score,
            category,
            required_rules,
            severity: severity_for(score),
        });
    }
}

fn named_risk_priority(
    item: &crate::model::RiskItem,
    category: RiskCategory,
    fallback_rule: &str,
    out: &mut Vec<RiskPriority>,
) {
    let score = item.combined_score();
    if score < HIGH_THRESHOLD {
        return;
    }
    out.push(RiskPriority {
        name: item.risk.clone(),
        score,
        category,
        required_rules: vec![fallback_rule.to_string()],
        severity: severity_for(score),
    });
}

fn performance_priorities(assessment: &Assessment, out: &mut Vec<RiskPriority>) {
    if let Some(seconds) = parse_response_seconds(&assessment.business.response_time_requirement) {
        if seconds <= 30 {
            let critical = seconds <= 5;
            out.push(RiskPriority {
                name: "Strict Response Time Requirement".to_string(),
                score: if critical { 5.0 } else { 4.0 },
                category: RiskCategory::Performance,
                required_rules: vec![
                    "RESPONSE_TIME_ENFORCEMENT".to_string(),
                    "TIMEOUT_CONFIGURATION".to_string(),
                    "CACHING_STRATEGY".to_string(),
                ],
                severity: if critical { RiskLevel::Critical } else { RiskLevel::High },
            });
        }
    }

    let nines = availability_nines(&assessment.business.availability_requirement);
    if nines >= 2 {
        let critical = nines >= 3;
        out.push(RiskPriority {
            name: "High Availability Requirement".to_string(),
            score: if critical { 5.0 } else { 4.0 },
            category: RiskCategory::Performance,
            required_rules: vec![
                "AVAILABILITY_MONITORING".to_string(),
                "FAILOVER_MECHANISM".to_string(),
                "LOAD_BALANCING".to_string(),
            ],
            severity: if critical { RiskLevel::Critical } else { RiskLevel::High },
        });
    }
}

fn cost_priorities(assessment: &Assessment, out: &mut Vec<RiskPriority>) {
    let monthly_tokens = assessment.budget.monthly_token_volume;
    if monthly_tokens > 100_000 {
        let critical = monthly_tokens > 1_000_000;
        out.push(RiskPriority {
            name: "High Token Usage Volume".to_string(),
            score: if critical { 5.0 } else { 4.0 },
            category: RiskCategory::Cost,
            required_rules: vec![
                "TOKEN_BUDGET_ALERTS".to_string(),
                "TOKEN_OPTIMIZATION".to_string(),
                "CONTEXT_COMPRESSION".to_string(),
            ],
            severity: if critical { RiskLevel::Critical } else { RiskLevel::High },
        });
    }

    let investment = assessment.budget.total_investment.unwrap_or(0.0);
    if investment > 100_000.0 {
        let critical = investment > 500_000.0;
        out.push(RiskPriority {
            name: "Significant Financial Investment".to_string(),
            score: if critical { 5.0 } else { 4.0 },
            category: RiskCategory::Cost,
            required_rules: vec![
                "COST_MONITORING".to_string(),
                "BUDGET_ENFORCEMENT".to_string(),
                "ROI_TRACKING".to_string(),
            ],
            severity: if critical { RiskLevel::Critical } else { RiskLevel::High },
        });
    }
}

fn data_priorities(assessment: &Assessment, out: &mut Vec<RiskPriority>) {
    if assessment.data.has_sensitive_data() {
        out.push(RiskPriority {
            name: "Sensitive Data Handling".to_string(),
            score: 5.0,
            category: RiskCategory::Data,
            required_rules: vec![
                "DATA_ENCRYPTION".to_string(),
                "ACCESS_CONTROL".to_string(),
                "AUDIT_LOGGING".to_string(),
                "DATA_MINIMIZATION".to_string(),
            ],
            severity: RiskLevel::Critical,
        });
    }

    if assessment.data.cross_border_transfer {
        out.push(RiskPriority {
            name: "Cross-Border Data Transfer".to_string(),
            score: 4.0,
            category: RiskCategory::Data,
            required_rules: vec![
                "DATA_LOCALIZATION".to_string(),
                "TRANSFER_AGREEMENTS".to_string(),
                "JURISDICTION_COMPLIANCE".to_string(),
            ],
            severity: RiskLevel::High,
        });
    }

    if !assessment.ethical.data_minimization && !assessment.data.data_types.is_empty() {
        out.push(RiskPriority {
            name: "Data Minimization Not Enabled".to_string(),
            score: 3.0,
            category: RiskCategory::Data,
            required_rules: vec![
                "DATA_MINIMIZATION_POLICY".to_string(),
                "FIELD_LEVEL_ACCESS".to_string(),
                "PURPOSE_LIMITATION".to_string(),
            ],
            severity: RiskLevel::High,
        });
    }
}

fn technical_risk(assessment: &Assessment) -> f64 {
    let complexity = f64::from(assessment.technical.complexity()) / 10.0;
    let gen_ai = if has_model_type(assessment, "Generative AI") { 0.2 } else { 0.0 };
    (complexity * 0.5 + gen_ai).min(1.0)
}

fn regulatory_risk(assessment: &Assessment) -> f64 {
    let jurisdictions = assessment.risk.jurisdictions.len() as f64;
    let personal = if assessment.data.has_personal_data() { 0.3 } else { 0.0 };
    (jurisdictions * 0.1 + personal).min(1.0)
}

fn ethical_risk(assessment: &Assessment) -> f64 {
    let public: f64 = if assessment.business.is_public_facing() { 0.3 } else { 0.0 };
    let untested_bias: f64 = if assessment.ethical.bias_testing.as_deref() == Some("None") {
        0.3
    } else {
        0.0
    };
    (public + untested_bias).min(1.0)
}

fn operational_risk(assessment: &Assessment) -> f64 {
    let criticality: f64 = if assessment.business.system_criticality == SystemCriticality::MissionCritical
    {
        0.5
    } else {
        0.2
    };
    let availability: f64 = if availability_nines(&assessment.business.availability_requirement) >= 4 {
        0.3
    } else {
        0.1
    };
    (criticality + availability).min(1.0)
}

fn reputational_risk(assessment: &Assessment) -> f64 {
    let public: f64 = if assessment.business.is_public_facing() { 0.4 } else { 0.0 };
    let failure: f64 = if assessment.business.failure_impact == FailureImpact::Catastrophic {
        0.4
    } else {
        0.2
    };
    (public + failure).min(1.0)
}

fn financial_risk(assessment: &Assessment) -> f64 {
    let budget: f64 = if assessment.budget.total_investment.unwrap_or(0.0) > 1_000_000.0 {
        0.4
    } else {
        0.2
    };
    let payback: f64 = if assessment.budget.payback_period_months.unwrap_or(0) > 24 {
        0.3
    } else {
        0.1
    };
    (budget + payback).min(1.0)
}

fn has_model_type(assessment: &Assessment, model_type: &str) -> bool {
    assessment.technical.model_types.iter().any(|t| t == model_type)
}

/// Parse the upper bound in seconds from strings like "5-30s" or "10s".
fn parse_response_seconds(requirement: &Option<String>) -> Option<u32> {
    let text = requirement.as_deref()?;
    let digits = text
        .rsplit('-')
        .next()?
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if !text.ends_with('s') || digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Count consecutive nines in an availability figure like "99.99%".
fn availability_nines(requirement: &Option<String>) -> usize {
    requirement
        .as_deref()
        .map_or(0, |text| text.chars().filter(|&c| c == '9').count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BudgetProfile, BusinessProfile, DataProfile, RiskItem, RiskRating, TechnicalProfile,
    };

    fn assessment() -> Assessment {
        Assessment {
            use_case_id: "uc-risk".to_string(),
            ..Assessment::default()
        }
    }

    #[test]
    fn level_buckets_at_documented_thresholds() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.25), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.5), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.75), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::Critical);
    }

    #[test]
    fn overall_follows_max_dimension() {
        let mut a = assessment();
        a.business = BusinessProfile {
            system_criticality: SystemCriticality::MissionCritical,
            user_categories: vec!["General Public".to_string()],
            ..BusinessProfile::default()
        };

        let profile = RiskProfiler::new().profile(&a);
        // operational = 0.5 + 0.1, reputational = 0.4 + 0.2
        assert_eq!(profile.overall, RiskLevel::High);
        assert!((profile.dimensions.operational - 0.6).abs() < 1e-9);
    }

    #[test]
    fn default_assessment_is_low_risk() {
        let profile = RiskProfiler::new().profile(&assessment());
        assert_eq!(profile.overall, RiskLevel::Medium);
        assert!(profile.dimensions.max() < 0.5);
    }

    #[test]
    fn dimensions_stay_in_unit_range() {
        let mut a = assessment();
        a.technical = TechnicalProfile {
            technical_complexity: Some(10),
            model_types: vec!["Generative AI".to_string()],
            ..TechnicalProfile::default()
        };
        a.risk.jurisdictions = (0..20).map(|i| format!("J{i}")).collect();
        a.data.data_types = vec!["Personal Data".to_string()];

        let d = RiskProfiler::new().profile(&a).dimensions;
        for score in [d.technical, d.regulatory, d.ethical, d.operational, d.reputational, d.financial]
        {
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn model_risk_scores_map_to_rules() {
        let mut a = assessment();
        a.risk
            .model_risks
            .insert("Prompt Injection Vulnerability".to_string(), 4);
        a.risk.model_risks.insert("Model Drift/Degradation".to_string(), 2);

        let priorities = RiskProfiler::new().prioritize(&a);
        assert_eq!(priorities.len(), 1);
        assert_eq!(priorities[0].severity, RiskLevel::Critical);
        assert!(priorities[0].required_rules.iter().any(|r| r == "JAILBREAK_DETECTION"));
    }

    #[test]
    fn unknown_model_risk_gets_fallback_rule() {
        let mut a = assessment();
        a.risk.model_risks.insert("Novel Exotic Risk".to_string(), 3);

        let priorities = RiskProfiler::new().prioritize(&a);
        assert_eq!(priorities[0].required_rules, vec!["GENERAL_MODEL_PROTECTION"]);
        assert_eq!(priorities[0].severity, RiskLevel::High);
    }

    #[test]
    fn sensitive_data_is_always_critical_priority() {
        let mut a = assessment();
        a.data = DataProfile {
            data_types: vec!["Financial Records".to_string()],
            ..DataProfile::default()
        };

        let profiler = RiskProfiler::new();
        let priorities = profiler.prioritize(&a);
        let critical = profiler.critical_rules(&priorities);
        assert!(critical.iter().any(|r| r == "DATA_ENCRYPTION"));
        assert!(critical.iter().any(|r| r == "AUDIT_LOGGING"));
    }

    #[test]
    fn token_volume_thresholds() {
        let mut a = assessment();
        a.budget = BudgetProfile {
            monthly_token_volume: 2_000_000,
            ..BudgetProfile::default()
        };

        let priorities = RiskProfiler::new().prioritize(&a);
        let cost = priorities
            .iter()
            .find(|p| p.category == RiskCategory::Cost)
            .unwrap();
        assert_eq!(cost.severity, RiskLevel::Critical);
        assert!((cost.score - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn named_risks_use_combined_score() {
        let mut a = assessment();
        a.risk.technical_risks.push(RiskItem {
            risk: "Integration failures".to_string(),
            probability: RiskRating::High,
            impact: RiskRating::Medium,
        });

        let priorities = RiskProfiler::new().prioritize(&a);
        assert_eq!(priorities.len(), 1);
        assert!((priorities[0].score - 3.5).abs() < f64::EPSILON);
        assert_eq!(priorities[0].severity, RiskLevel::High);
    }

    #[test]
    fn response_time_parsing() {
        assert_eq!(parse_response_seconds(&Some("5-30s".to_string())), Some(30));
        assert_eq!(parse_response_seconds(&Some("3s".to_string())), Some(3));
        assert_eq!(parse_response_seconds(&Some("2 minutes".to_string())), None);
        assert_eq!(parse_response_seconds(&None), None);
    }

    #[test]
    fn availability_nines_counting() {
        assert_eq!(availability_nines(&Some("99.99%".to_string())), 4);
        assert_eq!(availability_nines(&Some("95%".to_string())), 1);
        assert_eq!(availability_nines(&None), 0);
    }

    #[test]
    fn priorities_sorted_critical_first() {
        let mut a = assessment();
        a.data.data_types = vec!["Biometric Data".to_string()];
        a.ethical.data_minimization = false;
        a.budget.monthly_token_volume = 200_000;

        let priorities = RiskProfiler::new().prioritize(&a);
        assert!(priorities.len() >= 3);
        assert_eq!(priorities[0].severity, RiskLevel::Critical);
        let first_high = priorities.iter().position(|p| p.severity == RiskLevel::High);
        let last_critical = priorities
            .iter()
            .rposition(|p| p.severity == RiskLevel::Critical);
        assert!(first_high.unwrap() > last_critical.unwrap());
    }
}
