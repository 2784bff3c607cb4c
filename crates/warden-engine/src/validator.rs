//! Validation
//!
//! Structural, coverage, redundancy, and feasibility checks over the
//! synthesized tiers, in that order. The score weighs the issue penalty at
//! 60% against average coverage at 40%; errors, warnings, and info items
//! subtract 10, 5, and 2 points respectively from the penalty base of 100.

use std::collections::BTreeMap;
use warden_assessment::{EnrichedContext, RiskLevel, SystemCriticality};
use warden_guardrail::{
    CoverageReport, Guardrail, IssueCategory, IssueKind, Severity, SynthesizedGuardrails,
    ValidationIssue, ValidationReport,
};

const ERROR_PENALTY: i32 = 10;
const WARNING_PENALTY: i32 = 5;
const INFO_PENALTY: i32 = 2;

/// Issue-penalty weight in the final score.
const PENALTY_WEIGHT: f64 = 0.6;
/// Coverage weight in the final score.
const COVERAGE_WEIGHT: f64 = 0.4;

/// Rule-name substrings required per coverage dimension. A dimension's
/// coverage is the matched fraction of its table.
mod required {
    pub(super) const CRITICAL: [&str; 4] = ["HUMAN", "INJECTION", "ENCRYPTION", "RATE_LIMITING"];
    pub(super) const SECURITY: [&str; 4] =
        ["INJECTION", "JAILBREAK", "OUTPUT_VALIDATION", "SANITIZATION"];
    pub(super) const PERFORMANCE: [&str; 3] = ["LATENCY", "TIMEOUT", "AVAILABILITY"];
    pub(super) const COST: [&str; 1] = ["TOKEN_BUDGET"];
    pub(super) const COST_HIGH_VOLUME: [&str; 2] = ["CACHING", "OPTIMIZATION"];
    pub(super) const GOVERNANCE: [&str; 3] = ["MINIMIZATION", "RETENTION", "DRIFT"];
    pub(super) const GOVERNANCE_CROSS_BORDER: [&str; 1] = ["CROSS_BORDER"];
    pub(super) const ETHICAL: [&str; 2] = ["BIAS", "MODERATION"];
    pub(super) const ETHICAL_AUTOMATED: [&str; 2] = ["OVERSIGHT", "EXPLAINABILITY"];
}

/// Monthly token volume above which cost coverage also requires caching
/// and optimization rules.
const HIGH_VOLUME_TOKENS: u64 = 10_000_000;

/// Validates a synthesized rule set against the run's context.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a validator.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run every check and produce the weighted report.
    #[must_use]
    pub fn validate(
        &self,
        tiers: &SynthesizedGuardrails,
        context: &EnrichedContext,
    ) -> ValidationReport {
        let all: Vec<&Guardrail> = tiers.iter().collect();
        let mut issues = Vec::new();

        check_required_rules(&all, context, &mut issues);
        check_structure(&all, &mut issues);
        let coverage = compute_coverage(&all, context, &mut issues);
        check_redundancy(&all, &mut issues);
        check_feasibility(&all, context, &mut issues);

        let recommendations = recommendations_for(&all, context, &issues);
        let score = score(&issues, &coverage);
        let is_valid = !issues.iter().any(|i| i.kind == IssueKind::Error);

        tracing::info!(score, is_valid, issues = issues.len(), "validation complete");
        ValidationReport {
            score,
            is_valid,
            issues,
            coverage,
            recommendations,
        }
    }
}

/// (a) unmet critical rules from the risk-priority pass are errors.
fn check_required_rules(
    all: &[&Guardrail],
    context: &EnrichedContext,
    issues: &mut Vec<ValidationIssue>,
) {
    let profiler = warden_assessment::RiskProfiler::new();
    for rule in profiler.critical_rules(&context.risk_priorities) {
        let covered = all.iter().any(|g| g.rule.contains(rule.as_str()));
        if !covered {
            issues.push(ValidationIssue::new(
                IssueKind::Error,
                IssueCategory::Missing,
                format!("missing critical rule: {rule}"),
            ));
        }
    }
}

/// (b) per-guardrail structural completeness.
fn check_structure(all: &[&Guardrail], issues: &mut Vec<ValidationIssue>) {
    for guardrail in all {
        if guardrail.rule.is_empty() {
            issues.push(
                ValidationIssue::new(
                    IssueKind::Warning,
                    IssueCategory::Incomplete,
                    "guardrail missing rule name",
                )
                .for_guardrail(guardrail.id.clone()),
            );
        }
        if guardrail.implementation.platforms.is_empty() {
            issues.push(
                ValidationIssue::new(
                    IssueKind::Warning,
                    IssueCategory::Incomplete,
                    format!("guardrail {} has no platform specification", guardrail.rule),
                )
                .for_guardrail(guardrail.id.clone()),
            );
        }
        if guardrail.severity == Severity::Critical && guardrail.implementation.monitoring.is_empty()
        {
            issues.push(
                ValidationIssue::new(
                    IssueKind::Warning,
                    IssueCategory::Incomplete,
                    format!("critical guardrail {} lacks monitoring", guardrail.rule),
                )
                .for_guardrail(guardrail.id.clone()),
            );
        }
    }
}

/// (c) coverage per dimension from the fixed tables. Low dimensions add
/// warnings.
fn compute_coverage(
    all: &[&Guardrail],
    context: &EnrichedContext,
    issues: &mut Vec<ValidationIssue>,
) -> CoverageReport {
    let mut cost: Vec<&str> = required::COST.to_vec();
    if context.assessment.budget.monthly_token_volume > HIGH_VOLUME_TOKENS {
        cost.extend(required::COST_HIGH_VOLUME);
    }

    let mut governance: Vec<&str> = required::GOVERNANCE.to_vec();
    if context.assessment.data.cross_border_transfer {
        governance.extend(required::GOVERNANCE_CROSS_BORDER);
    }

    let mut ethical: Vec<&str> = required::ETHICAL.to_vec();
    if context.assessment.ethical.automation_level.as_deref() == Some("Fully Automated") {
        ethical.extend(required::ETHICAL_AUTOMATED);
    }

    let coverage = CoverageReport {
        critical: dimension_coverage(all, &required::CRITICAL),
        security: dimension_coverage(all, &required::SECURITY),
        performance: dimension_coverage(all, &required::PERFORMANCE),
        cost: dimension_coverage(all, &cost),
        governance: dimension_coverage(all, &governance),
        ethical: dimension_coverage(all, &ethical),
    };

    for (name, value) in [
        ("critical", coverage.critical),
        ("security", coverage.security),
        ("performance", coverage.performance),
        ("cost", coverage.cost),
        ("governance", coverage.governance),
        ("ethical", coverage.ethical),
    ] {
        if value < 60 {
            issues.push(ValidationIssue::new(
                IssueKind::Info,
                IssueCategory::Missing,
                format!("low coverage for {name}: {value}%"),
            ));
        }
    }

    coverage
}

fn dimension_coverage(all: &[&Guardrail], required: &[&str]) -> u8 {
    if required.is_empty() {
        return 100;
    }
    let matched = required
        .iter()
        .filter(|needle| all.iter().any(|g| g.rule.contains(*needle)))
        .count();
    ((matched as f64 / required.len() as f64) * 100.0).round() as u8
}

/// (d) duplicate `(type, rule)` with identical configuration.
fn check_redundancy(all: &[&Guardrail], issues: &mut Vec<ValidationIssue>) {
    // BTreeMap keeps issue order stable across runs.
    let mut groups: BTreeMap<(String, String), Vec<&Guardrail>> = BTreeMap::new();
    for guardrail in all {
        groups
            .entry((
                guardrail.guardrail_type.as_str().into_owned(),
                guardrail.rule.clone(),
            ))
            .or_default()
            .push(guardrail);
    }

    for ((_, rule), group) in groups {
        if group.len() < 2 {
            continue;
        }
        let identical = group
            .windows(2)
            .all(|w| w[0].implementation.configuration == w[1].implementation.configuration);
        if identical {
            issues.push(ValidationIssue::new(
                IssueKind::Warning,
                IssueCategory::Redundant,
                format!("duplicate guardrails for rule {rule}"),
            ));
        }
    }
}

/// (e) feasibility heuristics.
fn check_feasibility(
    all: &[&Guardrail],
    context: &EnrichedContext,
    issues: &mut Vec<ValidationIssue>,
) {
    let monthly_volume = context.assessment.budget.monthly_token_volume;
    if monthly_volume > HIGH_VOLUME_TOKENS {
        let restrictive_ceiling = all.iter().any(|g| {
            ["max_tokens", "max_output_tokens", "max_context_tokens"]
                .iter()
                .filter_map(|field| g.implementation.configuration.get(*field))
                .filter_map(serde_json::Value::as_u64)
                .any(|ceiling| ceiling < 1_000)
        });
        if restrictive_ceiling {
            issues.push(ValidationIssue::new(
                IssueKind::Warning,
                IssueCategory::Infeasible,
                "token ceilings look too restrictive for the declared monthly volume",
            ));
        }
    }

    let uses_llm = context
        .assessment
        .technical
        .model_types
        .iter()
        .any(|t| t.contains("LLM") || t == "Generative AI");
    if uses_llm {
        let unrealistic_latency = all.iter().any(|g| {
            g.implementation
                .configuration
                .get("max_latency_ms")
                .and_then(serde_json::Value::as_u64)
                .is_some_and(|ms| ms < 100)
        });
        if unrealistic_latency {
            issues.push(ValidationIssue::new(
                IssueKind::Warning,
                IssueCategory::Infeasible,
                "sub-100ms latency ceilings are unrealistic for large language models",
            ));
        }
    }

    let realtime_monitors = all
        .iter()
        .flat_map(|g| &g.implementation.monitoring)
        .filter(|m| m.frequency == "realtime")
        .count();
    if realtime_monitors > 10 {
        issues.push(ValidationIssue::new(
            IssueKind::Info,
            IssueCategory::Infeasible,
            format!("{realtime_monitors} realtime monitors may themselves impact performance"),
        ));
    }
}

fn recommendations_for(
    all: &[&Guardrail],
    context: &EnrichedContext,
    issues: &[ValidationIssue],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if issues.iter().any(|i| i.kind == IssueKind::Error) {
        recommendations.push("address all errors before deployment".to_string());
    }

    if context.assessment.business.system_criticality == SystemCriticality::MissionCritical
        && !all.iter().any(|g| g.rule.contains("CONTINUITY") || g.rule.contains("FAILOVER"))
    {
        recommendations.push("add failover procedures for the mission-critical system".to_string());
    }

    let generative = context
        .assessment
        .technical
        .model_types
        .iter()
        .any(|t| t == "Generative AI");
    if generative && !all.iter().any(|g| g.rule.contains("HALLUCINATION")) {
        recommendations.push("add hallucination detection for the generative model".to_string());
    }

    if context.risk_profile.overall >= RiskLevel::High
        && !all.iter().any(|g| g.rule.contains("INCIDENT"))
    {
        recommendations.push("document an incident response path for the elevated risk profile".to_string());
    }

    recommendations
}

fn score(issues: &[ValidationIssue], coverage: &CoverageReport) -> u8 {
    let mut penalty: i32 = 100;
    for issue in issues {
        penalty -= match issue.kind {
            IssueKind::Error => ERROR_PENALTY,
            IssueKind::Warning => WARNING_PENALTY,
            IssueKind::Info => INFO_PENALTY,
        };
    }
    let penalty = penalty.max(0) as f64;

    let weighted = PENALTY_WEIGHT * penalty + COVERAGE_WEIGHT * coverage.average();
    weighted.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_guardrail::GuardrailType;
    use warden_test_utils::{context_for, minimal_context, mission_critical_assessment};

    fn tiers_with(guardrails: Vec<Guardrail>) -> SynthesizedGuardrails {
        SynthesizedGuardrails {
            consensus: guardrails,
            ..SynthesizedGuardrails::default()
        }
    }

    #[test]
    fn score_stays_in_range() {
        let report = Validator::new().validate(&SynthesizedGuardrails::default(), &minimal_context());
        assert!(report.score <= 100);
        for value in [
            report.coverage.critical,
            report.coverage.security,
            report.coverage.performance,
            report.coverage.cost,
            report.coverage.governance,
            report.coverage.ethical,
        ] {
            assert!(value <= 100);
        }
    }

    #[test]
    fn unmet_critical_rules_are_errors() {
        // Mission-critical fixture carries sensitive data, so the risk pass
        // demands encryption and friends; an empty rule set misses them all.
        let context = context_for(mission_critical_assessment());
        let report = Validator::new().validate(&SynthesizedGuardrails::default(), &context);

        assert!(!report.is_valid);
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::Error && i.message.contains("DATA_ENCRYPTION")));
    }

    #[test]
    fn critical_without_monitoring_is_flagged() {
        let bare = Guardrail::new(GuardrailType::Security, Severity::Critical, "JAILBREAK_PREVENTION", "s");
        let report = Validator::new().validate(&tiers_with(vec![bare]), &minimal_context());

        assert!(report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::Incomplete && i.message.contains("monitoring")));
    }

    #[test]
    fn duplicate_rules_with_same_config_warn() {
        let a = Guardrail::new(GuardrailType::Security, Severity::High, "INPUT_VALIDATION", "s1");
        let b = Guardrail::new(GuardrailType::Security, Severity::High, "INPUT_VALIDATION", "s2");

        let report = Validator::new().validate(&tiers_with(vec![a, b]), &minimal_context());
        assert!(report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::Redundant));
    }

    #[test]
    fn duplicate_rules_with_divergent_config_do_not_warn_as_redundant() {
        let a = Guardrail::new(GuardrailType::Security, Severity::High, "INPUT_VALIDATION", "s1")
            .with_config("max_input_length", json!(1_000));
        let b = Guardrail::new(GuardrailType::Security, Severity::High, "INPUT_VALIDATION", "s2")
            .with_config("max_input_length", json!(4_000));

        let report = Validator::new().validate(&tiers_with(vec![a, b]), &minimal_context());
        assert!(!report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::Redundant));
    }

    #[test]
    fn tight_latency_with_llm_is_infeasible() {
        let mut a = warden_test_utils::minimal_assessment();
        a.technical.model_types = vec!["Generative AI".to_string()];
        let context = context_for(a);

        let sla = Guardrail::new(GuardrailType::Performance, Severity::High, "LATENCY_CEILING", "p")
            .with_config("max_latency_ms", json!(50));
        let report = Validator::new().validate(&tiers_with(vec![sla]), &context);

        assert!(report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::Infeasible && i.message.contains("latency")));
    }

    #[test]
    fn coverage_counts_substring_matches() {
        let rules = vec![
            Guardrail::new(GuardrailType::Security, Severity::High, "PROMPT_INJECTION_DEFENSE", "s"),
            Guardrail::new(GuardrailType::Security, Severity::High, "JAILBREAK_PREVENTION", "s"),
            Guardrail::new(GuardrailType::Security, Severity::High, "OUTPUT_VALIDATION", "s"),
            Guardrail::new(GuardrailType::Security, Severity::High, "INPUT_SANITIZATION", "s"),
        ];
        let report = Validator::new().validate(&tiers_with(rules), &minimal_context());
        assert_eq!(report.coverage.security, 100);
    }

    #[test]
    fn full_issue_free_set_scores_high() {
        let rules = vec![
            Guardrail::new(GuardrailType::HumanOversight, Severity::High, "MANDATED_HUMAN_OVERSIGHT", "s"),
            Guardrail::new(GuardrailType::Security, Severity::High, "PROMPT_INJECTION_DEFENSE", "s"),
            Guardrail::new(GuardrailType::DataProtection, Severity::High, "DATA_ENCRYPTION", "s"),
            Guardrail::new(GuardrailType::Performance, Severity::High, "RATE_LIMITING", "s"),
        ];
        let report = Validator::new().validate(&tiers_with(rules), &minimal_context());
        assert!(report.is_valid);
        assert!(report.score >= 60, "score was {}", report.score);
    }
}
