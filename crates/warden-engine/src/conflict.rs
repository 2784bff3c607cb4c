//! Conflict detection
//!
//! Pairwise comparison across every two proposals' guardrail lists. The
//! predicate is explicit:
//! - same type with a known configuration field diverging — for numeric
//!   fields, a relative difference above 50% of the smaller value; for
//!   string fields, any difference
//! - cross-type tension between performance and cost control, or human
//!   oversight and performance, when both sides are critical
//!
//! Worst case O(P² · G²); both counts are small in practice.

use warden_guardrail::{
    AgentProposal, Conflict, ConflictKind, ConflictingPair, Guardrail, GuardrailType, Severity,
};

/// Relative divergence (of the smaller value) beyond which two numeric
/// configuration values conflict.
pub const CONFIG_DIVERGENCE_RATIO: f64 = 0.5;

/// Configuration fields compared numerically.
const NUMERIC_FIELDS: [&str; 6] = [
    "limit",
    "max_tokens",
    "max_context_tokens",
    "max_output_tokens",
    "max_latency_ms",
    "monthly_budget",
];

/// Configuration fields compared as opaque strings.
const STRING_FIELDS: [&str; 2] = ["oversight_level", "enforcement_mode"];

/// Conflict-count boundaries for aggregate severity. The 3-pair boundary is
/// a placeholder policy value, not a tuned one.
const HIGH_SEVERITY_PAIR_COUNT: usize = 3;
const MEDIUM_SEVERITY_PAIR_COUNT: usize = 1;

/// Pairwise conflict detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector;

impl ConflictDetector {
    /// Create a detector.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compare every two proposals and report each conflicting pair set.
    #[must_use]
    pub fn detect(&self, proposals: &[AgentProposal]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for i in 0..proposals.len() {
            for j in (i + 1)..proposals.len() {
                let first = &proposals[i];
                let second = &proposals[j];

                let pairs = conflicting_pairs(&first.guardrails, &second.guardrails);
                if pairs.is_empty() {
                    continue;
                }

                let severity = aggregate_conflict_severity(&pairs);
                tracing::debug!(
                    first = %first.source,
                    second = %second.source,
                    pairs = pairs.len(),
                    severity = %severity,
                    "conflict detected"
                );
                conflicts.push(Conflict {
                    participants: [first.source.clone(), second.source.clone()],
                    description: format!(
                        "{} and {} propose conflicting rules",
                        first.source, second.source
                    ),
                    pairs,
                    severity,
                });
            }
        }

        conflicts
    }
}

fn conflicting_pairs(first: &[Guardrail], second: &[Guardrail]) -> Vec<ConflictingPair> {
    let mut pairs = Vec::new();
    for a in first {
        for b in second {
            if let Some(kind) = conflict_kind(a, b) {
                pairs.push(ConflictingPair {
                    first: a.clone(),
                    second: b.clone(),
                    kind,
                });
            }
        }
    }
    pairs
}

/// The conflict predicate. `None` means the two rules coexist.
fn conflict_kind(a: &Guardrail, b: &Guardrail) -> Option<ConflictKind> {
    if a.guardrail_type == b.guardrail_type {
        if configurations_diverge(a, b) {
            return Some(ConflictKind::ParameterMismatch);
        }
        return None;
    }

    if a.severity == Severity::Critical && b.severity == Severity::Critical {
        let types = (&a.guardrail_type, &b.guardrail_type);
        if matches_tension(types, &GuardrailType::Performance, &GuardrailType::CostControl) {
            return Some(ConflictKind::TradeoffConflict);
        }
        if matches_tension(types, &GuardrailType::HumanOversight, &GuardrailType::Performance) {
            return Some(ConflictKind::EfficiencyConflict);
        }
    }

    None
}

fn matches_tension(
    types: (&GuardrailType, &GuardrailType),
    x: &GuardrailType,
    y: &GuardrailType,
) -> bool {
    (types.0 == x && types.1 == y) || (types.0 == y && types.1 == x)
}

fn configurations_diverge(a: &Guardrail, b: &Guardrail) -> bool {
    for field in NUMERIC_FIELDS {
        let (Some(x), Some(y)) = (numeric_config(a, field), numeric_config(b, field)) else {
            continue;
        };
        let smaller = x.min(y);
        if smaller > 0.0 && (x - y).abs() > smaller * CONFIG_DIVERGENCE_RATIO {
            return true;
        }
    }

    for field in STRING_FIELDS {
        let (Some(x), Some(y)) = (string_config(a, field), string_config(b, field)) else {
            continue;
        };
        if x != y {
            return true;
        }
    }

    false
}

fn numeric_config(guardrail: &Guardrail, field: &str) -> Option<f64> {
    guardrail.implementation.configuration.get(field)?.as_f64()
}

fn string_config<'a>(guardrail: &'a Guardrail, field: &str) -> Option<&'a str> {
    guardrail.implementation.configuration.get(field)?.as_str()
}

/// Aggregate severity over a conflict's pairs.
///
/// Critical when a parameter mismatch touches compliance or data
/// protection; high for any tradeoff conflict or more than
/// [`HIGH_SEVERITY_PAIR_COUNT`] pairs; medium above
/// [`MEDIUM_SEVERITY_PAIR_COUNT`]; low otherwise.
#[must_use]
pub fn aggregate_conflict_severity(pairs: &[ConflictingPair]) -> Severity {
    let protected = |t: &GuardrailType| {
        matches!(t, GuardrailType::Compliance | GuardrailType::DataProtection)
    };
    let touches_protected = pairs.iter().any(|p| {
        p.kind == ConflictKind::ParameterMismatch
            && (protected(&p.first.guardrail_type) || protected(&p.second.guardrail_type))
    });
    if touches_protected {
        return Severity::Critical;
    }

    if pairs.iter().any(|p| p.kind == ConflictKind::TradeoffConflict)
        || pairs.len() > HIGH_SEVERITY_PAIR_COUNT
    {
        return Severity::High;
    }

    if pairs.len() > MEDIUM_SEVERITY_PAIR_COUNT {
        return Severity::Medium;
    }

    Severity::Low
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_guardrail::Severity;
    use warden_test_utils::proposal_with_rule;

    fn oversight_proposal(source: &str, level: &str, severity: Severity) -> AgentProposal {
        let guardrail = Guardrail::new(GuardrailType::HumanOversight, severity, "OVERSIGHT_LEVEL", source)
            .with_config("oversight_level", json!(level));
        AgentProposal::new(source, vec![guardrail], 80.0)
    }

    #[test]
    fn divergent_oversight_levels_conflict() {
        let proposals = vec![
            oversight_proposal("ethics", "high", Severity::Critical),
            oversight_proposal("security", "active-monitoring", Severity::High),
        ];

        let conflicts = ConflictDetector::new().detect(&proposals);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].pairs.len(), 1);
        assert_eq!(conflicts[0].pairs[0].kind, ConflictKind::ParameterMismatch);
    }

    #[test]
    fn numeric_divergence_needs_more_than_half() {
        let a = Guardrail::new(GuardrailType::Performance, Severity::High, "RATE_LIMITING", "s1")
            .with_config("limit", json!(100));
        let close = Guardrail::new(GuardrailType::Performance, Severity::High, "RATE_LIMITING", "s2")
            .with_config("limit", json!(140));
        let far = Guardrail::new(GuardrailType::Performance, Severity::High, "RATE_LIMITING", "s3")
            .with_config("limit", json!(400));

        assert_eq!(conflict_kind(&a, &close), None);
        assert_eq!(conflict_kind(&a, &far), Some(ConflictKind::ParameterMismatch));
    }

    #[test]
    fn critical_performance_vs_cost_is_tradeoff() {
        let perf = proposal_with_rule("performance", GuardrailType::Performance, Severity::Critical, "SLA");
        let cost = proposal_with_rule("cost", GuardrailType::CostControl, Severity::Critical, "BUDGET");

        let conflicts = ConflictDetector::new().detect(&[perf, cost]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].pairs[0].kind, ConflictKind::TradeoffConflict);
        assert_eq!(conflicts[0].severity, Severity::High);
    }

    #[test]
    fn non_critical_tension_is_no_conflict() {
        let perf = proposal_with_rule("performance", GuardrailType::Performance, Severity::High, "SLA");
        let cost = proposal_with_rule("cost", GuardrailType::CostControl, Severity::Critical, "BUDGET");

        assert!(ConflictDetector::new().detect(&[perf, cost]).is_empty());
    }

    #[test]
    fn oversight_vs_performance_is_efficiency_conflict() {
        let oversight = proposal_with_rule(
            "ethics",
            GuardrailType::HumanOversight,
            Severity::Critical,
            "REVIEW",
        );
        let perf =
            proposal_with_rule("performance", GuardrailType::Performance, Severity::Critical, "SLA");

        let conflicts = ConflictDetector::new().detect(&[oversight, perf]);
        assert_eq!(conflicts[0].pairs[0].kind, ConflictKind::EfficiencyConflict);
    }

    #[test]
    fn compliance_mismatch_escalates_to_critical() {
        let a = Guardrail::new(GuardrailType::Compliance, Severity::High, "AUDIT_TRAIL", "s1")
            .with_config("oversight_level", json!("strict"));
        let b = Guardrail::new(GuardrailType::Compliance, Severity::High, "AUDIT_TRAIL", "s2")
            .with_config("oversight_level", json!("loose"));

        let conflicts = ConflictDetector::new().detect(&[
            AgentProposal::new("s1", vec![a], 70.0),
            AgentProposal::new("s2", vec![b], 70.0),
        ]);
        assert_eq!(conflicts[0].severity, Severity::Critical);
    }

    #[test]
    fn same_type_same_config_is_agreement_not_conflict() {
        let proposals = vec![
            oversight_proposal("ethics", "high", Severity::High),
            oversight_proposal("security", "high", Severity::High),
        ];
        assert!(ConflictDetector::new().detect(&proposals).is_empty());
    }

    #[test]
    fn severity_function_boundaries() {
        let pair = |kind| ConflictingPair {
            first: Guardrail::new(GuardrailType::Performance, Severity::High, "A", "s1"),
            second: Guardrail::new(GuardrailType::Performance, Severity::High, "B", "s2"),
            kind,
        };

        assert_eq!(
            aggregate_conflict_severity(&[pair(ConflictKind::GeneralConflict)]),
            Severity::Low
        );
        assert_eq!(
            aggregate_conflict_severity(&vec![pair(ConflictKind::GeneralConflict); 2]),
            Severity::Medium
        );
        assert_eq!(
            aggregate_conflict_severity(&vec![pair(ConflictKind::GeneralConflict); 4]),
            Severity::High
        );
    }
}
