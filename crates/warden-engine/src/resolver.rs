//! Conflict resolution
//!
//! The strategy is selected once per run from context, never per conflict:
//! mission-critical systems resolve conservatively, EU high-risk systems
//! resolve compliance-first, everything else resolves by priority order
//! with merging on ties. Every resolved guardrail records its resolution
//! method in its rationale, carries a content-addressed id derived from the
//! pair it replaced, and never drops below the pair's maximum severity.

use indexmap::IndexMap;
use warden_assessment::{EnrichedContext, SystemCriticality};
use warden_guardrail::{
    Conflict, ConflictKind, ConflictResolution, ConflictingPair, Guardrail, GuardrailId,
    GuardrailType, MonitoringRequirement, ResolutionStrategy,
};

/// Priority-table-driven negotiator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictResolver;

impl ConflictResolver {
    /// Create a resolver.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Select the run's strategy from context.
    #[must_use]
    pub fn strategy_for(&self, context: &EnrichedContext) -> ResolutionStrategy {
        if context.assessment.business.system_criticality == SystemCriticality::MissionCritical {
            return ResolutionStrategy::ConservativeSafety;
        }
        if context.regulatory.is_eu_high_risk() {
            return ResolutionStrategy::ComplianceFocused;
        }
        ResolutionStrategy::BalancedPractical
    }

    /// Produce exactly one resolution per conflict.
    #[must_use]
    pub fn resolve_all(
        &self,
        conflicts: &[Conflict],
        strategy: ResolutionStrategy,
        context: &EnrichedContext,
    ) -> Vec<ConflictResolution> {
        let resolutions: Vec<ConflictResolution> = conflicts
            .iter()
            .map(|conflict| self.resolve(conflict, strategy, context))
            .collect();

        // One resolution per conflict is a construction invariant; a gap
        // here is a defect, not a runtime condition.
        debug_assert_eq!(resolutions.len(), conflicts.len());
        resolutions
    }

    fn resolve(
        &self,
        conflict: &Conflict,
        strategy: ResolutionStrategy,
        context: &EnrichedContext,
    ) -> ConflictResolution {
        let resolved_guardrails: Vec<Guardrail> = conflict
            .pairs
            .iter()
            .map(|pair| resolve_pair(pair, strategy))
            .collect();

        tracing::debug!(
            participants = ?conflict.participants,
            strategy = %strategy,
            resolved = resolved_guardrails.len(),
            "conflict resolved"
        );

        ConflictResolution {
            conflict_description: conflict.description.clone(),
            participants: conflict.participants.clone(),
            approach: strategy,
            resolved_guardrails,
            rationale: rationale_for(conflict, strategy, context),
            tradeoffs: tradeoffs_for(conflict),
        }
    }
}

fn resolve_pair(pair: &ConflictingPair, strategy: ResolutionStrategy) -> Guardrail {
    match strategy {
        ResolutionStrategy::ConservativeSafety => {
            let winner = conservative_winner(&pair.first, &pair.second);
            finish_single(winner.clone(), pair, "severity-based", strategy)
        }
        ResolutionStrategy::ComplianceFocused => {
            if let Some(winner) = compliance_preference(&pair.first, &pair.second) {
                finish_single(winner.clone(), pair, "compliance-preference", strategy)
            } else {
                priority_or_merge(pair, strategy)
            }
        }
        ResolutionStrategy::BalancedPractical => priority_or_merge(pair, strategy),
    }
}

/// Higher severity wins; on a severity tie the type ranking higher in the
/// priority order wins.
fn conservative_winner<'a>(a: &'a Guardrail, b: &'a Guardrail) -> &'a Guardrail {
    match a.severity.cmp(&b.severity) {
        std::cmp::Ordering::Greater => a,
        std::cmp::Ordering::Less => b,
        std::cmp::Ordering::Equal => {
            if a.guardrail_type.rank() <= b.guardrail_type.rank() {
                a
            } else {
                b
            }
        }
    }
}

/// Compliance and oversight types win outright under the compliance-focused
/// strategy, regardless of severity.
fn compliance_preference<'a>(a: &'a Guardrail, b: &'a Guardrail) -> Option<&'a Guardrail> {
    let preferred = |t: &GuardrailType| {
        matches!(t, GuardrailType::Compliance | GuardrailType::HumanOversight)
    };
    match (preferred(&a.guardrail_type), preferred(&b.guardrail_type)) {
        (true, false) => Some(a),
        (false, true) => Some(b),
        (true, true) | (false, false) => None,
    }
}

fn priority_or_merge(pair: &ConflictingPair, strategy: ResolutionStrategy) -> Guardrail {
    let (a, b) = (&pair.first, &pair.second);
    match a.guardrail_type.priority().cmp(&b.guardrail_type.priority()) {
        std::cmp::Ordering::Greater => finish_single(a.clone(), pair, "priority-based", strategy),
        std::cmp::Ordering::Less => finish_single(b.clone(), pair, "priority-based", strategy),
        std::cmp::Ordering::Equal => merge_pair(pair, strategy),
    }
}

/// The single-winner path: winner's content, the pair's maximum severity,
/// a resolution note in the rationale, and a content-addressed id.
fn finish_single(
    mut winner: Guardrail,
    pair: &ConflictingPair,
    method: &str,
    strategy: ResolutionStrategy,
) -> Guardrail {
    winner.severity = winner.severity.max(pair.first.severity).max(pair.second.severity);
    winner.rationale = annotate(&winner.rationale, strategy, method);
    winner.id = GuardrailId::derive_resolved(&[&pair.first.id, &pair.second.id], method);
    winner
}

/// Equal-priority merge: higher severity, platform union, shallow-merged
/// configuration (larger value wins per key, second side wins otherwise),
/// concatenated monitoring deduplicated by `(metric, threshold)`.
fn merge_pair(pair: &ConflictingPair, strategy: ResolutionStrategy) -> Guardrail {
    let (a, b) = (&pair.first, &pair.second);
    let method = "merge";

    let mut platforms = a.implementation.platforms.clone();
    for platform in &b.implementation.platforms {
        if !platforms.contains(platform) {
            platforms.push(platform.clone());
        }
    }
    if platforms.iter().any(|p| p == "all") {
        platforms = vec!["all".to_string()];
    }

    let mut configuration: IndexMap<String, serde_json::Value> =
        a.implementation.configuration.clone();
    for (key, value) in &b.implementation.configuration {
        match configuration.get(key) {
            Some(existing) => {
                let keep_larger = match (existing.as_f64(), value.as_f64()) {
                    (Some(x), Some(y)) => y > x,
                    _ => true,
                };
                if keep_larger {
                    configuration.insert(key.clone(), value.clone());
                }
            }
            None => {
                configuration.insert(key.clone(), value.clone());
            }
        }
    }

    let mut monitoring: Vec<MonitoringRequirement> = a.implementation.monitoring.clone();
    for entry in &b.implementation.monitoring {
        if !monitoring.iter().any(|m| m.key() == entry.key()) {
            monitoring.push(entry.clone());
        }
    }

    let mut merged = Guardrail {
        id: GuardrailId::derive_resolved(&[&a.id, &b.id], method),
        guardrail_type: a.guardrail_type.clone(),
        severity: a.severity.max(b.severity),
        rule: format!("{}_AND_{}", a.rule, b.rule),
        description: format!("Merged: {} + {}", a.description, b.description),
        rationale: String::new(),
        implementation: warden_guardrail::GuardrailImplementation {
            platforms,
            configuration,
            monitoring,
        },
    };
    merged.rationale = annotate("combined equal-priority requirements", strategy, method);
    merged
}

fn annotate(rationale: &str, strategy: ResolutionStrategy, method: &str) -> String {
    if rationale.is_empty() {
        format!("[resolved via {strategy}: {method}]")
    } else {
        format!("{rationale} [resolved via {strategy}: {method}]")
    }
}

fn rationale_for(
    conflict: &Conflict,
    strategy: ResolutionStrategy,
    context: &EnrichedContext,
) -> String {
    format!(
        "resolved conflict between {} and {} with {} (criticality: {:?}, regulations: {})",
        conflict.participants[0],
        conflict.participants[1],
        strategy,
        context.assessment.business.system_criticality,
        if context.regulatory.applicable.is_empty() {
            "none".to_string()
        } else {
            context.regulatory.applicable.join(", ")
        }
    )
}

fn tradeoffs_for(conflict: &Conflict) -> Vec<String> {
    let mut tradeoffs = Vec::new();
    if conflict.pairs.iter().any(|p| p.kind == ConflictKind::TradeoffConflict) {
        tradeoffs.push("prioritized safety over performance optimization".to_string());
    }
    if conflict.pairs.iter().any(|p| p.kind == ConflictKind::EfficiencyConflict) {
        tradeoffs.push("accepted reduced automation to preserve human oversight".to_string());
    }
    tradeoffs
}
