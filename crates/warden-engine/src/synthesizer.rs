//! Synthesis
//!
//! Four tiers computed independently, then one final deduplication pass
//! keyed on `(type, rule)` in tier order: critical, consensus, resolved,
//! contextual. The consensus representative is the instance from the
//! lexicographically smallest source name, which keeps tier content
//! independent of fan-out completion order.

use crate::templates;
use std::collections::{HashMap, HashSet};
use warden_assessment::EnrichedContext;
use warden_guardrail::{
    AgentProposal, ConflictResolution, Guardrail, GuardrailKey, Severity, SynthesizedGuardrails,
};

/// Sources agreeing on a `(type, rule)` key for it to reach consensus.
pub const CONSENSUS_SOURCES: usize = 2;

/// Four-tier synthesizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer;

impl Synthesizer {
    /// Create a synthesizer.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Merge proposals, resolutions, and context templates into the four
    /// tiers.
    #[must_use]
    pub fn synthesize(
        &self,
        proposals: &[AgentProposal],
        resolutions: &[ConflictResolution],
        context: &EnrichedContext,
    ) -> SynthesizedGuardrails {
        let tiers = SynthesizedGuardrails {
            critical: critical_tier(proposals),
            consensus: consensus_tier(proposals),
            resolved: resolutions
                .iter()
                .flat_map(|r| r.resolved_guardrails.iter().cloned())
                .collect(),
            contextual: templates::contextual_guardrails(context),
        };

        let tiers = dedup_across_tiers(tiers);
        tracing::info!(
            critical = tiers.critical.len(),
            consensus = tiers.consensus.len(),
            resolved = tiers.resolved.len(),
            contextual = tiers.contextual.len(),
            "synthesis complete"
        );
        tiers
    }
}

/// Every critical-severity proposal guardrail, first instance per key.
fn critical_tier(proposals: &[AgentProposal]) -> Vec<Guardrail> {
    let mut seen: HashSet<GuardrailKey> = HashSet::new();
    let mut tier = Vec::new();
    for proposal in proposals {
        for guardrail in &proposal.guardrails {
            if guardrail.severity == Severity::Critical && seen.insert(guardrail.key()) {
                tier.push(guardrail.clone());
            }
        }
    }
    tier
}

/// Keys proposed by at least [`CONSENSUS_SOURCES`] distinct sources. The
/// representative instance comes from the smallest source name.
fn consensus_tier(proposals: &[AgentProposal]) -> Vec<Guardrail> {
    struct Entry<'a> {
        representative: &'a Guardrail,
        source: &'a str,
        sources: HashSet<&'a str>,
    }

    let mut by_key: HashMap<GuardrailKey, Entry<'_>> = HashMap::new();
    let mut order: Vec<GuardrailKey> = Vec::new();

    for proposal in proposals {
        for guardrail in &proposal.guardrails {
            let key = guardrail.key();
            match by_key.entry(key.clone()) {
                std::collections::hash_map::Entry::Occupied(mut slot) => {
                    let entry = slot.get_mut();
                    entry.sources.insert(proposal.source.as_str());
                    if proposal.source.as_str() < entry.source {
                        entry.representative = guardrail;
                        entry.source = proposal.source.as_str();
                    }
                }
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(Entry {
                        representative: guardrail,
                        source: proposal.source.as_str(),
                        sources: HashSet::from([proposal.source.as_str()]),
                    });
                    order.push(key);
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let entry = &by_key[&key];
            (entry.sources.len() >= CONSENSUS_SOURCES).then(|| entry.representative.clone())
        })
        .collect()
}

/// Final pass: first occurrence of each `(type, rule)` key wins, scanning
/// tiers in order.
fn dedup_across_tiers(tiers: SynthesizedGuardrails) -> SynthesizedGuardrails {
    let mut seen: HashSet<GuardrailKey> = HashSet::new();
    let mut keep = |guardrails: Vec<Guardrail>| -> Vec<Guardrail> {
        guardrails
            .into_iter()
            .filter(|g| seen.insert(g.key()))
            .collect()
    };

    SynthesizedGuardrails {
        critical: keep(tiers.critical),
        consensus: keep(tiers.consensus),
        resolved: keep(tiers.resolved),
        contextual: keep(tiers.contextual),
    }
}
