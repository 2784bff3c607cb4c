//! Synthesized guardrail tiers

use crate::guardrail::{Guardrail, GuardrailKey};
use serde::{Deserialize, Serialize};

/// The four synthesis tiers, computed independently and deduplicated on
/// `(type, rule)` across tiers in this order: critical, consensus, resolved,
/// contextual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedGuardrails {
    /// Every proposal guardrail with critical severity
    pub critical: Vec<Guardrail>,
    /// Guardrails agreed on by at least two independent sources
    pub consensus: Vec<Guardrail>,
    /// Conflict-resolver output
    pub resolved: Vec<Guardrail>,
    /// Template guardrails generated from context
    pub contextual: Vec<Guardrail>,
}

impl SynthesizedGuardrails {
    /// All tiers flattened in tier order, without deduplication.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &Guardrail> {
        self.critical
            .iter()
            .chain(&self.consensus)
            .chain(&self.resolved)
            .chain(&self.contextual)
    }

    /// Total rule count across tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.critical.len() + self.consensus.len() + self.resolved.len() + self.contextual.len()
    }

    /// Whether every tier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any tier contains the `(type, rule)` key.
    #[must_use]
    pub fn contains_key(&self, key: &GuardrailKey) -> bool {
        self.iter().any(|g| &g.key() == key)
    }
}
