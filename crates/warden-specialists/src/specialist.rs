//! Specialist contract and registry
//!
//! A specialist is a pure analyzer from enriched context to a proposal.
//! The contract is total: a specialist never errors out of the pipeline.
//! The registry additionally fences panics, collapsing them into degraded
//! proposals so one bad analyzer cannot take down a run.

use dashmap::DashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use warden_assessment::EnrichedContext;
use warden_guardrail::AgentProposal;

/// A pure, registry-managed guardrail analyzer.
///
/// Implementations must be side-effect-free and independent of execution
/// order: two specialists must produce the same proposals no matter which
/// runs first. On internal failure, return [`AgentProposal::degraded`]
/// instead of panicking.
pub trait Specialist: Send + Sync {
    /// Stable source name recorded on every proposal.
    fn name(&self) -> &'static str;

    /// Analyze the context and propose candidate guardrails.
    fn analyze(&self, context: &EnrichedContext) -> AgentProposal;
}

/// Registry of active specialists.
#[derive(Default)]
pub struct SpecialistRegistry {
    specialists: DashMap<&'static str, Arc<dyn Specialist>>,
}

impl SpecialistRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the full built-in specialist set.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(crate::risk_analyst::RiskAnalyst));
        registry.register(Arc::new(crate::compliance::ComplianceExpert));
        registry.register(Arc::new(crate::ethics::EthicsAdvisor));
        registry.register(Arc::new(crate::security::SecurityArchitect));
        registry.register(Arc::new(crate::performance::PerformanceSpecialist));
        registry.register(Arc::new(crate::cost::CostOptimizer));
        registry.register(Arc::new(crate::data_governance::DataGovernanceSpecialist));
        registry.register(Arc::new(crate::business::BusinessStrategist));
        registry
    }

    /// Register a specialist. Later registrations replace earlier ones with
    /// the same name.
    pub fn register(&self, specialist: Arc<dyn Specialist>) {
        self.specialists.insert(specialist.name(), specialist);
    }

    /// Number of registered specialists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }

    /// Registered specialists sorted by name, so fan-out order is stable.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<dyn Specialist>> {
        let mut all: Vec<Arc<dyn Specialist>> = self
            .specialists
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        all.sort_by_key(|s| s.name());
        all
    }

    /// Run one specialist with a panic fence. A panicking specialist yields
    /// its degraded proposal; siblings are unaffected.
    #[must_use]
    pub fn run(specialist: &Arc<dyn Specialist>, context: &EnrichedContext) -> AgentProposal {
        let name = specialist.name();
        match catch_unwind(AssertUnwindSafe(|| specialist.analyze(context))) {
            Ok(proposal) => {
                tracing::debug!(
                    specialist = name,
                    guardrails = proposal.guardrails.len(),
                    confidence = proposal.confidence,
                    "specialist proposal received"
                );
                proposal
            }
            Err(_) => {
                tracing::warn!(specialist = name, "specialist panicked, degrading");
                AgentProposal::degraded(name, "specialist panicked")
            }
        }
    }
}

impl std::fmt::Debug for SpecialistRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.all().iter().map(|s| s.name()).collect();
        f.debug_struct("SpecialistRegistry")
            .field("specialists", &names)
            .finish()
    }
}

/// Confidence helper shared by the built-in specialists: a base score plus
/// a fixed bonus per satisfied signal, capped at 95.
#[must_use]
pub(crate) fn confidence(base: f64, satisfied_signals: usize) -> f64 {
    (base + 10.0 * satisfied_signals as f64).min(95.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::minimal_context;

    struct Panicker;

    impl Specialist for Panicker {
        fn name(&self) -> &'static str {
            "panicker"
        }

        fn analyze(&self, _context: &EnrichedContext) -> AgentProposal {
            panic!("broken analyzer");
        }
    }

    #[test]
    fn defaults_register_eight_specialists() {
        let registry = SpecialistRegistry::with_defaults();
        assert_eq!(registry.len(), 8);

        let names: Vec<&str> = registry.all().iter().map(|s| s.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn panicking_specialist_degrades() {
        let specialist: Arc<dyn Specialist> = Arc::new(Panicker);
        let proposal = SpecialistRegistry::run(&specialist, &minimal_context());

        assert!(proposal.is_degraded());
        assert_eq!(proposal.source, "panicker");
    }

    #[test]
    fn re_registration_replaces() {
        let registry = SpecialistRegistry::new();
        registry.register(Arc::new(Panicker));
        registry.register(Arc::new(Panicker));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn confidence_caps_at_95() {
        assert!((confidence(60.0, 2) - 80.0).abs() < f64::EPSILON);
        assert!((confidence(60.0, 10) - 95.0).abs() < f64::EPSILON);
    }
}
