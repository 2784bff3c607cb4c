//! Warden Specialists - pluggable guardrail analyzers
//!
//! Each specialist is a pure function from [`EnrichedContext`] to an
//! [`AgentProposal`]: side-effect-free, order-independent, and total. The
//! [`SpecialistRegistry`] manages the active set and fences panics into
//! degraded proposals.
//!
//! Built-in specialists:
//! - `risk` — aggregate risk posture and resilience rules
//! - `compliance` — regulatory obligations from the mapping
//! - `ethics` — bias, oversight, and harm safeguards
//! - `security` — injection defense and attack-surface controls
//! - `performance` — latency/availability/throughput SLAs
//! - `cost_optimization` — token budgets and spend ceilings
//! - `data_governance` — encryption, retention, residency, drift
//! - `business` — continuity, quality bars, capacity
//!
//! [`EnrichedContext`]: warden_assessment::EnrichedContext
//! [`AgentProposal`]: warden_guardrail::AgentProposal

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod business;
pub mod compliance;
pub mod cost;
pub mod data_governance;
pub mod ethics;
pub mod performance;
pub mod risk_analyst;
pub mod security;
pub mod specialist;

// Re-exports for convenience
pub use business::BusinessStrategist;
pub use compliance::ComplianceExpert;
pub use cost::CostOptimizer;
pub use data_governance::DataGovernanceSpecialist;
pub use ethics::EthicsAdvisor;
pub use performance::PerformanceSpecialist;
pub use risk_analyst::RiskAnalyst;
pub use security::SecurityArchitect;
pub use specialist::{Specialist, SpecialistRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use warden_test_utils::{context_for, mission_critical_assessment};

    #[test]
    fn all_defaults_produce_sane_proposals() {
        let context = context_for(mission_critical_assessment());
        let registry = SpecialistRegistry::with_defaults();

        for specialist in registry.all() {
            let proposal = SpecialistRegistry::run(&specialist, &context);
            assert_eq!(proposal.source, specialist.name());
            assert!((0.0..=100.0).contains(&proposal.confidence));
            for guardrail in &proposal.guardrails {
                assert!(!guardrail.rule.is_empty());
                assert!(!guardrail.implementation.platforms.is_empty());
            }
        }
    }

    #[test]
    fn specialists_are_order_independent() {
        let context = context_for(mission_critical_assessment());
        let registry = SpecialistRegistry::with_defaults();

        let forward: Vec<_> = registry
            .all()
            .iter()
            .map(|s| SpecialistRegistry::run(s, &context))
            .collect();
        let reverse: Vec<_> = registry
            .all()
            .iter()
            .rev()
            .map(|s| SpecialistRegistry::run(s, &context))
            .collect();

        for proposal in &forward {
            let twin = reverse.iter().find(|p| p.source == proposal.source).unwrap();
            assert_eq!(proposal, twin);
        }
    }
}
