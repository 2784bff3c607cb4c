//! Proposal aggregation
//!
//! Fan-out one task per registered specialist plus one per reasoning stance,
//! all reading the same immutable context. The join is a full barrier; later
//! phases never see partial results. Tasks are isolated: a failing or
//! timed-out task fills its slot with a degraded proposal and never cancels
//! siblings.

use crate::config::EngineConfig;
use std::sync::Arc;
use tokio::task::JoinSet;
use warden_assessment::EnrichedContext;
use warden_guardrail::AgentProposal;
use warden_reasoning::{parse_perspective, to_proposal, PerspectiveClient, Stance};
use warden_specialists::SpecialistRegistry;

/// Runs the fan-out/fan-in stage.
pub struct ProposalAggregator {
    registry: Arc<SpecialistRegistry>,
    client: Arc<dyn PerspectiveClient>,
}

impl ProposalAggregator {
    /// Aggregator over a specialist registry and a reasoning transport.
    #[must_use]
    pub fn new(registry: Arc<SpecialistRegistry>, client: Arc<dyn PerspectiveClient>) -> Self {
        ProposalAggregator { registry, client }
    }

    /// Gather every proposal. Returns one proposal per specialist plus one
    /// per stance, sorted by source name. Never fails.
    pub async fn gather(
        &self,
        context: &Arc<EnrichedContext>,
        config: &EngineConfig,
    ) -> Vec<AgentProposal> {
        let deadline = config.task_deadline;
        let mut tasks: JoinSet<AgentProposal> = JoinSet::new();

        for specialist in self.registry.all() {
            let context = Arc::clone(context);
            let name = specialist.name();
            tasks.spawn(async move {
                let run = tokio::time::timeout(deadline, async {
                    SpecialistRegistry::run(&specialist, &context)
                });
                match run.await {
                    Ok(proposal) => proposal,
                    Err(_) => AgentProposal::degraded(name, "task deadline exceeded"),
                }
            });
        }

        for stance in Stance::ALL {
            let context = Arc::clone(context);
            let client = Arc::clone(&self.client);
            tasks.spawn(async move {
                let call = tokio::time::timeout(deadline, client.call(&context, stance)).await;
                match call {
                    Ok(Ok(text)) => {
                        let (response, outcome) = parse_perspective(&text);
                        to_proposal(stance, &response, outcome)
                    }
                    Ok(Err(err)) => {
                        tracing::warn!(stance = %stance, error = %err, "stance degraded");
                        AgentProposal::degraded(stance.label(), err)
                    }
                    Err(_) => {
                        tracing::warn!(stance = %stance, "stance deadline exceeded");
                        AgentProposal::degraded(stance.label(), "task deadline exceeded")
                    }
                }
            });
        }

        let mut proposals = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(proposal) => proposals.push(proposal),
                // Join errors would need a panic past the registry fence;
                // there is no source name left to attribute, so log and
                // drop the slot.
                Err(err) => tracing::error!(error = %err, "fan-out task lost"),
            }
        }

        proposals.sort_by(|a, b| a.source.cmp(&b.source));
        tracing::info!(
            total = proposals.len(),
            degraded = proposals.iter().filter(|p| p.is_degraded()).count(),
            "proposal gathering complete"
        );
        proposals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use warden_reasoning::{ReasoningError, UnavailableClient};
    use warden_specialists::Specialist;
    use warden_test_utils::{context_for, minimal_context, mission_critical_assessment};

    struct HealthyStance;

    #[async_trait]
    impl PerspectiveClient for HealthyStance {
        async fn call(&self, _: &EnrichedContext, _: Stance) -> Result<String, ReasoningError> {
            Ok(r#"{"critical": [{"type": "security", "severity": "critical",
                   "rule": "OUTPUT_VALIDATION", "description": "d", "rationale": "r"}],
                   "reasoning": "ok", "confidence": 0.9}"#
                .to_string())
        }
    }

    struct Panicker;

    impl Specialist for Panicker {
        fn name(&self) -> &'static str {
            "panicker"
        }

        fn analyze(&self, _: &EnrichedContext) -> AgentProposal {
            panic!("boom");
        }
    }

    #[tokio::test]
    async fn one_slot_per_specialist_and_stance() {
        let registry = Arc::new(SpecialistRegistry::with_defaults());
        let aggregator = ProposalAggregator::new(registry, Arc::new(HealthyStance));
        let context = Arc::new(context_for(mission_critical_assessment()));

        let proposals = aggregator.gather(&context, &EngineConfig::default()).await;
        assert_eq!(proposals.len(), 8 + 3);

        let sources: Vec<&str> = proposals.iter().map(|p| p.source.as_str()).collect();
        let mut sorted = sources.clone();
        sorted.sort_unstable();
        assert_eq!(sources, sorted);
    }

    #[tokio::test]
    async fn unreachable_reasoning_degrades_stances_only() {
        let registry = Arc::new(SpecialistRegistry::with_defaults());
        let aggregator = ProposalAggregator::new(registry, Arc::new(UnavailableClient));
        let context = Arc::new(context_for(mission_critical_assessment()));

        let proposals = aggregator.gather(&context, &EngineConfig::default()).await;
        let (stances, specialists): (Vec<_>, Vec<_>) = proposals
            .iter()
            .partition(|p| p.source.starts_with("reasoning:"));

        assert_eq!(stances.len(), 3);
        assert!(stances.iter().all(|p| p.is_degraded()));
        assert!(specialists.iter().any(|p| !p.guardrails.is_empty()));
    }

    #[tokio::test]
    async fn panicking_specialist_does_not_cancel_siblings() {
        let registry = SpecialistRegistry::with_defaults();
        registry.register(Arc::new(Panicker));
        let aggregator = ProposalAggregator::new(Arc::new(registry), Arc::new(HealthyStance));
        let context = Arc::new(minimal_context());

        let proposals = aggregator.gather(&context, &EngineConfig::default()).await;
        assert_eq!(proposals.len(), 9 + 3);

        let broken = proposals.iter().find(|p| p.source == "panicker").unwrap();
        assert!(broken.is_degraded());
        let healthy = proposals
            .iter()
            .find(|p| p.source == "reasoning:balanced_practical")
            .unwrap();
        assert!(!healthy.is_degraded());
    }

    #[tokio::test]
    async fn empty_registry_still_produces_three_stance_slots() {
        let aggregator =
            ProposalAggregator::new(Arc::new(SpecialistRegistry::new()), Arc::new(UnavailableClient));
        let context = Arc::new(minimal_context());

        let proposals = aggregator.gather(&context, &EngineConfig::default()).await;
        assert_eq!(proposals.len(), 3);
        assert!(proposals.iter().all(|p| p.is_degraded()));
    }
}
