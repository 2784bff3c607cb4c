//! The guardrail engine
//!
//! One facade per deployment: owns the specialist registry, the reasoning
//! transport, and the result cache, and walks each run through the phase
//! machine. Fatal errors exist only before context analysis completes;
//! every later failure degrades and the run still terminates with a
//! structurally valid artifact.

use crate::aggregator::ProposalAggregator;
use crate::config::EngineConfig;
use crate::config_build::ImplementationConfigBuilder;
use crate::confidence::ConfidenceScorer;
use crate::conflict::ConflictDetector;
use crate::error::EngineError;
use crate::phase::{Phase, PhaseTracker};
use crate::resolver::ConflictResolver;
use crate::synthesizer::Synthesizer;
use crate::trace::build_trace;
use crate::validator::Validator;
use chrono::Utc;
use moka::future::Cache;
use std::sync::Arc;
use ulid::Ulid;
use warden_assessment::{Assessment, EnrichedContext, OrganizationPolicies};
use warden_guardrail::{GuardrailsConfig, RunMetadata};
use warden_reasoning::{
    HttpPerspectiveClient, PerspectiveClient, ResilientClient, UnavailableClient,
};
use warden_specialists::SpecialistRegistry;

/// Guardrail synthesis engine.
pub struct GuardrailEngine {
    aggregator: ProposalAggregator,
    config: EngineConfig,
    cache: Option<Cache<String, Arc<GuardrailsConfig>>>,
}

impl GuardrailEngine {
    /// Engine with the default specialists and no reasoning service; the
    /// three stances degrade and runs proceed specialist-only.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_client(config, Arc::new(UnavailableClient))
    }

    /// Engine with the default specialists and an explicit reasoning
    /// transport.
    #[must_use]
    pub fn with_client(config: EngineConfig, client: Arc<dyn PerspectiveClient>) -> Self {
        Self::with_parts(config, Arc::new(SpecialistRegistry::with_defaults()), client)
    }

    /// Engine reaching a reasoning service over HTTP, with retry, per-call
    /// timeout, and a circuit breaker from the configuration.
    #[must_use]
    pub fn with_http_endpoint(config: EngineConfig, endpoint: impl Into<String>) -> Self {
        let client = ResilientClient::new(
            HttpPerspectiveClient::new(endpoint),
            config.reasoning_retry,
            config.reasoning_timeout,
            config.breaker_threshold,
            config.breaker_reset,
        );
        Self::with_client(config, Arc::new(client))
    }

    /// Fully explicit construction.
    #[must_use]
    pub fn with_parts(
        config: EngineConfig,
        registry: Arc<SpecialistRegistry>,
        client: Arc<dyn PerspectiveClient>,
    ) -> Self {
        let cache = config.cache_enabled.then(|| {
            Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(config.cache_ttl)
                .build()
        });
        GuardrailEngine {
            aggregator: ProposalAggregator::new(registry, client),
            config,
            cache,
        }
    }

    /// Generate guardrails from an untyped intake record.
    ///
    /// # Errors
    /// Returns [`EngineError::ContextBuild`] when the record fails
    /// normalization; no other failure aborts the run.
    pub async fn generate(
        &self,
        intake: serde_json::Value,
        policies: OrganizationPolicies,
    ) -> Result<GuardrailsConfig, EngineError> {
        let mut tracker = PhaseTracker::new();
        let assessment = match Assessment::normalize(intake) {
            Ok(assessment) => assessment,
            Err(err) => {
                tracker.advance(Phase::Failed)?;
                tracing::error!(error = %err, "run failed before context analysis");
                return Err(err.into());
            }
        };
        self.generate_for(assessment, policies, tracker).await
    }

    /// Generate guardrails from an already-normalized assessment.
    ///
    /// # Errors
    /// Returns [`EngineError::Phase`] only on an internal sequencing defect.
    pub async fn generate_for_assessment(
        &self,
        assessment: Assessment,
        policies: OrganizationPolicies,
    ) -> Result<GuardrailsConfig, EngineError> {
        self.generate_for(assessment, policies, PhaseTracker::new())
            .await
    }

    async fn generate_for(
        &self,
        assessment: Assessment,
        policies: OrganizationPolicies,
        mut tracker: PhaseTracker,
    ) -> Result<GuardrailsConfig, EngineError> {
        let cache_key = cache_key(&assessment, &policies);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                tracing::info!(use_case = %assessment.use_case_id, "returning cached guardrails");
                return Ok((*cached).clone());
            }
        }

        let context = Arc::new(EnrichedContext::build(assessment, policies));

        tracker.advance(Phase::ProposalGathering)?;
        let proposals = self.aggregator.gather(&context, &self.config).await;

        tracker.advance(Phase::ConflictDetection)?;
        let conflicts = ConflictDetector::new().detect(&proposals);

        tracker.advance(Phase::ConflictResolution)?;
        let resolver = ConflictResolver::new();
        let strategy = resolver.strategy_for(&context);
        let resolutions = resolver.resolve_all(&conflicts, strategy, &context);
        if resolutions.len() != conflicts.len() {
            // By construction impossible; a gap here is a defect worth a
            // loud log rather than a recovery path.
            tracing::error!(
                conflicts = conflicts.len(),
                resolutions = resolutions.len(),
                "conflict resolution gap"
            );
        }

        tracker.advance(Phase::Synthesis)?;
        let tiers = Synthesizer::new().synthesize(&proposals, &resolutions, &context);

        tracker.advance(Phase::Validation)?;
        let validation = Validator::new().validate(&tiers, &context);
        if validation.score < self.config.min_validation_score {
            tracing::warn!(
                score = validation.score,
                min = self.config.min_validation_score,
                "validation score below configured minimum"
            );
        }

        tracker.advance(Phase::ConfigBuild)?;
        let scorer = ConfidenceScorer::new();
        let artifact = GuardrailsConfig {
            implementation: ImplementationConfigBuilder::new().build(&tiers, &context),
            reasoning: build_trace(&proposals, &resolutions),
            confidence: scorer.score(&proposals),
            validation,
            metadata: RunMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                run_id: Ulid::new(),
                sources: proposals.iter().map(|p| p.source.clone()).collect(),
                context_complexity: scorer.context_complexity(&context),
            },
        };

        tracker.advance(Phase::Done)?;
        tracing::info!(
            use_case = %context.assessment.use_case_id,
            rules = artifact.implementation.rules.len(),
            score = artifact.validation.score,
            confidence = artifact.confidence.overall,
            "guardrail run complete"
        );

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, Arc::new(artifact.clone())).await;
        }
        Ok(artifact)
    }
}

/// Cache key: content hash of the normalized assessment plus policies.
fn cache_key(assessment: &Assessment, policies: &OrganizationPolicies) -> String {
    let mut hasher = blake3::Hasher::new();
    if let Ok(bytes) = serde_json::to_vec(assessment) {
        hasher.update(&bytes);
    }
    if let Ok(bytes) = serde_json::to_vec(policies) {
        hasher.update(&bytes);
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> GuardrailEngine {
        GuardrailEngine::new(EngineConfig::new())
    }

    #[tokio::test]
    async fn malformed_input_is_the_only_fatal_error() {
        let err = engine()
            .generate(json!({}), OrganizationPolicies::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ContextBuild(_)));
    }

    #[tokio::test]
    async fn identical_input_is_served_from_cache() {
        let engine = engine();
        let intake = json!({"use_case_id": "uc-cache"});

        let first = engine
            .generate(intake.clone(), OrganizationPolicies::default())
            .await
            .unwrap();
        let second = engine
            .generate(intake, OrganizationPolicies::default())
            .await
            .unwrap();

        // Same run id proves the second artifact came from the cache.
        assert_eq!(first.metadata.run_id, second.metadata.run_id);
    }

    #[tokio::test]
    async fn cache_disabled_produces_fresh_runs() {
        let engine = GuardrailEngine::new(EngineConfig::new().with_cache(false));
        let intake = json!({"use_case_id": "uc-fresh"});

        let first = engine
            .generate(intake.clone(), OrganizationPolicies::default())
            .await
            .unwrap();
        let second = engine
            .generate(intake, OrganizationPolicies::default())
            .await
            .unwrap();

        assert_ne!(first.metadata.run_id, second.metadata.run_id);
        // Everything but run metadata is deterministic.
        assert_eq!(first.implementation, second.implementation);
        assert_eq!(first.validation, second.validation);
    }

    #[tokio::test]
    async fn policies_are_part_of_the_cache_key() {
        let engine = engine();
        let intake = json!({"use_case_id": "uc-pol"});

        let first = engine
            .generate(intake.clone(), OrganizationPolicies::default())
            .await
            .unwrap();
        let second = engine
            .generate(
                intake,
                OrganizationPolicies {
                    prohibited_uses: vec!["surveillance".to_string()],
                    ..OrganizationPolicies::default()
                },
            )
            .await
            .unwrap();

        assert_ne!(first.metadata.run_id, second.metadata.run_id);
    }
}
