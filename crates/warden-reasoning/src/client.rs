//! Reasoning-service clients
//!
//! The service is an external collaborator reached over HTTP. Clients return
//! the raw response text; parsing and recovery belong to the pipeline, never
//! the transport.

use crate::error::ReasoningError;
use crate::retry::{CircuitBreaker, RetryPolicy};
use crate::stance::Stance;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use warden_assessment::EnrichedContext;

/// Transport to the reasoning service.
#[async_trait]
pub trait PerspectiveClient: Send + Sync {
    /// Request one stance's perspective on the context. Returns raw text
    /// that should, but may not, be JSON.
    async fn call(&self, context: &EnrichedContext, stance: Stance) -> Result<String, ReasoningError>;
}

/// Client for deployments with no reasoning service configured. Every call
/// fails and the pipeline degrades to specialist-only output.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClient;

#[async_trait]
impl PerspectiveClient for UnavailableClient {
    async fn call(&self, _context: &EnrichedContext, _stance: Stance) -> Result<String, ReasoningError> {
        Err(ReasoningError::Unavailable)
    }
}

/// HTTP transport to a reasoning-service endpoint.
#[derive(Debug, Clone)]
pub struct HttpPerspectiveClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPerspectiveClient {
    /// Client posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpPerspectiveClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Compact JSON projection of the context sent to the service.
    fn request_body(context: &EnrichedContext, stance: Stance) -> serde_json::Value {
        json!({
            "stance": stance.wire_name(),
            "use_case": {
                "id": context.assessment.use_case_id,
                "title": context.assessment.use_case_title,
            },
            "risk_profile": context.risk_profile,
            "regulatory": context.regulatory,
            "temporal": context.temporal,
            "technical": {
                "model_types": context.assessment.technical.model_types,
                "complexity": context.assessment.technical.complexity(),
            },
            "business": {
                "criticality": context.assessment.business.system_criticality,
                "user_categories": context.assessment.business.user_categories,
            },
            "policies": context.policies,
        })
    }
}

#[async_trait]
impl PerspectiveClient for HttpPerspectiveClient {
    async fn call(&self, context: &EnrichedContext, stance: Stance) -> Result<String, ReasoningError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&Self::request_body(context, stance))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReasoningError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Resilience wrapper: per-attempt timeout, bounded retry, and a circuit
/// breaker shared across stances.
pub struct ResilientClient<C> {
    inner: C,
    policy: RetryPolicy,
    attempt_timeout: Duration,
    breaker: CircuitBreaker,
}

impl<C: PerspectiveClient> ResilientClient<C> {
    /// Wrap a transport with the given resilience settings.
    #[must_use]
    pub fn new(
        inner: C,
        policy: RetryPolicy,
        attempt_timeout: Duration,
        breaker_threshold: u32,
        breaker_reset: Duration,
    ) -> Self {
        ResilientClient {
            inner,
            policy,
            attempt_timeout,
            breaker: CircuitBreaker::new(breaker_threshold, breaker_reset),
        }
    }
}

#[async_trait]
impl<C: PerspectiveClient> PerspectiveClient for ResilientClient<C> {
    async fn call(&self, context: &EnrichedContext, stance: Stance) -> Result<String, ReasoningError> {
        self.policy
            .run(|| async {
                self.breaker.check()?;
                let attempt = tokio::time::timeout(
                    self.attempt_timeout,
                    self.inner.call(context, stance),
                )
                .await
                .unwrap_or(Err(ReasoningError::Timeout(self.attempt_timeout)));

                match attempt {
                    Ok(text) => {
                        self.breaker.record_success();
                        Ok(text)
                    }
                    Err(err) => {
                        self.breaker.record_failure();
                        Err(err)
                    }
                }
            })
            .await
    }
}
