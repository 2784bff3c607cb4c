//! Warden Engine - the guardrail synthesis pipeline
//!
//! Walks one assessment through a fixed phase sequence:
//! context analysis -> proposal gathering -> conflict detection ->
//! conflict resolution -> synthesis -> validation -> config build.
//!
//! Concurrency exists only inside proposal gathering (one task per
//! specialist plus one per reasoning stance, joined at a barrier). Every
//! phase after context analysis degrades instead of failing, so a run
//! always terminates with a structurally valid [`GuardrailsConfig`].
//!
//! # Example
//!
//! ```rust
//! use warden_engine::{EngineConfig, GuardrailEngine};
//! use warden_assessment::OrganizationPolicies;
//!
//! # async fn example() -> Result<(), warden_engine::EngineError> {
//! let engine = GuardrailEngine::new(EngineConfig::new());
//! let artifact = engine
//!     .generate(
//!         serde_json::json!({"use_case_id": "uc-1"}),
//!         OrganizationPolicies::default(),
//!     )
//!     .await?;
//! assert!(artifact.validation.score <= 100);
//! # Ok(())
//! # }
//! ```
//!
//! [`GuardrailsConfig`]: warden_guardrail::GuardrailsConfig

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod aggregator;
pub mod config;
pub mod config_build;
pub mod confidence;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod phase;
pub mod resolver;
pub mod synthesizer;
pub mod templates;
pub mod trace;
pub mod validator;

// Re-exports for convenience
pub use aggregator::ProposalAggregator;
pub use config::EngineConfig;
pub use config_build::ImplementationConfigBuilder;
pub use confidence::ConfidenceScorer;
pub use conflict::{aggregate_conflict_severity, ConflictDetector, CONFIG_DIVERGENCE_RATIO};
pub use engine::GuardrailEngine;
pub use error::EngineError;
pub use phase::{allowed_transitions, validate_transition, Phase, PhaseError, PhaseTracker};
pub use resolver::ConflictResolver;
pub use synthesizer::{Synthesizer, CONSENSUS_SOURCES};
pub use validator::Validator;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
