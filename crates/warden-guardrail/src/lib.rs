//! Warden Guardrail - the guardrail data model
//!
//! Shared types flowing through the synthesis pipeline:
//! - [`Guardrail`] with content-addressed ids and `(type, rule)` dedup keys
//! - [`AgentProposal`] from specialists and reasoning stances
//! - [`Conflict`] / [`ConflictResolution`] between proposals
//! - [`SynthesizedGuardrails`] four-tier output
//! - [`ValidationReport`] and the terminal [`GuardrailsConfig`] artifact

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod conflict;
pub mod guardrail;
pub mod proposal;
pub mod report;
pub mod synthesis;

// Re-exports for convenience
pub use config::{
    ConfidenceScore, DeploymentPlan, GuardrailsConfig, ImplementationConfig, Platform,
    ReasoningTrace, ResolvedConflictNote, RollbackPlan, RuleTiers, RunMetadata,
    SourceContribution,
};
pub use conflict::{
    Conflict, ConflictKind, ConflictResolution, ConflictingPair, ResolutionStrategy,
};
pub use guardrail::{
    Guardrail, GuardrailId, GuardrailImplementation, GuardrailKey, GuardrailType,
    MonitoringRequirement, Severity,
};
pub use proposal::AgentProposal;
pub use report::{CoverageReport, IssueCategory, IssueKind, ValidationIssue, ValidationReport};
pub use synthesis::SynthesizedGuardrails;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
