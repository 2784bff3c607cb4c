//! Warden Assessment - intake model and context analysis
//!
//! Turns a loosely-shaped intake record into the typed, enriched context the
//! synthesis pipeline consumes:
//! - Typed assessment model with constructor-time normalization
//! - Table-driven context graph over risk-relevant sections
//! - Six-dimension risk profiler and risk-priority tables
//! - Jurisdiction-driven regulatory classification
//! - Lifecycle/maturity analysis
//!
//! # Example
//!
//! ```rust
//! use warden_assessment::{Assessment, EnrichedContext, OrganizationPolicies};
//!
//! let assessment = Assessment::normalize(serde_json::json!({
//!     "use_case_id": "uc-docs",
//!     "business": {"system_criticality": "mission-critical"}
//! }))?;
//! let context = EnrichedContext::build(assessment, OrganizationPolicies::default());
//! assert_eq!(context.graph.nodes.len(), 7);
//! # Ok::<(), warden_assessment::AssessmentError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod context;
pub mod error;
pub mod graph;
pub mod model;
pub mod regulatory;
pub mod risk;
pub mod temporal;

// Re-exports for convenience
pub use context::{CrossCuttingConcern, EnrichedContext};
pub use error::AssessmentError;
pub use graph::{ContextGraph, ContextGraphBuilder, EdgeRelation, GraphEdge, GraphNode};
pub use model::{
    Assessment, BudgetProfile, BusinessProfile, DataProfile, EthicalProfile, FailureImpact,
    OrganizationPolicies, ProjectPhase, RiskItem, RiskRating, RiskSections, RoadmapProfile,
    Section, SystemCriticality, TechnicalProfile,
};
pub use regulatory::{EuRiskClass, RegulatoryClassifier, RegulatoryMapping, RegulatoryRequirement};
pub use risk::{RiskCategory, RiskDimensions, RiskLevel, RiskPriority, RiskProfile, RiskProfiler};
pub use temporal::{Maturity, MaturityProgression, TemporalAnalysis};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
