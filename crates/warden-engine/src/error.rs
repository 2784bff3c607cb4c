//! Engine error types
//!
//! Only context building can abort a run. Every later phase degrades:
//! failed sources become degraded proposals, unparseable reasoning output
//! becomes the empty skeleton, and validation findings are reported, not
//! thrown. A missing conflict resolution is a construction defect, guarded
//! by an internal invariant rather than modeled as a runtime error.

use warden_assessment::AssessmentError;

/// Fatal pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The assessment could not be normalized into a usable context
    #[error("context build failed: {0}")]
    ContextBuild(#[from] AssessmentError),

    /// Illegal phase transition (internal defect)
    #[error("phase error: {0}")]
    Phase(#[from] crate::phase::PhaseError),
}
