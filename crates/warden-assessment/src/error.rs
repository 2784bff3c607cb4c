//! Error types for assessment intake and context building

/// Errors raised while normalizing an assessment or building context.
///
/// These are the only fatal errors in the pipeline: everything after
/// context analysis degrades instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    /// Input was not a structurally valid assessment record
    #[error("malformed assessment: {0}")]
    Malformed(String),

    /// The record has no usable use-case identifier
    #[error("assessment has no use_case_id")]
    MissingUseCaseId,
}
