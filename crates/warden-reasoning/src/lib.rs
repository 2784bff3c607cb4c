//! Warden Reasoning - the external reasoning-service boundary
//!
//! The reasoning service is an untrusted collaborator: it is asked for three
//! fixed perspectives (stances) on a run's context and answers with text
//! that should be JSON but often is not. This crate owns:
//! - the [`Stance`] set and [`PerspectiveClient`] transport trait
//! - a resilient transport wrapper (timeout, retry, circuit breaker)
//! - the three-tier recovery parser that never fails the pipeline

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod client;
pub mod error;
pub mod parser;
pub mod retry;
pub mod stance;

// Re-exports for convenience
pub use client::{HttpPerspectiveClient, PerspectiveClient, ResilientClient, UnavailableClient};
pub use error::ReasoningError;
pub use parser::{parse_perspective, to_proposal, ParseOutcome, PerspectiveResponse, RawGuardrail};
pub use retry::{CircuitBreaker, RetryPolicy};
pub use stance::Stance;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
