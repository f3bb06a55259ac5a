//! Clarity scoring.
//!
//! [`ClarityScorer`] asks the (stronger) scoring model for a 0–100 confusion score and a
//! one-line justification. Double negatives are explicitly excluded as a confusion
//! signal. Scores above [`CLARITY_THRESHOLD`](crate::constants::CLARITY_THRESHOLD) send
//! the question into the remediation loop.

pub mod scorer;
pub mod types;


pub use scorer::{ClarityScorer, parse_assessment};
pub use types::ClarityAssessment;
