//! Cross-cutting, fixed design constants.
//!
//! The clarity threshold, retry bound and gate thresholds are fixed and are not read
//! from the environment.

/// Scores at or below this value are considered clear.
pub const CLARITY_THRESHOLD: u8 = 20;

/// Maximum number of rephrase attempts per question.
pub const MAX_REPHRASE_ATTEMPTS: u32 = 6;

/// Generation temperature of the first rephrase attempt.
pub const BASE_REPHRASE_TEMPERATURE: f32 = 0.2;

/// Temperature added per rejected attempt.
pub const REPHRASE_TEMPERATURE_STEP: f32 = 0.1;

/// Temperature used for question extraction.
pub const EXTRACT_TEMPERATURE: f32 = 0.0;

/// Temperature used for clarity scoring.
pub const SCORE_TEMPERATURE: f32 = 0.2;

/// Minimum bi-encoder cosine similarity for a candidate to pass the coarse stage.
pub const BI_ENCODER_THRESHOLD: f32 = 0.80;

/// Minimum cross-encoder relevance for a candidate to pass the fine stage.
pub const CROSS_ENCODER_THRESHOLD: f32 = 0.75;

/// Largest accepted document, in bytes (10 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Justification reported when the scorer's response cannot be parsed.
pub const UNPARSABLE_JUSTIFICATION: &str = "Could not parse score.";

/// Output dimension of the MiniLM bi-encoder.
pub const BI_ENCODER_DIM: usize = 384;

/// Max tokens fed to either encoder.
pub const ENCODER_MAX_SEQ_LEN: usize = 512;

/// Returns the temperature for a zero-based rephrase attempt.
pub fn rephrase_temperature(attempt_index: u32) -> f32 {
    BASE_REPHRASE_TEMPERATURE + attempt_index as f32 * REPHRASE_TEMPERATURE_STEP
}
