//! Error types for the extraction pipeline

use std::fmt;
use thiserror::Error;
use wwallet_ocr::OcrError;

/// Errors that can occur during extraction and policy lookup.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Text extraction boundary failure.
    #[error(transparent)]
    Ocr(#[from] OcrError),

    /// Completion provider failure, tagged with the phase it occurred in.
    #[error("completion failed while {phase}: {message}")]
    Completion {
        /// Protocol phase the failure occurred in.
        phase: Phase,
        /// Provider-reported failure.
        message: String,
    },

    /// Web-search grounding failure.
    #[error("search failed: {0}")]
    Search(String),

    /// Model output did not match the target JSON shape.
    ///
    /// Surfaced as-is; the pipeline never substitutes defaults for
    /// malformed model output.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A completion call exceeded the configured deadline.
    #[error("extraction timed out")]
    Timeout,

    /// Caller-supplied input cannot form a valid request.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Stage of the two-call lookup protocol.
///
/// The protocol transitions from `Searching` to `Structuring` only on a
/// successful grounded completion; single-call flows run entirely in
/// `Structuring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Phase 1: gathering web-grounded free text.
    Searching,

    /// Phase 2: structuring text into the target JSON shape.
    Structuring,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Searching => write!(f, "searching"),
            Phase::Structuring => write!(f, "structuring"),
        }
    }
}
