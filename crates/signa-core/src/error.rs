//! Error types for the SIGNA engine
//!
//! Absence is not an error: "no hand in frame" and "dataset is empty" are
//! ordinary outcomes modeled as `None`, so callers can never mistake an
//! empty training set for a failed write.

use thiserror::Error;

/// Core SIGNA errors
#[derive(Error, Debug)]
pub enum SignaError {
    // Input errors
    #[error("Landmark frame is empty")]
    EmptyLandmarks,

    #[error("Neighbor count must be at least 1, got {0}")]
    InvalidNeighborCount(usize),

    #[error("Gesture label must not be empty")]
    EmptyLabel,

    // Capture errors
    #[error("No hand in view to capture")]
    NoHandInView,

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Import errors
    #[error("Malformed import payload: {0}")]
    MalformedImport(String),
}

/// Result type for SIGNA operations
pub type SignaResult<T> = Result<T, SignaError>;
