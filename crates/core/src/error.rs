//! Error types for the Packed domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Packed operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Backend errors ---
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    // --- Submission pipeline ---
    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    // --- Validation ---
    #[error("Invalid quantity {value}: must be between {min} and {max}")]
    InvalidQuantity { value: u32, min: u32, max: u32 },

    #[error("Invalid trip: {0}")]
    InvalidTrip(String),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures talking to the packing-list backend or the suggestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("API request failed: {message} (status: {status_code})")]
    Status { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The HTTP status code behind this error, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status_code, .. } => Some(*status_code),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }
}

/// Failures that abort the submission pipeline before any items are attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Failed to create packing list: {0}")]
    CreateFailed(ApiError),

    #[error("Packing list was created but the response carried no id")]
    MissingListId,
}
