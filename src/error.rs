//! Error types for the itinerary pipeline and its collaborators.

use thiserror::Error;

use crate::services::retry_policy::Retryable;

/// Failure reported by the text model, before any retry decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ModelError {
    pub status: Option<u16>,
    pub message: String,
}

impl ModelError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

const TRANSIENT_MARKERS: [&str; 5] = [
    "503",
    "429",
    "service unavailable",
    "too many requests",
    "rate limit",
];

impl Retryable for ModelError {
    fn is_retryable(&self) -> bool {
        if let Some(status) = self.status {
            if status == 503 || status == 429 {
                return true;
            }
        }
        let message = self.message.to_lowercase();
        TRANSIENT_MARKERS.iter().any(|marker| message.contains(marker))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct StoreError(pub String);

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("{0}")]
    Validation(String),

    #[error("AI service unavailable after retries: {0}")]
    TransientService(ModelError),

    #[error("AI service error: {0}")]
    FatalModel(ModelError),

    #[error("Invalid JSON response from AI: {reason}. Cleaned text: {cleaned}")]
    Parse { reason: String, cleaned: String },

    #[error("Failed to save itinerary: {0}")]
    Store(#[from] StoreError),
}

impl From<ModelError> for ItineraryError {
    fn from(err: ModelError) -> Self {
        if err.is_retryable() {
            ItineraryError::TransientService(err)
        } else {
            ItineraryError::FatalModel(err)
        }
    }
}
