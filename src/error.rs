//! Error types for QuickPick
//!
//! One real failure domain exists: fetching the dataset. Everything else
//! degrades to an empty or stale view rather than tearing the widget down.

use thiserror::Error;

/// Main error type for QuickPick operations
#[derive(Error, Debug)]
pub enum QuickPickError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Endpoint returned status {status}: {body}")]
    EndpointStatus { status: u16, body: String },

    #[error("Malformed payload from endpoint: {0}")]
    MalformedPayload(String),

    #[error("Dataset generation failed: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for QuickPick operations
pub type Result<T> = std::result::Result<T, QuickPickError>;

impl QuickPickError {
    /// True for failures the widget absorbs by keeping its current dataset
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuickPickError::Fetch(_)
                | QuickPickError::EndpointStatus { .. }
                | QuickPickError::MalformedPayload(_)
        )
    }
}
