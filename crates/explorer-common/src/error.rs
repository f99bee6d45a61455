//! Error types for the community explorer.

use thiserror::Error;

use crate::COMMUNITY_COUNT;

/// Result type alias using ExplorerError.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Primary error type for explorer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExplorerError {
    // === Lookup Errors ===
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Community index {0} is outside 0..{max}", max = COMMUNITY_COUNT)]
    OutOfRange(i64),

    #[error("No location is hovered")]
    MissingSelection,

    // === Dataset Errors ===
    #[error("Failed to load dataset: {0}")]
    DatasetLoad(String),

    // === Wiring Errors ===
    #[error("Output registered twice: {0}")]
    DuplicateOutput(String),

    #[error("Output not registered: {0}")]
    UnknownOutput(String),

    // === Transport Errors ===
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid input event: {0}")]
    InvalidEvent(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ExplorerError {
    /// Short machine-readable kind, used as a metrics label and in panel failures.
    pub fn kind(&self) -> &'static str {
        match self {
            ExplorerError::NotFound(_) => "not_found",
            ExplorerError::OutOfRange(_) => "out_of_range",
            ExplorerError::MissingSelection => "missing_selection",
            ExplorerError::DatasetLoad(_) => "dataset_load",
            ExplorerError::DuplicateOutput(_) => "duplicate_output",
            ExplorerError::UnknownOutput(_) => "unknown_output",
            ExplorerError::SessionNotFound(_) => "session_not_found",
            ExplorerError::InvalidEvent(_) => "invalid_event",
            ExplorerError::InternalError(_) => "internal",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ExplorerError::OutOfRange(_) | ExplorerError::InvalidEvent(_) => 400,

            ExplorerError::NotFound(_)
            | ExplorerError::SessionNotFound(_)
            | ExplorerError::UnknownOutput(_) => 404,

            ExplorerError::MissingSelection => 409,

            _ => 500,
        }
    }

    /// Whether this error comes from the selection a panel was asked to show.
    ///
    /// Anything else raised during a derivation is a wiring or internal defect.
    pub fn is_panel_local(&self) -> bool {
        matches!(
            self,
            ExplorerError::NotFound(_)
                | ExplorerError::OutOfRange(_)
                | ExplorerError::MissingSelection
        )
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ExplorerError::InvalidEvent(format!("JSON error: {}", err))
    }
}
