//! Dataset loading errors.

use explorer_common::ExplorerError;
use thiserror::Error;

/// Errors raised while reading or validating the dataset.
///
/// All of these are fatal: the service refuses to start on a bad dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Duplicate location id: {0}")]
    DuplicateLocation(String),

    #[error("Expected {expected} {what}, found {found}")]
    WrongCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Taxa for community {community} are not in non-increasing weight order at entry {entry}")]
    UnsortedTaxa { community: usize, entry: usize },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl From<ExplorerError> for LoadError {
    fn from(err: ExplorerError) -> Self {
        match err {
            ExplorerError::DatasetLoad(msg) => LoadError::InvalidRecord(msg),
            other => LoadError::InvalidRecord(other.to_string()),
        }
    }
}

impl From<LoadError> for ExplorerError {
    fn from(err: LoadError) -> Self {
        ExplorerError::DatasetLoad(err.to_string())
    }
}
