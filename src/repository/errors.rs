//! # Repository Errors

use thiserror::Error;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository errors
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Expediente not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            RepositoryError::NotFound(_) => "EXP_NOT_FOUND",
            RepositoryError::Io(_) => "EXP_STORE_IO",
            RepositoryError::Serialization(_) => "EXP_STORE_CORRUPT",
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
