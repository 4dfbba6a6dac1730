//! CLI-specific error types
//!
//! Every failure surfaces as `{CODE}: {message}` and a non-zero exit.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::query::RequestError;
use crate::repository::RepositoryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Store file already exists
    AlreadyInitialized,
    /// Store file missing
    NotInitialized,
    /// Malformed stdin payload
    InvalidRequest,
    /// Unknown record id
    NotFound,
    /// Store read or write failed
    StoreError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "EXP_CLI_CONFIG_ERROR",
            Self::IoError => "EXP_CLI_IO_ERROR",
            Self::AlreadyInitialized => "EXP_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "EXP_CLI_NOT_INITIALIZED",
            Self::InvalidRequest => "EXP_CLI_INVALID_REQUEST",
            Self::NotFound => "EXP_NOT_FOUND",
            Self::StoreError => "EXP_CLI_STORE_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Store already exists
    pub fn already_initialized() -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            "Store already initialized",
        )
    }

    /// Store missing
    pub fn not_initialized() -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            "Store not initialized. Run 'expedientes init' first.",
        )
    }

    /// Malformed request payload
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRequest, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_request(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<RequestError> for CliError {
    fn from(e: RequestError) -> Self {
        Self::invalid_request(e.to_string())
    }
}

impl From<RepositoryError> for CliError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(id) => {
                Self::new(CliErrorCode::NotFound, format!("Expediente '{}' not found", id))
            }
            other => Self::new(CliErrorCode::StoreError, other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mapping() {
        let err: CliError = RepositoryError::NotFound("abc".into()).into();
        assert_eq!(err.code(), &CliErrorCode::NotFound);
        assert!(err.message().contains("abc"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = CliError::not_initialized();
        assert!(err.to_string().starts_with("EXP_CLI_NOT_INITIALIZED: "));
    }
}
