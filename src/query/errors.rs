//! Request error types
//!
//! Error codes:
//! - EXP_QUERY_INVALID (REJECT)
//! - EXP_SORT_FIELD_UNKNOWN (REJECT)
//! - EXP_SORT_DIRECTION_UNKNOWN (REJECT)

use std::fmt;

/// Request-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorCode {
    /// Request is not a JSON object
    ExpQueryInvalid,
    /// Sort field name does not map to a sortable field
    ExpSortFieldUnknown,
    /// Sort direction is neither asc nor desc
    ExpSortDirectionUnknown,
}

impl RequestErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RequestErrorCode::ExpQueryInvalid => "EXP_QUERY_INVALID",
            RequestErrorCode::ExpSortFieldUnknown => "EXP_SORT_FIELD_UNKNOWN",
            RequestErrorCode::ExpSortDirectionUnknown => "EXP_SORT_DIRECTION_UNKNOWN",
        }
    }
}

impl fmt::Display for RequestErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Request error with field context
#[derive(Debug, Clone)]
pub struct RequestError {
    code: RequestErrorCode,
    message: String,
    field: Option<String>,
}

impl RequestError {
    /// Create a query invalid error
    pub fn query_invalid(reason: impl Into<String>) -> Self {
        Self {
            code: RequestErrorCode::ExpQueryInvalid,
            message: reason.into(),
            field: None,
        }
    }

    /// Create an unknown sort field error
    pub fn unknown_sort_field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: RequestErrorCode::ExpSortFieldUnknown,
            message: format!("Field '{}' is not sortable", name),
            field: Some(name),
        }
    }

    /// Create an unknown sort direction error
    pub fn unknown_sort_direction(direction: impl Into<String>) -> Self {
        Self {
            code: RequestErrorCode::ExpSortDirectionUnknown,
            message: format!(
                "Sort direction '{}' must be 'asc' or 'desc'",
                direction.into()
            ),
            field: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> RequestErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REJECT] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for RequestError {}

/// Result type for request parsing
pub type RequestResult<T> = Result<T, RequestError>;
