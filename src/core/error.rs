//! Typed error handling for the dashboard data layer
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed, missing, or out-of-enumeration form
//!   input, raised before any store call
//! - [`StorageError`]: a store call failed or returned no matching row;
//!   carries a fixed, backend-agnostic message with the underlying
//!   [`StoreError`] attached as its source
//! - [`AuthError`]: credential sign-in failed
//! - [`ConfigError`]: configuration parsing and loading
//!
//! Validation errors are never caught inside actions; they surface to the
//! caller, which renders them as form errors. Storage errors are always
//! caught at the query/action layer, logged with context, and re-raised in
//! wrapped form. The wrapped form keeps the original detail reachable via
//! [`std::error::Error::source`] rather than swallowing it.

use crate::core::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for dashboard actions and queries
#[derive(Debug)]
pub enum Error {
    /// Form input validation errors
    Validation(ValidationError),

    /// Store call failures, wrapped with a fixed operation message
    Storage(StorageError),

    /// Credential sign-in failures
    Auth(AuthError),

    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "{}", e),
            Error::Storage(e) => write!(f, "{}", e),
            Error::Auth(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(e) => Some(e),
            Error::Storage(e) => Some(e),
            Error::Auth(e) => Some(e),
            Error::Config(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Storage(e) => e.status_code(),
            Error::Auth(_) => StatusCode::UNAUTHORIZED,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Storage(e) => e.error_code(),
            Error::Auth(e) => e.error_code(),
            Error::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            Error::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({
                    "fields": [{ "field": field, "message": message }]
                }))
            }
            Error::Storage(e) => Some(serde_json::json!({
                "cause": e.store_error().to_string()
            })),
            _ => None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to form input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// A store call failure as seen by callers
///
/// Carries a fixed, backend-agnostic operation message ("Failed to create
/// invoice.", ...) and keeps the underlying [`StoreError`] reachable as the
/// error source. The original backend detail is never swallowed and never
/// propagated raw on its own.
#[derive(Debug)]
pub struct StorageError {
    message: &'static str,
    source: StoreError,
}

impl StorageError {
    pub fn new(message: &'static str, source: StoreError) -> Self {
        Self { message, source }
    }

    /// The fixed, user-facing operation message
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// The underlying store failure
    pub fn store_error(&self) -> &StoreError {
        &self.source
    }

    pub fn status_code(&self) -> StatusCode {
        match self.source {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self.source {
            StoreError::NotFound { .. } => "NOT_FOUND",
            _ => "STORAGE_ERROR",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Storage(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to credential sign-in
#[derive(Debug)]
pub enum AuthError {
    /// The supplied credentials did not match any user
    InvalidCredentials,

    /// Sign-in failed for some other, unspecified reason
    Other { message: String },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::Other { message } => write!(f, "Authentication failed: {}", message),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Other { .. } => "AUTH_ERROR",
        }
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Error::Auth(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for dashboard operations
pub type DashResult<T> = Result<T, Error>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_lists_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "amount".to_string(),
                message: "must be a number".to_string(),
            },
            FieldValidationError {
                field: "status".to_string(),
                message: "must be 'pending' or 'paid'".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("amount"));
        assert!(display.contains("status"));
    }

    #[test]
    fn validation_error_maps_to_bad_request() {
        let err: Error = ValidationError::FieldError {
            field: "customer_id".to_string(),
            message: "required".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn storage_error_displays_fixed_message_only() {
        let err = StorageError::new(
            "Failed to create invoice.",
            StoreError::Query {
                backend: "memory".to_string(),
                message: "disk full".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Failed to create invoice.");
    }

    #[test]
    fn storage_error_keeps_backend_detail_as_source() {
        use std::error::Error as _;

        let err = StorageError::new(
            "Failed to fetch invoices.",
            StoreError::Query {
                backend: "memory".to_string(),
                message: "connection reset".to_string(),
            },
        );
        let source = err.source().expect("source must be attached");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn missing_row_maps_to_not_found() {
        let err: Error = StorageError::new(
            "Failed to fetch invoice.",
            StoreError::NotFound {
                what: "invoice".to_string(),
            },
        )
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn auth_error_maps_to_unauthorized() {
        let err: Error = AuthError::InvalidCredentials.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn error_response_carries_cause_detail() {
        let err: Error = StorageError::new(
            "Failed to fetch revenue data.",
            StoreError::Query {
                backend: "memory".to_string(),
                message: "timeout".to_string(),
            },
        )
        .into();
        let response = err.to_response();
        assert_eq!(response.code, "STORAGE_ERROR");
        assert_eq!(response.message, "Failed to fetch revenue data.");
        let details = response.details.expect("details must be present");
        assert!(details["cause"].as_str().unwrap().contains("timeout"));
    }
}
