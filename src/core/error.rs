//! Typed error handling for the roster service
//!
//! Query building fails fast with a [`QueryError`] before anything reaches the
//! database. Everything the HTTP layer can report is gathered in
//! [`RosterError`], which knows its status code and machine-readable code.
//!
//! # Example
//!
//! ```rust,ignore
//! match build_clause(&filters) {
//!     Ok(clause) => service.query(&clause, &order).await?,
//!     Err(QueryError::UnknownField { field }) => {
//!         println!("'{}' is not a player column", field);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Rejections raised while translating user input into query fragments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Operator token outside `=`, `<`, `>`, `<=`, `>=`, `LIKE`
    #[error("Invalid operator '{operator}'")]
    InvalidOperator { operator: String },

    /// Field name outside the player column allow-list
    #[error("Unknown field '{field}'")]
    UnknownField { field: String },
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidOperator { .. } => "INVALID_OPERATOR",
            QueryError::UnknownField { .. } => "UNKNOWN_FIELD",
        }
    }
}

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error reading '{path}': {message}")]
    IoError { path: String, message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

/// The main error type for the roster service
#[derive(Debug, Error)]
pub enum RosterError {
    /// Filter or sort input was rejected
    #[error(transparent)]
    Query(#[from] QueryError),

    /// No player with this identity
    #[error("Player with id '{id}' not found")]
    PlayerNotFound { id: i64 },

    /// Malformed request payload
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),
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

impl RosterError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RosterError::Query(_) => StatusCode::BAD_REQUEST,
            RosterError::PlayerNotFound { .. } => StatusCode::NOT_FOUND,
            RosterError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RosterError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RosterError::Query(e) => e.error_code(),
            RosterError::PlayerNotFound { .. } => "PLAYER_NOT_FOUND",
            RosterError::BadRequest { .. } => "BAD_REQUEST",
            RosterError::Storage(_) => "STORAGE_ERROR",
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

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RosterError::Query(QueryError::InvalidOperator { operator }) => {
                Some(serde_json::json!({ "operator": operator }))
            }
            RosterError::Query(QueryError::UnknownField { field }) => {
                Some(serde_json::json!({ "field": field }))
            }
            RosterError::PlayerNotFound { id } => Some(serde_json::json!({ "id": id })),
            _ => None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        RosterError::BadRequest {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for RosterError {
    fn from(err: anyhow::Error) -> Self {
        RosterError::Storage(err)
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
