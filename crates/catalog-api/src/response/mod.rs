//! Response types and error handling for API endpoints
//!
//! Every failure is rendered as a `StandardError` body:
//! `{timestamp, status, error, message, path}`, plus `errors` for field
//! validation failures. Handlers return `ApiError`; the request path is
//! filled in afterwards by `middleware::translate_errors`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use catalog_common::{domain_status_code, AppError};
use catalog_core::DomainError;
use catalog_service::ServiceError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => domain_status_code(e),
            Self::Validation(_) => 422,
            Self::InvalidPath(_) | Self::InvalidQuery(_) | Self::InvalidBody(_) => 400,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if a storage constraint rejected the operation
    #[must_use]
    pub fn is_integrity_violation(&self) -> bool {
        match self {
            Self::App(e) => e.is_integrity_violation(),
            Self::Service(e) => e.is_integrity_violation(),
            Self::Domain(e) => e.is_integrity_violation(),
            _ => false,
        }
    }

    /// Short title for the `error` field
    #[must_use]
    pub fn title(&self) -> &'static str {
        let status = self.status_code();
        if status == StatusCode::NOT_FOUND {
            "Resource not found"
        } else if self.is_integrity_violation() {
            "Database exception"
        } else if status == StatusCode::UNPROCESSABLE_ENTITY {
            "Validation exception"
        } else if status.is_server_error() {
            "Internal server error"
        } else {
            "Bad request"
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

/// One rejected field of a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMessage {
    pub field_name: String,
    pub message: String,
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct StandardError {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldMessage>,
}

/// Response extension carrying the rendered error until the path is known
#[derive(Debug, Clone)]
pub struct ErrorReport(pub StandardError);

impl StandardError {
    /// Render the body as a response with the given status
    pub fn into_response_with(self, status: StatusCode) -> Response {
        let mut response = (status, Json(&self)).into_response();
        response.extensions_mut().insert(ErrorReport(self));
        response
    }
}

/// snake_case field name to the camelCase name used in JSON
fn json_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Flatten validator output into one entry per failed rule, ordered by field
fn field_messages(errors: &ValidationErrors) -> Vec<FieldMessage> {
    let mut messages: Vec<FieldMessage> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            let field_name = json_field_name(&field);
            failures.iter().map(move |failure| FieldMessage {
                field_name: field_name.clone(),
                message: failure
                    .message
                    .as_ref()
                    .map_or_else(|| failure.code.to_string(), ToString::to_string),
            })
        })
        .collect();
    messages.sort_by(|a, b| a.field_name.cmp(&b.field_name));
    messages
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server error details stay in the log
        let message = if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
            "Internal server error".to_string()
        } else if matches!(self, Self::Validation(_)) {
            "Request body has invalid fields".to_string()
        } else {
            self.to_string()
        };

        let errors = match &self {
            Self::Validation(errors) => field_messages(errors),
            _ => Vec::new(),
        };

        StandardError {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: self.title().to_string(),
            message,
            path: String::new(),
            errors,
        }
        .into_response_with(status)
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with a `Location` header and JSON body
pub struct Created<T> {
    pub location: String,
    pub body: T,
}

impl<T> Created<T> {
    /// Location is the collection path followed by the new id
    pub fn at(collection_path: &str, id: impl std::fmt::Display, body: T) -> Self {
        Self {
            location: format!("{}/{id}", collection_path.trim_end_matches('/')),
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(self.body)).into_response();
        match HeaderValue::from_str(&self.location) {
            Ok(value) => {
                response.headers_mut().insert(header::LOCATION, value);
            }
            Err(e) => error!(location = %self.location, error = %e, "Invalid Location header"),
        }
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
