//! Application error types
//!
//! Unified error handling for the entire application.

use catalog_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP status code for a domain error
#[must_use]
pub fn domain_status_code(err: &DomainError) -> u16 {
    match err {
        e if e.is_not_found() => 404,
        DomainError::InvalidSort(_) | DomainError::TransientEntity(_) => 400,
        e if e.is_integrity_violation() => 400,
        _ => 500,
    }
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,

            Self::Domain(e) => domain_status_code(e),
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if a storage constraint rejected the operation
    #[must_use]
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_integrity_violation())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
