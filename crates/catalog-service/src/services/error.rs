//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use catalog_common::{domain_status_code, AppError};
use catalog_core::{DomainError, EntityId};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or repository failure
    Domain(DomainError),

    /// Application error (hashing, configuration, etc.)
    App(AppError),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status_code(e),
            Self::App(e) => e.status_code(),
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if the target or a referenced entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_not_found())
    }

    /// Check if a storage constraint rejected the operation
    pub fn is_integrity_violation(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_integrity_violation(),
            Self::App(e) => e.is_integrity_violation(),
            _ => false,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Not-found error for a missing category
pub(crate) fn category_not_found(id: EntityId) -> ServiceError {
    ServiceError::Domain(DomainError::CategoryNotFound(id))
}

/// Not-found error for a missing product
pub(crate) fn product_not_found(id: EntityId) -> ServiceError {
    ServiceError::Domain(DomainError::ProductNotFound(id))
}

/// Not-found error for a missing user
pub(crate) fn user_not_found(id: EntityId) -> ServiceError {
    ServiceError::Domain(DomainError::UserNotFound(id))
}

/// Not-found error for a missing role
pub(crate) fn role_not_found(id: EntityId) -> ServiceError {
    ServiceError::Domain(DomainError::RoleNotFound(id))
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
