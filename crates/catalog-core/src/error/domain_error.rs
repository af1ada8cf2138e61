//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::EntityId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Category not found: {0}")]
    CategoryNotFound(EntityId),

    #[error("Product not found: {0}")]
    ProductNotFound(EntityId),

    #[error("User not found: {0}")]
    UserNotFound(EntityId),

    #[error("Role not found: {0}")]
    RoleNotFound(EntityId),

    // =========================================================================
    // Query Errors
    // =========================================================================
    #[error("Unknown sort property: {0}")]
    InvalidSort(String),

    // =========================================================================
    // Integrity Errors
    // =========================================================================
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    // =========================================================================
    // Lifecycle Errors
    // =========================================================================
    #[error("{0} has not been persisted yet")]
    TransientEntity(&'static str),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::ProductNotFound(_) => "UNKNOWN_PRODUCT",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",

            // Query
            Self::InvalidSort(_) => "INVALID_SORT",

            // Integrity
            Self::IntegrityViolation(_) => "INTEGRITY_VIOLATION",

            // Lifecycle
            Self::TransientEntity(_) => "TRANSIENT_ENTITY",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound(_)
                | Self::ProductNotFound(_)
                | Self::UserNotFound(_)
                | Self::RoleNotFound(_)
        )
    }

    /// Check if this is a storage-level constraint violation
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::IntegrityViolation(_))
    }
}
