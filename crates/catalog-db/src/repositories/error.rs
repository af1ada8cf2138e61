//! Error handling utilities for repositories

use catalog_core::error::DomainError;
use catalog_core::value_objects::EntityId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Foreign-key and unique-key violations become `IntegrityViolation` so the
/// caller can tell a conflicting write from an infrastructure failure.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            let message = match db_err.constraint() {
                Some(constraint) => format!("foreign key {constraint} violated"),
                None => "foreign key violated".to_string(),
            };
            return DomainError::IntegrityViolation(message);
        }
        if db_err.is_unique_violation() {
            return unique_violation(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

fn unique_violation(constraint: Option<&str>) -> DomainError {
    match constraint {
        Some("users_email_key") => {
            DomainError::IntegrityViolation("E-mail is already in use".to_string())
        }
        Some(name) => DomainError::IntegrityViolation(format!("Duplicate value ({name})")),
        None => DomainError::IntegrityViolation("Duplicate value".to_string()),
    }
}

/// Create a "category not found" error
pub fn category_not_found(id: EntityId) -> DomainError {
    DomainError::CategoryNotFound(id)
}

/// Create a "product not found" error
pub fn product_not_found(id: EntityId) -> DomainError {
    DomainError::ProductNotFound(id)
}

/// Create a "role not found" error
pub fn role_not_found(id: EntityId) -> DomainError {
    DomainError::RoleNotFound(id)
}

/// Create a "user not found" error
pub fn user_not_found(id: EntityId) -> DomainError {
    DomainError::UserNotFound(id)
}
