//! Transfer objects for the catalog aggregates
//!
//! The same shapes are read from request bodies and written to responses.
//! All implement `Validate`; handlers validate before calling a service.

use catalog_core::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ============================================================================
// Validators
// ============================================================================

/// Reject empty and whitespace-only strings
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Reject instants after now
fn past_or_present(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value > Utc::now() {
        return Err(ValidationError::new("past_or_present"));
    }
    Ok(())
}

// ============================================================================
// Category
// ============================================================================

/// Category transfer object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub id: Option<EntityId>,

    #[validate(
        length(max = 255, message = "Must have at most 255 characters"),
        custom(function = "not_blank", message = "Required field")
    )]
    pub name: String,
}

/// Reference to a category inside a product
///
/// Only `id` is read on input; `name` is filled in on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRefDto {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Product
// ============================================================================

/// Product transfer object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<EntityId>,

    #[validate(
        length(min = 5, max = 60, message = "Must be between 5 and 60 characters"),
        custom(function = "not_blank", message = "Required field")
    )]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "Required field"))]
    pub description: String,

    #[validate(range(exclusive_min = 0.0, message = "Price must be a positive value"))]
    pub price: f64,

    #[serde(default, alias = "imgUrl")]
    pub image_url: Option<String>,

    #[serde(default, alias = "date")]
    #[validate(custom(
        function = "past_or_present",
        message = "Product date cannot be in the future"
    ))]
    pub release_date: Option<DateTime<Utc>>,

    /// An omitted list clears the product's categories
    #[serde(default)]
    pub categories: Vec<CategoryRefDto>,
}

// ============================================================================
// User
// ============================================================================

/// Reference to a role inside a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRefDto {
    pub id: EntityId,
    #[serde(default)]
    pub authority: String,
}

/// User transfer object. Never carries a password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<EntityId>,

    #[validate(
        length(max = 255, message = "Must have at most 255 characters"),
        custom(function = "not_blank", message = "Required field")
    )]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Must have at most 255 characters"))]
    pub last_name: String,

    #[validate(
        length(max = 255, message = "Must have at most 255 characters"),
        email(message = "Please enter a valid e-mail")
    )]
    pub email: String,

    /// An omitted list clears the user's roles
    #[serde(default)]
    pub roles: Vec<RoleRefDto>,
}

/// Write-only shape for user creation: a `UserDto` plus the plaintext password
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserInsertDto {
    #[validate(
        length(max = 255, message = "Must have at most 255 characters"),
        custom(function = "not_blank", message = "Required field")
    )]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Must have at most 255 characters"))]
    pub last_name: String,

    #[validate(
        length(max = 255, message = "Must have at most 255 characters"),
        email(message = "Please enter a valid e-mail")
    )]
    pub email: String,

    #[serde(default)]
    pub roles: Vec<RoleRefDto>,

    #[validate(length(min = 8, message = "Password must have at least 8 characters"))]
    pub password: String,
}

impl UserInsertDto {
    /// Split into the user data and the plaintext password
    pub fn into_parts(self) -> (UserDto, String) {
        let user = UserDto {
            id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            roles: self.roles,
        };
        (user, self.password)
    }
}

impl std::fmt::Debug for UserInsertDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInsertDto")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .field("password", &"[redacted]")
            .finish()
    }
}
