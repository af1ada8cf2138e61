//! Entity to model mappers
//!
//! This module provides conversions between domain entities (catalog-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Values` structs: Prepare entity data for insert and update binds

mod category;
mod product;
mod role;
mod user;

pub use product::{product_with_categories, ProductValues};
pub use user::{user_with_roles, UserValues};
