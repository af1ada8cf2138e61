//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod categories;
pub mod health;
pub mod products;
pub mod users;

use catalog_core::EntityId;

use crate::response::{ApiError, ApiResult};

/// Id the store assigned to a freshly inserted row
fn assigned_id(id: Option<EntityId>) -> ApiResult<EntityId> {
    id.ok_or_else(|| ApiError::internal(anyhow::anyhow!("inserted row came back without an id")))
}
