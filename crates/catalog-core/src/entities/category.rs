//! Category entity - a label products are grouped under

use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Option<EntityId>,
    pub name: String,
}

impl Category {
    /// Properties a category page may be sorted by
    pub const SORTABLE: &'static [&'static str] = &["id", "name"];

    /// Create a category that has not been persisted yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Create a persisted category
    pub fn with_id(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Id of a persisted category
    pub fn persisted_id(&self) -> Result<EntityId, DomainError> {
        self.id.ok_or(DomainError::TransientEntity("Category"))
    }
}
