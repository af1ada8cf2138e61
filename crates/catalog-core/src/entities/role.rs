//! Role entity - an authority granted to users

use crate::value_objects::EntityId;

/// Role entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Option<EntityId>,
    pub authority: String,
}

impl Role {
    /// Create a persisted role
    pub fn with_id(id: EntityId, authority: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            authority: authority.into(),
        }
    }
}
