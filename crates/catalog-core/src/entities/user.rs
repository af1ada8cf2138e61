//! User entity - a catalog account and its roles
//!
//! The password hash is not part of the entity. It only travels between the
//! service and the repository as a separate argument.

use crate::entities::Role;
use crate::error::DomainError;
use crate::traits::Aggregate;
use crate::value_objects::{EntityId, ReferenceSet};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: ReferenceSet<Role>,
}

impl User {
    /// Properties a user page may be sorted by
    pub const SORTABLE: &'static [&'static str] = &["id", "firstName", "lastName", "email"];

    /// Create a user that has not been persisted yet, with no roles
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            roles: ReferenceSet::new(),
        }
    }

    /// Id of a persisted user
    pub fn persisted_id(&self) -> Result<EntityId, DomainError> {
        self.id.ok_or(DomainError::TransientEntity("User"))
    }

    /// Check if the user holds an authority, e.g. `ROLE_ADMIN`
    pub fn has_authority(&self, authority: &str) -> bool {
        self.roles.iter().any(|role| role.authority == authority)
    }
}

impl Aggregate for User {
    type Reference = Role;

    fn references(&self) -> &ReferenceSet<Role> {
        &self.roles
    }

    fn replace_references(&mut self, references: ReferenceSet<Role>) {
        self.roles = references;
    }
}
