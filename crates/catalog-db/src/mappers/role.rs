//! Role entity <-> model mapper

use catalog_core::entities::Role;
use catalog_core::value_objects::EntityId;

use crate::models::{RoleModel, UserRoleModel};

/// Convert RoleModel to Role entity
impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role::with_id(EntityId::new(model.id), model.authority)
    }
}

/// Convert a joined role row to Role entity
impl From<UserRoleModel> for Role {
    fn from(model: UserRoleModel) -> Self {
        Role::with_id(EntityId::new(model.id), model.authority)
    }
}
