//! User entity <-> model mapper

use catalog_core::entities::{Role, User};
use catalog_core::value_objects::{EntityId, ReferenceSet};

use crate::models::UserModel;

/// Convert UserModel to User entity
/// Note: roles are loaded separately, see `user_with_roles`
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Some(EntityId::new(model.id)),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            roles: ReferenceSet::new(),
        }
    }
}

/// Convert UserModel with its roles to User entity
pub fn user_with_roles(model: UserModel, roles: impl IntoIterator<Item = Role>) -> User {
    let mut user = User::from(model);
    user.roles = roles
        .into_iter()
        .filter_map(|role| role.id.map(|id| (id, role)))
        .collect();
    user
}

/// Scalar column values of a user
pub struct UserValues<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub role_ids: Vec<i64>,
}

impl<'a> UserValues<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            role_ids: user.roles.ids().map(EntityId::into_inner).collect(),
        }
    }
}
