//! Role database model

use sqlx::FromRow;

/// Database model for roles table
#[derive(Debug, Clone, FromRow)]
pub struct RoleModel {
    pub id: i64,
    pub authority: String,
}

/// Role row joined through user_role
#[derive(Debug, Clone, FromRow)]
pub struct UserRoleModel {
    pub user_id: i64,
    pub id: i64,
    pub authority: String,
}
