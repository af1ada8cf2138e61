//! User database model

use sqlx::FromRow;

/// Database model for users table
///
/// `password_hash` is never selected into this model.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
