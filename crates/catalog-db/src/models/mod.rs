//! Database models - SQLx-compatible structs for PostgreSQL tables

mod category;
mod product;
mod role;
mod user;

pub use category::CategoryModel;
pub use product::ProductModel;
pub use role::{RoleModel, UserRoleModel};
pub use user::UserModel;
