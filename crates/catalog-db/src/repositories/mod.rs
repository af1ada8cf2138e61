//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in catalog-core.
//! Each repository handles database operations for a specific domain entity.

mod category;
mod error;
mod product;
mod query;
mod role;
mod user;

pub use category::PgCategoryRepository;
pub use product::PgProductRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
