//! # catalog-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `catalog-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::pool::{create_pool, DatabaseConfig};
//! use catalog_db::repositories::PgCategoryRepository;
//! use catalog_core::traits::CategoryRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     let categories = PgCategoryRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{check_connection, create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCategoryRepository, PgProductRepository, PgRoleRepository, PgUserRepository,
};
