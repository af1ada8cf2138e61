//! # catalog-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Category, Product, Role, User};
pub use error::DomainError;
pub use traits::{
    Aggregate, CategoryRepository, ProductRepository, RepoResult, RoleRepository, UserRepository,
};
pub use value_objects::{
    Direction, EntityId, EntityIdParseError, Page, PageRequest, ReferenceSet, SortOrder,
    SortParseError,
};
