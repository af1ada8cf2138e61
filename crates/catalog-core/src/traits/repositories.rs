//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Conventions shared by every repository:
//! - `insert` ignores any id on the argument and returns the entity with the
//!   store-assigned id.
//! - `update` and `delete_by_id` fail with the aggregate's `*NotFound` error
//!   when no row matches.
//! - Referential and unique-key violations surface as
//!   `DomainError::IntegrityViolation`.

use async_trait::async_trait;

use crate::entities::{Category, Product, Role, User};
use crate::error::DomainError;
use crate::value_objects::{EntityId, Page, PageRequest};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Load one page of categories
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<Category>>;

    /// Find category by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Category>>;

    /// Persist a new category
    async fn insert(&self, category: &Category) -> RepoResult<Category>;

    /// Overwrite an existing category
    async fn update(&self, category: &Category) -> RepoResult<()>;

    /// Delete a category that no product references
    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Product Repository
// ============================================================================

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Load one page of products. Categories are not loaded.
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<Product>>;

    /// Find product by ID, together with its categories
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Product>>;

    /// Persist a new product and its category links
    async fn insert(&self, product: &Product) -> RepoResult<Product>;

    /// Overwrite an existing product, replacing its category links
    async fn update(&self, product: &Product) -> RepoResult<()>;

    /// Delete a product and its category links
    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load one page of users, together with their roles
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<User>>;

    /// Find user by ID, together with their roles
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>>;

    /// Persist a new user with an already hashed password
    async fn insert(&self, user: &User, password_hash: &str) -> RepoResult<User>;

    /// Overwrite an existing user, replacing their role links. The password is kept.
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Delete a user and their role links
    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()>;

    /// Get password hash for credential checks
    async fn get_password_hash(&self, id: EntityId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find role by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Role>>;
}
