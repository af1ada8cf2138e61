//! Entity <-> DTO mappers
//!
//! Projection (entity to DTO) is a plain field copy. The reverse direction
//! only copies scalars; reference collections are rebuilt by
//! `services::reconcile`.

use catalog_core::entities::{Category, Product, Role, User};
use catalog_core::EntityId;

use super::transfer::{CategoryDto, CategoryRefDto, ProductDto, RoleRefDto, UserDto};

// ============================================================================
// Category Mappers
// ============================================================================

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl CategoryRefDto {
    fn project(id: EntityId, category: &Category) -> Self {
        Self {
            id,
            name: category.name.clone(),
        }
    }
}

impl CategoryDto {
    /// Copy scalar fields onto a category
    pub fn copy_scalars(&self, target: &mut Category) {
        target.name.clone_from(&self.name);
    }
}

// ============================================================================
// Product Mappers
// ============================================================================

impl ProductDto {
    /// List projection. `categories` is always empty.
    pub fn from_entity(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            release_date: product.release_date,
            categories: Vec::new(),
        }
    }

    /// Single-item projection, including the product's categories
    pub fn with_categories(product: &Product) -> Self {
        Self {
            categories: product
                .categories
                .entries()
                .map(|(id, category)| CategoryRefDto::project(id, category))
                .collect(),
            ..Self::from_entity(product)
        }
    }

    /// Ids listed in `categories`, in request order
    pub fn category_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.categories.iter().map(|c| c.id)
    }

    /// Copy scalar fields onto a product. Every field is overwritten.
    pub fn copy_scalars(&self, target: &mut Product) {
        target.name.clone_from(&self.name);
        target.description.clone_from(&self.description);
        target.price = self.price;
        target.image_url.clone_from(&self.image_url);
        target.release_date = self.release_date;
    }
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self::from_entity(product)
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl RoleRefDto {
    fn project(id: EntityId, role: &Role) -> Self {
        Self {
            id,
            authority: role.authority.clone(),
        }
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            roles: user
                .roles
                .entries()
                .map(|(id, role)| RoleRefDto::project(id, role))
                .collect(),
        }
    }
}

impl UserDto {
    /// Ids listed in `roles`, in request order
    pub fn role_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.roles.iter().map(|r| r.id)
    }

    /// Copy scalar fields onto a user. Every field is overwritten.
    pub fn copy_scalars(&self, target: &mut User) {
        target.first_name.clone_from(&self.first_name);
        target.last_name.clone_from(&self.last_name);
        target.email.clone_from(&self.email);
    }
}
