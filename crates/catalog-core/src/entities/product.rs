//! Product entity - a catalog item and the categories it belongs to

use chrono::{DateTime, Utc};

use crate::entities::Category;
use crate::error::DomainError;
use crate::traits::Aggregate;
use crate::value_objects::{EntityId, ReferenceSet};

/// Product entity
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub categories: ReferenceSet<Category>,
}

impl Product {
    /// Properties a product page may be sorted by
    pub const SORTABLE: &'static [&'static str] = &["id", "name", "price", "releaseDate"];

    /// Create a product that has not been persisted yet, with no categories
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            image_url: None,
            release_date: None,
            categories: ReferenceSet::new(),
        }
    }

    /// Id of a persisted product
    pub fn persisted_id(&self) -> Result<EntityId, DomainError> {
        self.id.ok_or(DomainError::TransientEntity("Product"))
    }

    /// Check if the product is filed under a category
    pub fn has_category(&self, category_id: EntityId) -> bool {
        self.categories.contains(category_id)
    }
}

impl Aggregate for Product {
    type Reference = Category;

    fn references(&self) -> &ReferenceSet<Category> {
        &self.categories
    }

    fn replace_references(&mut self, references: ReferenceSet<Category>) {
        self.categories = references;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new("PC Gamer", "Bom PC", 1200.0);
        assert!(product.id.is_none());
        assert!(product.categories.is_empty());
        assert!(product.persisted_id().is_err());
    }

    #[test]
    fn test_replace_references() {
        let mut product = Product::new("PC Gamer", "Bom PC", 1200.0);
        let electronics = Category::with_id(EntityId::new(1), "Electronics");
        product.replace_references(
            std::iter::once((EntityId::new(1), electronics)).collect(),
        );
        assert!(product.has_category(EntityId::new(1)));

        product.replace_references(ReferenceSet::new());
        assert!(product.references().is_empty());
    }
}
