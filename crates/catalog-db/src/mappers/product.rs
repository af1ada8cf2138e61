//! Product entity <-> model mapper

use chrono::{DateTime, Utc};

use catalog_core::entities::{Category, Product};
use catalog_core::value_objects::{EntityId, ReferenceSet};

use crate::models::ProductModel;

/// Convert ProductModel to Product entity
/// Note: categories are loaded separately, see `product_with_categories`
impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Product {
            id: Some(EntityId::new(model.id)),
            name: model.name,
            description: model.description,
            price: model.price,
            image_url: model.image_url,
            release_date: model.release_date,
            categories: ReferenceSet::new(),
        }
    }
}

/// Convert ProductModel with its categories to Product entity
pub fn product_with_categories(
    model: ProductModel,
    categories: impl IntoIterator<Item = Category>,
) -> Product {
    let mut product = Product::from(model);
    product.categories = categories
        .into_iter()
        .filter_map(|category| category.id.map(|id| (id, category)))
        .collect();
    product
}

/// Scalar column values of a product
pub struct ProductValues<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub image_url: Option<&'a str>,
    pub release_date: Option<DateTime<Utc>>,
    pub category_ids: Vec<i64>,
}

impl<'a> ProductValues<'a> {
    pub fn new(product: &'a Product) -> Self {
        Self {
            name: &product.name,
            description: &product.description,
            price: product.price,
            image_url: product.image_url.as_deref(),
            release_date: product.release_date,
            category_ids: product.categories.ids().map(EntityId::into_inner).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn model() -> ProductModel {
        ProductModel {
            id: 1,
            name: "PC Gamer".to_string(),
            description: "Bom PC".to_string(),
            price: 1200.0,
            image_url: Some("https://img.example.com/1.png".to_string()),
            release_date: Utc.with_ymd_and_hms(2020, 10, 20, 3, 0, 0).single(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let product = Product::from(model());
        assert_eq!(product.id, Some(EntityId::new(1)));
        assert_eq!(product.price, 1200.0);
        assert!(product.categories.is_empty());
    }

    #[test]
    fn test_product_with_categories() {
        let product = product_with_categories(
            model(),
            vec![
                Category::with_id(EntityId::new(1), "Electronics"),
                Category::with_id(EntityId::new(1), "Electronics"),
            ],
        );
        assert_eq!(product.categories.len(), 1);

        let values = ProductValues::new(&product);
        assert_eq!(values.category_ids, vec![1]);
        assert_eq!(values.image_url, Some("https://img.example.com/1.png"));
    }
}
