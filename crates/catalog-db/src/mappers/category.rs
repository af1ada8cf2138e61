//! Category entity <-> model mapper

use catalog_core::entities::Category;
use catalog_core::value_objects::EntityId;

use crate::models::CategoryModel;

/// Convert CategoryModel to Category entity
impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category::with_id(EntityId::new(model.id), model.name)
    }
}
