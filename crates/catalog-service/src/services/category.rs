//! Category service
//!
//! Handles category listing, lookup and mutation.

use catalog_core::entities::Category;
use catalog_core::value_objects::{EntityId, PageRequest};
use tracing::{info, instrument};

use crate::dto::{CategoryDto, PageResponse};

use super::context::ServiceContext;
use super::error::{category_not_found, ServiceResult};

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List one page of categories
    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        request: PageRequest,
    ) -> ServiceResult<PageResponse<CategoryDto>> {
        request.ensure_sortable(Category::SORTABLE)?;

        let page = self.ctx.category_repo().find_page(&request).await?;
        Ok(page.map(CategoryDto::from).into())
    }

    /// Get a category by ID
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: EntityId) -> ServiceResult<CategoryDto> {
        let category = self
            .ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| category_not_found(id))?;

        Ok(CategoryDto::from(category))
    }

    /// Create a category. Any id in the request is ignored.
    #[instrument(skip(self, request))]
    pub async fn create_category(&self, request: CategoryDto) -> ServiceResult<CategoryDto> {
        let mut category = Category::new(String::new());
        request.copy_scalars(&mut category);

        let created = self.ctx.category_repo().insert(&category).await?;

        info!(category_id = ?created.id, "Category created");

        Ok(CategoryDto::from(created))
    }

    /// Replace a category's fields
    #[instrument(skip(self, request))]
    pub async fn update_category(
        &self,
        id: EntityId,
        request: CategoryDto,
    ) -> ServiceResult<CategoryDto> {
        let mut category = self
            .ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| category_not_found(id))?;

        request.copy_scalars(&mut category);
        self.ctx.category_repo().update(&category).await?;

        info!(category_id = %id, "Category updated");

        Ok(CategoryDto::from(category))
    }

    /// Delete a category no product references
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: EntityId) -> ServiceResult<()> {
        self.ctx.category_repo().delete_by_id(id).await?;

        info!(category_id = %id, "Category deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{seeded_context, MemoryStore};
    use catalog_core::value_objects::SortOrder;
    use std::sync::Arc;

    fn dto(name: &str) -> CategoryDto {
        CategoryDto {
            id: None,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_round_trip() {
        let (_, ctx) = seeded_context();
        let service = CategoryService::new(&ctx);

        let category = service.get_category(EntityId::new(1)).await.unwrap();
        assert_eq!(category.id, Some(EntityId::new(1)));
        assert_eq!(category.name, "Electronics");
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let (_, ctx) = seeded_context();
        let service = CategoryService::new(&ctx);
        let missing = EntityId::new(404);

        assert!(service.get_category(missing).await.unwrap_err().is_not_found());
        assert!(service
            .update_category(missing, dto("Garden"))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service.delete_category(missing).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_create_ignores_request_id() {
        let (_, ctx) = seeded_context();
        let service = CategoryService::new(&ctx);

        let mut request = dto("Garden");
        request.id = Some(EntityId::new(1));
        let created = service.create_category(request).await.unwrap();

        assert_eq!(created.id, Some(EntityId::new(4)));
        assert_eq!(
            service.get_category(EntityId::new(1)).await.unwrap().name,
            "Electronics"
        );
    }

    #[tokio::test]
    async fn test_update_replaces_name() {
        let (_, ctx) = seeded_context();
        let service = CategoryService::new(&ctx);

        let updated = service
            .update_category(EntityId::new(2), dto("Livros"))
            .await
            .unwrap();
        assert_eq!(updated.id, Some(EntityId::new(2)));
        assert_eq!(
            service.get_category(EntityId::new(2)).await.unwrap().name,
            "Livros"
        );
    }

    #[tokio::test]
    async fn test_delete_referenced_category_conflicts() {
        let (store, ctx) = seeded_context();
        let service = CategoryService::new(&ctx);
        let before = store.product_count();

        let err = service.delete_category(EntityId::new(3)).await.unwrap_err();

        assert!(err.is_integrity_violation());
        assert!(service.get_category(EntityId::new(3)).await.is_ok());
        assert_eq!(store.product_count(), before);
    }

    #[tokio::test]
    async fn test_delete_unreferenced_category() {
        let (_, ctx) = seeded_context();
        let service = CategoryService::new(&ctx);

        let created = service.create_category(dto("Garden")).await.unwrap();
        let id = created.id.unwrap();

        service.delete_category(id).await.unwrap();
        assert!(service.get_category(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_pages_and_sorts() {
        let (_, ctx) = seeded_context();
        let service = CategoryService::new(&ctx);

        let page = service
            .list_categories(PageRequest::new(0, 2).with_sort(vec![SortOrder::desc("name")]))
            .await
            .unwrap();

        assert_eq!(page.number_of_elements, 2);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        let names: Vec<&str> = page.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Computers"]);
    }

    #[tokio::test]
    async fn test_list_unknown_sort_property() {
        let (_, ctx) = seeded_context();
        let service = CategoryService::new(&ctx);

        let err = service
            .list_categories(PageRequest::new(0, 20).with_sort(vec![SortOrder::asc("price")]))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let ctx = MemoryStore::context(Arc::new(MemoryStore::new()));
        let service = CategoryService::new(&ctx);

        let page = service.list_categories(PageRequest::default()).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
        assert!(page.empty);
    }
}
