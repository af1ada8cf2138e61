//! Product service
//!
//! Products reference existing categories. Create and update reconcile the
//! category list of the request against the store before persisting.

use catalog_core::entities::{Category, Product};
use catalog_core::value_objects::{EntityId, PageRequest};
use tracing::{info, instrument};

use crate::dto::{PageResponse, ProductDto};

use super::context::ServiceContext;
use super::error::{category_not_found, product_not_found, ServiceResult};
use super::reconcile::reconcile;

/// Product service
pub struct ProductService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProductService<'a> {
    /// Create a new ProductService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List one page of products. Categories are not included.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        request: PageRequest,
    ) -> ServiceResult<PageResponse<ProductDto>> {
        request.ensure_sortable(Product::SORTABLE)?;

        let page = self.ctx.product_repo().find_page(&request).await?;
        Ok(page.map(|p| ProductDto::from_entity(&p)).into())
    }

    /// Get a product by ID, with its categories
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: EntityId) -> ServiceResult<ProductDto> {
        let product = self.find(id).await?;
        Ok(ProductDto::with_categories(&product))
    }

    /// Create a product. Any id in the request is ignored.
    #[instrument(skip(self, request))]
    pub async fn create_product(&self, request: ProductDto) -> ServiceResult<ProductDto> {
        let mut product = Product::new(String::new(), String::new(), 0.0);
        reconcile(
            &mut product,
            &request,
            request.category_ids(),
            ProductDto::copy_scalars,
            move |id| self.resolve_category(id),
        )
        .await?;

        let created = self.ctx.product_repo().insert(&product).await?;

        info!(
            product_id = ?created.id,
            categories = created.categories.len(),
            "Product created"
        );

        Ok(ProductDto::with_categories(&created))
    }

    /// Replace a product's fields and categories
    #[instrument(skip(self, request))]
    pub async fn update_product(
        &self,
        id: EntityId,
        request: ProductDto,
    ) -> ServiceResult<ProductDto> {
        let mut product = self.find(id).await?;
        reconcile(
            &mut product,
            &request,
            request.category_ids(),
            ProductDto::copy_scalars,
            move |id| self.resolve_category(id),
        )
        .await?;

        self.ctx.product_repo().update(&product).await?;

        info!(product_id = %id, categories = product.categories.len(), "Product updated");

        Ok(ProductDto::with_categories(&product))
    }

    /// Delete a product and its category links
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: EntityId) -> ServiceResult<()> {
        self.ctx.product_repo().delete_by_id(id).await?;

        info!(product_id = %id, "Product deleted");

        Ok(())
    }

    // === Helper Methods ===

    async fn find(&self, id: EntityId) -> ServiceResult<Product> {
        self.ctx
            .product_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    async fn resolve_category(&self, id: EntityId) -> ServiceResult<Category> {
        self.ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| category_not_found(id))
    }
}
