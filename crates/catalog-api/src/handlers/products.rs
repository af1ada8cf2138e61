//! Product handlers

use axum::{
    extract::{OriginalUri, State},
    Json,
};
use catalog_service::{dto::PageResponse, dto::ProductDto, ProductService};

use super::assigned_id;
use crate::extractors::{IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List products. Items in the page omit their categories.
///
/// GET /products?page=&size=&sort=
pub async fn list_products(
    State(state): State<AppState>,
    Pagination(request): Pagination,
) -> ApiResult<Json<PageResponse<ProductDto>>> {
    let service = ProductService::new(state.service_context());
    let page = service.list_products(request).await?;
    Ok(Json(page))
}

/// Get product by ID, with its categories
///
/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ProductDto>> {
    let service = ProductService::new(state.service_context());
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Create product
///
/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<ProductDto>,
) -> ApiResult<Created<ProductDto>> {
    let service = ProductService::new(state.service_context());
    let product = service.create_product(request).await?;
    Ok(Created::at(uri.path(), assigned_id(product.id)?, product))
}

/// Replace product
///
/// PUT /products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<ProductDto>,
) -> ApiResult<Json<ProductDto>> {
    let service = ProductService::new(state.service_context());
    let product = service.update_product(id, request).await?;
    Ok(Json(product))
}

/// Delete product
///
/// DELETE /products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = ProductService::new(state.service_context());
    service.delete_product(id).await?;
    Ok(NoContent)
}
