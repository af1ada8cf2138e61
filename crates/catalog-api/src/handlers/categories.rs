//! Category handlers

use axum::{
    extract::{OriginalUri, State},
    Json,
};
use catalog_service::{dto::CategoryDto, dto::PageResponse, CategoryService};

use super::assigned_id;
use crate::extractors::{IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List categories
///
/// GET /categories?page=&size=&sort=
pub async fn list_categories(
    State(state): State<AppState>,
    Pagination(request): Pagination,
) -> ApiResult<Json<PageResponse<CategoryDto>>> {
    let service = CategoryService::new(state.service_context());
    let page = service.list_categories(request).await?;
    Ok(Json(page))
}

/// Get category by ID
///
/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<CategoryDto>> {
    let service = CategoryService::new(state.service_context());
    let category = service.get_category(id).await?;
    Ok(Json(category))
}

/// Create category
///
/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<CategoryDto>,
) -> ApiResult<Created<CategoryDto>> {
    let service = CategoryService::new(state.service_context());
    let category = service.create_category(request).await?;
    Ok(Created::at(uri.path(), assigned_id(category.id)?, category))
}

/// Replace category
///
/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<CategoryDto>,
) -> ApiResult<Json<CategoryDto>> {
    let service = CategoryService::new(state.service_context());
    let category = service.update_category(id, request).await?;
    Ok(Json(category))
}

/// Delete category
///
/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = CategoryService::new(state.service_context());
    service.delete_category(id).await?;
    Ok(NoContent)
}
