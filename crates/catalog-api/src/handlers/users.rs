//! User handlers
//!
//! Creation takes a password, which is hashed before storage. Replace keeps
//! the stored hash; no response ever carries it.

use axum::{
    extract::{OriginalUri, State},
    Json,
};
use catalog_service::{
    dto::{PageResponse, UserDto, UserInsertDto},
    UserService,
};

use super::assigned_id;
use crate::extractors::{IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List users
///
/// GET /users?page=&size=&sort=
pub async fn list_users(
    State(state): State<AppState>,
    Pagination(request): Pagination,
) -> ApiResult<Json<PageResponse<UserDto>>> {
    let service = UserService::new(state.service_context());
    let page = service.list_users(request).await?;
    Ok(Json(page))
}

/// Get user by ID
///
/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<UserDto>> {
    let service = UserService::new(state.service_context());
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Create user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<UserInsertDto>,
) -> ApiResult<Created<UserDto>> {
    let service = UserService::new(state.service_context());
    let user = service.create_user(request).await?;
    Ok(Created::at(uri.path(), assigned_id(user.id)?, user))
}

/// Replace user
///
/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UserDto>,
) -> ApiResult<Json<UserDto>> {
    let service = UserService::new(state.service_context());
    let user = service.update_user(id, request).await?;
    Ok(Json(user))
}

/// Delete user
///
/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_user(id).await?;
    Ok(NoContent)
}
