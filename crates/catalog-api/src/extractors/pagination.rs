//! Pagination extractor
//!
//! Extracts offset paging parameters from query strings:
//! `?page=0&size=20&sort=name,desc&sort=id`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::Query;
use catalog_common::PagingConfig;
use catalog_core::value_objects::{PageRequest, SortOrder};
use serde::Deserialize;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw paging query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// Zero-based page index
    #[serde(default)]
    pub page: Option<u32>,
    /// Maximum number of items to return
    #[serde(default)]
    pub size: Option<u32>,
    /// Repeated `property[,asc|desc]` expressions
    #[serde(default)]
    pub sort: Vec<String>,
}

impl PageParams {
    /// Build a page request, clamping `size` into the configured bounds
    pub fn into_request(self, paging: &PagingConfig) -> Result<PageRequest, ApiError> {
        let sort = self
            .sort
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.parse::<SortOrder>()
                    .map_err(|e| ApiError::invalid_query(format!("sort={raw}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageRequest::new(self.page.unwrap_or(0), paging.clamp_size(self.size)).with_sort(sort))
    }
}

/// Validated paging parameters
#[derive(Debug, Clone)]
pub struct Pagination(pub PageRequest);

#[async_trait]
impl FromRequestParts<AppState> for Pagination {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        params.into_request(&state.config().paging).map(Pagination)
    }
}
