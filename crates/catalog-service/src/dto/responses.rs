//! Response DTOs that wrap transfer objects

use catalog_core::value_objects::{Page, SortOrder};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Paged list body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    pub sort: Vec<SortOrder>,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let number = page.number();
        let size = page.size();
        let total_elements = page.total_elements();
        let total_pages = page.total_pages();
        let number_of_elements = page.number_of_elements();
        let first = page.is_first();
        let last = page.is_last();
        let empty = page.is_empty();
        let sort = page.sort().to_vec();

        Self {
            content: page.into_content(),
            number,
            size,
            total_elements,
            total_pages,
            number_of_elements,
            first,
            last,
            empty,
            sort,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::value_objects::PageRequest;
    use serde_json::json;

    #[test]
    fn test_page_response_shape() {
        let request = PageRequest::new(1, 2).with_sort(vec![SortOrder::desc("name")]);
        let page = Page::new(vec!["c", "d"], request, 5);

        let value = serde_json::to_value(PageResponse::from(page)).unwrap();
        assert_eq!(value["content"], json!(["c", "d"]));
        assert_eq!(value["number"], 1);
        assert_eq!(value["size"], 2);
        assert_eq!(value["totalElements"], 5);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["numberOfElements"], 2);
        assert_eq!(value["first"], false);
        assert_eq!(value["last"], false);
        assert_eq!(value["empty"], false);
        assert_eq!(
            value["sort"],
            json!([{ "property": "name", "direction": "DESC" }])
        );
    }

    #[test]
    fn test_empty_page_response() {
        let page: Page<String> = Page::empty(PageRequest::new(0, 20));
        let response = PageResponse::from(page);
        assert!(response.empty);
        assert_eq!(response.total_elements, 0);
        assert!(response.first && response.last);
    }

    #[test]
    fn test_readiness() {
        assert!(ReadinessResponse::ready(true).is_ready());
        let not_ready = ReadinessResponse::ready(false);
        assert!(!not_ready.is_ready());
        assert_eq!(not_ready.checks.database, "unhealthy");
    }
}
