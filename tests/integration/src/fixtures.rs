//! Test fixtures and data generators
//!
//! Provides reusable request and response shapes. Every generated name and
//! e-mail is unique so tests can share one database.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data, distinct across test runs
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{nanos}{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Reference to another resource by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdRef {
    pub id: i64,
}

/// Category body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl CategoryBody {
    pub fn unique() -> Self {
        Self {
            id: None,
            name: format!("Category {}", unique_suffix()),
        }
    }
}

/// Category as nested inside a product
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

/// Product request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: Option<String>,
    pub date: Option<String>,
    pub categories: Vec<IdRef>,
}

impl ProductRequest {
    pub fn with_categories(categories: &[i64]) -> Self {
        Self {
            name: format!("Product {}", unique_suffix()),
            description: "Integration test product".to_string(),
            price: 129.9,
            img_url: Some("https://img.example.com/test.jpg".to_string()),
            date: Some("2020-07-14T10:00:00Z".to_string()),
            categories: categories.iter().map(|id| IdRef { id: *id }).collect(),
        }
    }
}

/// Product response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub release_date: Option<String>,
    pub categories: Vec<CategoryRef>,
}

/// Role as nested inside a user
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RoleRef {
    pub id: i64,
    pub authority: String,
}

/// User creation body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInsertRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<IdRef>,
}

impl UserInsertRequest {
    pub fn unique(roles: &[i64]) -> Self {
        let suffix = unique_suffix();
        Self {
            first_name: "Test".to_string(),
            last_name: format!("User{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            roles: roles.iter().map(|id| IdRef { id: *id }).collect(),
        }
    }
}

/// User replace body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<IdRef>,
}

/// User response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<RoleRef>,
}

/// Page envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBody<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

/// Uniform error body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(default)]
    pub errors: Vec<FieldMessage>,
}

/// One rejected field
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMessage {
    pub field_name: String,
    pub message: String,
}
