//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! The server applies the baseline migration (schema and seed rows) on start.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Category Tests
// ============================================================================

#[tokio::test]
async fn test_category_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let request = CategoryBody::unique();
    let response = server.post("/categories", &request).await.unwrap();
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .expect("Location header");
    let created: CategoryBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let id = created.id.expect("assigned id");
    assert_eq!(location, format!("/categories/{id}"));
    assert_eq!(created.name, request.name);

    let renamed = CategoryBody {
        id: None,
        name: format!("{} renamed", request.name),
    };
    let response = server.put(&location, &renamed).await.unwrap();
    let updated: CategoryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, renamed.name);

    let response = server.delete(&location).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&location).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error, "Resource not found");
    assert_eq!(error.path, location);
}

#[tokio::test]
async fn test_delete_referenced_category_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post("/categories", &CategoryBody::unique()).await.unwrap();
    let category: CategoryBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let category_id = category.id.unwrap();

    let response = server
        .post("/products", &ProductRequest::with_categories(&[category_id]))
        .await
        .unwrap();
    let product: ProductResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/categories/{category_id}");
    let response = server.delete(&path).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.status, 400);
    assert_eq!(error.error, "Database exception");
    assert_eq!(error.path, path);
    assert!(!error.timestamp.is_empty());

    // Once the product is gone the category can go too
    let response = server
        .delete(&format!("/products/{}", product.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Product Tests
// ============================================================================

#[tokio::test]
async fn test_create_product_with_category() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let request = ProductRequest::with_categories(&[1]);
    let response = server.post("/products", &request).await.unwrap();
    let created: ProductResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.name, request.name);
    assert_eq!(created.image_url, request.img_url);
    assert_eq!(
        created.categories,
        vec![CategoryRef {
            id: 1,
            name: "Electronics".to_string()
        }]
    );

    let response = server
        .get(&format!("/products/{}", created.id))
        .await
        .unwrap();
    let fetched: ProductResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.categories, created.categories);
    assert_eq!(fetched.description, request.description);
    assert!((fetched.price - request.price).abs() < f64::EPSILON);
    assert!(fetched.release_date.is_some());
}

#[tokio::test]
async fn test_replace_product_categories() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/products", &ProductRequest::with_categories(&[1, 2]))
        .await
        .unwrap();
    let created: ProductResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/products/{}", created.id);

    let response = server
        .put(&path, &ProductRequest::with_categories(&[3]))
        .await
        .unwrap();
    let updated: ProductResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.categories.len(), 1);
    assert_eq!(updated.categories[0].id, 3);

    let response = server
        .put(&path, &ProductRequest::with_categories(&[]))
        .await
        .unwrap();
    let cleared: ProductResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(cleared.categories.is_empty());
}

#[tokio::test]
async fn test_unknown_category_leaves_product_untouched() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/products", &ProductRequest::with_categories(&[2]))
        .await
        .unwrap();
    let created: ProductResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/products/{}", created.id);

    let response = server
        .put(&path, &ProductRequest::with_categories(&[2, i64::MAX]))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let fetched: ProductResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.categories, created.categories);
}

#[tokio::test]
async fn test_invalid_product_is_unprocessable() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let mut request = ProductRequest::with_categories(&[]);
    request.name = "TV".to_string();
    request.price = 0.0;

    let response = server.post("/products", &request).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    assert_eq!(error.error, "Validation exception");
    let fields: Vec<&str> = error.errors.iter().map(|e| e.field_name.as_str()).collect();
    assert_eq!(fields, ["name", "price"]);
    assert!(error.errors.iter().all(|e| !e.message.is_empty()));
}

#[tokio::test]
async fn test_product_paging() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/products?page=0&size=5&sort=id").await.unwrap();
    let page: PageBody<ProductResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.number, 0);
    assert_eq!(page.size, 5);
    assert_eq!(page.number_of_elements, 5);
    assert!(page.first);
    assert!(!page.empty);
    assert!(page.total_elements >= 25);
    assert_eq!(page.total_pages, page.total_elements.div_ceil(5));
    assert!(page.content.windows(2).all(|w| w[0].id < w[1].id));
    assert!(page.content.iter().all(|p| p.categories.is_empty()));
}

#[tokio::test]
async fn test_paging_past_the_end_is_empty() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/categories?page=100000&size=10").await.unwrap();
    let page: PageBody<CategoryBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.empty);
    assert!(page.content.is_empty());
    assert!(page.last);
}

#[tokio::test]
async fn test_unknown_sort_property_is_bad_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/products?sort=password").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.path, "/products");
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_create_user_hides_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let request = UserInsertRequest::unique(&[1, 2]);
    let response = server.post("/users", &request).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(body.get("password").is_none());
    assert!(!body.to_string().contains(&request.password));

    let created: UserResponse = serde_json::from_value(body).unwrap();
    assert_eq!(created.email, request.email);
    let authorities: Vec<&str> = created.roles.iter().map(|r| r.authority.as_str()).collect();
    assert_eq!(authorities, ["ROLE_OPERATOR", "ROLE_ADMIN"]);
}

#[tokio::test]
async fn test_replace_user_with_empty_roles() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let request = UserInsertRequest::unique(&[1]);
    let response = server.post("/users", &request).await.unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/users/{}", created.id);

    let update = UserUpdateRequest {
        first_name: "Renamed".to_string(),
        last_name: created.last_name.clone(),
        email: created.email.clone(),
        roles: Vec::new(),
    };
    let response = server.put(&path, &update).await.unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.first_name, "Renamed");
    assert!(updated.roles.is_empty());

    let response = server.get(&path).await.unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(fetched.roles.is_empty());

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_email_is_database_exception() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = UserInsertRequest::unique(&[]);

    let response = server.post("/users", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/users", &request).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error, "Database exception");
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = UserInsertRequest::unique(&[]);
    request.password = "short".to_string();

    let response = server.post("/users", &request).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(error.errors.len(), 1);
    assert_eq!(error.errors[0].field_name, "password");
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/users/not-a-number").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error, "Bad request");
}
