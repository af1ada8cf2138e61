//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use catalog_core::entities::Category;
use catalog_core::traits::{CategoryRepository, RepoResult};
use catalog_core::value_objects::{EntityId, Page, PageRequest};

use crate::models::CategoryModel;

use super::error::{category_not_found, map_db_error};
use super::query::{begin_read_only, order_by_clause, total_from_count};

const SORT_COLUMNS: &[(&str, &str)] = &[("id", "id"), ("name", "name")];

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<Category>> {
        let order_by = order_by_clause(request.sort(), SORT_COLUMNS)?;
        let mut tx = begin_read_only(&self.pool).await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, CategoryModel>(&format!(
            "SELECT id, name FROM categories {order_by} LIMIT $1 OFFSET $2"
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Category::from).collect(),
            request.clone(),
            total_from_count(total),
        ))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT id, name
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Category::from))
    }

    #[instrument(skip(self))]
    async fn insert(&self, category: &Category) -> RepoResult<Category> {
        let model = sqlx::query_as::<_, CategoryModel>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&category.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Category::from(model))
    }

    #[instrument(skip(self))]
    async fn update(&self, category: &Category) -> RepoResult<()> {
        let id = category.persisted_id()?;

        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(&category.name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(category_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(category_not_found(id));
        }

        Ok(())
    }
}
