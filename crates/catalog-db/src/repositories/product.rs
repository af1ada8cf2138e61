//! PostgreSQL implementation of ProductRepository
//!
//! A product's categories live in the `product_category` join table. Writes
//! replace the whole link set inside the same transaction as the row itself.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use catalog_core::entities::{Category, Product};
use catalog_core::traits::{ProductRepository, RepoResult};
use catalog_core::value_objects::{EntityId, Page, PageRequest};

use crate::mappers::{product_with_categories, ProductValues};
use crate::models::{CategoryModel, ProductModel};

use super::error::{category_not_found, map_db_error, product_not_found};
use super::query::{begin_read_only, lock_references, order_by_clause, total_from_count};

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("price", "price"),
    ("releaseDate", "release_date"),
];

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new PgProductRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one link row per category
    ///
    /// The categories stay locked until commit, so one deleted since it was
    /// resolved surfaces as not found rather than a key violation.
    async fn insert_links(
        tx: &mut Transaction<'static, Postgres>,
        product_id: i64,
        category_ids: &[i64],
    ) -> RepoResult<()> {
        if category_ids.is_empty() {
            return Ok(());
        }

        if let Some(missing) = lock_references(tx, "categories", category_ids).await? {
            return Err(category_not_found(EntityId::new(missing)));
        }

        sqlx::query(
            r#"
            INSERT INTO product_category (product_id, category_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(product_id)
        .bind(category_ids)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<Product>> {
        let order_by = order_by_clause(request.sort(), SORT_COLUMNS)?;
        let sql = format!(
            "SELECT id, name, description, price, image_url, release_date \
             FROM products {order_by} LIMIT $1 OFFSET $2"
        );

        let mut tx = begin_read_only(&self.pool).await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Product::from).collect(),
            request.clone(),
            total_from_count(total),
        ))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Product>> {
        let mut tx = begin_read_only(&self.pool).await?;

        let model = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, description, price, image_url, release_date
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(model) = model else {
            tx.commit().await.map_err(map_db_error)?;
            return Ok(None);
        };

        let categories = sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT c.id, c.name
            FROM categories c
            JOIN product_category pc ON pc.category_id = c.id
            WHERE pc.product_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(model.id)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(product_with_categories(
            model,
            categories.into_iter().map(Category::from),
        )))
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn insert(&self, product: &Product) -> RepoResult<Product> {
        let values = ProductValues::new(product);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, description, price, image_url, release_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, image_url, release_date
            "#,
        )
        .bind(values.name)
        .bind(values.description)
        .bind(values.price)
        .bind(values.image_url)
        .bind(values.release_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        Self::insert_links(&mut tx, model.id, &values.category_ids).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(product_with_categories(
            model,
            product.categories.iter().cloned(),
        ))
    }

    #[instrument(skip(self, product), fields(id = ?product.id))]
    async fn update(&self, product: &Product) -> RepoResult<()> {
        let id = product.persisted_id()?;
        let values = ProductValues::new(product);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, image_url = $5, release_date = $6
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(values.name)
        .bind(values.description)
        .bind(values.price)
        .bind(values.image_url)
        .bind(values.release_date)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(product_not_found(id));
        }

        sqlx::query("DELETE FROM product_category WHERE product_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        Self::insert_links(&mut tx, id.into_inner(), &values.category_ids).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        // Link rows go with the product (ON DELETE CASCADE)
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(product_not_found(id));
        }

        Ok(())
    }
}
