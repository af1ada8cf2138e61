//! PostgreSQL implementation of UserRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use catalog_core::entities::{Role, User};
use catalog_core::traits::{RepoResult, UserRepository};
use catalog_core::value_objects::{EntityId, Page, PageRequest};

use crate::mappers::{user_with_roles, UserValues};
use crate::models::{UserModel, UserRoleModel};

use super::error::{map_db_error, role_not_found, user_not_found};
use super::query::{begin_read_only, lock_references, order_by_clause, total_from_count};

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("email", "email"),
];

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the roles of several users at once, grouped by user id
    async fn load_roles(
        tx: &mut Transaction<'static, Postgres>,
        user_ids: &[i64],
    ) -> RepoResult<HashMap<i64, Vec<Role>>> {
        let rows = sqlx::query_as::<_, UserRoleModel>(
            r#"
            SELECT ur.user_id, r.id, r.authority
            FROM roles r
            JOIN user_role ur ON ur.role_id = r.id
            WHERE ur.user_id = ANY($1)
            ORDER BY ur.user_id, r.id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&mut **tx)
        .await
        .map_err(map_db_error)?;

        let mut grouped: HashMap<i64, Vec<Role>> = HashMap::new();
        for row in rows {
            grouped.entry(row.user_id).or_default().push(Role::from(row));
        }
        Ok(grouped)
    }

    /// Insert one link row per role
    async fn insert_links(
        tx: &mut Transaction<'static, Postgres>,
        user_id: i64,
        role_ids: &[i64],
    ) -> RepoResult<()> {
        if role_ids.is_empty() {
            return Ok(());
        }

        if let Some(missing) = lock_references(tx, "roles", role_ids).await? {
            return Err(role_not_found(EntityId::new(missing)));
        }

        sqlx::query(
            r#"
            INSERT INTO user_role (user_id, role_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(user_id)
        .bind(role_ids)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<User>> {
        let order_by = order_by_clause(request.sort(), SORT_COLUMNS)?;
        let sql = format!(
            "SELECT id, first_name, last_name, email \
             FROM users {order_by} LIMIT $1 OFFSET $2"
        );

        let mut tx = begin_read_only(&self.pool).await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut roles = Self::load_roles(&mut tx, &ids).await?;

        tx.commit().await.map_err(map_db_error)?;

        let content = rows
            .into_iter()
            .map(|row| {
                let user_roles = roles.remove(&row.id).unwrap_or_default();
                user_with_roles(row, user_roles)
            })
            .collect();

        Ok(Page::new(content, request.clone(), total_from_count(total)))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>> {
        let mut tx = begin_read_only(&self.pool).await?;

        let model = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, first_name, last_name, email
            FROM users
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

        let mut roles = Self::load_roles(&mut tx, &[model.id]).await?;
        tx.commit().await.map_err(map_db_error)?;

        let user_roles = roles.remove(&model.id).unwrap_or_default();
        Ok(Some(user_with_roles(model, user_roles)))
    }

    #[instrument(skip(self, user, password_hash), fields(email = %user.email))]
    async fn insert(&self, user: &User, password_hash: &str) -> RepoResult<User> {
        let values = UserValues::new(user);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email
            "#,
        )
        .bind(values.first_name)
        .bind(values.last_name)
        .bind(values.email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        Self::insert_links(&mut tx, model.id, &values.role_ids).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(user_with_roles(model, user.roles.iter().cloned()))
    }

    #[instrument(skip(self, user), fields(id = ?user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let id = user.persisted_id()?;
        let values = UserValues::new(user);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(values.first_name)
        .bind(values.last_name)
        .bind(values.email)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        sqlx::query("DELETE FROM user_role WHERE user_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        Self::insert_links(&mut tx, id.into_inner(), &values.role_ids).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: EntityId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT password_hash FROM users WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
