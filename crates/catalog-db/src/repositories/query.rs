//! Query building blocks shared by the repositories

use sqlx::{PgPool, Postgres, Transaction};

use catalog_core::error::DomainError;
use catalog_core::traits::RepoResult;
use catalog_core::value_objects::SortOrder;

use super::error::map_db_error;

/// Begin a transaction in which count and slice see the same snapshot
pub async fn begin_read_only(pool: &PgPool) -> RepoResult<Transaction<'static, Postgres>> {
    let mut tx = pool.begin().await.map_err(map_db_error)?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;
    Ok(tx)
}

/// Lock referenced rows against deletion until the transaction ends
///
/// Returns the first id in `ids` that has no row in `table`.
pub async fn lock_references(
    tx: &mut Transaction<'static, Postgres>,
    table: &str,
    ids: &[i64],
) -> RepoResult<Option<i64>> {
    if ids.is_empty() {
        return Ok(None);
    }

    let sql = format!("SELECT id FROM {table} WHERE id = ANY($1) FOR SHARE");
    let found = sqlx::query_scalar::<_, i64>(&sql)
        .bind(ids)
        .fetch_all(&mut **tx)
        .await
        .map_err(map_db_error)?;

    Ok(first_missing(ids, &found))
}

fn first_missing(ids: &[i64], found: &[i64]) -> Option<i64> {
    ids.iter().copied().find(|id| !found.contains(id))
}

/// Build an `ORDER BY` clause from sort criteria
///
/// `columns` maps each sortable property to its column. Column names only ever
/// come from that table, never from the request. `id` is appended as a final
/// tiebreak so paging is stable.
pub fn order_by_clause(sort: &[SortOrder], columns: &[(&str, &str)]) -> RepoResult<String> {
    let mut terms = Vec::with_capacity(sort.len() + 1);
    for order in sort {
        let column = columns
            .iter()
            .find(|(property, _)| *property == order.property)
            .map(|(_, column)| *column)
            .ok_or_else(|| DomainError::InvalidSort(order.property.clone()))?;
        terms.push(format!("{column} {}", order.direction.as_sql()));
    }
    if !sort.iter().any(|order| order.property == "id") {
        terms.push("id ASC".to_string());
    }
    Ok(format!("ORDER BY {}", terms.join(", ")))
}

/// Convert a `COUNT(*)` result to the page total
pub fn total_from_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
