//! Repository for the `lists` table.

use sqlx::PgPool;
use superlists_core::types::DbId;

use crate::models::item::{CreateItem, Item};
use crate::models::list::List;
use crate::repositories::ItemRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at";

/// Provides create and lookup operations for lists.
pub struct ListRepo;

impl ListRepo {
    /// Insert a new, empty list, returning the created row.
    pub async fn create(pool: &PgPool) -> Result<List, sqlx::Error> {
        let query = format!("INSERT INTO lists DEFAULT VALUES RETURNING {COLUMNS}");
        sqlx::query_as::<_, List>(&query).fetch_one(pool).await
    }

    /// Insert a new list together with its first item in one transaction.
    pub async fn create_with_first_item(
        pool: &PgPool,
        text: &str,
    ) -> Result<(List, Item), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO lists DEFAULT VALUES RETURNING {COLUMNS}");
        let list = sqlx::query_as::<_, List>(&query)
            .fetch_one(&mut *tx)
            .await?;

        let input = CreateItem {
            list_id: list.id,
            text: text.to_string(),
        };
        let item = ItemRepo::create_inner(&mut tx, &input).await?;

        tx.commit().await?;
        Ok((list, item))
    }

    /// Find a list by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists WHERE id = $1");
        sqlx::query_as::<_, List>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of lists.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lists")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Permanently delete a list and, by cascade, its items.
    /// Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
