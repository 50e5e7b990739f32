//! Repository for the `items` table.

use sqlx::{PgPool, Postgres, Transaction};
use superlists_core::types::DbId;

use crate::models::item::{CreateItem, Item};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, list_id, text, created_at";

/// Provides create and listing operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    ///
    /// Fails with a foreign key violation (`23503`) if the list does not exist.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (list_id, text) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(input.list_id)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// Insert an item inside an open transaction.
    pub(crate) async fn create_inner(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (list_id, text) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(input.list_id)
            .bind(&input.text)
            .fetch_one(&mut **tx)
            .await
    }

    /// List all items of a list in creation order.
    pub async fn list_by_list(pool: &PgPool, list_id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE list_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Item>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }

    /// Total number of items across all lists.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
