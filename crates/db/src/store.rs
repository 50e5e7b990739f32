//! Storage port for lists and items.
//!
//! Handlers talk to a `dyn TodoStore` so they can run against Postgres in
//! production and against [`MemoryTodoStore`] in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use superlists_core::error::CoreError;
use superlists_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::item::{CreateItem, Item};
use crate::models::list::List;
use crate::repositories::{ItemRepo, ListRepo};
use crate::DbPool;

/// PostgreSQL error code for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Create and read operations over lists and their items.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Create a new, empty list.
    async fn create_list(&self) -> StoreResult<List>;

    /// Create an item owned by `list_id`.
    ///
    /// Fails with [`CoreError::NotFound`] if the list does not exist.
    async fn create_item(&self, list_id: DbId, text: &str) -> StoreResult<Item>;

    /// Look up a list by id.
    async fn get_list(&self, id: DbId) -> StoreResult<Option<List>>;

    /// All items of `list_id` in creation order.
    async fn list_items_for(&self, list_id: DbId) -> StoreResult<Vec<Item>>;

    async fn count_lists(&self) -> StoreResult<i64>;

    async fn count_items(&self) -> StoreResult<i64>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Create a list and its first item.
    async fn create_list_with_item(&self, text: &str) -> StoreResult<(List, Item)> {
        let list = self.create_list().await?;
        let item = self.create_item(list.id, text).await?;
        Ok((list, item))
    }
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// [`TodoStore`] backed by the Postgres repositories.
#[derive(Clone)]
pub struct PgTodoStore {
    pool: DbPool,
}

impl PgTodoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn create_list(&self) -> StoreResult<List> {
        Ok(ListRepo::create(&self.pool).await?)
    }

    async fn create_item(&self, list_id: DbId, text: &str) -> StoreResult<Item> {
        let input = CreateItem {
            list_id,
            text: text.to_string(),
        };
        ItemRepo::create(&self.pool, &input).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                StoreError::Core(CoreError::NotFound {
                    entity: "List",
                    id: list_id,
                })
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn get_list(&self, id: DbId) -> StoreResult<Option<List>> {
        Ok(ListRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_items_for(&self, list_id: DbId) -> StoreResult<Vec<Item>> {
        Ok(ItemRepo::list_by_list(&self.pool, list_id).await?)
    }

    async fn count_lists(&self) -> StoreResult<i64> {
        Ok(ListRepo::count(&self.pool).await?)
    }

    async fn count_items(&self) -> StoreResult<i64> {
        Ok(ItemRepo::count(&self.pool).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn create_list_with_item(&self, text: &str) -> StoreResult<(List, Item)> {
        Ok(ListRepo::create_with_first_item(&self.pool, text).await?)
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryTables {
    lists: HashMap<DbId, List>,
    items: Vec<Item>,
    next_list_id: DbId,
    next_item_id: DbId,
}

/// [`TodoStore`] that keeps rows in process memory.
///
/// Ids are assigned from 1 upward, mirroring BIGSERIAL.
#[derive(Default)]
pub struct MemoryTodoStore {
    tables: RwLock<MemoryTables>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryTables {
    fn insert_list(&mut self) -> List {
        self.next_list_id += 1;
        let list = List {
            id: self.next_list_id,
            created_at: chrono::Utc::now(),
        };
        self.lists.insert(list.id, list.clone());
        list
    }

    fn insert_item(&mut self, list_id: DbId, text: &str) -> StoreResult<Item> {
        if !self.lists.contains_key(&list_id) {
            return Err(CoreError::NotFound {
                entity: "List",
                id: list_id,
            }
            .into());
        }
        self.next_item_id += 1;
        let item = Item {
            id: self.next_item_id,
            list_id,
            text: text.to_string(),
            created_at: chrono::Utc::now(),
        };
        self.items.push(item.clone());
        Ok(item)
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create_list(&self) -> StoreResult<List> {
        Ok(self.tables.write().await.insert_list())
    }

    async fn create_item(&self, list_id: DbId, text: &str) -> StoreResult<Item> {
        self.tables.write().await.insert_item(list_id, text)
    }

    async fn get_list(&self, id: DbId) -> StoreResult<Option<List>> {
        Ok(self.tables.read().await.lists.get(&id).cloned())
    }

    async fn list_items_for(&self, list_id: DbId) -> StoreResult<Vec<Item>> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .iter()
            .filter(|item| item.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn count_lists(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.lists.len() as i64)
    }

    async fn count_items(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.items.len() as i64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
