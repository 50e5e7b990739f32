//! Item entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use superlists_core::types::{DbId, Timestamp};

/// An item row from the `items` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub list_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new item under an existing list.
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub list_id: DbId,
    pub text: String,
}
