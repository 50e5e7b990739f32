//! List entity model.

use serde::Serialize;
use sqlx::FromRow;
use superlists_core::types::{DbId, Timestamp};

/// A row from the `lists` table.
///
/// Lists have no attributes beyond their identity; the id doubles as the
/// list's public URL segment.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct List {
    pub id: DbId,
    pub created_at: Timestamp,
}

impl List {
    /// Canonical detail-page path for this list.
    pub fn url(&self) -> String {
        list_url(self.id)
    }
}

/// Canonical detail-page path for the list with `id`.
pub fn list_url(id: DbId) -> String {
    format!("/lists/{id}/")
}
