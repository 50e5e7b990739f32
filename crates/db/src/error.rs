use superlists_core::error::CoreError;

/// Failure from a [`TodoStore`](crate::store::TodoStore) operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error, e.g. an item created for a missing list.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
