//! Request handlers.
//!
//! Handlers read from and write to the [`TodoStore`](superlists_db::store::TodoStore)
//! in `AppState`, hand view models to the page renderer, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod lists;
