//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod item_repo;
pub mod list_repo;

pub use item_repo::ItemRepo;
pub use list_repo::ListRepo;
