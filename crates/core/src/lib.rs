//! Domain building blocks shared by the storage layer, the HTTP server and
//! the acceptance harness.

pub mod error;
pub mod item_text;
pub mod polling;
pub mod types;
