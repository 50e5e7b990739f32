//! End-to-end harness for the superlists server.
//!
//! [`LiveServer`] runs the real router on an ephemeral port; [`Browser`]
//! plays a visitor who loads pages, types into inputs and submits forms over
//! HTTP; [`wait_for_row_in_list_table`] waits for a rendered row using the
//! bounded polling combinator from `superlists_core`.

pub mod browser;
pub mod error;
pub mod live_server;
pub mod page;
pub mod wait;

pub use browser::Browser;
pub use error::DriverError;
pub use live_server::LiveServer;
pub use page::Page;
pub use wait::{wait_for_row_in_list_table, wait_for_row_in_table};
