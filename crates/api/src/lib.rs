//! Superlists web server library.
//!
//! Exposes the core building blocks (config, state, error handling, page
//! rendering, routes) so integration tests, the acceptance harness and the
//! binary entrypoint can all access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
