use std::sync::Arc;

use superlists_db::store::TodoStore;

use crate::config::ServerConfig;
use crate::render::{HtmlRenderer, PageRenderer};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// List and item storage.
    pub store: Arc<dyn TodoStore>,
    /// Page renderer used by the HTML handlers.
    pub renderer: Arc<dyn PageRenderer>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State with the default HTML renderer.
    pub fn new(store: Arc<dyn TodoStore>, config: ServerConfig) -> Self {
        Self {
            store,
            renderer: Arc::new(HtmlRenderer),
            config: Arc::new(config),
        }
    }
}
