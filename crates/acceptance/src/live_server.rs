//! A real server on an ephemeral port for end-to-end tests.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use superlists_api::config::{ServerConfig, StoreBackend};
use superlists_api::router::build_app_router;
use superlists_api::state::AppState;
use superlists_db::store::{MemoryTodoStore, TodoStore};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Serves the full application router until dropped or shut down.
pub struct LiveServer {
    addr: SocketAddr,
    store: Arc<dyn TodoStore>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl LiveServer {
    /// Start a server over `store` with `config`. The bind address in
    /// `config` is ignored; the server always listens on `127.0.0.1:0`.
    pub async fn start(store: Arc<dyn TodoStore>, config: ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;
        let app = build_app_router(AppState::new(Arc::clone(&store), config));

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "Live server stopped with error");
            }
        });

        tracing::info!(%addr, "Live server started");
        Ok(Self {
            addr,
            store,
            shutdown: Some(tx),
            handle,
        })
    }

    /// Start a server over a fresh in-memory store with default settings.
    pub async fn start_in_memory() -> io::Result<Self> {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            store: StoreBackend::Memory,
            ..ServerConfig::default()
        };
        Self::start(Arc::new(MemoryTodoStore::new()), config).await
    }

    /// Base URL, e.g. `http://127.0.0.1:49152`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The store the server writes to.
    pub fn store(&self) -> &Arc<dyn TodoStore> {
        &self.store
    }

    /// Stop accepting connections and wait for the server task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.handle).await;
    }
}

impl Drop for LiveServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
