use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::context::Backend;
use crate::storage::CollectionStore;

mod handlers;
mod models;

use handlers::{
    add_word, capabilities, create_collection, health, list_collections, list_words, not_found,
    remove_word,
};

pub type SharedStore = Arc<dyn CollectionStore + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub backend: Backend,
    pub started_at: std::time::SystemTime,
}

impl AppState {
    pub fn new(store: SharedStore, backend: Backend) -> Self {
        Self {
            store,
            backend,
            started_at: std::time::SystemTime::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/capabilities", get(capabilities))
        .route("/collections", get(list_collections).post(create_collection))
        .route("/collections/:name/words", get(list_words).post(add_word))
        .route("/collections/:name/words/:word", delete(remove_word))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
