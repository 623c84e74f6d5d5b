pub mod download;
pub mod health;
pub mod meta;
pub mod resolve;
pub mod search;

use crate::models::catalog::CatalogBackend;
use crate::services::proxy::DownloadProxy;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub type Backend = Arc<dyn CatalogBackend + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub proxy: DownloadProxy,
}

impl AppState {
    pub fn new(backend: Backend, proxy: DownloadProxy) -> Self {
        Self { backend, proxy }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(meta::root))
        .route("/status", get(health::health_check))
        .route("/columns", get(meta::columns))
        .route("/search/title", get(search::search_by_title))
        .route("/search/author", get(search::search_by_author))
        .route("/search/title/filtered", post(search::search_title_filtered))
        .route("/search/author/filtered", post(search::search_author_filtered))
        .route("/resolve", post(resolve::resolve_download_links))
        .route("/download", get(download::download_file))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
