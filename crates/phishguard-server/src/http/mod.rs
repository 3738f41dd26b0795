//! HTTP surface: `/predict`, `/feature-importance`, and service metadata.

pub mod error;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use phishguard::{ImportanceTable, Predictor};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Shared read-only state. Cloned per request, so everything sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub importance: Option<Arc<ImportanceTable>>,
}

impl AppState {
    pub fn new(predictor: Predictor, importance: Option<ImportanceTable>) -> Self {
        Self {
            predictor: Arc::new(predictor),
            importance: importance.map(Arc::new),
        }
    }
}

/// Read the importance table if it exists. A missing or unreadable table is
/// not fatal; the endpoint answers 404 instead.
pub fn load_importance(path: &Path) -> Option<ImportanceTable> {
    if !path.exists() {
        info!(path = %path.display(), "no feature importance table");
        return None;
    }
    match ImportanceTable::load_csv(path) {
        Ok(table) => {
            info!(path = %path.display(), rows = table.len(), "feature importance loaded");
            Some(table)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable feature importance");
            None
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/feature-importance", get(handlers::feature_importance))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
