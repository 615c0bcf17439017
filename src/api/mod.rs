//! HTTP query surface for the back-office presentation layer.

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::advisor::Advisor;

pub mod access;
pub mod handlers;

#[derive(Clone)]
pub struct AppState { pub advisor: Arc<Advisor> }

impl AppState {
    pub fn new(advisor: Advisor) -> Self { Self { advisor: Arc::new(advisor) } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-restock-advisor"})) }))
        .route("/api/v1/inventory/trends", get(handlers::trends))
        .route("/api/v1/inventory/alerts", get(handlers::alerts))
        .route("/api/v1/inventory/restock-plan", get(handlers::restock_plan))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
