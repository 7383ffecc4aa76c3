pub mod config;
pub mod controllers;
pub mod error;
pub mod finder;
pub mod models;
pub mod registry;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use registry::SeatRegistry;

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn SeatRegistry>,
    pub config: config::Config,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cinema Seats API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
