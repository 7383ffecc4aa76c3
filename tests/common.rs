// Shared fixtures; not every test binary uses all of them.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;

use cinema_seats::{
    config::{AppConfig, Config, DatabaseConfig},
    registry::{self, seed::SeedLayout, SeatRegistry},
    AppState,
};

pub async fn memory_registry() -> Arc<dyn SeatRegistry> {
    let registry = registry::connect("sqlite::memory:", 1)
        .await
        .expect("open in-memory registry");
    registry
        .seed_if_empty(&SeedLayout::default())
        .await
        .expect("seed registry");
    registry
}

pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "cinema_seats=debug".to_string(),
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
        },
    }
}

pub async fn test_app() -> (Router, Arc<dyn SeatRegistry>) {
    let registry = memory_registry().await;
    let state = Arc::new(AppState {
        registry: registry.clone(),
        config: test_config(),
    });
    (cinema_seats::router(state), registry)
}
