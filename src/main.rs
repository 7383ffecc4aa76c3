use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_seats::{
    config::Config,
    registry::{self, seed::SeedLayout},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cinema Seats API");

    // Connect to the store and make sure the seat layout exists
    let registry = registry::connect(&config.database.url, config.database.pool_size).await?;
    info!("Database connected");

    let seeded = registry.seed_if_empty(&SeedLayout::default()).await?;
    if seeded > 0 {
        info!("Seeded {} seats into empty registry", seeded);
    }

    let addr = format!("{}:{}", config.app.host, config.app.port);
    let state = Arc::new(AppState { registry, config });

    let app = cinema_seats::router(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
