use anyhow::Result;
use genstream::{web, AppState, Config, StubEngine};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genstream=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting genstream");

    // Load configuration
    let config = Config::from_env()?;

    // No model is wired into the binary; run the built-in stub engine.
    // Embedders supply a real TextEngine through AppState.
    let engine = Arc::new(StubEngine::new());

    // Create application state
    let state = AppState::new(engine, config);

    // The server runs on its own background task; the binary has nothing
    // else to do, so wait on it.
    web::start_server(state).await??;

    Ok(())
}
