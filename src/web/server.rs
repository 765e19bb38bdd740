use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// Bind and accept connections until shutdown. Each accepted connection
/// is served by its own task; no protocol-level keepalive pings run, so
/// an idle probe can never drop a long-running generation.
pub async fn run_server(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr();
    let app = create_app(state.clone());

    if state.config.share {
        tokio::spawn(super::share::announce(state.config.port));
    } else {
        tracing::info!(
            "🌐 Starting streaming server at ws://{}{}",
            addr,
            super::routes::STREAM_PATH
        );
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Spawn the accept loop on a background task so starting the server does
/// not block the caller's control flow.
pub fn start_server(state: AppState) -> JoinHandle<Result<()>> {
    tokio::spawn(run_server(state))
}

pub fn create_app(state: AppState) -> Router {
    super::routes::create_routes(state).layer(TraceLayer::new_for_http())
}
