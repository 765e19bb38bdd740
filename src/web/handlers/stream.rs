//! WebSocket endpoint handlers

use crate::services::streaming::{serve_connection, SessionMode};
use crate::state::AppState;
use crate::web::routes;
use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        State,
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Entry point for both streaming endpoints: resolve the session mode
/// from the path once, at upgrade time, then hand the socket to the
/// session loop.
pub async fn open_stream(
    ws: WebSocketUpgrade,
    uri: Uri,
    State(state): State<AppState>,
) -> Response {
    match routes::route(uri.path()) {
        Some(mode) => ws.on_upgrade(move |socket| handle_socket(socket, state, mode)),
        None => unknown_path(uri).await.into_response(),
    }
}

async fn handle_socket(socket: WebSocket, state: AppState, mode: SessionMode) {
    let connection_id = Uuid::now_v7();
    tracing::info!("connection {} opened ({:?})", connection_id, mode);

    match serve_connection(socket, state.engine.clone(), mode).await {
        Ok(()) => tracing::info!("connection {} closed", connection_id),
        // A failed write means the peer disconnected mid-stream; the
        // session was cancelled, nothing to report upward.
        Err(e) => tracing::debug!("connection {} cancelled: {e:#}", connection_id),
    }
}

/// Unknown paths are not serviced: an operator-visible log line, no
/// protocol message, and no upgrade.
pub async fn unknown_path(uri: Uri) -> StatusCode {
    tracing::warn!("streaming api: unknown path: {}", uri.path());
    StatusCode::NOT_FOUND
}
