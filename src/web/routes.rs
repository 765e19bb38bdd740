use crate::services::streaming::SessionMode;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Raw completion streaming endpoint.
pub const STREAM_PATH: &str = "/api/v1/stream";

/// Conversational streaming endpoint.
pub const CHAT_STREAM_PATH: &str = "/api/v1/chat-stream";

/// Resolve a request path to its session mode. Pure; anything but the two
/// fixed endpoints is unknown and will not be serviced.
pub fn route(path: &str) -> Option<SessionMode> {
    match path {
        STREAM_PATH => Some(SessionMode::Stream),
        CHAT_STREAM_PATH => Some(SessionMode::ChatStream),
        _ => None,
    }
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route(STREAM_PATH, get(super::handlers::stream::open_stream))
        .route(CHAT_STREAM_PATH, get(super::handlers::stream::open_stream))
        .fallback(super::handlers::stream::unknown_path)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_known_paths() {
        assert_eq!(route(STREAM_PATH), Some(SessionMode::Stream));
        assert_eq!(route(CHAT_STREAM_PATH), Some(SessionMode::ChatStream));
    }

    #[test]
    fn test_route_unknown_path_is_idempotent() {
        for _ in 0..3 {
            assert_eq!(route("/api/v1/bogus"), None);
        }
        assert_eq!(route(""), None);
        assert_eq!(route("/api/v1/stream/"), None);
    }
}
