//! Generation session: the per-connection request/streaming loop

use crate::engine::{SnapshotIter, TextEngine};
use crate::services::streaming::{ChunkCursor, EventFramer};
use crate::types::{build_parameters, ChatStreamRequest, StreamEvent, StreamRequest};
use anyhow::Result;
use axum::extract::ws::Message;
use futures::{Sink, Stream, StreamExt};
use std::sync::Arc;

/// The two generation modes, fixed per connection at route time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Stream,
    ChatStream,
}

/// Serve one connection: read a request, stream the reply, and go back to
/// waiting for the next request on the same connection. Each request is
/// one session with its own sequence numbering starting at 0.
///
/// Returns `Err` only on transport write failure; the peer closing the
/// read side ends the loop normally.
pub async fn serve_connection<T>(
    mut transport: T,
    engine: Arc<dyn TextEngine>,
    mode: SessionMode,
) -> Result<()>
where
    T: Stream<Item = Result<Message, axum::Error>> + Sink<Message> + Unpin,
    <T as Sink<Message>>::Error: std::error::Error + Send + Sync + 'static,
{
    while let Some(inbound) = transport.next().await {
        let inbound = match inbound {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!("read failed, closing connection: {e}");
                break;
            }
        };
        let text = match inbound {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by the transport layer; binary frames
            // have no meaning in this protocol.
            _ => continue,
        };

        match mode {
            SessionMode::Stream => {
                let request: StreamRequest = match serde_json::from_str(text.as_str()) {
                    Ok(request) => request,
                    Err(e) => {
                        tracing::warn!("malformed stream request: {e}");
                        continue;
                    }
                };
                let mut params = build_parameters(request.options, false);
                let stopping_strings = params.take_stopping_strings();
                params.force_stream();

                tracing::debug!("streaming completion for {}-byte prompt", request.prompt.len());
                let snapshots = engine.generate_reply(&request.prompt, &params, &stopping_strings);
                stream_reply(&mut transport, snapshots).await?;
            }
            SessionMode::ChatStream => {
                let request: ChatStreamRequest = match serde_json::from_str(text.as_str()) {
                    Ok(request) => request,
                    Err(e) => {
                        tracing::warn!("malformed chat-stream request: {e}");
                        continue;
                    }
                };
                let mut params = build_parameters(request.options, true);
                params.force_stream();

                let snapshots = engine.generate_chat_reply(
                    &request.user_input,
                    &params,
                    request.regenerate,
                    request.continue_,
                );
                stream_chat_reply(&mut transport, snapshots).await?;
            }
        }
    }
    Ok(())
}

/// Raw completion: diff each snapshot against what was already sent and
/// emit only the new suffix. Terminates with exactly one `stream_end`,
/// even when the engine produced nothing or failed mid-generation.
async fn stream_reply<S>(sink: S, snapshots: SnapshotIter<String>) -> Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let mut framer = EventFramer::new(sink);
    let mut cursor = ChunkCursor::new();

    for snapshot in snapshots {
        let snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("generation failed: {e:#}");
                break;
            }
        };
        if let Some(chunk) = cursor.next_chunk(&snapshot) {
            framer.send(StreamEvent::text(chunk)).await?;
            // Let the transport flush before the next engine pull.
            tokio::task::yield_now().await;
        }
    }

    framer.send(StreamEvent::End).await
}

/// Conversational turn: every snapshot carries the whole conversation
/// state, delivered undiffed.
async fn stream_chat_reply<S>(sink: S, snapshots: SnapshotIter<crate::types::History>) -> Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let mut framer = EventFramer::new(sink);

    for snapshot in snapshots {
        let history = match snapshot {
            Ok(history) => history,
            Err(e) => {
                tracing::error!("chat generation failed: {e:#}");
                break;
            }
        };
        framer.send(StreamEvent::history(history)).await?;
        tokio::task::yield_now().await;
    }

    framer.send(StreamEvent::End).await
}
