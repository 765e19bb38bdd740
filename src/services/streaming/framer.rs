//! Event framing and per-session sequence numbering

use crate::types::StreamEvent;
use anyhow::{Context, Result};
use axum::extract::ws::Message;
use futures::{Sink, SinkExt};

/// Serializes events into wire frames, assigning each the next sequence
/// number. One framer per session; the counter starts at 0 and advances
/// once per message regardless of event type.
pub struct EventFramer<S> {
    sink: S,
    message_num: u64,
}

impl<S> EventFramer<S>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            message_num: 0,
        }
    }

    /// Sequence number the next event will carry.
    pub fn message_num(&self) -> u64 {
        self.message_num
    }

    /// Frame one event and write it out. A failed write means the peer is
    /// gone; the caller aborts its loop on the error.
    pub async fn send(&mut self, event: StreamEvent) -> Result<()> {
        let frame = event.to_frame(self.message_num);
        tracing::debug!("emitting {} #{}", event.event_type(), self.message_num);
        self.sink
            .send(Message::Text(frame.to_string().into()))
            .await
            .context("writing stream event to socket")?;
        self.message_num += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::StreamExt;

    fn decode(message: &Message) -> serde_json::Value {
        match message {
            Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sequence_numbers_have_no_gaps() {
        let (tx, rx) = mpsc::unbounded();
        let mut framer = EventFramer::new(tx);

        framer.send(StreamEvent::text("Hel")).await.unwrap();
        framer.send(StreamEvent::text("lo")).await.unwrap();
        assert_eq!(framer.message_num(), 2);
        framer.send(StreamEvent::End).await.unwrap();
        drop(framer);

        let frames: Vec<_> = rx.collect().await;
        let nums: Vec<u64> = frames
            .iter()
            .map(|m| decode(m)["message_num"].as_u64().unwrap())
            .collect();
        assert_eq!(nums, vec![0, 1, 2]);
        assert_eq!(decode(&frames[2])["event"], "stream_end");
    }

    #[tokio::test]
    async fn test_send_fails_when_peer_is_gone() {
        let (tx, rx) = mpsc::unbounded();
        drop(rx);

        let mut framer = EventFramer::new(tx);
        assert!(framer.send(StreamEvent::text("a")).await.is_err());
    }
}
