use crate::types::message::History;
use serde_json::json;

/// One outbound protocol event. The conversational variant reuses the
/// `text_stream` discriminator on the wire, carrying `history` instead of
/// `text`; `stream_end` terminates every session exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Text { text: String },
    History { history: History },
    End,
}

impl StreamEvent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn history(history: History) -> Self {
        Self::History { history }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Text { .. } | Self::History { .. } => "text_stream",
            Self::End => "stream_end",
        }
    }

    /// Build the self-describing wire frame, tagged with the sequence
    /// number assigned by the framer.
    pub fn to_frame(&self, message_num: u64) -> serde_json::Value {
        match self {
            Self::Text { text } => json!({
                "event": "text_stream",
                "message_num": message_num,
                "text": text,
            }),
            Self::History { history } => json!({
                "event": "text_stream",
                "message_num": message_num,
                "history": history,
            }),
            Self::End => json!({
                "event": "stream_end",
                "message_num": message_num,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_frame_shape() {
        let frame = StreamEvent::text("Hel").to_frame(0);
        assert_eq!(frame["event"], "text_stream");
        assert_eq!(frame["message_num"], 0);
        assert_eq!(frame["text"], "Hel");
    }

    #[test]
    fn test_end_frame_has_no_payload() {
        let frame = StreamEvent::End.to_frame(3);
        assert_eq!(frame["event"], "stream_end");
        assert_eq!(frame["message_num"], 3);
        assert!(frame.get("text").is_none());
        assert!(frame.get("history").is_none());
    }

    #[test]
    fn test_history_frame_reuses_text_stream_discriminator() {
        let mut history = History::default();
        history.push("hi", "there");
        let frame = StreamEvent::history(history).to_frame(1);
        assert_eq!(frame["event"], "text_stream");
        assert_eq!(frame["history"]["visible"][0][0], "hi");
        assert_eq!(frame["history"]["internal"][0][1], "there");
    }
}
