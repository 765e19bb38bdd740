//! Generation engine boundary

use crate::types::{GenerationParams, History};
use anyhow::Result;

/// Lazy, finite, non-restartable sequence of output snapshots. A failed
/// pull aborts the generation phase of the session consuming it.
pub type SnapshotIter<T> = Box<dyn Iterator<Item = Result<T>> + Send>;

/// The generation engine consumed by the protocol layer.
///
/// Raw snapshots carry the full accumulated text so far, each a
/// superset-prefix of the previous; chat snapshots carry the whole
/// conversation state. The engine is handed parameters with `stream`
/// already forced on, so it yields intermediate states rather than only a
/// final result.
pub trait TextEngine: Send + Sync {
    fn generate_reply(
        &self,
        prompt: &str,
        params: &GenerationParams,
        stopping_strings: &[String],
    ) -> SnapshotIter<String>;

    fn generate_chat_reply(
        &self,
        user_input: &str,
        params: &GenerationParams,
        regenerate: bool,
        continue_: bool,
    ) -> SnapshotIter<History>;
}

/// Canned engine used when no model is wired in. Streams a fixed reply
/// word by word so the protocol path can be exercised end to end.
pub struct StubEngine;

impl StubEngine {
    pub fn new() -> Self {
        tracing::info!("no model wired in, running the stub engine");
        Self
    }

    fn reply_for(input: &str) -> String {
        format!(
            "This is a stub reply to '{}'. Wire a real TextEngine into the \
             application state to generate text.",
            input.chars().take(50).collect::<String>()
        )
    }

    fn accumulate(reply: &str, limit: usize, stopping_strings: &[String]) -> Vec<String> {
        let mut snapshots = Vec::new();
        let mut accumulated = String::new();
        'words: for (i, word) in reply.split_inclusive(' ').enumerate() {
            if i >= limit {
                break;
            }
            accumulated.push_str(word);
            for stop in stopping_strings {
                if let Some(at) = accumulated.find(stop.as_str()) {
                    accumulated.truncate(at);
                    snapshots.push(accumulated.clone());
                    break 'words;
                }
            }
            snapshots.push(accumulated.clone());
        }
        snapshots
    }
}

impl Default for StubEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine for StubEngine {
    fn generate_reply(
        &self,
        prompt: &str,
        params: &GenerationParams,
        stopping_strings: &[String],
    ) -> SnapshotIter<String> {
        let reply = Self::reply_for(prompt);
        let limit = params.max_new_tokens().unwrap_or(u64::MAX) as usize;
        let snapshots = Self::accumulate(&reply, limit, stopping_strings);
        Box::new(snapshots.into_iter().map(Ok))
    }

    fn generate_chat_reply(
        &self,
        user_input: &str,
        params: &GenerationParams,
        _regenerate: bool,
        _continue: bool,
    ) -> SnapshotIter<History> {
        // The stub holds no prior history, so regenerate/continue have
        // nothing to act on.
        let reply = Self::reply_for(user_input);
        let limit = params.max_new_tokens().unwrap_or(u64::MAX) as usize;

        let mut base = History::default();
        base.push(user_input, "");

        let snapshots: Vec<History> = Self::accumulate(&reply, limit, &[])
            .into_iter()
            .map(|accumulated| {
                let mut history = base.clone();
                history.set_last_reply(accumulated.trim_end());
                history
            })
            .collect();
        Box::new(snapshots.into_iter().map(Ok))
    }
}
