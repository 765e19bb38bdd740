use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound request on the raw streaming endpoint. Everything besides the
/// prompt is an opaque generation option passed through to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRequest {
    pub prompt: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Inbound request on the conversational streaming endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStreamRequest {
    pub user_input: String,
    #[serde(default)]
    pub regenerate: bool,
    #[serde(default, rename = "_continue")]
    pub continue_: bool,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Conversation state delivered whole on every conversational snapshot.
/// `internal` holds the raw exchange pairs, `visible` what the client
/// renders; both are `[user, reply]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub internal: Vec<[String; 2]>,
    pub visible: Vec<[String; 2]>,
}

impl History {
    pub fn push(&mut self, user: &str, reply: &str) {
        self.internal.push([user.to_string(), reply.to_string()]);
        self.visible.push([user.to_string(), reply.to_string()]);
    }

    /// Replace the reply side of the last exchange, growing it as the
    /// engine produces more output.
    pub fn set_last_reply(&mut self, reply: &str) {
        if let Some(pair) = self.internal.last_mut() {
            pair[1] = reply.to_string();
        }
        if let Some(pair) = self.visible.last_mut() {
            pair[1] = reply.to_string();
        }
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Engine parameter map assembled from a request body. The protocol layer
/// never interprets the options beyond the `stream` flag and the stopping
/// strings; everything else is opaque to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    options: Map<String, Value>,
}

impl GenerationParams {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn max_new_tokens(&self) -> Option<u64> {
        self.options.get("max_new_tokens").and_then(Value::as_u64)
    }

    pub fn stream(&self) -> bool {
        self.options
            .get("stream")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The engine only yields intermediate snapshots when streaming is on,
    /// so the session forces it regardless of what the client sent.
    pub fn force_stream(&mut self) {
        self.options.insert("stream".to_string(), Value::Bool(true));
    }

    /// Remove and return the stopping strings; they are handed to the
    /// engine separately rather than left embedded in the options.
    pub fn take_stopping_strings(&mut self) -> Vec<String> {
        match self.options.remove("stopping_strings") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Assemble the engine parameter map from an inbound request body.
/// Idempotent per call; opaque options pass through untouched. Raw mode
/// guarantees a `stopping_strings` entry so extraction always succeeds.
pub fn build_parameters(options: Map<String, Value>, chat: bool) -> GenerationParams {
    let mut params = GenerationParams { options };
    if !chat && !params.options.contains_key("stopping_strings") {
        params
            .options
            .insert("stopping_strings".to_string(), Value::Array(Vec::new()));
    }
    params
}
