pub mod events;
pub mod message;

pub use events::StreamEvent;
pub use message::{build_parameters, ChatStreamRequest, GenerationParams, History, StreamRequest};
