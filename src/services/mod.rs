pub mod streaming;

pub use streaming::{ChunkCursor, EventFramer, SessionMode};
