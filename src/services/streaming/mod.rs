//! Streaming delivery: chunking, framing, and the session loop

mod chunker;
mod framer;
mod session;

pub use chunker::ChunkCursor;
pub use framer::EventFramer;
pub use session::{serve_connection, SessionMode};
