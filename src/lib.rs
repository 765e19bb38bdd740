// Core modules
pub mod config;
pub mod engine;
pub mod services;
pub mod state;
pub mod types;
pub mod web;

// Re-exports
pub use config::Config;
pub use engine::{SnapshotIter, StubEngine, TextEngine};
pub use state::AppState;
pub use types::StreamEvent;
