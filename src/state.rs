use crate::config::Config;
use crate::engine::TextEngine;
use std::sync::Arc;

/// Shared application state handed to every connection handler. The
/// engine is the only resource shared across connections; it enforces its
/// own access discipline.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<dyn TextEngine>,
}

impl AppState {
    pub fn new(engine: Arc<dyn TextEngine>, config: Config) -> Self {
        Self {
            config: Arc::new(config),
            engine,
        }
    }
}
