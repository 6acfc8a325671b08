use std::sync::Arc;

use crate::{config::Config, database::DocumentStore};

/// Application state shared across all HTTP handlers
///
/// Holds the configuration loaded at startup and the document store handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
