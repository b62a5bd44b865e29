//! Shared application state.

use std::sync::Arc;
use vitrina_core::Config;
use vitrina_storage::ObjectStorage;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn ObjectStorage>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { config, storage }
    }
}
