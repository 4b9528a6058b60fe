//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and middleware via the `State`
//! extractor. Both fields are `Arc`s so cloning per request is cheap.

use std::sync::Arc;

use crate::backend::BackendApi;
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub backend: Arc<dyn BackendApi>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, backend: Arc<dyn BackendApi>) -> Self {
        Self { config: Arc::new(config), backend }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
