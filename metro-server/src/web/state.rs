//! Application state for the web layer.

use std::sync::Arc;

use crate::traffic::TrafficRegistry;

/// Shared application state.
///
/// The traffic registry is the single owner of per-city network state;
/// handlers only ever hold it through this shared reference.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TrafficRegistry>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(registry: TrafficRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}
