//! Application state for the API server

use crate::engine::PlaylistGrabber;
use crate::Config;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned per request (cheap Arc clones); provides access to the engine
/// and the configuration it was started with.
#[derive(Clone)]
pub struct AppState {
    /// The engine instance handling playlist runs
    pub grabber: Arc<PlaylistGrabber>,

    /// Configuration (read access)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(grabber: Arc<PlaylistGrabber>, config: Arc<Config>) -> Self {
        Self { grabber, config }
    }
}
