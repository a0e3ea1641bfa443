//! Application state for the web server.

use std::sync::Arc;

use datalens::DataLens;

/// Bytes per megabyte for the upload limit.
const MEGABYTE: usize = 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Profiler shared by all requests.
    pub lens: Arc<DataLens>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create new application state.
    pub fn new(lens: Arc<DataLens>, max_upload_mb: usize) -> Self {
        Self {
            lens,
            max_upload_bytes: max_upload_mb.saturating_mul(MEGABYTE),
        }
    }

    /// Name of the configured narrative provider (for display).
    pub fn narrator_name(&self) -> Option<&str> {
        self.lens.narrator().map(|n| n.name())
    }
}
