//! Mock narrative generator for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::NarrativeError;

use super::provider::{LlmConfig, NarrativeGenerator};

/// Generator that returns a canned response, or a canned failure.
pub struct MockProvider {
    config: LlmConfig,
    outcome: Result<String, NarrativeError>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a mock that succeeds with a fixed response.
    pub fn new() -> Self {
        Self::with_response("Mock insight: the dataset looks consistent.")
    }

    /// Create a mock that answers every prompt with `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            config: LlmConfig {
                model: "mock".to_string(),
                ..Default::default()
            },
            outcome: Ok(response.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock whose every call fails with `error`.
    pub fn failing(error: NarrativeError) -> Self {
        Self {
            outcome: Err(error),
            ..Self::new()
        }
    }

    /// Number of prompts received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrativeGenerator for MockProvider {
    fn generate(&self, _prompt: &str) -> Result<String, NarrativeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
