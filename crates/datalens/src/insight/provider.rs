//! Narrative generator trait and configuration.

use std::time::Duration;

use crate::error::NarrativeError;

/// Configuration shared by narrative generators.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "gemini-1.5-flash").
    pub model: String,

    /// Maximum tokens in the response.
    pub max_tokens: u32,

    /// Sampling temperature (0.0-1.0).
    pub temperature: f64,

    /// Upper bound on a single request, connect included.
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            max_tokens: 1024,
            temperature: 0.3,
            timeout: Duration::from_secs(30),
        }
    }
}

/// An external collaborator that turns a prompt into prose.
///
/// Implementations must be thread-safe (Send + Sync) so one generator can
/// serve concurrent requests. A call makes at most one attempt; retrying
/// is left to the caller.
pub trait NarrativeGenerator: Send + Sync {
    /// Generate text for a prompt.
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError>;

    /// Get the configuration for this generator.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this generator (for logging/debugging).
    fn name(&self) -> &str;
}
