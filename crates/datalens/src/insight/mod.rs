//! Insight generation for a dataset summary.
//!
//! An insight is either produced by an external [`NarrativeGenerator`] or,
//! when none is configured, assembled locally from fixed review hints and
//! the summary. Generation never fails: a generator error becomes a
//! [`InsightSource::Failed`] report carrying the reason.
//!
//! # Supported Providers
//!
//! - **Gemini** - Google Generative Language API (requires `GEMINI_API_KEY`)
//! - **Mock** - canned responses for tests and offline runs
//!
//! # Example
//!
//! ```no_run
//! use datalens::{DataLens, GeminiProvider};
//!
//! let lens = DataLens::new().with_narrator(GeminiProvider::from_env().unwrap());
//! ```

mod gemini;
mod mock;
mod prompts;
mod provider;
mod report;

use tracing::{debug, warn};

pub use gemini::{API_KEY_VAR, GeminiProvider, MODEL_VAR};
pub use mock::MockProvider;
pub use prompts::{FALLBACK_HEADER, FALLBACK_HINTS, insight_prompt};
pub use provider::{LlmConfig, NarrativeGenerator};
pub use report::{InsightReport, InsightSource};

/// Produce an insight for `summary`, with or without a generator.
pub fn generate_insight(summary: &str, narrator: Option<&dyn NarrativeGenerator>) -> InsightReport {
    let Some(narrator) = narrator else {
        return InsightReport::fallback(summary);
    };

    match narrator.generate(&insight_prompt(summary)) {
        Ok(text) => {
            debug!(provider = narrator.name(), chars = text.len(), "narrative generated");
            InsightReport::generated(text)
        }
        Err(e) => {
            warn!(provider = narrator.name(), error = %e, "narrative generation failed");
            InsightReport::failed(e)
        }
    }
}
