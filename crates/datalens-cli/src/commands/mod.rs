//! CLI command implementations.

pub mod analyze;
pub mod serve;

use std::sync::Arc;

use datalens::{GeminiProvider, MockProvider, NarrativeGenerator};
use tracing::{debug, info};

use crate::cli::LlmProviderChoice;

/// Build the narrative generator selected on the command line.
///
/// `Auto` quietly falls back to no generator when `GEMINI_API_KEY` is not
/// set; an explicit `gemini` without a key is an error.
pub fn build_narrator(
    choice: LlmProviderChoice,
) -> Result<Option<Arc<dyn NarrativeGenerator>>, Box<dyn std::error::Error>> {
    let narrator: Option<Arc<dyn NarrativeGenerator>> = match choice {
        LlmProviderChoice::None => None,
        LlmProviderChoice::Mock => Some(Arc::new(MockProvider::new())),
        LlmProviderChoice::Gemini => Some(Arc::new(GeminiProvider::from_env()?)),
        LlmProviderChoice::Auto => match GeminiProvider::from_env() {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                debug!(reason = %e, "Gemini unavailable, using fallback insights");
                None
            }
        },
    };

    match &narrator {
        Some(n) => info!(provider = n.name(), model = %n.config().model, "narrative provider enabled"),
        None => info!("narrative provider disabled, using fallback insights"),
    }

    Ok(narrator)
}
