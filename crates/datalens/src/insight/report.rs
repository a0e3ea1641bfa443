//! Insight text and the strategy that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::prompts;

/// How an insight report was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    /// No generator configured; canned hints plus the summary.
    Fallback,
    /// Text returned by the narrative generator.
    Generated,
    /// The generator was called and failed.
    Failed,
}

impl InsightSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightSource::Fallback => "fallback",
            InsightSource::Generated => "generated",
            InsightSource::Failed => "failed",
        }
    }
}

impl fmt::Display for InsightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insight text for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub source: InsightSource,
    pub text: String,
}

impl InsightReport {
    /// Report built locally from the summary.
    pub fn fallback(summary: &str) -> Self {
        Self {
            source: InsightSource::Fallback,
            text: prompts::fallback_text(summary),
        }
    }

    /// Report carrying generated text verbatim.
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            source: InsightSource::Generated,
            text: text.into(),
        }
    }

    /// Report describing why generation failed.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self {
            source: InsightSource::Failed,
            text: prompts::failure_text(&reason.to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == InsightSource::Fallback
    }

    pub fn is_failed(&self) -> bool {
        self.source == InsightSource::Failed
    }
}
