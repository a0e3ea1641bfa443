//! Fixed texts wrapped around the dataset summary.

/// Instructions placed ahead of the summary when asking a model.
const INSTRUCTIONS: &str = "You are a senior data analyst.
Analyze the dataset summary below and provide
clear, concise, actionable insights.";

/// Header of the locally generated insight.
pub const FALLBACK_HEADER: &str = "⚠️ AI Insights (Fallback Mode)";

/// Generic review hints listed in the locally generated insight.
pub const FALLBACK_HINTS: [&str; 5] = [
    "Dataset loaded successfully",
    "Identify columns with high missing values",
    "Review numerical distributions",
    "Consider feature scaling before modeling",
    "Check categorical columns for imbalance",
];

/// Build the prompt sent to a narrative generator.
pub fn insight_prompt(summary: &str) -> String {
    format!("{}\n\n{}", INSTRUCTIONS, summary)
}

/// Build the insight text used when no generator is configured.
pub fn fallback_text(summary: &str) -> String {
    let mut text = String::with_capacity(summary.len() + 256);
    text.push_str(FALLBACK_HEADER);
    text.push_str("\n\n");
    for hint in FALLBACK_HINTS {
        text.push_str("• ");
        text.push_str(hint);
        text.push('\n');
    }
    text.push('\n');
    text.push_str(summary);
    text
}

/// Build the insight text reported when the generator failed.
pub fn failure_text(reason: &str) -> String {
    format!("AI insight generation failed.\nReason: {}", reason)
}
