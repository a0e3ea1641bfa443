//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use datalens::Encoding;

/// DataLens: profile CSV datasets and summarize them
#[derive(Parser)]
#[command(name = "datalens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a CSV file and print the report
    Analyze {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON result to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Text encoding of the file
        #[arg(long, default_value = "auto")]
        encoding: Encoding,

        /// Narrative provider for AI insights
        #[arg(long, default_value = "auto")]
        llm: LlmProviderChoice,
    },

    /// Start the upload server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// Largest accepted upload, in megabytes
        #[arg(long, default_value = "50")]
        max_upload_mb: usize,

        /// Narrative provider for AI insights
        #[arg(long, default_value = "auto")]
        llm: LlmProviderChoice,
    },
}

/// Narrative provider choice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LlmProviderChoice {
    /// Gemini when GEMINI_API_KEY is set, otherwise the local fallback
    #[default]
    Auto,
    /// No provider - always use the local fallback
    None,
    /// Google Gemini API (requires GEMINI_API_KEY)
    Gemini,
    /// Mock provider for testing
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(LlmProviderChoice::Auto),
            "none" | "off" => Ok(LlmProviderChoice::None),
            "gemini" | "google" => Ok(LlmProviderChoice::Gemini),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: auto, none, gemini, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::Auto => write!(f, "auto"),
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::Gemini => write!(f, "gemini"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}
