//! Serve command - run the upload server.

use std::sync::Arc;

use colored::Colorize;
use datalens::DataLens;

use super::build_narrator;
use crate::cli::LlmProviderChoice;
use crate::server::{app, state::AppState};

pub fn run(
    host: String,
    port: u16,
    no_open: bool,
    max_upload_mb: usize,
    llm: LlmProviderChoice,
) -> Result<(), Box<dyn std::error::Error>> {
    // The narrator may own a blocking HTTP client, which must be created
    // and dropped outside the async runtime.
    let mut lens = DataLens::new();
    if let Some(narrator) = build_narrator(llm)? {
        lens = lens.with_shared_narrator(narrator);
    }
    let lens = Arc::new(lens);
    let state = AppState::new(Arc::clone(&lens), max_upload_mb);

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting DataLens server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!(
        "  Insights: {}",
        state.narrator_name().unwrap_or("fallback")
    );
    println!("  Upload limit: {} MB", max_upload_mb);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(app::run_server(state, &host, port));
    drop(runtime);
    drop(lens);

    result
}
