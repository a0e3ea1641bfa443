//! Analyze command - profile a CSV file on disk.

use std::path::PathBuf;

use colored::Colorize;
use datalens::{
    AnalysisResult, DataLens, DataLensConfig, Encoding, InsightSource, LoaderConfig,
};

use super::build_narrator;
use crate::cli::LlmProviderChoice;

/// Correlations at or above this magnitude are listed in the terminal report.
const STRONG_CORRELATION: f64 = 0.7;

pub fn run(
    file: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    encoding: Encoding,
    llm: LlmProviderChoice,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = DataLensConfig {
        loader: LoaderConfig {
            encoding,
            ..Default::default()
        },
    };
    let mut lens = DataLens::with_config(config);
    if let Some(narrator) = build_narrator(llm)? {
        lens = lens.with_shared_narrator(narrator);
    }

    if !json {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let result = lens.analyze(&file)?;

    if let Some(ref path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&result)?)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_report(&result, verbose);

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn print_report(result: &AnalysisResult, verbose: bool) {
    let profile = &result.profile;

    println!();
    println!(
        "{} rows x {} columns ({} missing cells)",
        profile.rows.to_string().white().bold(),
        profile.columns.to_string().white().bold(),
        profile.total_missing().to_string().yellow()
    );

    if verbose {
        println!("  Encoding: {}", result.source.encoding);
        println!("  Size:     {} bytes", result.source.size_bytes);
        println!("  Hash:     {}", result.source.hash);
    }

    println!();
    println!("{}", "Columns:".yellow().bold());
    for name in &profile.column_names {
        let missing = profile.missing_values[name];
        let missing = if missing > 0 {
            format!("{} missing", missing).yellow().to_string()
        } else {
            String::new()
        };
        println!("  {:24} {:10} {}", name, profile.data_types[name].as_str(), missing);
    }

    if result.correlation.len() >= 2 {
        println!();
        println!("{}", "Correlations:".yellow().bold());
        let pairs = result.correlation.strong_pairs(STRONG_CORRELATION);
        if pairs.is_empty() {
            println!(
                "  No pairs with |r| >= {} among {} numeric columns",
                STRONG_CORRELATION,
                result.correlation.len()
            );
        }
        for (a, b, r) in pairs {
            let value = format!("{:>6.3}", r);
            let value = if r < 0.0 { value.red() } else { value.green() };
            println!("  {}  {} / {}", value, a, b);
        }
    }

    println!();
    let title = match result.insight.source {
        InsightSource::Generated => "AI Insights:".cyan().bold(),
        InsightSource::Fallback => "Insights (fallback):".yellow().bold(),
        InsightSource::Failed => "Insights (failed):".red().bold(),
    };
    println!("{}", title);
    println!("{}", result.insight.text);
}
