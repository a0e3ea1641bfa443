//! Example: Profile a CSV file with DataLens.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Set `GEMINI_API_KEY` to get generated insights instead of the local
//! fallback.

use std::env;
use std::path::Path;

use datalens::{DataLens, GeminiProvider};

fn main() -> datalens::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let lens = match GeminiProvider::from_env() {
        Ok(provider) => DataLens::new().with_narrator(provider),
        Err(_) => DataLens::new(),
    };

    let result = lens.analyze(path)?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("DataLens: {}", result.source.file);
    println!("{}", separator);
    println!("  Encoding: {}", result.source.encoding);
    println!("  Hash:     {}", result.source.hash);
    println!();

    println!("{}", result.summary);

    let pairs = result.correlation.strong_pairs(0.7);
    if !pairs.is_empty() {
        println!("Strong correlations");
        for (a, b, r) in pairs {
            println!("  {:>6.3}  {} / {}", r, a, b);
        }
        println!();
    }

    println!("## Insight ({})", result.insight.source);
    println!("{}", result.insight.text);

    Ok(())
}
