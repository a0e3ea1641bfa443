//! Plain-text dataset summary.
//!
//! The summary is both shown to users and sent verbatim as model context,
//! so its layout is stable: fixed section titles, then one aligned
//! `name    value` line per column.

use std::fmt::Write;

use crate::profile::Profile;

/// Spaces between the name column and the value column.
const GUTTER: usize = 4;

/// Render a profile as the text summary.
pub fn summarize(profile: &Profile) -> String {
    let mut out = String::new();

    out.push('\n');
    section(&mut out, "Dataset Overview");
    let _ = writeln!(out, "Rows: {}", profile.rows);
    let _ = writeln!(out, "Columns: {}", profile.columns);
    out.push('\n');

    section(&mut out, "Column Data Types");
    let types: Vec<(&str, String)> = profile
        .data_types
        .iter()
        .map(|(name, ty)| (name.as_str(), ty.to_string()))
        .collect();
    aligned(&mut out, &types);
    out.push('\n');

    section(&mut out, "Missing Values");
    let missing: Vec<(&str, String)> = profile
        .missing_values
        .iter()
        .map(|(name, count)| (name.as_str(), count.to_string()))
        .collect();
    aligned(&mut out, &missing);

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

/// Names left-aligned, values right-aligned.
fn aligned(out: &mut String, rows: &[(&str, String)]) {
    let name_width = rows.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    for (name, value) in rows {
        let _ = writeln!(
            out,
            "{name:<name_width$}{gap}{value:>value_width$}",
            gap = " ".repeat(GUTTER)
        );
    }
}
