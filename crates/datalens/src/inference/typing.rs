//! Cell classification and column type inference.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{Column, ColumnType, Value};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Cheap shape checks run before the chrono format list is tried.

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}").unwrap(),  // ISO date
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}").unwrap(),  // US / European date
        Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}").unwrap(),  // European date
        Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}").unwrap(),  // Alt ISO
    ]
});

/// Tokens read as missing values, matching the usual dataframe defaults.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Classification of a single raw cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Text,
}

/// Check if a raw cell represents a missing value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NULL_TOKENS.contains(&trimmed)
}

/// Classify one raw cell.
pub fn classify_cell(raw: &str) -> CellKind {
    if is_null_value(raw) {
        return CellKind::Null;
    }
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("true") {
        return CellKind::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellKind::Boolean(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellKind::Integer(i);
    }

    // Rust accepts spellings of NaN that are not missing-value tokens; keep those as text.
    if let Ok(f) = trimmed.parse::<f64>() {
        if !f.is_nan() {
            return CellKind::Float(f);
        }
    }

    if let Some(dt) = parse_datetime(trimmed) {
        return CellKind::DateTime(dt);
    }

    CellKind::Text
}

/// Parse a date or datetime string.
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if !DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value)) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Decide the column type from its classified cells.
///
/// A column with no non-missing cells is reported as float.
pub fn unify_kinds<'a>(kinds: impl IntoIterator<Item = &'a CellKind>) -> ColumnType {
    let mut has_integer = false;
    let mut has_float = false;
    let mut has_boolean = false;
    let mut has_datetime = false;

    for kind in kinds {
        match kind {
            CellKind::Null => {}
            CellKind::Integer(_) => has_integer = true,
            CellKind::Float(_) => has_float = true,
            CellKind::Boolean(_) => has_boolean = true,
            CellKind::DateTime(_) => has_datetime = true,
            CellKind::Text => return ColumnType::Text,
        }
    }

    let has_numeric = has_integer || has_float;
    let families = [has_numeric, has_boolean, has_datetime]
        .iter()
        .filter(|&&present| present)
        .count();

    match families {
        0 => ColumnType::Float,
        1 if has_float => ColumnType::Float,
        1 if has_integer => ColumnType::Integer,
        1 if has_boolean => ColumnType::Boolean,
        1 => ColumnType::DateTime,
        _ => ColumnType::Other,
    }
}

/// Infer a column's type and convert its raw cells to typed values.
pub fn infer_column(name: impl Into<String>, position: usize, raw: &[String]) -> Column {
    let kinds: Vec<CellKind> = raw.iter().map(|v| classify_cell(v)).collect();
    let column_type = unify_kinds(&kinds);

    let values = kinds
        .into_iter()
        .zip(raw)
        .map(|(kind, raw)| to_value(kind, raw, column_type))
        .collect();

    Column::new(name, position, column_type, values)
}

fn to_value(kind: CellKind, raw: &str, column_type: ColumnType) -> Value {
    match (kind, column_type) {
        (CellKind::Null, _) => Value::Null,
        (CellKind::Integer(i), ColumnType::Integer) => Value::Integer(i),
        (CellKind::Integer(i), ColumnType::Float) => Value::Float(i as f64),
        (CellKind::Float(f), ColumnType::Float) => Value::Float(f),
        (CellKind::Boolean(b), ColumnType::Boolean) => Value::Boolean(b),
        (CellKind::DateTime(dt), ColumnType::DateTime) => Value::DateTime(dt),
        _ => Value::Text(raw.to_string()),
    }
}
