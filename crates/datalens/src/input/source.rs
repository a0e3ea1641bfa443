//! Loaded dataset and source metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{Column, ColumnType};

/// Metadata about the uploaded bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Declared file name.
    pub file: String,
    /// SHA-256 hash of the raw bytes.
    pub hash: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Encoding used to decode the bytes.
    pub encoding: String,
    /// Field delimiter.
    pub delimiter: char,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the data was loaded.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for bytes that have been loaded.
    pub fn new(
        file: impl Into<String>,
        hash: String,
        size_bytes: u64,
        encoding: impl Into<String>,
        delimiter: u8,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            file: file.into(),
            hash,
            size_bytes,
            encoding: encoding.into(),
            delimiter: delimiter as char,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// An in-memory table of typed columns.
///
/// Column names are unique and every column holds `row_count` values.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns have different lengths or repeat a name; the
    /// loader never produces either.
    pub fn new(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        assert!(
            columns.iter().all(|c| c.len() == row_count),
            "all columns must have the same number of rows"
        );
        for (i, column) in columns.iter().enumerate() {
            assert!(
                columns[..i].iter().all(|other| other.name != column.name),
                "duplicate column name '{}'",
                column.name
            );
        }

        Self { columns, row_count }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns whose inferred type is numeric.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.column_type.is_numeric())
    }

    /// Columns with a specific inferred type.
    pub fn columns_of_type(&self, column_type: ColumnType) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(move |c| c.column_type == column_type)
    }

    /// Total number of missing cells.
    pub fn null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }
}
