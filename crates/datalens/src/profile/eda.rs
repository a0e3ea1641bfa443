//! Shape, type and missing-value profile of a dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::Dataset;
use crate::schema::ColumnType;

/// Read-only summary of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Number of data rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Column names in table order.
    pub column_names: Vec<String>,
    /// Inferred type per column.
    pub data_types: IndexMap<String, ColumnType>,
    /// Missing cells per column.
    pub missing_values: IndexMap<String, usize>,
}

impl Profile {
    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Missing cells across the whole dataset.
    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }

    /// Columns with at least one missing cell, most missing first.
    pub fn columns_with_missing(&self) -> Vec<(&str, usize)> {
        let mut columns: Vec<(&str, usize)> = self
            .missing_values
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        columns.sort_by(|a, b| b.1.cmp(&a.1));
        columns
    }

    /// The EDA block of the analysis response.
    pub fn eda(&self) -> Eda {
        Eda {
            rows: self.rows,
            columns: self.columns,
            column_names: self.column_names.clone(),
            missing_values: self.missing_values.clone(),
        }
    }
}

/// Shape and missing-value counts, as reported under `eda`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eda {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub missing_values: IndexMap<String, usize>,
}

/// Profile a dataset.
pub fn profile(dataset: &Dataset) -> Profile {
    let columns = dataset.columns();

    let profile = Profile {
        rows: dataset.row_count(),
        columns: columns.len(),
        column_names: columns.iter().map(|c| c.name.clone()).collect(),
        data_types: columns
            .iter()
            .map(|c| (c.name.clone(), c.column_type))
            .collect(),
        missing_values: columns
            .iter()
            .map(|c| (c.name.clone(), c.null_count()))
            .collect(),
    };

    debug!(
        rows = profile.rows,
        columns = profile.columns,
        missing = profile.total_missing(),
        "profiled dataset"
    );

    profile
}
