//! Typed column storage.

use super::types::{ColumnType, Value};

/// A named column whose cells share one inferred type.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name, unique within its dataset.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Inferred data type.
    pub column_type: ColumnType,
    /// Cell values, one per row.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from already-typed values.
    pub fn new(
        name: impl Into<String>,
        position: usize,
        column_type: ColumnType,
        values: Vec<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            column_type,
            values,
        }
    }

    /// Number of cells, including missing ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Get the null percentage.
    pub fn null_percentage(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            (self.null_count() as f64 / self.values.len() as f64) * 100.0
        }
    }

    /// Numeric view of every cell; `None` for missing or non-numeric cells.
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_counting() {
        let column = Column::new(
            "score",
            0,
            ColumnType::Integer,
            vec![Value::Integer(1), Value::Null, Value::Integer(3), Value::Null],
        );

        assert_eq!(column.len(), 4);
        assert_eq!(column.null_count(), 2);
        assert_eq!(column.null_percentage(), 50.0);
        assert_eq!(
            column.numeric_values(),
            vec![Some(1.0), None, Some(3.0), None]
        );
    }
}
