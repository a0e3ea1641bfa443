//! Pairwise Pearson correlation between numeric columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::Dataset;

/// Decimal places kept in reported coefficients.
const PRECISION: f64 = 1000.0;

/// Correlation coefficients keyed by column, then by column.
///
/// Symmetric, NaN-free, every entry in `[-1, 1]`. Empty when the dataset
/// has fewer than two numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationMatrix {
    matrix: IndexMap<String, IndexMap<String, f64>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Number of columns in the matrix.
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    /// Coefficient between two columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.matrix.get(a).and_then(|row| row.get(b)).copied()
    }

    /// Column names in matrix order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.matrix.keys().map(String::as_str)
    }

    /// All coefficients for one column.
    pub fn row(&self, column: &str) -> Option<&IndexMap<String, f64>> {
        self.matrix.get(column)
    }

    /// Off-diagonal pairs with `|r| >= threshold`, each pair reported once,
    /// strongest first.
    pub fn strong_pairs(&self, threshold: f64) -> Vec<(&str, &str, f64)> {
        let names: Vec<&str> = self.columns().collect();
        let mut pairs = Vec::new();

        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                if let Some(r) = self.get(a, b) {
                    if r.abs() >= threshold {
                        pairs.push((*a, *b, r));
                    }
                }
            }
        }

        pairs.sort_by(|x, y| y.2.abs().total_cmp(&x.2.abs()));
        pairs
    }

    pub fn into_inner(self) -> IndexMap<String, IndexMap<String, f64>> {
        self.matrix
    }
}

/// Correlate every pair of numeric columns.
///
/// Each pair uses only the rows where both columns have a value. Undefined
/// coefficients (zero variance, fewer than two shared rows) are reported
/// as 0.0.
pub fn correlate(dataset: &Dataset) -> CorrelationMatrix {
    let numeric: Vec<(&str, Vec<Option<f64>>)> = dataset
        .numeric_columns()
        .map(|c| (c.name.as_str(), c.numeric_values()))
        .collect();

    if numeric.len() < 2 {
        return CorrelationMatrix::default();
    }

    let n = numeric.len();
    let mut coefficients = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = normalize(pearson(&numeric[i].1, &numeric[j].1));
            coefficients[i][j] = r;
            coefficients[j][i] = r;
        }
    }

    let matrix = numeric
        .iter()
        .zip(coefficients)
        .map(|((name, _), row)| {
            let row = numeric
                .iter()
                .zip(row)
                .map(|((other, _), r)| (other.to_string(), r))
                .collect();
            (name.to_string(), row)
        })
        .collect();

    CorrelationMatrix { matrix }
}

/// Pearson's r over pairwise complete observations; NaN when undefined.
fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let count = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / count;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / count;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }

    sxy / (sxx * syy).sqrt()
}

/// Clamp, round to three decimals, and replace NaN/infinite with 0.0.
fn normalize(r: f64) -> f64 {
    if !r.is_finite() {
        return 0.0;
    }
    let rounded = (r.clamp(-1.0, 1.0) * PRECISION).round_ties_even() / PRECISION;
    // Avoid reporting -0.0.
    if rounded == 0.0 { 0.0 } else { rounded }
}
