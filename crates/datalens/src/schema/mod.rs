//! Column and value types for loaded datasets.

mod column;
mod types;

pub use column::Column;
pub use types::{ColumnType, Value};
