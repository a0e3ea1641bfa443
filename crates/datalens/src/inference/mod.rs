//! Column type inference.

mod typing;

pub use typing::{CellKind, classify_cell, infer_column, is_null_value, unify_kinds};
