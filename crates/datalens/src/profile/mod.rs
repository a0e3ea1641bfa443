//! Dataset profiling: shape, types, missing values, correlations and the
//! text summary.

mod correlation;
mod eda;
mod summary;

pub use correlation::{CorrelationMatrix, correlate};
pub use eda::{Eda, Profile, profile};
pub use summary::summarize;
