//! DataLens: statistical profiling for uploaded CSV datasets.
//!
//! DataLens loads a delimited file, infers a primitive type for every
//! column, and reports shape, missing values and pairwise correlation of
//! numeric columns. A short text summary of the profile is turned into an
//! insight, either by an optional narrative generator or locally.
//!
//! # Example
//!
//! ```no_run
//! use datalens::DataLens;
//!
//! let lens = DataLens::new();
//! let result = lens.analyze("sales.csv").unwrap();
//!
//! println!("Shape: {:?}", result.profile.shape());
//! println!("{}", result.insight.text);
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod insight;
pub mod profile;
pub mod schema;

mod datalens;

pub use crate::datalens::{AnalysisReport, AnalysisResult, DataLens, DataLensConfig};
pub use error::{DatalensError, ErrorKind, NarrativeError, Result};
pub use input::{Dataset, Encoding, Loader, LoaderConfig, SourceMetadata};
pub use insight::{
    GeminiProvider, InsightReport, InsightSource, LlmConfig, MockProvider, NarrativeGenerator,
    generate_insight,
};
pub use profile::{CorrelationMatrix, Eda, Profile, correlate, profile, summarize};
pub use schema::{Column, ColumnType, Value};
