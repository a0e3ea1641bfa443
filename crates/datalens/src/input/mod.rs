//! Input loading and data source handling.

mod loader;
mod source;

pub use loader::{Encoding, Loader, LoaderConfig};
pub use source::{Dataset, SourceMetadata};
