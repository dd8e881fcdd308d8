//! Dataset loading and source handling.

mod loader;
mod source;

pub use loader::{DatasetFormat, DatasetLoader, LoaderConfig};
pub use source::{is_null_value, Dataset, SourceMetadata};
