//! Infrastructure layer: decoder adapters feeding the property tree
//!
//! This layer implements the data-source boundary trait on top of the
//! `toml`, `serde_json` and `serde_yaml` decoders.

pub mod error;
pub mod loader;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use loader::{decode, file_format, FileSource, Format, TomlSource};
pub use traits::PropertySource;
