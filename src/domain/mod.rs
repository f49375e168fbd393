//! Domain layer: the property tree and its value model
//!
//! This layer is independent of external concerns (no I/O, no decoding, no config loading).

pub mod error;
pub mod list;
pub mod properties;
pub mod value;

pub use error::{PropertyError, PropertyResult};
pub use list::PropertyList;
pub use properties::{PropertyTree, PropertyValue};
pub use value::{Kind, Value, ValueMap};
