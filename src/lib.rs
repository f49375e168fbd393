//! Typed, path-addressable property trees with structural binding
//!
//! A [`PropertyTree`](domain::PropertyTree) wraps already-decoded nested
//! data and answers dotted-path queries with kind-checked accessors. The
//! [`StructuralBinder`](application::StructuralBinder) turns a tree into
//! registered domain objects, matching constructor parameter names to keys.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{BindError, ShapeRegistry, StructuralBinder};
pub use domain::{Kind, PropertyError, PropertyList, PropertyTree, PropertyValue, Value, ValueMap};
