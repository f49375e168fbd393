//! Application layer: structural binding of property trees into domain types
//!
//! This layer orchestrates domain logic; type introspection is supplied by
//! an explicit shape registry instead of runtime reflection.

pub mod arguments;
pub mod error;
pub mod services;
pub mod shape;

pub use arguments::{Argument, ArgumentError, Arguments, FromArgument};
pub use error::{BindError, BindResult, ConstructionError, ErrorCategory};
pub use services::StructuralBinder;
pub use shape::{
    Bindable, BoundObject, Constructor, DataType, DomainType, NamingConvention, Param, ParamType,
    Primitive, ShapeRegistry, SuffixConvention,
};
