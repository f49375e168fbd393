//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on injected collaborators (shape registry, naming
//! convention) but are themselves concrete structs, not traits.

mod binder;

pub use binder::StructuralBinder;
