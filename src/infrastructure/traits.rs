//! Boundary traits for data sources
//!
//! The tree never decodes bytes itself; a source hands it data that an
//! external decoder already materialised.

use crate::domain::PropertyTree;
use crate::infrastructure::InfraResult;

/// Supplier of decoded property data.
pub trait PropertySource: Send + Sync {
    /// Human-readable origin, used in errors and logs.
    fn describe(&self) -> String;

    /// Decode the source and wrap it as a tree.
    fn load(&self) -> InfraResult<PropertyTree>;
}
