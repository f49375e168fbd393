//! Domain-level errors (no external dependencies)

use thiserror::Error;

use super::value::Kind;

/// Data-shape errors raised by property tree accessors.
///
/// Every variant carries the path that was queried. Kinds are always the
/// generalized ones, so messages do not depend on how a value was wrapped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("Property does not exist. Path '{path}'")]
    NotFound { path: String },

    #[error("Expected property value of {expected} type, but actual is {actual}. Path '{path}'")]
    KindMismatch {
        path: String,
        expected: Kind,
        actual: Kind,
    },

    #[error(
        "Expected property list values of type {expected}, but actual is single value of type {actual}. Path '{path}'"
    )]
    NotAList {
        path: String,
        expected: Kind,
        actual: Kind,
    },

    #[error(
        "Expected property list of {expected} values, but actual is list contained {actual} values. Path '{path}'"
    )]
    ListElementMismatch {
        path: String,
        expected: Kind,
        actual: Kind,
    },

    #[error("Unsupported property shape: {reason}. Path '{path}'")]
    UnsupportedShape { path: String, reason: String },
}

impl PropertyError {
    /// Path the failing accessor was called with.
    pub fn path(&self) -> &str {
        match self {
            PropertyError::NotFound { path }
            | PropertyError::KindMismatch { path, .. }
            | PropertyError::NotAList { path, .. }
            | PropertyError::ListElementMismatch { path, .. }
            | PropertyError::UnsupportedShape { path, .. } => path,
        }
    }
}

/// Result type for property tree accessors.
pub type PropertyResult<T> = Result<T, PropertyError>;
