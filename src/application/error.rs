//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::PropertyError;

/// Failure raised by a data type constructor, boxed so any error type fits.
pub type ConstructionError = Box<dyn std::error::Error + Send + Sync>;

/// Broad class of a [`BindError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The domain/data type pairing is inconsistent; fix the registration.
    Configuration,
    /// The tree is malformed for the requested shape.
    Data,
    /// The data type constructor rejected its arguments.
    Construction,
}

/// Binding errors wrap property errors and add shape-level failures.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("{0}")]
    Property(#[from] PropertyError),

    #[error("unknown domain type: {0}")]
    UnknownDomainType(String),

    #[error("domain type {0} is not a bindable data type")]
    NotBindable(String),

    #[error("can't find data type. Domain type {domain}, expected data type {expected}")]
    DataTypeNotFound { domain: String, expected: String },

    #[error("data type {data_type} must contain one constructor, found {found}")]
    ConstructorCount { data_type: String, found: usize },

    #[error("data type {data_type} must contain constructor with {expected} parameters, found {found}")]
    ParameterCount {
        data_type: String,
        expected: usize,
        found: usize,
    },

    #[error("domain type {domain} does not bind to {target}")]
    TargetTypeMismatch {
        domain: String,
        target: &'static str,
    },

    #[error("failed to construct {data_type}: {source}")]
    Construction {
        data_type: String,
        #[source]
        source: ConstructionError,
    },
}

impl BindError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BindError::Property(_) => ErrorCategory::Data,
            BindError::Construction { .. } => ErrorCategory::Construction,
            BindError::UnknownDomainType(_)
            | BindError::NotBindable(_)
            | BindError::DataTypeNotFound { .. }
            | BindError::ConstructorCount { .. }
            | BindError::ParameterCount { .. }
            | BindError::TargetTypeMismatch { .. } => ErrorCategory::Configuration,
        }
    }

    /// The binding setup is broken, not the data.
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    /// The tree does not have the shape the domain type needs.
    pub fn is_data(&self) -> bool {
        self.category() == ErrorCategory::Data
    }
}

/// Result type for binding operations.
pub type BindResult<T> = Result<T, BindError>;
