//! Positional constructor arguments with typed, by-name access

use std::any::{type_name, Any};

use thiserror::Error;

use super::shape::BoundObject;
use crate::domain::{PropertyList, PropertyTree, PropertyValue};

/// One resolved constructor argument.
#[derive(Debug)]
pub enum Argument {
    /// The tree had no value for a non-primitive parameter.
    Absent,
    /// Boolean primitives only ever arrive as their `false` default.
    Boolean(bool),
    Value(PropertyValue),
    /// A recursively bound nested domain value.
    Object(BoundObject),
}

impl Argument {
    /// Short description used in mismatch errors.
    pub fn describe(&self) -> String {
        match self {
            Argument::Absent => "absent".to_string(),
            Argument::Boolean(_) => "Boolean".to_string(),
            Argument::Value(value) => value.kind().to_string(),
            Argument::Object(_) => "bound object".to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("no parameter named '{0}'")]
    UnknownParameter(String),

    #[error("argument '{0}' was already taken")]
    AlreadyTaken(String),

    #[error("argument '{0}' is required but absent")]
    Missing(String),

    #[error("argument '{name}' expected {expected}, got {actual}")]
    Mismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

impl ArgumentError {
    fn mismatch(name: &str, expected: &str, actual: &Argument) -> Self {
        match actual {
            Argument::Absent => ArgumentError::Missing(name.to_string()),
            other => ArgumentError::Mismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: other.describe(),
            },
        }
    }
}

/// Conversion from a resolved argument into a constructor field.
pub trait FromArgument: Sized {
    fn from_argument(name: &str, arg: Argument) -> Result<Self, ArgumentError>;
}

macro_rules! from_property_value {
    ($ty:ty, $variant:ident, $expected:literal) => {
        impl FromArgument for $ty {
            fn from_argument(name: &str, arg: Argument) -> Result<Self, ArgumentError> {
                match arg {
                    Argument::Value(PropertyValue::$variant(v)) => Ok(v),
                    other => Err(ArgumentError::mismatch(name, $expected, &other)),
                }
            }
        }
    };
}

from_property_value!(i64, Integer, "Integer");
from_property_value!(f64, Double, "Double");
from_property_value!(String, String, "String");
from_property_value!(PropertyTree, Properties, "Properties");
from_property_value!(PropertyList<i64>, IntegerList, "Integer list");
from_property_value!(PropertyList<f64>, DoubleList, "Double list");
from_property_value!(PropertyList<String>, StringList, "String list");
from_property_value!(PropertyList<PropertyTree>, PropertiesList, "Properties list");

impl FromArgument for bool {
    fn from_argument(name: &str, arg: Argument) -> Result<Self, ArgumentError> {
        match arg {
            Argument::Boolean(v) => Ok(v),
            other => Err(ArgumentError::mismatch(name, "Boolean", &other)),
        }
    }
}

impl<T: FromArgument> FromArgument for Option<T> {
    fn from_argument(name: &str, arg: Argument) -> Result<Self, ArgumentError> {
        match arg {
            Argument::Absent => Ok(None),
            other => T::from_argument(name, other).map(Some),
        }
    }
}

/// Arguments handed to a [`Constructor`](super::Constructor), in parameter order.
///
/// Each argument can be taken exactly once.
#[derive(Debug)]
pub struct Arguments {
    entries: Vec<(String, Option<Argument>)>,
}

impl Arguments {
    pub fn new(entries: Vec<(String, Argument)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, arg)| (name, Some(arg)))
                .collect(),
        }
    }

    /// Remove and return the raw argument for `name`.
    pub fn take(&mut self, name: &str) -> Result<Argument, ArgumentError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, slot)| slot)
            .ok_or_else(|| ArgumentError::UnknownParameter(name.to_string()))?;
        slot.take()
            .ok_or_else(|| ArgumentError::AlreadyTaken(name.to_string()))
    }

    pub fn get<T: FromArgument>(&mut self, name: &str) -> Result<T, ArgumentError> {
        let arg = self.take(name)?;
        T::from_argument(name, arg)
    }

    /// A nested value bound from a domain-typed parameter.
    pub fn object<T: Any>(&mut self, name: &str) -> Result<T, ArgumentError> {
        self.optional_object(name)?
            .ok_or_else(|| ArgumentError::Missing(name.to_string()))
    }

    pub fn optional_object<T: Any>(&mut self, name: &str) -> Result<Option<T>, ArgumentError> {
        match self.take(name)? {
            Argument::Absent => Ok(None),
            Argument::Object(bound) => {
                bound
                    .downcast::<T>()
                    .map(|v| Some(*v))
                    .map_err(|_| ArgumentError::Mismatch {
                        name: name.to_string(),
                        expected: type_name::<T>().to_string(),
                        actual: "bound object of another type".to_string(),
                    })
            }
            other => Err(ArgumentError::mismatch(name, type_name::<T>(), &other)),
        }
    }
}
