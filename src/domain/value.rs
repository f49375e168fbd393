//! Raw tree values and their generalized kinds

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Backing map of a property tree node.
pub type ValueMap = HashMap<String, Value>;

/// A decoded value as handed over by an external decoder.
///
/// Nested maps are reference counted so that sub-trees share storage
/// with the tree they were resolved from.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Double(f64),
    String(String),
    Map(Arc<ValueMap>),
    List(Vec<Value>),
}

impl Value {
    /// Generalized kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Integer(_) => Kind::Integer,
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Map(_) => Kind::Properties,
            Value::List(_) => Kind::List,
        }
    }

    /// Wrap a plain map as a nested map value.
    pub fn map(map: ValueMap) -> Self {
        Value::Map(Arc::new(map))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

/// Canonical category of a value used in error messages.
///
/// Anything tree-like collapses to `Properties` and anything list-like
/// to `List`, whatever wrapper produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    Double,
    String,
    Properties,
    List,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Integer => "Integer",
            Kind::Double => "Double",
            Kind::String => "String",
            Kind::Properties => "Properties",
            Kind::List => "List",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_map_when_kind_then_properties() {
        let value = Value::map(ValueMap::new());
        assert_eq!(value.kind(), Kind::Properties);
        assert_eq!(value.kind().to_string(), "Properties");
    }

    #[test]
    fn given_vec_when_converted_then_list_of_same_kind() {
        let value = Value::from(vec![1, 2, 3]);
        match value {
            Value::List(items) => {
                assert_eq!(items.len(), 3);
                assert!(items.iter().all(|v| v.kind() == Kind::Integer));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }
}
