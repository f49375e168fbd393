//! Path-addressable property tree with typed, validating accessors
//!
//! A tree wraps an immutable map of string keys to [`Value`]s. Paths are
//! dot-separated key sequences (`"server.tls.port"`); the empty path
//! denotes the tree itself.

use std::sync::Arc;

use tracing::{instrument, trace};

use super::error::{PropertyError, PropertyResult};
use super::list::PropertyList;
use super::value::{Kind, Value, ValueMap};

/// Immutable property tree.
///
/// Clones share the backing map; [`PropertyTree::ptr_eq`] tells whether two
/// trees are the same node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyTree {
    map: Arc<ValueMap>,
}

/// Dynamically typed result of [`PropertyTree::value`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Integer(i64),
    Double(f64),
    String(String),
    Properties(PropertyTree),
    IntegerList(PropertyList<i64>),
    DoubleList(PropertyList<f64>),
    StringList(PropertyList<String>),
    PropertiesList(PropertyList<PropertyTree>),
}

impl PropertyValue {
    /// Generalized kind; every list variant reports `List`.
    pub fn kind(&self) -> Kind {
        match self {
            PropertyValue::Integer(_) => Kind::Integer,
            PropertyValue::Double(_) => Kind::Double,
            PropertyValue::String(_) => Kind::String,
            PropertyValue::Properties(_) => Kind::Properties,
            PropertyValue::IntegerList(_)
            | PropertyValue::DoubleList(_)
            | PropertyValue::StringList(_)
            | PropertyValue::PropertiesList(_) => Kind::List,
        }
    }
}

/// Result of resolving a path.
#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Tree(&'a PropertyTree),
    Value(&'a Value),
}

impl Node<'_> {
    fn kind(&self) -> Kind {
        match self {
            Node::Tree(_) => Kind::Properties,
            Node::Value(v) => v.kind(),
        }
    }
}

impl PropertyTree {
    pub fn new(map: ValueMap) -> Self {
        Self { map: Arc::new(map) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_shared(map: Arc<ValueMap>) -> Self {
        Self { map }
    }

    /// Read-only view of the backing map.
    pub fn as_map(&self) -> &ValueMap {
        &self.map
    }

    /// Whether both trees wrap the very same node.
    pub fn ptr_eq(&self, other: &PropertyTree) -> bool {
        Arc::ptr_eq(&self.map, &other.map)
    }

    /// Number of entries in this node's map.
    pub fn size(&self) -> usize {
        self.map.len()
    }

    /// Whether `path` resolves to anything at all.
    pub fn contains(&self, path: &str) -> bool {
        self.traverse(path).is_some()
    }

    /// Resolve `path` without any kind checking.
    ///
    /// Returns `None` when a key is missing or when segments remain after a
    /// non-map value was reached. Trailing empty segments are ignored, so
    /// `"a."` addresses the same node as `"a"`.
    fn traverse<'a>(&'a self, path: &str) -> Option<Node<'a>> {
        if path.is_empty() {
            return Some(Node::Tree(self));
        }
        let trimmed = path.trim_end_matches('.');
        if trimmed.is_empty() {
            return None;
        }

        let mut current: Option<&ValueMap> = Some(&self.map);
        let mut result = None;
        for key in trimmed.split('.') {
            let map = current?;
            let target = map.get(key)?;
            current = match target {
                Value::Map(nested) => Some(&**nested),
                _ => None,
            };
            result = Some(target);
        }
        trace!(path = %path, found = result.is_some(), "traversed");
        result.map(Node::Value)
    }

    /// Resolve `path` to whatever it holds.
    ///
    /// Absent paths yield `Ok(None)`. Lists are typed by their first
    /// element and every other element is then validated against it.
    #[instrument(level = "trace", skip(self))]
    pub fn value(&self, path: &str) -> PropertyResult<Option<PropertyValue>> {
        let Some(node) = self.traverse(path) else {
            return Ok(None);
        };
        let value = match node {
            Node::Tree(tree) => PropertyValue::Properties(tree.clone()),
            Node::Value(Value::Integer(v)) => PropertyValue::Integer(*v),
            Node::Value(Value::Double(v)) => PropertyValue::Double(*v),
            Node::Value(Value::String(v)) => PropertyValue::String(v.clone()),
            Node::Value(Value::Map(map)) => {
                PropertyValue::Properties(PropertyTree::from_shared(Arc::clone(map)))
            }
            Node::Value(Value::List(items)) => infer_list(path, items)?,
        };
        Ok(Some(value))
    }

    pub fn integer_value(&self, path: &str) -> PropertyResult<i64> {
        self.single(path, Kind::Integer, as_integer)
    }

    pub fn double_value(&self, path: &str) -> PropertyResult<f64> {
        self.single(path, Kind::Double, as_double)
    }

    pub fn string_value(&self, path: &str) -> PropertyResult<&str> {
        self.single(path, Kind::String, |v| match v {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Nested tree at `path`; the empty path returns this tree itself.
    pub fn properties_value(&self, path: &str) -> PropertyResult<PropertyTree> {
        match self.traverse(path) {
            Some(Node::Tree(tree)) => Ok(tree.clone()),
            node => single_from(path, node, Kind::Properties, as_properties),
        }
    }

    pub fn integer_list(&self, path: &str) -> PropertyResult<PropertyList<i64>> {
        list_from(path, self.traverse(path), Kind::Integer, as_integer)
    }

    pub fn double_list(&self, path: &str) -> PropertyResult<PropertyList<f64>> {
        list_from(path, self.traverse(path), Kind::Double, as_double)
    }

    pub fn string_list(&self, path: &str) -> PropertyResult<PropertyList<String>> {
        list_from(path, self.traverse(path), Kind::String, as_string)
    }

    pub fn properties_list(&self, path: &str) -> PropertyResult<PropertyList<PropertyTree>> {
        list_from(path, self.traverse(path), Kind::Properties, as_properties)
    }

    fn single<'a, T>(
        &'a self,
        path: &str,
        expected: Kind,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> PropertyResult<T> {
        single_from(path, self.traverse(path), expected, extract)
    }
}

impl From<ValueMap> for PropertyTree {
    fn from(map: ValueMap) -> Self {
        Self::new(map)
    }
}

impl FromIterator<(String, Value)> for PropertyTree {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(v) => Some(*v),
        _ => None,
    }
}

fn as_double(value: &Value) -> Option<f64> {
    match value {
        Value::Double(v) => Some(*v),
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(v) => Some(v.clone()),
        _ => None,
    }
}

fn as_properties(value: &Value) -> Option<PropertyTree> {
    match value {
        Value::Map(map) => Some(PropertyTree::from_shared(Arc::clone(map))),
        _ => None,
    }
}

fn single_from<'a, T>(
    path: &str,
    node: Option<Node<'a>>,
    expected: Kind,
    extract: impl FnOnce(&'a Value) -> Option<T>,
) -> PropertyResult<T> {
    let node = node.ok_or_else(|| PropertyError::NotFound {
        path: path.to_string(),
    })?;
    let mismatch = || PropertyError::KindMismatch {
        path: path.to_string(),
        expected,
        actual: node.kind(),
    };
    match node {
        Node::Value(v) => extract(v).ok_or_else(mismatch),
        Node::Tree(_) => Err(mismatch()),
    }
}

fn list_from<T>(
    path: &str,
    node: Option<Node<'_>>,
    expected: Kind,
    extract: impl Fn(&Value) -> Option<T>,
) -> PropertyResult<PropertyList<T>> {
    match node {
        None => Err(PropertyError::NotFound {
            path: path.to_string(),
        }),
        Some(Node::Value(Value::List(items))) => validate_list(path, items, expected, extract),
        Some(other) => Err(PropertyError::NotAList {
            path: path.to_string(),
            expected,
            actual: other.kind(),
        }),
    }
}

/// Stops at the first element that does not match `expected`.
fn validate_list<T>(
    path: &str,
    items: &[Value],
    expected: Kind,
    extract: impl Fn(&Value) -> Option<T>,
) -> PropertyResult<PropertyList<T>> {
    items
        .iter()
        .map(|item| {
            extract(item).ok_or_else(|| PropertyError::ListElementMismatch {
                path: path.to_string(),
                expected,
                actual: item.kind(),
            })
        })
        .collect::<PropertyResult<Vec<T>>>()
        .map(PropertyList::new)
}

/// First element wins: it decides the list type, the rest must follow.
fn infer_list(path: &str, items: &[Value]) -> PropertyResult<PropertyValue> {
    let Some(first) = items.first() else {
        return Err(PropertyError::UnsupportedShape {
            path: path.to_string(),
            reason: "cannot infer the element kind of an empty list".to_string(),
        });
    };
    let value = match first.kind() {
        Kind::Integer => {
            PropertyValue::IntegerList(validate_list(path, items, Kind::Integer, as_integer)?)
        }
        Kind::Double => {
            PropertyValue::DoubleList(validate_list(path, items, Kind::Double, as_double)?)
        }
        Kind::String => {
            PropertyValue::StringList(validate_list(path, items, Kind::String, as_string)?)
        }
        Kind::Properties => PropertyValue::PropertiesList(validate_list(
            path,
            items,
            Kind::Properties,
            as_properties,
        )?),
        Kind::List => {
            return Err(PropertyError::UnsupportedShape {
                path: path.to_string(),
                reason: "lists of lists are not supported".to_string(),
            })
        }
    };
    Ok(value)
}
