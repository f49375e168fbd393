//! Decoder adapters: TOML, JSON and YAML documents into property trees
//!
//! Keys are kept exactly as written. Only integers, floats, strings,
//! tables and arrays map onto tree values. Everything else (booleans,
//! nulls, datetimes, integers outside `i64`, non-string keys) is rejected
//! with [`InfraError::UnsupportedValue`] rather than guessed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::domain::{PropertyTree, Value, ValueMap};
use crate::infrastructure::traits::PropertySource;
use crate::infrastructure::{InfraError, InfraResult};

/// Document formats a [`FileSource`] can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

/// Map a file extension or format name onto a decoder.
pub fn file_format(name: &str) -> Option<Format> {
    match name.to_ascii_lowercase().as_str() {
        "toml" => Some(Format::Toml),
        "json" => Some(Format::Json),
        "yaml" | "yml" => Some(Format::Yaml),
        _ => None,
    }
}

/// Decode `content` in `format`; `source_name` labels load errors.
pub fn decode(format: Format, source_name: &str, content: &str) -> InfraResult<PropertyTree> {
    let map = match format {
        Format::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| InfraError::load(source_name, e))?;
            convert_toml_table("", table)?
        }
        Format::Json => {
            let object: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(content).map_err(|e| InfraError::load(source_name, e))?;
            convert_json_object("", object)?
        }
        Format::Yaml => {
            let mapping: serde_yaml::Mapping =
                serde_yaml::from_str(content).map_err(|e| InfraError::load(source_name, e))?;
            convert_yaml_mapping("", mapping)?
        }
    };
    Ok(PropertyTree::new(map))
}

/// A property file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    default_format: String,
}

impl FileSource {
    /// `default_format` applies when the extension names no known format.
    pub fn new(path: impl Into<PathBuf>, default_format: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_format: default_format.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> InfraResult<Format> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(file_format)
            .or_else(|| file_format(&self.default_format))
            .ok_or_else(|| {
                InfraError::load(
                    self.describe(),
                    format!("unknown file format: {}", self.default_format),
                )
            })
    }
}

impl PropertySource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> InfraResult<PropertyTree> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| InfraError::io(format!("read {}", self.path.display()), e))?;
        let format = self.format()?;
        debug!("load: format={:?}", format);

        let tree = decode(format, &self.describe(), &content)?;
        debug!("load: {} top-level entries", tree.size());
        Ok(tree)
    }
}

/// An in-memory TOML document.
#[derive(Debug, Clone)]
pub struct TomlSource {
    name: String,
    content: String,
}

impl TomlSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl PropertySource for TomlSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> InfraResult<PropertyTree> {
        decode(Format::Toml, &self.name, &self.content)
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn unsupported(path: &str, kind: &'static str) -> InfraError {
    InfraError::UnsupportedValue {
        path: path.to_string(),
        kind,
    }
}

fn convert_toml_table(path: &str, table: toml::Table) -> InfraResult<ValueMap> {
    table
        .into_iter()
        .map(|(key, value)| {
            let child = child_path(path, &key);
            convert_toml_value(&child, value).map(|v| (key, v))
        })
        .collect()
}

fn convert_toml_value(path: &str, value: toml::Value) -> InfraResult<Value> {
    match value {
        toml::Value::Integer(v) => Ok(Value::Integer(v)),
        toml::Value::Float(v) => Ok(Value::Double(v)),
        toml::Value::String(v) => Ok(Value::String(v)),
        toml::Value::Table(table) => convert_toml_table(path, table).map(Value::map),
        toml::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| convert_toml_value(&format!("{path}[{i}]"), item))
            .collect::<InfraResult<Vec<_>>>()
            .map(Value::List),
        toml::Value::Boolean(_) => Err(unsupported(path, "boolean")),
        toml::Value::Datetime(_) => Err(unsupported(path, "datetime")),
    }
}

fn convert_json_object(
    path: &str,
    object: serde_json::Map<String, serde_json::Value>,
) -> InfraResult<ValueMap> {
    object
        .into_iter()
        .map(|(key, value)| {
            let child = child_path(path, &key);
            convert_json_value(&child, value).map(|v| (key, v))
        })
        .collect()
}

fn convert_json_value(path: &str, value: serde_json::Value) -> InfraResult<Value> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(Value::Integer(v))
            } else if n.is_u64() {
                Err(unsupported(path, "out-of-range integer"))
            } else {
                n.as_f64()
                    .map(Value::Double)
                    .ok_or_else(|| unsupported(path, "number"))
            }
        }
        serde_json::Value::String(v) => Ok(Value::String(v)),
        serde_json::Value::Object(object) => convert_json_object(path, object).map(Value::map),
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| convert_json_value(&format!("{path}[{i}]"), item))
            .collect::<InfraResult<Vec<_>>>()
            .map(Value::List),
        serde_json::Value::Bool(_) => Err(unsupported(path, "boolean")),
        serde_json::Value::Null => Err(unsupported(path, "null")),
    }
}

fn convert_yaml_mapping(path: &str, mapping: serde_yaml::Mapping) -> InfraResult<ValueMap> {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let serde_yaml::Value::String(key) = key else {
                return Err(unsupported(path, "non-string key"));
            };
            let child = child_path(path, &key);
            convert_yaml_value(&child, value).map(|v| (key, v))
        })
        .collect()
}

fn convert_yaml_value(path: &str, value: serde_yaml::Value) -> InfraResult<Value> {
    match value {
        serde_yaml::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(Value::Integer(v))
            } else if n.is_u64() {
                Err(unsupported(path, "out-of-range integer"))
            } else {
                n.as_f64()
                    .map(Value::Double)
                    .ok_or_else(|| unsupported(path, "number"))
            }
        }
        serde_yaml::Value::String(v) => Ok(Value::String(v)),
        serde_yaml::Value::Mapping(mapping) => convert_yaml_mapping(path, mapping).map(Value::map),
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| convert_yaml_value(&format!("{path}[{i}]"), item))
            .collect::<InfraResult<Vec<_>>>()
            .map(Value::List),
        serde_yaml::Value::Bool(_) => Err(unsupported(path, "boolean")),
        serde_yaml::Value::Null => Err(unsupported(path, "null")),
        serde_yaml::Value::Tagged(_) => Err(unsupported(path, "tagged value")),
    }
}
