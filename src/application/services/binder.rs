//! Structural binder service
//!
//! Reconstructs data type instances from a property tree by matching
//! constructor parameter names to tree keys, recursing into nested
//! domain-typed parameters.

use std::any::{type_name, Any};
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::application::arguments::{Argument, Arguments};
use crate::application::shape::{
    BoundObject, DomainType, NamingConvention, Param, ParamType, Primitive, ShapeRegistry,
    SuffixConvention,
};
use crate::application::{BindError, BindResult};
use crate::domain::{Kind, PropertyError, PropertyResult, PropertyTree, PropertyValue};

/// Service binding property trees into registered domain types.
///
/// Holds no mutable state; every call is independent and reentrant.
pub struct StructuralBinder {
    registry: Arc<ShapeRegistry>,
    convention: Arc<dyn NamingConvention>,
}

impl StructuralBinder {
    /// Create a binder using the default `<Domain>Data` naming convention.
    pub fn new(registry: Arc<ShapeRegistry>) -> Self {
        Self::with_convention(registry, Arc::new(SuffixConvention::default()))
    }

    /// Create a binder with a custom naming convention.
    pub fn with_convention(
        registry: Arc<ShapeRegistry>,
        convention: Arc<dyn NamingConvention>,
    ) -> Self {
        Self {
            registry,
            convention,
        }
    }

    /// Bind `tree` into the data type of the domain type named `domain`.
    ///
    /// # Errors
    /// - configuration errors when the domain is unknown or not bindable, the
    ///   data type is missing, or its constructor shape is wrong
    /// - [`BindError::Property`] when a present value has the wrong kind for
    ///   its parameter, here or in any nested tree
    /// - [`BindError::Construction`] when the constructor rejects its arguments
    #[instrument(level = "debug", skip(self, tree))]
    pub fn bind(&self, tree: &PropertyTree, domain: &str) -> BindResult<BoundObject> {
        let domain_type = self.bindable_domain(domain)?;
        self.bind_data(tree, domain_type)
    }

    /// Bind and downcast to the concrete data type `T`.
    pub fn bind_as<T: Any>(&self, tree: &PropertyTree, domain: &str) -> BindResult<T> {
        let bound = self.bind(tree, domain)?;
        bound
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| BindError::TargetTypeMismatch {
                domain: domain.to_string(),
                target: type_name::<T>(),
            })
    }

    fn bindable_domain(&self, domain: &str) -> BindResult<&DomainType> {
        let domain_type = self
            .registry
            .domain(domain)
            .ok_or_else(|| BindError::UnknownDomainType(domain.to_string()))?;
        if !domain_type.is_bindable() {
            return Err(BindError::NotBindable(domain.to_string()));
        }
        Ok(domain_type)
    }

    fn bind_data(&self, tree: &PropertyTree, domain_type: &DomainType) -> BindResult<BoundObject> {
        let data_name = self.convention.data_type_name(domain_type.name());
        debug!("bind: domain={} data_type={}", domain_type.name(), data_name);

        let data_type =
            self.registry
                .data_type(&data_name)
                .ok_or_else(|| BindError::DataTypeNotFound {
                    domain: domain_type.name().to_string(),
                    expected: data_name.clone(),
                })?;

        let [constructor] = data_type.constructors() else {
            return Err(BindError::ConstructorCount {
                data_type: data_name,
                found: data_type.constructors().len(),
            });
        };

        let expected = domain_type.accessors().len();
        if constructor.params().len() != expected {
            return Err(BindError::ParameterCount {
                data_type: data_name,
                expected,
                found: constructor.params().len(),
            });
        }

        let mut entries = Vec::with_capacity(expected);
        for param in constructor.params() {
            let argument = self.resolve_argument(tree, param)?;
            entries.push((param.name().to_string(), argument));
        }

        constructor
            .invoke(Arguments::new(entries))
            .map_err(|source| BindError::Construction {
                data_type: data_name,
                source,
            })
    }

    fn resolve_argument(&self, tree: &PropertyTree, param: &Param) -> BindResult<Argument> {
        let name = param.name();
        let present = tree.contains(name);
        trace!(param = name, present = present, "resolve argument");

        if !present {
            return Ok(match param.ty() {
                ParamType::Primitive(primitive) => primitive.default_argument(),
                _ => Argument::Absent,
            });
        }

        let value = match param.ty() {
            ParamType::Primitive(Primitive::Integer) | ParamType::Reference(Kind::Integer) => {
                PropertyValue::Integer(tree.integer_value(name)?)
            }
            ParamType::Primitive(Primitive::Double) | ParamType::Reference(Kind::Double) => {
                PropertyValue::Double(tree.double_value(name)?)
            }
            ParamType::Primitive(Primitive::Boolean) => {
                return Err(PropertyError::UnsupportedShape {
                    path: name.to_string(),
                    reason: "boolean parameters cannot be read from a property tree".to_string(),
                }
                .into())
            }
            ParamType::Reference(Kind::String) => {
                PropertyValue::String(tree.string_value(name)?.to_string())
            }
            ParamType::Reference(Kind::Properties) => {
                PropertyValue::Properties(tree.properties_value(name)?)
            }
            ParamType::Reference(Kind::List) => any_list(tree, name)?,
            ParamType::List(element) => typed_list(tree, name, *element)?,
            ParamType::Domain(domain) => {
                return self.resolve_nested(tree.properties_value(name)?, domain)
            }
        };
        Ok(Argument::Value(value))
    }

    fn resolve_nested(&self, nested: PropertyTree, domain: &str) -> BindResult<Argument> {
        let nested_type = self
            .registry
            .domain(domain)
            .ok_or_else(|| BindError::UnknownDomainType(domain.to_string()))?;
        if nested_type.is_bindable() {
            Ok(Argument::Object(self.bind_data(&nested, nested_type)?))
        } else {
            Ok(Argument::Value(PropertyValue::Properties(nested)))
        }
    }
}

/// A list of whatever kind its first element has.
fn any_list(tree: &PropertyTree, path: &str) -> PropertyResult<PropertyValue> {
    match tree.value(path)? {
        Some(value) if value.kind() == Kind::List => Ok(value),
        Some(value) => Err(PropertyError::KindMismatch {
            path: path.to_string(),
            expected: Kind::List,
            actual: value.kind(),
        }),
        None => Err(PropertyError::NotFound {
            path: path.to_string(),
        }),
    }
}

fn typed_list(tree: &PropertyTree, path: &str, element: Kind) -> PropertyResult<PropertyValue> {
    Ok(match element {
        Kind::Integer => PropertyValue::IntegerList(tree.integer_list(path)?),
        Kind::Double => PropertyValue::DoubleList(tree.double_list(path)?),
        Kind::String => PropertyValue::StringList(tree.string_list(path)?),
        Kind::Properties => PropertyValue::PropertiesList(tree.properties_list(path)?),
        Kind::List => {
            return Err(PropertyError::UnsupportedShape {
                path: path.to_string(),
                reason: "lists of lists are not supported".to_string(),
            })
        }
    })
}
