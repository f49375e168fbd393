//! Shape descriptors: what a domain type exposes and how its data type is built
//!
//! A *domain type* lists its accessor names in declaration order. Its
//! *data type* is found through a [`NamingConvention`] and must carry exactly
//! one [`Constructor`] whose parameters line up with those accessors.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::arguments::{Argument, Arguments};
use super::error::ConstructionError;
use crate::domain::{Kind, PropertyValue};

/// Type-erased value produced by a constructor.
pub type BoundObject = Box<dyn Any + Send + Sync>;

type ConstructFn = dyn Fn(Arguments) -> Result<BoundObject, ConstructionError> + Send + Sync;

/// Public accessor contract of a domain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainType {
    name: String,
    bindable: bool,
    accessors: Vec<String>,
}

impl DomainType {
    /// A data-bearing domain type the binder may construct.
    pub fn data(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindable: true,
            accessors: Vec::new(),
        }
    }

    /// A domain type the binder must refuse.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            bindable: false,
            ..Self::data(name)
        }
    }

    pub fn accessor(mut self, name: impl Into<String>) -> Self {
        self.accessors.push(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_bindable(&self) -> bool {
        self.bindable
    }

    pub fn accessors(&self) -> &[String] {
        &self.accessors
    }
}

/// Primitive parameter kinds; these can never be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Integer,
    Double,
    Boolean,
}

impl Primitive {
    /// Zero or `false`, substituted when the tree has no value.
    pub fn default_argument(self) -> Argument {
        match self {
            Primitive::Integer => Argument::Value(PropertyValue::Integer(0)),
            Primitive::Double => Argument::Value(PropertyValue::Double(0.0)),
            Primitive::Boolean => Argument::Boolean(false),
        }
    }
}

/// Declared type of a constructor parameter.
///
/// The binder reads every present value through the typed accessor matching
/// this declaration, so a value of the wrong kind fails as a data error
/// before the constructor runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Primitive(Primitive),
    /// A single value of the given kind; absence is passed on as
    /// [`Argument::Absent`]. `Reference(Kind::List)` accepts any list and
    /// infers its element kind.
    Reference(Kind),
    /// A list whose elements must all be of the given kind.
    List(Kind),
    /// A nested domain type, bound recursively from a nested tree.
    Domain(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    ty: ParamType,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Primitive(Primitive::Integer))
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Primitive(Primitive::Double))
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Primitive(Primitive::Boolean))
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::reference(name, Kind::String)
    }

    pub fn properties(name: impl Into<String>) -> Self {
        Self::reference(name, Kind::Properties)
    }

    pub fn reference(name: impl Into<String>, kind: Kind) -> Self {
        Self::new(name, ParamType::Reference(kind))
    }

    pub fn list(name: impl Into<String>, element: Kind) -> Self {
        Self::new(name, ParamType::List(element))
    }

    pub fn domain(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::new(name, ParamType::Domain(domain.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ParamType {
        &self.ty
    }
}

/// Positional constructor of a data type.
#[derive(Clone)]
pub struct Constructor {
    params: Vec<Param>,
    build: Arc<ConstructFn>,
}

impl Constructor {
    pub fn new<T, F>(params: Vec<Param>, build: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut Arguments) -> Result<T, ConstructionError> + Send + Sync + 'static,
    {
        Self {
            params,
            build: Arc::new(move |mut args: Arguments| {
                build(&mut args).map(|value| Box::new(value) as BoundObject)
            }),
        }
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn invoke(&self, args: Arguments) -> Result<BoundObject, ConstructionError> {
        (self.build)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Concrete, constructible counterpart of a domain type.
#[derive(Debug, Clone)]
pub struct DataType {
    name: String,
    constructors: Vec<Constructor>,
}

impl DataType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructors: Vec::new(),
        }
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }
}

/// Maps a domain type name to the name of its data type.
pub trait NamingConvention: Send + Sync {
    fn data_type_name(&self, domain: &str) -> String;
}

/// Appends a fixed suffix: `Server` becomes `ServerData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixConvention {
    suffix: String,
}

impl SuffixConvention {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Default for SuffixConvention {
    fn default() -> Self {
        Self::new("Data")
    }
}

impl NamingConvention for SuffixConvention {
    fn data_type_name(&self, domain: &str) -> String {
        format!("{domain}{}", self.suffix)
    }
}

/// A type that describes its own domain contract and data constructor.
pub trait Bindable: Any + Send + Sync + Sized {
    fn domain_type() -> DomainType;
    fn data_type() -> DataType;
}

/// Lookup table of domain and data types, keyed by name.
#[derive(Debug, Default, Clone)]
pub struct ShapeRegistry {
    domains: HashMap<String, DomainType>,
    data_types: HashMap<String, DataType>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_domain(&mut self, domain: DomainType) -> &mut Self {
        debug!("register domain type: {}", domain.name());
        self.domains.insert(domain.name().to_string(), domain);
        self
    }

    pub fn register_data(&mut self, data: DataType) -> &mut Self {
        debug!("register data type: {}", data.name());
        self.data_types.insert(data.name().to_string(), data);
        self
    }

    /// Register both descriptors a [`Bindable`] type provides.
    pub fn register<T: Bindable>(&mut self) -> &mut Self {
        self.register_domain(T::domain_type())
            .register_data(T::data_type())
    }

    pub fn domain(&self, name: &str) -> Option<&DomainType> {
        self.domains.get(name)
    }

    pub fn data_type(&self, name: &str) -> Option<&DataType> {
        self.data_types.get(name)
    }
}
