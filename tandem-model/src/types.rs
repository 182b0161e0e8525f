//! Core type identity and shape definitions.

use serde::{Deserialize, Serialize};

/// Qualified identity of a modeled type (e.g. `Shop.Orders.OrderDto`).
///
/// Identity comparison is exact; the emitted (short) name is derived from the
/// last segment unless the model overrides it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(String);

impl TypeId {
    pub fn new(qualified: impl Into<String>) -> Self {
        Self(qualified.into())
    }

    /// Get the full qualified name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the short name (last `.`-separated segment).
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Kind of a modeled type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Record,
    Class,
    Struct,
    Interface,
    Enum,
}

impl TypeKind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Record => "record",
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

/// Primitive types shared across target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Int,
    Float,
    Bool,
}

impl PrimitiveKind {
    /// Get the canonical name of this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Bool => "bool",
        }
    }
}

/// Shape of a property, parameter, or return type.
///
/// The wrapper variants form the closed set the dependency resolver knows how
/// to unwrap. Generic shapes outside this set are carried as [`ModelType::Named`]
/// with opaque arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// A builtin primitive.
    Primitive(PrimitiveKind),
    /// A reference to a modeled (or external) type, possibly with closed
    /// generic arguments. Arguments are not traversed during unwrapping.
    Named { id: TypeId, args: Vec<ModelType> },
    /// A list-like wrapper around one element type.
    List(Box<ModelType>),
    /// An optional-like wrapper around one element type.
    Optional(Box<ModelType>),
    /// A map-like wrapper with key and value slots.
    Map(Box<ModelType>, Box<ModelType>),
    /// A deferred/awaitable wrapper around one element type.
    Deferred(Box<ModelType>),
    /// An open (unbound) generic parameter. Never emitted as a dependency.
    GenericParam(String),
}

impl ModelType {
    /// Create a named type reference without generic arguments.
    pub fn named(id: impl Into<TypeId>) -> Self {
        Self::Named {
            id: id.into(),
            args: Vec::new(),
        }
    }

    /// Create a named type reference with generic arguments.
    pub fn generic(id: impl Into<TypeId>, args: Vec<ModelType>) -> Self {
        Self::Named {
            id: id.into(),
            args,
        }
    }

    /// Create a list-like wrapper.
    pub fn list(inner: ModelType) -> Self {
        Self::List(Box::new(inner))
    }

    /// Create an optional-like wrapper.
    pub fn optional(inner: ModelType) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Create a map-like wrapper.
    pub fn map(key: ModelType, value: ModelType) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Create a deferred/awaitable wrapper.
    pub fn deferred(inner: ModelType) -> Self {
        Self::Deferred(Box::new(inner))
    }

    /// Convenience: string primitive.
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    /// Convenience: int primitive.
    pub fn int() -> Self {
        Self::Primitive(PrimitiveKind::Int)
    }

    /// Convenience: float primitive.
    pub fn float() -> Self {
        Self::Primitive(PrimitiveKind::Float)
    }

    /// Convenience: bool primitive.
    pub fn bool() -> Self {
        Self::Primitive(PrimitiveKind::Bool)
    }

    /// Check if this shape is an optional wrapper.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}
