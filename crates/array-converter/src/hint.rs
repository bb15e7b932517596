//! Declared types of fields, as seen by the converter.

use std::fmt;

use serde_json::Value;

/// The declared type of a field.
///
/// Used for diagnostics and for checking element-class declarations against
/// the Rust type that actually holds the elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    Bool,
    Int,
    Float,
    String,
    /// Any raw value, passed through untouched.
    Raw,
    Optional(Box<TypeHint>),
    Sequence(Box<TypeHint>),
    /// String-keyed mapping with uniformly typed values.
    Map(Box<TypeHint>),
    Class(&'static str),
}

impl TypeHint {
    pub fn optional(inner: TypeHint) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn sequence(element: TypeHint) -> Self {
        Self::Sequence(Box::new(element))
    }

    pub fn map(element: TypeHint) -> Self {
        Self::Map(Box::new(element))
    }

    /// The class this hint names, looking through `Optional`.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Self::Class(class) => Some(class),
            Self::Optional(inner) => inner.class(),
            _ => None,
        }
    }

    /// The class of the elements of a sequence or map, looking through `Optional`.
    pub fn element_class(&self) -> Option<&'static str> {
        match self {
            Self::Optional(inner) => inner.element_class(),
            Self::Sequence(element) | Self::Map(element) => element.class(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::Raw => f.write_str("mixed"),
            Self::Optional(inner) => write!(f, "?{inner}"),
            Self::Sequence(element) => write!(f, "array<{element}>"),
            Self::Map(element) => write!(f, "map<{element}>"),
            Self::Class(class) => f.write_str(class),
        }
    }
}

/// Name of the JSON type of a raw value, for diagnostics.
pub fn raw_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
