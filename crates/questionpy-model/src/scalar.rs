//! Scalar values compared by conditions.

use questionpy_array_converter::{ConvertError, Converter, FromRaw, ToRaw, TypeHint};
use serde_json::Value;

/// A non-null JSON scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl FromRaw for Scalar {
    fn type_hint() -> TypeHint {
        TypeHint::Class("scalar")
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value {
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::String(s) => Ok(Self::String(s)),
            Value::Number(n) => match n.as_i64().map(Self::Int) {
                Some(int) => Ok(int),
                None => f64::from_raw(Value::Number(n), cx).map(Self::Float),
            },
            other => Err(cx.unconvertible(&other, &Self::type_hint())),
        }
    }
}

impl ToRaw for Scalar {
    fn to_raw(&self, cx: &mut Converter) -> Result<Value, ConvertError> {
        match self {
            Self::Bool(b) => b.to_raw(cx),
            Self::Int(i) => i.to_raw(cx),
            Self::Float(f) => f.to_raw(cx),
            Self::String(s) => s.to_raw(cx),
        }
    }
}
