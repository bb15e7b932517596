//! Conversion traits and the built-in field types.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::converter::Converter;
use crate::declaration::Declaration;
use crate::error::ConvertError;
use crate::fields::{Fields, Record};
use crate::hint::TypeHint;

/// A class the converter builds from, and flattens into, a raw mapping.
///
/// Structs read every field in [`construct`](Self::construct) before the
/// value exists, so instances are never observed half-initialized.
/// Polymorphic bases are enums: their `construct` matches on
/// [`Fields::class`] and hands over with [`Fields::into_variant`], and their
/// `deconstruct` hands over with [`Record::variant`].
pub trait Convertible: Sized + 'static {
    /// Stable identifier used in variant tables and diagnostics.
    const CLASS: &'static str;

    fn declare(decl: &mut Declaration<'_>) {
        let _ = decl;
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError>;

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError>;
}

/// A field type that can be read from a raw value.
pub trait FromRaw: Sized {
    fn type_hint() -> TypeHint;

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError>;
}

/// A value that can be written as a raw value.
pub trait ToRaw {
    fn to_raw(&self, cx: &mut Converter) -> Result<Value, ConvertError>;
}

impl<T: Convertible> FromRaw for T {
    fn type_hint() -> TypeHint {
        TypeHint::Class(T::CLASS)
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value {
            Value::Object(raw) => cx.decode_object::<T>(raw),
            other => Err(cx.unconvertible(&other, &Self::type_hint())),
        }
    }
}

impl<T: Convertible> ToRaw for T {
    fn to_raw(&self, cx: &mut Converter) -> Result<Value, ConvertError> {
        cx.encode_object(self).map(Value::Object)
    }
}

// -------------------------------------------------------------------------
// Scalars

impl FromRaw for bool {
    fn type_hint() -> TypeHint {
        TypeHint::Bool
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(cx.unconvertible(&other, &Self::type_hint())),
        }
    }
}

impl ToRaw for bool {
    fn to_raw(&self, _cx: &mut Converter) -> Result<Value, ConvertError> {
        Ok(Value::Bool(*self))
    }
}

impl FromRaw for i64 {
    fn type_hint() -> TypeHint {
        TypeHint::Int
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value.as_i64() {
            Some(n) => Ok(n),
            None => Err(cx.unconvertible(&value, &Self::type_hint())),
        }
    }
}

impl FromRaw for u64 {
    fn type_hint() -> TypeHint {
        TypeHint::Int
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value.as_u64() {
            Some(n) => Ok(n),
            None => Err(cx.unconvertible(&value, &Self::type_hint())),
        }
    }
}

macro_rules! narrow_int {
    ($($ty:ty => $wide:ty),*) => {
        $(
            impl FromRaw for $ty {
                fn type_hint() -> TypeHint {
                    TypeHint::Int
                }

                fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
                    let wide = <$wide>::from_raw(value.clone(), cx)?;
                    <$ty>::try_from(wide).map_err(|_| cx.unconvertible(&value, &Self::type_hint()))
                }
            }
        )*
    };
}

narrow_int!(i32 => i64, u32 => u64, usize => u64);

macro_rules! int_to_raw {
    ($($ty:ty),*) => {
        $(
            impl ToRaw for $ty {
                fn to_raw(&self, _cx: &mut Converter) -> Result<Value, ConvertError> {
                    Ok(Value::from(*self))
                }
            }
        )*
    };
}

int_to_raw!(i32, i64, u32, u64, usize);

impl FromRaw for f64 {
    fn type_hint() -> TypeHint {
        TypeHint::Float
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value.as_f64() {
            Some(n) => Ok(n),
            None => Err(cx.unconvertible(&value, &Self::type_hint())),
        }
    }
}

/// NaN and infinities have no JSON form.
impl ToRaw for f64 {
    fn to_raw(&self, cx: &mut Converter) -> Result<Value, ConvertError> {
        if !self.is_finite() {
            return Err(ConvertError::UnconvertibleValue {
                found: "float",
                expected: "finite float".to_string(),
                at: cx.pointer(),
            });
        }
        Ok(Value::from(*self))
    }
}

impl FromRaw for String {
    fn type_hint() -> TypeHint {
        TypeHint::String
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(cx.unconvertible(&other, &Self::type_hint())),
        }
    }
}

impl ToRaw for String {
    fn to_raw(&self, _cx: &mut Converter) -> Result<Value, ConvertError> {
        Ok(Value::String(self.clone()))
    }
}

impl ToRaw for str {
    fn to_raw(&self, _cx: &mut Converter) -> Result<Value, ConvertError> {
        Ok(Value::String(self.to_string()))
    }
}

/// Untyped: any raw value passes through as-is.
impl FromRaw for Value {
    fn type_hint() -> TypeHint {
        TypeHint::Raw
    }

    fn from_raw(value: Value, _cx: &mut Converter) -> Result<Self, ConvertError> {
        Ok(value)
    }
}

impl ToRaw for Value {
    fn to_raw(&self, _cx: &mut Converter) -> Result<Value, ConvertError> {
        Ok(self.clone())
    }
}

// -------------------------------------------------------------------------
// Containers

impl<T: FromRaw> FromRaw for Option<T> {
    fn type_hint() -> TypeHint {
        TypeHint::optional(T::type_hint())
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_raw(other, cx).map(Some),
        }
    }
}

impl<T: ToRaw> ToRaw for Option<T> {
    fn to_raw(&self, cx: &mut Converter) -> Result<Value, ConvertError> {
        match self {
            Some(value) => value.to_raw(cx),
            None => Ok(Value::Null),
        }
    }
}

impl<T: FromRaw> FromRaw for Vec<T> {
    fn type_hint() -> TypeHint {
        TypeHint::sequence(T::type_hint())
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value {
            Value::Array(items) => cx.decode_sequence(items),
            other => Err(cx.unconvertible(&other, &Self::type_hint())),
        }
    }
}

impl<T: ToRaw> ToRaw for Vec<T> {
    fn to_raw(&self, cx: &mut Converter) -> Result<Value, ConvertError> {
        self.as_slice().to_raw(cx)
    }
}

impl<T: ToRaw> ToRaw for [T] {
    fn to_raw(&self, cx: &mut Converter) -> Result<Value, ConvertError> {
        cx.encode_sequence(self).map(Value::Array)
    }
}

/// String-keyed map. An empty array is accepted as an empty map, as PHP
/// encodes empty associative arrays that way.
impl<T: FromRaw> FromRaw for IndexMap<String, T> {
    fn type_hint() -> TypeHint {
        TypeHint::map(T::type_hint())
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value {
            Value::Object(entries) => cx.decode_entries(entries),
            Value::Array(items) if items.is_empty() => Ok(IndexMap::new()),
            other => Err(cx.unconvertible(&other, &Self::type_hint())),
        }
    }
}

impl<T: ToRaw> ToRaw for IndexMap<String, T> {
    fn to_raw(&self, cx: &mut Converter) -> Result<Value, ConvertError> {
        let mut out = Map::new();
        for (key, value) in self {
            cx.path_mut().push_key(key.as_str());
            let raw = value.to_raw(cx);
            cx.path_mut().pop();
            out.insert(key.clone(), raw?);
        }
        Ok(Value::Object(out))
    }
}
