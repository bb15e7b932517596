//! The converter: entry points, discriminator handling, recursion guard.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

use crate::convert::{Convertible, FromRaw, ToRaw};
use crate::error::{ConfigError, ConvertError, Warning};
use crate::fields::{Fields, Record};
use crate::hint::{raw_type_name, TypeHint};
use crate::path::Path;
use crate::resolver::Resolver;

/// Converter options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Deepest object or sequence nesting accepted in either direction.
    pub max_depth: usize,
    /// Fail with [`ConvertError::UnknownVariant`] even when a fallback
    /// variant is configured.
    pub strict_variants: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            strict_variants: false,
        }
    }
}

/// Converts between raw values and [`Convertible`] types.
///
/// Holds the configuration cache and the warnings collected so far. A
/// converter may be reused for any number of conversions.
#[derive(Debug, Default)]
pub struct Converter {
    options: ConverterOptions,
    resolver: Resolver,
    path: Path,
    depth: usize,
    warnings: Vec<Warning>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConverterOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn resolver_mut(&mut self) -> &mut Resolver {
        &mut self.resolver
    }

    /// Builds a `T`, or the variant of `T` the discriminator selects.
    pub fn from_raw<T: Convertible>(&mut self, raw: Map<String, Value>) -> Result<T, ConvertError> {
        self.reset();
        self.decode_object(raw)
    }

    /// Reads any field type from a raw value.
    pub fn from_value<T: FromRaw>(&mut self, value: Value) -> Result<T, ConvertError> {
        self.reset();
        T::from_raw(value, self)
    }

    /// Writes a value as a mapping (for objects) or a scalar.
    pub fn to_raw<T: ToRaw + ?Sized>(&mut self, value: &T) -> Result<Value, ConvertError> {
        self.reset();
        value.to_raw(self)
    }

    /// Warnings collected since the converter was created or last drained.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    // ---------------------------------------------------------------------
    // Objects

    pub(crate) fn decode_object<T: Convertible>(
        &mut self,
        raw: Map<String, Value>,
    ) -> Result<T, ConvertError> {
        self.enter()?;
        let result = self.decode_object_inner(raw);
        self.depth -= 1;
        result
    }

    fn decode_object_inner<T: Convertible>(
        &mut self,
        mut raw: Map<String, Value>,
    ) -> Result<T, ConvertError> {
        let config = self.resolver.resolve::<T>()?;
        let mut class = T::CLASS;
        let mut fallback = false;

        if let Some(polymorphism) = config.polymorphism() {
            let discriminator = polymorphism.discriminator.as_str();
            let supplied = self.take_discriminator(&mut raw, discriminator)?;

            if let Some(expected) = polymorphism.value_of(T::CLASS) {
                // Explicit variant target: the discriminator may only confirm it.
                if let Some(found) = supplied.filter(|found| found != expected) {
                    return Err(ConvertError::VariantMismatch {
                        class: T::CLASS,
                        expected: expected.to_string(),
                        found,
                        at: self.path.pointer(),
                    });
                }
            } else if polymorphism.fallback == Some(T::CLASS) {
                // Explicit fallback target accepts any discriminator.
                fallback = true;
            } else {
                let resolved = supplied
                    .as_deref()
                    .and_then(|value| polymorphism.variant_for(value));
                match resolved {
                    Some(variant) => class = variant,
                    None => {
                        let value = supplied.unwrap_or_else(|| "null".to_string());
                        match polymorphism.fallback {
                            Some(fallback_class) if !self.options.strict_variants => {
                                let at = self.path.pointer();
                                warn!(
                                    class = T::CLASS,
                                    discriminator,
                                    value = value.as_str(),
                                    fallback = fallback_class,
                                    at = at.as_str(),
                                    "unknown discriminator value, using fallback variant"
                                );
                                self.warnings.push(Warning::UnknownVariant {
                                    class: T::CLASS,
                                    discriminator: discriminator.to_string(),
                                    value,
                                    fallback: fallback_class,
                                    at,
                                });
                                class = fallback_class;
                                fallback = true;
                            }
                            _ => {
                                return Err(ConvertError::UnknownVariant {
                                    class: T::CLASS,
                                    discriminator: discriminator.to_string(),
                                    value,
                                    at: self.path.pointer(),
                                })
                            }
                        }
                    }
                }
            }
        }

        let mut fields = Fields::new(self, config, T::CLASS, class, raw, fallback);
        let value = T::construct(&mut fields)?;
        fields.finish();
        Ok(value)
    }

    pub(crate) fn encode_object<T: Convertible>(
        &mut self,
        value: &T,
    ) -> Result<Map<String, Value>, ConvertError> {
        self.enter()?;
        let result = self.encode_object_inner(value);
        self.depth -= 1;
        result
    }

    fn encode_object_inner<T: Convertible>(
        &mut self,
        value: &T,
    ) -> Result<Map<String, Value>, ConvertError> {
        let config = self.resolver.resolve::<T>()?;
        let mut record = Record::new(self, config, T::CLASS);
        value.deconstruct(&mut record)?;
        let (config, class, mut out) = record.finish();

        if let Some(polymorphism) = config.polymorphism() {
            let Some(discriminator_value) = polymorphism.value_of(class) else {
                return Err(ConfigError::UnregisteredVariant {
                    class,
                    discriminator: polymorphism.discriminator.clone(),
                }
                .into());
            };
            out.insert(
                polymorphism.discriminator.clone(),
                Value::String(discriminator_value.to_string()),
            );
        }
        Ok(out)
    }

    // ---------------------------------------------------------------------
    // Sequences and maps

    pub(crate) fn decode_sequence<T: FromRaw>(
        &mut self,
        items: Vec<Value>,
    ) -> Result<Vec<T>, ConvertError> {
        self.enter()?;
        let mut out = Vec::with_capacity(items.len());
        let mut result = Ok(());
        for (index, item) in items.into_iter().enumerate() {
            self.path.push_index(index);
            let converted = T::from_raw(item, self);
            self.path.pop();
            match converted {
                Ok(value) => out.push(value),
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        self.depth -= 1;
        result.map(|()| out)
    }

    pub(crate) fn decode_entries<T: FromRaw>(
        &mut self,
        entries: Map<String, Value>,
    ) -> Result<IndexMap<String, T>, ConvertError> {
        self.enter()?;
        let mut out = IndexMap::with_capacity(entries.len());
        let mut result = Ok(());
        for (key, item) in entries {
            self.path.push_key(key.as_str());
            let converted = T::from_raw(item, self);
            self.path.pop();
            match converted {
                Ok(value) => {
                    out.insert(key, value);
                }
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        self.depth -= 1;
        result.map(|()| out)
    }

    pub(crate) fn encode_sequence<T: ToRaw>(
        &mut self,
        items: &[T],
    ) -> Result<Vec<Value>, ConvertError> {
        self.enter()?;
        let mut out = Vec::with_capacity(items.len());
        let mut result = Ok(());
        for (index, item) in items.iter().enumerate() {
            self.path.push_index(index);
            let converted = item.to_raw(self);
            self.path.pop();
            match converted {
                Ok(value) => out.push(value),
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        self.depth -= 1;
        result.map(|()| out)
    }

    // ---------------------------------------------------------------------
    // Helpers

    pub(crate) fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    pub(crate) fn missing_field(&self, class: &'static str, field: &str) -> ConvertError {
        ConvertError::MissingField {
            class,
            field: field.to_string(),
            at: self.path.pointer(),
        }
    }

    /// Error for a raw value that does not fit `expected`, at the current location.
    pub fn unconvertible(&self, value: &Value, expected: &TypeHint) -> ConvertError {
        ConvertError::UnconvertibleValue {
            found: raw_type_name(value),
            expected: expected.to_string(),
            at: self.path.pointer(),
        }
    }

    /// Removes the discriminator and renders it as a variant-table key.
    fn take_discriminator(
        &mut self,
        raw: &mut Map<String, Value>,
        key: &str,
    ) -> Result<Option<String>, ConvertError> {
        match raw.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(value @ (Value::Bool(_) | Value::Number(_))) => Ok(Some(value.to_string())),
            Some(value) => {
                self.path.push_key(key);
                let err = self.unconvertible(&value, &TypeHint::String);
                self.path.pop();
                Err(err)
            }
        }
    }

    fn enter(&mut self) -> Result<(), ConvertError> {
        if self.depth >= self.options.max_depth {
            return Err(ConvertError::RecursionLimit {
                limit: self.options.max_depth,
                at: self.path.pointer(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    // Only a top-level call starts over; one made from inside a field
    // conversion keeps the enclosing depth and path.
    fn reset(&mut self) {
        if self.depth == 0 {
            self.path = Path::new();
        }
    }

    pub(crate) fn pointer(&self) -> String {
        self.path.pointer()
    }
}

/// Builds a `T` from a raw mapping with a fresh converter.
///
/// Fallback warnings are only reported through `tracing`; use a
/// [`Converter`] to collect them.
pub fn from_raw<T: Convertible>(raw: Map<String, Value>) -> Result<T, ConvertError> {
    Converter::new().from_raw(raw)
}

/// Reads any field type from a raw value with a fresh converter.
pub fn from_value<T: FromRaw>(value: Value) -> Result<T, ConvertError> {
    Converter::new().from_value(value)
}

/// Writes a value as raw with a fresh converter.
pub fn to_raw<T: ToRaw + ?Sized>(value: &T) -> Result<Value, ConvertError> {
    Converter::new().to_raw(value)
}
