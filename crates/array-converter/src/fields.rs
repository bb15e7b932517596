//! Field binding for one object: [`Fields`] reads, [`Record`] writes.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::config::ClassConfig;
use crate::convert::{Convertible, FromRaw, ToRaw};
use crate::converter::Converter;
use crate::error::{ConfigError, ConvertError};

/// The raw mapping of one object, consumed key by key while it is constructed.
///
/// Every lookup tries the property's canonical key (its rename, or the
/// property name) and then its aliases in declaration order. A matched key is
/// removed, so later lookups only see what is left. Keys that nothing asks
/// for are ignored.
pub struct Fields<'c> {
    cx: &'c mut Converter,
    config: Arc<ClassConfig>,
    target: &'static str,
    class: &'static str,
    raw: Map<String, Value>,
    fallback: bool,
}

impl<'c> Fields<'c> {
    pub(crate) fn new(
        cx: &'c mut Converter,
        config: Arc<ClassConfig>,
        target: &'static str,
        class: &'static str,
        raw: Map<String, Value>,
        fallback: bool,
    ) -> Self {
        Self {
            cx,
            config,
            target,
            class,
            raw,
            fallback,
        }
    }

    /// The class to construct.
    ///
    /// For a polymorphic base this is the variant selected by the
    /// discriminator, or the fallback class.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// True when the class is the fallback variant, either chosen for an
    /// unknown discriminator value or requested directly as the target.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn config(&self) -> &ClassConfig {
        &self.config
    }

    /// Keys not consumed so far.
    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.raw.keys().map(String::as_str)
    }

    /// A field without a default.
    pub fn required<T: FromRaw>(&mut self, property: &str) -> Result<T, ConvertError> {
        match self.take(property) {
            Some((key, value)) => self.convert(property, key, value),
            None => Err(self.cx.missing_field(self.target, property)),
        }
    }

    /// A field falling back to `T::default()` when absent.
    pub fn or_default<T: FromRaw + Default>(&mut self, property: &str) -> Result<T, ConvertError> {
        self.or_else(property, T::default)
    }

    /// A field falling back to `default()` when absent.
    pub fn or_else<T: FromRaw>(
        &mut self,
        property: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ConvertError> {
        match self.take(property) {
            Some((key, value)) => self.convert(property, key, value),
            None => Ok(default()),
        }
    }

    /// A field left unset when absent or null.
    pub fn optional<T: FromRaw>(&mut self, property: &str) -> Result<Option<T>, ConvertError> {
        match self.take(property) {
            Some((key, value)) => self.convert::<Option<T>>(property, key, value),
            None => Ok(None),
        }
    }

    /// A repeatable field. A sequence contributes each element, any other
    /// value a single one, and an absent key none.
    pub fn variadic<T: FromRaw>(&mut self, property: &str) -> Result<Vec<T>, ConvertError> {
        match self.take(property) {
            Some((key, Value::Array(items))) => {
                self.check_element_class(property, T::type_hint().class(), || {
                    T::type_hint().to_string()
                })?;
                self.cx.path_mut().push_key(key);
                let result = self.cx.decode_sequence(items);
                self.cx.path_mut().pop();
                result
            }
            Some((key, value)) => {
                self.check_element_class(property, T::type_hint().class(), || {
                    T::type_hint().to_string()
                })?;
                self.cx.path_mut().push_key(key);
                let result = T::from_raw(value, self.cx);
                self.cx.path_mut().pop();
                result.map(|item| vec![item])
            }
            None => Ok(Vec::new()),
        }
    }

    /// Constructs variant `V` from what is left of the mapping.
    ///
    /// Called by a polymorphic base after matching [`class`](Self::class).
    /// The configuration of `V` is resolved anew.
    pub fn into_variant<V: Convertible>(&mut self) -> Result<V, ConvertError> {
        if V::CLASS != self.class {
            return Err(self.unknown_variant());
        }
        let config = self.cx.resolver_mut().resolve::<V>()?;
        let registered = config
            .polymorphism()
            .is_some_and(|polymorphism| polymorphism.is_variant(V::CLASS));
        if !registered && !self.fallback {
            return Err(ConfigError::VariantNotRegistered { class: V::CLASS }.into());
        }
        let raw = std::mem::take(&mut self.raw);
        let mut fields = Fields::new(&mut *self.cx, config, V::CLASS, V::CLASS, raw, self.fallback);
        let value = V::construct(&mut fields)?;
        fields.finish();
        Ok(value)
    }

    /// Error for a polymorphic base that has no arm for [`class`](Self::class).
    pub fn unknown_variant(&self) -> ConvertError {
        ConfigError::UnknownVariantClass {
            class: self.target,
            variant: self.class.to_string(),
        }
        .into()
    }

    pub(crate) fn finish(self) {
        if !self.raw.is_empty() {
            let ignored: Vec<&str> = self.raw.keys().map(String::as_str).collect();
            trace!(class = self.class, ?ignored, "ignoring unmatched keys");
        }
    }

    fn take(&mut self, property: &str) -> Option<(String, Value)> {
        let config = Arc::clone(&self.config);
        for key in config.lookup_keys(property) {
            if let Some(value) = self.raw.remove(key) {
                return Some((key.to_string(), value));
            }
        }
        None
    }

    fn convert<T: FromRaw>(
        &mut self,
        property: &str,
        key: String,
        value: Value,
    ) -> Result<T, ConvertError> {
        self.check_element_class(property, T::type_hint().element_class(), || {
            T::type_hint().to_string()
        })?;
        self.cx.path_mut().push_key(key);
        let result = T::from_raw(value, self.cx);
        self.cx.path_mut().pop();
        result
    }

    fn check_element_class(
        &self,
        property: &str,
        actual: Option<&'static str>,
        describe: impl FnOnce() -> String,
    ) -> Result<(), ConvertError> {
        match self.config.element_class(property) {
            Some(declared) if actual != Some(declared) => Err(ConfigError::ElementClassMismatch {
                class: self.class,
                property: property.to_string(),
                declared,
                actual: describe(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// The raw mapping of one object, written field by field.
pub struct Record<'c> {
    cx: &'c mut Converter,
    config: Arc<ClassConfig>,
    class: &'static str,
    out: Map<String, Value>,
}

impl<'c> Record<'c> {
    pub(crate) fn new(cx: &'c mut Converter, config: Arc<ClassConfig>, class: &'static str) -> Self {
        Self {
            cx,
            config,
            class,
            out: Map::new(),
        }
    }

    /// The runtime class being written.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Writes `property` under its rename, or its own name.
    pub fn put<T: ToRaw + ?Sized>(&mut self, property: &str, value: &T) -> Result<(), ConvertError> {
        let key = self.config.key_for(property).to_string();
        self.cx.path_mut().push_key(key.as_str());
        let raw = value.to_raw(self.cx);
        self.cx.path_mut().pop();
        self.out.insert(key, raw?);
        Ok(())
    }

    /// Hands over to variant `V`, whose configuration and runtime class
    /// replace the base's for the rest of the record.
    pub fn variant<V: Convertible>(&mut self, value: &V) -> Result<(), ConvertError> {
        self.config = self.cx.resolver_mut().resolve::<V>()?;
        self.class = V::CLASS;
        value.deconstruct(self)
    }

    pub(crate) fn finish(self) -> (Arc<ClassConfig>, &'static str, Map<String, Value>) {
        (self.config, self.class, self.out)
    }
}
