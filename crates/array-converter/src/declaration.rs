//! Declarations: the explicit, per-type stand-in for class attributes.
//!
//! A type states its configuration in [`Convertible::declare`] by calling the
//! builder methods on [`Declaration`]. Inherited layers (`extends`, `include`)
//! are always applied before the type's own declarations, regardless of the
//! order in which the calls are made.

use std::sync::Arc;

use crate::config::{ClassConfig, Polymorphism};
use crate::convert::Convertible;
use crate::error::ConfigError;
use crate::resolver::Resolver;

/// A bundle of declarations shared by several classes.
///
/// Mixins carry no data of their own. The including type still reads and
/// writes the fields; the mixin only contributes renames, aliases and element
/// classes for them.
pub trait Mixin: 'static {
    const NAME: &'static str;

    fn declare(decl: &mut Declaration<'_>);
}

/// Collects the declarations of one class while it is being resolved.
pub struct Declaration<'r> {
    resolver: &'r mut Resolver,
    class: &'static str,
    inherited: Vec<Arc<ClassConfig>>,
    own: ClassConfig,
    error: Option<ConfigError>,
}

impl<'r> Declaration<'r> {
    pub(crate) fn new(resolver: &'r mut Resolver, class: &'static str) -> Self {
        Self {
            resolver,
            class,
            inherited: Vec::new(),
            own: ClassConfig::new(class),
            error: None,
        }
    }

    /// The class being declared.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Inherits the effective configuration of `P`.
    pub fn extends<P: Convertible>(&mut self) -> &mut Self {
        match self.resolver.resolve::<P>() {
            Ok(config) => {
                self.inherited.push(config);
                self
            }
            Err(err) => self.fail(err),
        }
    }

    /// Includes the declarations of mixin `M`.
    pub fn include<M: Mixin>(&mut self) -> &mut Self {
        match self.resolver.resolve_mixin::<M>() {
            Ok(config) => {
                self.inherited.push(config);
                self
            }
            Err(err) => self.fail(err),
        }
    }

    /// Replaces the external key of `property` in both directions.
    pub fn rename(&mut self, property: &str, key: &str) -> &mut Self {
        if key.is_empty() {
            return self.empty_key(property);
        }
        if self.own.renames.contains_key(property) {
            let class = self.class;
            return self.fail(ConfigError::DuplicateRename {
                class,
                property: property.to_string(),
            });
        }
        self.own
            .renames
            .insert(property.to_string(), key.to_string());
        self
    }

    /// Adds an extra key accepted for `property` on input.
    pub fn alias(&mut self, property: &str, key: &str) -> &mut Self {
        if key.is_empty() {
            return self.empty_key(property);
        }
        let aliases = self.own.aliases.entry(property.to_string()).or_default();
        if !aliases.iter().any(|existing| existing == key) {
            aliases.push(key.to_string());
        }
        self
    }

    /// Declares `E` as the class of each element held by `property`.
    pub fn element_class<E: Convertible>(&mut self, property: &str) -> &mut Self {
        self.own
            .element_classes
            .insert(property.to_string(), E::CLASS);
        self
    }

    /// Makes the class polymorphic over the value found under `discriminator`.
    pub fn polymorphic(&mut self, discriminator: &str) -> &mut Self {
        if discriminator.is_empty() {
            return self.empty_key("<discriminator>");
        }
        self.own.polymorphism = Some(Polymorphism::new(discriminator));
        self
    }

    /// Registers `V` under a discriminator value.
    pub fn variant<V: Convertible>(&mut self, value: &str) -> &mut Self {
        let class = self.class;
        let Some(polymorphism) = self.own.polymorphism.as_mut() else {
            return self.fail(ConfigError::NotPolymorphic { class });
        };
        if polymorphism.variants.contains_key(value) {
            return self.fail(ConfigError::DuplicateVariant {
                class,
                value: value.to_string(),
            });
        }
        polymorphism.variants.insert(value.to_string(), V::CLASS);
        self
    }

    /// Uses `F` for discriminator values that have no registered variant.
    pub fn fallback<F: Convertible>(&mut self) -> &mut Self {
        let class = self.class;
        match self.own.polymorphism.as_mut() {
            Some(polymorphism) => {
                polymorphism.fallback = Some(F::CLASS);
                self
            }
            None => self.fail(ConfigError::NotPolymorphic { class }),
        }
    }

    pub(crate) fn layers(&self) -> usize {
        self.inherited.len()
    }

    pub(crate) fn finish(self) -> Result<ClassConfig, ConfigError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let mut config = ClassConfig::new(self.class);
        for layer in &self.inherited {
            config.merge(layer);
        }
        config.merge(&self.own);
        Ok(config)
    }

    fn empty_key(&mut self, property: &str) -> &mut Self {
        let class = self.class;
        self.fail(ConfigError::EmptyKey {
            class,
            property: property.to_string(),
        })
    }

    // The first error wins; later ones are usually consequences of it.
    fn fail(&mut self, err: ConfigError) -> &mut Self {
        if self.error.is_none() {
            self.error = Some(err);
        }
        self
    }
}
