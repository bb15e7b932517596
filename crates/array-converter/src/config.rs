//! Effective per-class configuration.
//!
//! A [`ClassConfig`] is the merge of a class's own declarations over those of
//! the classes it extends and the mixins it includes. It is read-only once
//! resolved.

use indexmap::IndexMap;

/// Discriminator-based variant selection for a polymorphic class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polymorphism {
    pub discriminator: String,
    /// Discriminator value to class identifier, in declaration order.
    pub variants: IndexMap<String, &'static str>,
    pub fallback: Option<&'static str>,
}

impl Polymorphism {
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            variants: IndexMap::new(),
            fallback: None,
        }
    }

    /// Class registered under a discriminator value.
    pub fn variant_for(&self, value: &str) -> Option<&'static str> {
        self.variants.get(value).copied()
    }

    /// Discriminator value registered for a class.
    pub fn value_of(&self, class: &str) -> Option<&str> {
        self.variants
            .iter()
            .find(|(_, variant)| **variant == class)
            .map(|(value, _)| value.as_str())
    }

    pub fn is_variant(&self, class: &str) -> bool {
        self.value_of(class).is_some()
    }

    fn merge(&mut self, other: &Polymorphism) {
        if self.discriminator != other.discriminator {
            *self = other.clone();
            return;
        }
        for (value, class) in &other.variants {
            self.variants.insert(value.clone(), *class);
        }
        if other.fallback.is_some() {
            self.fallback = other.fallback;
        }
    }
}

/// Renames, aliases, element classes and polymorphism of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassConfig {
    pub class: &'static str,
    /// Property name to external key, used in both directions.
    pub renames: IndexMap<String, String>,
    /// Property name to extra keys accepted on input only.
    pub aliases: IndexMap<String, Vec<String>>,
    pub element_classes: IndexMap<String, &'static str>,
    pub polymorphism: Option<Polymorphism>,
}

impl ClassConfig {
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            renames: IndexMap::new(),
            aliases: IndexMap::new(),
            element_classes: IndexMap::new(),
            polymorphism: None,
        }
    }

    /// External key of a property: its rename, or the property name itself.
    pub fn key_for<'a>(&'a self, property: &'a str) -> &'a str {
        self.renames
            .get(property)
            .map(String::as_str)
            .unwrap_or(property)
    }

    pub fn aliases_of(&self, property: &str) -> &[String] {
        self.aliases
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Keys consulted on input, canonical key first, then aliases in order.
    pub fn lookup_keys<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(self.key_for(property))
            .chain(self.aliases_of(property).iter().map(String::as_str))
    }

    pub fn element_class(&self, property: &str) -> Option<&'static str> {
        self.element_classes.get(property).copied()
    }

    pub fn polymorphism(&self) -> Option<&Polymorphism> {
        self.polymorphism.as_ref()
    }

    /// Applies `other` on top of this configuration.
    pub(crate) fn merge(&mut self, other: &ClassConfig) {
        for (property, key) in &other.renames {
            self.renames.insert(property.clone(), key.clone());
        }
        for (property, keys) in &other.aliases {
            let aliases = self.aliases.entry(property.clone()).or_default();
            for key in keys {
                if !aliases.contains(key) {
                    aliases.push(key.clone());
                }
            }
        }
        for (property, class) in &other.element_classes {
            self.element_classes.insert(property.clone(), *class);
        }
        match (&mut self.polymorphism, &other.polymorphism) {
            (Some(own), Some(theirs)) => own.merge(theirs),
            (own @ None, Some(theirs)) => *own = Some(theirs.clone()),
            (_, None) => {}
        }
    }
}
