//! Error and warning types.
//!
//! Data errors describe raw input that does not fit the target type. They are
//! reported to the caller and never recovered from internally. Configuration
//! errors are programmer errors in a type's declarations and are kept apart in
//! [`ConfigError`].

use std::fmt;

use thiserror::Error;

/// A malformed or inconsistent declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{class}` takes part in its own declaration chain")]
    CyclicDeclaration { class: &'static str },
    #[error("property `{property}` of `{class}` is renamed more than once")]
    DuplicateRename {
        class: &'static str,
        property: String,
    },
    #[error("discriminator value {value:?} is declared twice by `{class}`")]
    DuplicateVariant { class: &'static str, value: String },
    #[error("`{class}` declares an empty key for `{property}`")]
    EmptyKey {
        class: &'static str,
        property: String,
    },
    #[error("`{class}` declares a variant or fallback before declaring a discriminator")]
    NotPolymorphic { class: &'static str },
    #[error("`{class}` is not registered in its own variant map")]
    VariantNotRegistered { class: &'static str },
    #[error("`{class}` cannot construct variant `{variant}`")]
    UnknownVariantClass {
        class: &'static str,
        variant: String,
    },
    #[error("runtime class `{class}` has no value for discriminator `{discriminator}`")]
    UnregisteredVariant {
        class: &'static str,
        discriminator: String,
    },
    #[error(
        "property `{property}` of `{class}` declares element class `{declared}` but holds `{actual}`"
    )]
    ElementClassMismatch {
        class: &'static str,
        property: String,
        declared: &'static str,
        actual: String,
    },
}

/// Conversion failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("missing required field `{field}` for `{class}` at `{at}`")]
    MissingField {
        class: &'static str,
        field: String,
        at: String,
    },
    #[error("unknown value {value:?} for discriminator `{discriminator}` of `{class}` at `{at}`")]
    UnknownVariant {
        class: &'static str,
        discriminator: String,
        value: String,
        at: String,
    },
    #[error("`{class}` expects discriminator {expected:?} but got {found:?} at `{at}`")]
    VariantMismatch {
        class: &'static str,
        expected: String,
        found: String,
        at: String,
    },
    #[error("cannot convert value of type {found} to type {expected} at `{at}`")]
    UnconvertibleValue {
        found: &'static str,
        expected: String,
        at: String,
    },
    #[error("value nested deeper than {limit} levels at `{at}`")]
    RecursionLimit { limit: usize, at: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ConvertError {
    /// True for errors caused by the raw input rather than by declarations.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// JSON pointer of the failing location, if the error is tied to one.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::MissingField { at, .. }
            | Self::UnknownVariant { at, .. }
            | Self::VariantMismatch { at, .. }
            | Self::UnconvertibleValue { at, .. }
            | Self::RecursionLimit { at, .. } => Some(at),
            Self::Config(_) => None,
        }
    }
}

/// A non-fatal diagnostic collected while converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An unregistered discriminator value was replaced by the fallback variant.
    UnknownVariant {
        class: &'static str,
        discriminator: String,
        value: String,
        fallback: &'static str,
        at: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVariant {
                class,
                discriminator,
                value,
                fallback,
                at,
            } => write!(
                f,
                "unknown value {value:?} for discriminator `{discriminator}` of `{class}` at `{at}`, using `{fallback}`"
            ),
        }
    }
}
