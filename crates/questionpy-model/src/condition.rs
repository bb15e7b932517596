//! Conditions that disable or hide a form element depending on another one.

use questionpy_array_converter::{
    ConvertError, Convertible, Declaration, Fields, Mixin, Record,
};

use crate::scalar::Scalar;

/// A condition on the form element called `name`, keyed by `kind`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    IsChecked(IsChecked),
    IsNotChecked(IsNotChecked),
    Equals(Equals),
    DoesNotEqual(DoesNotEqual),
    In(In),
}

impl Condition {
    /// Name of the element the condition looks at.
    pub fn name(&self) -> &str {
        match self {
            Self::IsChecked(c) => &c.name,
            Self::IsNotChecked(c) => &c.name,
            Self::Equals(c) => &c.name,
            Self::DoesNotEqual(c) => &c.name,
            Self::In(c) => &c.name,
        }
    }
}

impl Convertible for Condition {
    const CLASS: &'static str = "Condition";

    fn declare(decl: &mut Declaration<'_>) {
        decl.polymorphic("kind")
            .variant::<IsChecked>("is_checked")
            .variant::<IsNotChecked>("is_not_checked")
            .variant::<Equals>("equals")
            .variant::<DoesNotEqual>("does_not_equal")
            .variant::<In>("in");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        match fields.class() {
            IsChecked::CLASS => fields.into_variant().map(Self::IsChecked),
            IsNotChecked::CLASS => fields.into_variant().map(Self::IsNotChecked),
            Equals::CLASS => fields.into_variant().map(Self::Equals),
            DoesNotEqual::CLASS => fields.into_variant().map(Self::DoesNotEqual),
            In::CLASS => fields.into_variant().map(Self::In),
            _ => Err(fields.unknown_variant()),
        }
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        match self {
            Self::IsChecked(c) => record.variant(c),
            Self::IsNotChecked(c) => record.variant(c),
            Self::Equals(c) => record.variant(c),
            Self::DoesNotEqual(c) => record.variant(c),
            Self::In(c) => record.variant(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsChecked {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsNotChecked {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Equals {
    pub name: String,
    pub value: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoesNotEqual {
    pub name: String,
    pub value: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct In {
    pub name: String,
    pub value: Vec<Scalar>,
}

macro_rules! name_only_condition {
    ($ty:ident) => {
        impl Convertible for $ty {
            const CLASS: &'static str = stringify!($ty);

            fn declare(decl: &mut Declaration<'_>) {
                decl.extends::<Condition>();
            }

            fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
                Ok(Self {
                    name: fields.required("name")?,
                })
            }

            fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
                record.put("name", &self.name)
            }
        }
    };
}

macro_rules! valued_condition {
    ($ty:ident) => {
        impl Convertible for $ty {
            const CLASS: &'static str = stringify!($ty);

            fn declare(decl: &mut Declaration<'_>) {
                decl.extends::<Condition>();
            }

            fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
                Ok(Self {
                    name: fields.required("name")?,
                    value: fields.required("value")?,
                })
            }

            fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
                record.put("name", &self.name)?;
                record.put("value", &self.value)
            }
        }
    };
}

name_only_condition!(IsChecked);
name_only_condition!(IsNotChecked);
valued_condition!(Equals);
valued_condition!(DoesNotEqual);
valued_condition!(In);

/// Declares the condition lists shared by most form elements.
pub struct Conditional;

impl Mixin for Conditional {
    const NAME: &'static str = "Conditional";

    fn declare(decl: &mut Declaration<'_>) {
        decl.element_class::<Condition>("disable_if")
            .element_class::<Condition>("hide_if");
    }
}

/// The `disable_if` and `hide_if` lists of an element including [`Conditional`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    pub disable_if: Vec<Condition>,
    pub hide_if: Vec<Condition>,
}

impl Conditions {
    pub fn read(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            disable_if: fields.or_default("disable_if")?,
            hide_if: fields.or_default("hide_if")?,
        })
    }

    pub fn write(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("disable_if", &self.disable_if)?;
        record.put("hide_if", &self.hide_if)
    }

    pub fn is_empty(&self) -> bool {
        self.disable_if.is_empty() && self.hide_if.is_empty()
    }
}
