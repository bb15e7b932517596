//! Classes shared by the integration tests.

#![allow(dead_code)]

use questionpy_array_converter::{
    ConvertError, Convertible, Declaration, Fields, Mixin, Record,
};
use serde_json::{Map, Value};

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// -------------------------------------------------------------------------
// Simple

#[derive(Debug, Clone, PartialEq)]
pub struct Simple {
    pub prop: String,
}

impl Simple {
    pub fn new(prop: &str) -> Self {
        Self {
            prop: prop.to_string(),
        }
    }
}

impl Convertible for Simple {
    const CLASS: &'static str = "Simple";

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            prop: fields.required("prop")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("prop", &self.prop)
    }
}

// -------------------------------------------------------------------------
// Renames and aliases

#[derive(Debug, Clone, PartialEq)]
pub struct Aliased {
    pub my_prop: String,
    pub other: Option<String>,
}

impl Convertible for Aliased {
    const CLASS: &'static str = "Aliased";

    fn declare(decl: &mut Declaration<'_>) {
        decl.rename("my_prop", "my_prop_1")
            .alias("my_prop", "my_alias_1")
            .alias("my_prop", "my_alias_2");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            my_prop: fields.required("my_prop")?,
            other: fields.optional("other")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("my_prop", &self.my_prop)?;
        record.put("other", &self.other)
    }
}

/// Adds a second alias through a subclass and a mixin.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedChild {
    pub my_prop: String,
}

pub struct LegacyKeys;

impl Mixin for LegacyKeys {
    const NAME: &'static str = "LegacyKeys";

    fn declare(decl: &mut Declaration<'_>) {
        decl.alias("my_prop", "myprop");
    }
}

impl Convertible for AliasedChild {
    const CLASS: &'static str = "AliasedChild";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<Aliased>()
            .include::<LegacyKeys>()
            .alias("my_prop", "my_alias_3");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            my_prop: fields.required("my_prop")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("my_prop", &self.my_prop)
    }
}

// -------------------------------------------------------------------------
// Polymorphism

#[derive(Debug, Clone, PartialEq)]
pub enum Base {
    Variant1(Variant1),
    Variant2(Variant2),
    Fallback(FallbackVariant),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variant1 {
    pub prop: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variant2 {
    pub prop: String,
    pub extra: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackVariant {
    pub prop: String,
    /// Keys left over when built as the fallback for an unknown value.
    pub unmatched: Vec<String>,
}

impl Convertible for Base {
    const CLASS: &'static str = "Base";

    fn declare(decl: &mut Declaration<'_>) {
        decl.polymorphic("discriminator")
            .variant::<Variant1>("var1")
            .variant::<Variant2>("var2")
            .fallback::<FallbackVariant>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        match fields.class() {
            Variant1::CLASS => fields.into_variant().map(Self::Variant1),
            Variant2::CLASS => fields.into_variant().map(Self::Variant2),
            FallbackVariant::CLASS => fields.into_variant().map(Self::Fallback),
            _ => Err(fields.unknown_variant()),
        }
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        match self {
            Self::Variant1(v) => record.variant(v),
            Self::Variant2(v) => record.variant(v),
            Self::Fallback(v) => record.variant(v),
        }
    }
}

impl Convertible for Variant1 {
    const CLASS: &'static str = "Variant1";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<Base>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            prop: fields.required("prop")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("prop", &self.prop)
    }
}

impl Convertible for Variant2 {
    const CLASS: &'static str = "Variant2";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<Base>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            prop: fields.required("prop")?,
            extra: fields.or_else("extra", || 42)?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("prop", &self.prop)?;
        record.put("extra", &self.extra)
    }
}

impl Convertible for FallbackVariant {
    const CLASS: &'static str = "FallbackVariant";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<Base>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        let prop = fields.required("prop")?;
        let unmatched = if fields.is_fallback() {
            fields.remaining().map(str::to_string).collect()
        } else {
            Vec::new()
        };
        Ok(Self { prop, unmatched })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("prop", &self.prop)
    }
}

/// Extends `Base` without being registered in its variant map.
#[derive(Debug, Clone, PartialEq)]
pub struct Stray;

impl Convertible for Stray {
    const CLASS: &'static str = "Stray";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<Base>();
    }

    fn construct(_fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self)
    }

    fn deconstruct(&self, _record: &mut Record<'_>) -> Result<(), ConvertError> {
        Ok(())
    }
}

/// Routes every variant through `Stray`, which is not registered.
#[derive(Debug)]
pub struct Misrouted(pub Stray);

impl Convertible for Misrouted {
    const CLASS: &'static str = "Misrouted";

    fn declare(decl: &mut Declaration<'_>) {
        decl.polymorphic("discriminator").variant::<Stray>("stray");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        fields.into_variant().map(Self)
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.variant(&self.0)
    }
}

// -------------------------------------------------------------------------
// Element classes and field kinds

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayHolder {
    pub myarray: Vec<Simple>,
    pub untyped: Vec<Value>,
    pub shapes: Vec<Base>,
}

impl Convertible for ArrayHolder {
    const CLASS: &'static str = "ArrayHolder";

    fn declare(decl: &mut Declaration<'_>) {
        decl.element_class::<Simple>("myarray")
            .element_class::<Base>("shapes");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            myarray: fields.or_default("myarray")?,
            untyped: fields.or_default("untyped")?,
            shapes: fields.or_default("shapes")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("myarray", &self.myarray)?;
        record.put("untyped", &self.untyped)?;
        record.put("shapes", &self.shapes)
    }
}

/// Declares `Simple` elements but holds untyped ones.
#[derive(Debug)]
pub struct MismatchedElements {
    pub items: Vec<Value>,
}

impl Convertible for MismatchedElements {
    const CLASS: &'static str = "MismatchedElements";

    fn declare(decl: &mut Declaration<'_>) {
        decl.element_class::<Simple>("items");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            items: fields.required("items")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("items", &self.items)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub name: String,
    pub count: i64,
    pub nested: Option<Simple>,
    pub tags: Vec<String>,
}

impl Convertible for Params {
    const CLASS: &'static str = "Params";

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            count: fields.or_else("count", || 1)?,
            nested: fields.optional("nested")?,
            tags: fields.variadic("tags")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("count", &self.count)?;
        record.put("nested", &self.nested)?;
        record.put("tags", &self.tags)
    }
}
