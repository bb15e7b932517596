//! questionpy-array-converter - declarative conversion between raw JSON
//! values and typed Rust values.
//!
//! Each type states its wire configuration up front in
//! [`Convertible::declare`]:
//!
//! - renames, which replace a property's key in both directions
//! - aliases, extra keys accepted on input after the canonical one
//! - element classes for sequence-valued properties
//! - polymorphism, a discriminator key with a variant table and an optional
//!   fallback
//!
//! Declarations are inherited through [`Declaration::extends`] and
//! [`Declaration::include`], ancestors first. The [`Converter`] consults the
//! resolved [`ClassConfig`] to move between `serde_json::Value` and typed
//! values.
//!
//! ```
//! use questionpy_array_converter::{
//!     from_value, to_raw, ConvertError, Convertible, Declaration, Fields, Record,
//! };
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Prop {
//!     value: String,
//! }
//!
//! impl Convertible for Prop {
//!     const CLASS: &'static str = "Prop";
//!
//!     fn declare(decl: &mut Declaration<'_>) {
//!         decl.rename("value", "my_prop_1").alias("value", "my_alias_1");
//!     }
//!
//!     fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
//!         Ok(Self {
//!             value: fields.required("value")?,
//!         })
//!     }
//!
//!     fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
//!         record.put("value", &self.value)
//!     }
//! }
//!
//! let prop: Prop = from_value(json!({"my_alias_1": "v"}))?;
//! assert_eq!(prop.value, "v");
//! assert_eq!(to_raw(&prop)?, json!({"my_prop_1": "v"}));
//! # Ok::<(), ConvertError>(())
//! ```

pub mod config;
pub mod convert;
pub mod converter;
pub mod declaration;
pub mod error;
pub mod fields;
pub mod hint;
pub mod path;
pub mod resolver;

pub use config::{ClassConfig, Polymorphism};
pub use convert::{Convertible, FromRaw, ToRaw};
pub use converter::{from_raw, from_value, to_raw, Converter, ConverterOptions};
pub use declaration::{Declaration, Mixin};
pub use error::{ConfigError, ConvertError, Warning};
pub use fields::{Fields, Record};
pub use hint::TypeHint;
pub use resolver::Resolver;
