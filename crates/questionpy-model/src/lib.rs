//! JSON wire models of a QuestionPy package.
//!
//! Every model here is declared through [`questionpy_array_converter`] and
//! crosses the JSON boundary only through it.
//!
//! ```
//! use questionpy_model::{parse, Condition};
//!
//! let condition: Condition = parse(r#"{"kind": "is_checked", "name": "agree"}"#).unwrap();
//! assert_eq!(condition.name(), "agree");
//! ```

pub mod condition;
pub mod form;
pub mod package;
pub mod scalar;

pub use condition::{Condition, Conditional, Conditions};
pub use form::{
    ChoiceOption, FormElement, FormSection, OptionsFormDefinition, RepetitionElement,
};
pub use package::{PackageInfo, PackageType};
pub use scalar::Scalar;

use questionpy_array_converter::{from_value, to_raw, ConvertError, Convertible};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Parses JSON text into a model.
pub fn parse<T: Convertible>(text: &str) -> Result<T, ModelError> {
    let value = serde_json::from_str(text)?;
    Ok(from_value(value)?)
}

/// Renders a model as compact JSON text.
pub fn render<T: Convertible>(value: &T) -> Result<String, ModelError> {
    let raw = to_raw(value)?;
    Ok(serde_json::to_string(&raw)?)
}
