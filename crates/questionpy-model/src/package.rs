//! Package metadata as reported by a QuestionPy package.

use std::fmt;

use indexmap::IndexMap;
use questionpy_array_converter::{
    ConvertError, Converter, Convertible, Declaration, Fields, FromRaw, Record, ToRaw, TypeHint,
};
use serde_json::Value;

/// What a package provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageType {
    QuestionType,
    Library,
    Question,
}

impl PackageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuestionType => "QUESTIONTYPE",
            Self::Library => "LIBRARY",
            Self::Question => "QUESTION",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "QUESTIONTYPE" => Some(Self::QuestionType),
            "LIBRARY" => Some(Self::Library),
            "QUESTION" => Some(Self::Question),
            _ => None,
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromRaw for PackageType {
    fn type_hint() -> TypeHint {
        TypeHint::Class("PackageType")
    }

    fn from_raw(value: Value, cx: &mut Converter) -> Result<Self, ConvertError> {
        match value.as_str().and_then(Self::parse) {
            Some(package_type) => Ok(package_type),
            None => Err(cx.unconvertible(&value, &Self::type_hint())),
        }
    }
}

impl ToRaw for PackageType {
    fn to_raw(&self, _cx: &mut Converter) -> Result<Value, ConvertError> {
        Ok(Value::String(self.as_str().to_string()))
    }
}

/// Metadata of a package, keyed by language where text is localized.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageInfo {
    pub package_hash: String,
    pub short_name: String,
    pub namespace: String,
    pub name: IndexMap<String, String>,
    pub version: String,
    pub package_type: PackageType,
    pub author: Option<String>,
    pub url: Option<String>,
    pub languages: Vec<String>,
    pub description: IndexMap<String, String>,
    pub icon: Option<String>,
    pub license: Option<String>,
    pub tags: Vec<String>,
}

impl PackageInfo {
    /// `@namespace/short_name`.
    pub fn identifier(&self) -> String {
        format!("@{}/{}", self.namespace, self.short_name)
    }

    /// The name in the first preferred language that has one, else the
    /// first name given, else the short name.
    pub fn localized_name(&self, preferred: &[&str]) -> &str {
        localized(&self.name, preferred).unwrap_or(&self.short_name)
    }

    /// Like [`localized_name`](Self::localized_name), without the short-name
    /// fallback.
    pub fn localized_description(&self, preferred: &[&str]) -> Option<&str> {
        localized(&self.description, preferred)
    }
}

fn localized<'a>(texts: &'a IndexMap<String, String>, preferred: &[&str]) -> Option<&'a str> {
    preferred
        .iter()
        .find_map(|lang| texts.get(*lang))
        .or_else(|| texts.values().next())
        .map(String::as_str)
}

impl Convertible for PackageInfo {
    const CLASS: &'static str = "PackageInfo";

    fn declare(decl: &mut Declaration<'_>) {
        decl.rename("package_type", "type")
            .alias("short_name", "shortname");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            package_hash: fields.required("package_hash")?,
            short_name: fields.required("short_name")?,
            namespace: fields.required("namespace")?,
            name: fields.required("name")?,
            version: fields.required("version")?,
            package_type: fields.required("package_type")?,
            author: fields.optional("author")?,
            url: fields.optional("url")?,
            languages: fields.or_default("languages")?,
            description: fields.or_default("description")?,
            icon: fields.optional("icon")?,
            license: fields.optional("license")?,
            tags: fields.or_default("tags")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("package_hash", &self.package_hash)?;
        record.put("short_name", &self.short_name)?;
        record.put("namespace", &self.namespace)?;
        record.put("name", &self.name)?;
        record.put("version", &self.version)?;
        record.put("package_type", &self.package_type)?;
        record.put("author", &self.author)?;
        record.put("url", &self.url)?;
        record.put("languages", &self.languages)?;
        record.put("description", &self.description)?;
        record.put("icon", &self.icon)?;
        record.put("license", &self.license)?;
        record.put("tags", &self.tags)
    }
}
