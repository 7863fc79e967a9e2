use std::{borrow::Cow, fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::rules::{ConditionalRule, ValidationRule};

/// Supported input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Boolean,
    Select,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Boolean => "boolean",
            FieldType::Select => "select",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "string" => Ok(FieldType::Text),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "select" | "choice" => Ok(FieldType::Select),
            _ => Err(FormError::UnknownFieldType(value.to_string())),
        }
    }
}

/// Value held by a field. Text and select fields carry strings, boolean fields
/// carry booleans, but nothing enforces the pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }

    /// Textual view used by rules that inspect characters.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::Bool(flag) => Cow::Owned(flag.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// One named input slot of a form.
///
/// A freshly added field only carries `type` and `name`; every other attribute
/// stays absent until a setter fills it in. `errors` and `visible` are written
/// by [`crate::validate`] and [`crate::check_visibility`] on the snapshot they
/// return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_visibility: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_rules: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_rules: Vec<ConditionalRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl Field {
    pub fn new(kind: FieldType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: None,
            options: None,
            default_visibility: None,
            validation_rules: Vec::new(),
            conditional_rules: Vec::new(),
            errors: None,
            visible: None,
        }
    }

    /// Visibility before any rule has been evaluated.
    pub fn visible_by_default(&self) -> bool {
        self.default_visibility.unwrap_or(true)
    }
}
