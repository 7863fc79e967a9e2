use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::find_field;
use crate::error::FormError;
use crate::spec::field::{Field, FieldValue};

/// Current values keyed by field name, as seen by conditional rules.
pub type FormValues = BTreeMap<String, FieldValue>;

/// Top-level form definition: a name plus fields in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Form {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Form {
    pub fn field(&self, name: &str) -> Option<&Field> {
        find_field(&self.fields, name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fails when a custom closure rule is attached, since those are not serializable.
    pub fn to_json_pretty(&self) -> Result<String, FormError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// JSON Schema describing the persisted [`Form`] shape.
pub fn form_schema() -> Result<Value, FormError> {
    Ok(serde_json::to_value(schemars::schema_for!(Form))?)
}
