//! Completion stage: reading and writing field values.

use crate::address::update_form;
use crate::error::FormError;
use crate::spec::{Field, FieldValue, Form, FormValues};

/// Sets the value of `field_name` without checking it against the field type.
pub fn set_value(form: &Form, field_name: &str, value: impl Into<FieldValue>) -> Form {
    let value = value.into();
    update_form(form, field_name, |field| field.value = Some(value))
}

/// `None` when the field is missing or has no value yet.
pub fn get_value<'a>(form: &'a Form, field_name: &str) -> Option<&'a FieldValue> {
    form.field(field_name).and_then(|field| field.value.as_ref())
}

/// Values keyed by field name. Fields without a value are left out; when two
/// fields share a name the later one wins.
pub fn get_values(form: &Form) -> FormValues {
    form.fields
        .iter()
        .filter_map(|field| {
            field
                .value
                .as_ref()
                .map(|value| (field.name.clone(), value.clone()))
        })
        .collect()
}

pub fn require_field<'a>(form: &'a Form, field_name: &str) -> Result<&'a Field, FormError> {
    form.field(field_name)
        .ok_or_else(|| FormError::UnknownField(field_name.to_string()))
}
