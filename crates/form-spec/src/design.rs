//! Design stage: building up the schema of a form.
//!
//! Every function borrows the input form and returns a new one.

use std::collections::HashSet;

use crate::address::update_form;
use crate::error::FormError;
use crate::rules::{ConditionalRule, ValidationRule};
use crate::spec::{Field, FieldType, Form};

pub fn new_form() -> Form {
    Form::default()
}

pub fn set_name(form: &Form, name: impl Into<String>) -> Form {
    Form {
        name: name.into(),
        fields: form.fields.clone(),
    }
}

pub fn get_name(form: &Form) -> &str {
    &form.name
}

/// Appends a minimal `{type, name}` field. Duplicate names are accepted; see
/// [`try_add_field`] for the checked variant.
pub fn add_field(form: &Form, kind: FieldType, name: impl Into<String>) -> Form {
    let mut fields = form.fields.clone();
    fields.push(Field::new(kind, name));
    Form {
        name: form.name.clone(),
        fields,
    }
}

pub fn try_add_field(
    form: &Form,
    kind: FieldType,
    name: impl Into<String>,
) -> Result<Form, FormError> {
    let name = name.into();
    if form.field(&name).is_some() {
        return Err(FormError::DuplicateField(name));
    }
    Ok(add_field(form, kind, name))
}

/// Returns the first name that appears more than once.
pub fn check_unique_names(form: &Form) -> Result<(), FormError> {
    let mut seen = HashSet::new();
    for name in form.field_names() {
        if !seen.insert(name) {
            return Err(FormError::DuplicateField(name.to_string()));
        }
    }
    Ok(())
}

pub fn set_field_options<I, S>(form: &Form, field_name: &str, options: I) -> Form
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let options = options.into_iter().map(Into::into).collect::<Vec<_>>();
    update_form(form, field_name, |field| field.options = Some(options))
}

pub fn set_default_visibility(form: &Form, field_name: &str, visible: bool) -> Form {
    update_form(form, field_name, |field| field.default_visibility = Some(visible))
}

pub fn add_validation_rule(form: &Form, field_name: &str, rule: ValidationRule) -> Form {
    update_form(form, field_name, |field| field.validation_rules.push(rule))
}

pub fn add_conditional_rule(form: &Form, field_name: &str, rule: ConditionalRule) -> Form {
    update_form(form, field_name, |field| field.conditional_rules.push(rule))
}
