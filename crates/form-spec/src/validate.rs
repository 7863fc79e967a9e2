use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::spec::{Field, Form};
use crate::fill::get_values;
use crate::visibility::is_visible;

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Summary of the validation failures on visible fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Runs every rule of `field` in attachment order, without short-circuiting.
pub fn field_errors(field: &Field) -> Vec<String> {
    field
        .validation_rules
        .iter()
        .filter_map(|rule| rule.check(field))
        .collect()
}

/// Returns a snapshot with `errors` set on every field.
pub fn validate(form: &Form) -> Form {
    let fields = form
        .fields
        .iter()
        .map(|field| Field {
            errors: Some(field_errors(field)),
            ..field.clone()
        })
        .collect::<Vec<_>>();

    debug!(
        form = %form.name,
        failing = fields
            .iter()
            .filter(|field| field.errors.as_ref().is_some_and(|errors| !errors.is_empty()))
            .count(),
        total = fields.len(),
        "validated form"
    );

    Form {
        name: form.name.clone(),
        fields,
    }
}

/// Collects the errors of fields that are currently visible. Hidden fields
/// are skipped.
pub fn collect_errors(form: &Form) -> ValidationReport {
    let values = get_values(form);
    let errors = form
        .fields
        .iter()
        .filter(|field| is_visible(field, &values))
        .flat_map(|field| {
            field_errors(field)
                .into_iter()
                .map(move |message| FieldError {
                    field: field.name.clone(),
                    message,
                })
        })
        .collect::<Vec<_>>();

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
