use tracing::debug;

use crate::fill::get_values;
use crate::spec::{Field, Form, FormValues};

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// A field without conditional rules is always visible; otherwise it is
/// visible when any rule holds.
pub fn is_visible(field: &Field, values: &FormValues) -> bool {
    field.conditional_rules.is_empty()
        || field
            .conditional_rules
            .iter()
            .any(|rule| rule.evaluate(values))
}

pub fn resolve_visibility(form: &Form) -> VisibilityMap {
    let values = get_values(form);
    form.fields
        .iter()
        .map(|field| (field.name.clone(), is_visible(field, &values)))
        .collect()
}

/// Returns a snapshot with `visible` set on every field. Must be rerun after
/// values change.
pub fn check_visibility(form: &Form) -> Form {
    let values = get_values(form);
    let fields = form
        .fields
        .iter()
        .map(|field| Field {
            visible: Some(is_visible(field, &values)),
            ..field.clone()
        })
        .collect::<Vec<_>>();

    debug!(
        form = %form.name,
        visible = fields.iter().filter(|field| field.visible == Some(true)).count(),
        total = fields.len(),
        "resolved visibility"
    );

    Form {
        name: form.name.clone(),
        fields,
    }
}
