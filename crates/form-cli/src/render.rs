use serde_json::{Map, Value, json};

use form_spec::{Field, FieldValue, Form};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Every visible field passed validation.
    Valid,
    /// At least one visible field has errors.
    Invalid,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::Valid => "valid",
            RenderStatus::Invalid => "invalid",
        }
    }
}

/// Render view of a form that has been through `validate` and `check_visibility`.
#[derive(Debug, Clone)]
pub struct RenderPayload<'a> {
    pub form: &'a Form,
    pub status: RenderStatus,
    pub visible: usize,
    pub total: usize,
}

impl<'a> RenderPayload<'a> {
    pub fn new(form: &'a Form) -> Self {
        let visible = form.fields.iter().filter(|field| is_shown(field)).count();
        let failing = form
            .fields
            .iter()
            .filter(|field| is_shown(field))
            .any(|field| field.errors.as_ref().is_some_and(|errors| !errors.is_empty()));

        Self {
            form,
            status: if failing {
                RenderStatus::Invalid
            } else {
                RenderStatus::Valid
            },
            visible,
            total: form.fields.len(),
        }
    }
}

// Snapshots that skipped the visibility pass fall back to the design-time default.
fn is_shown(field: &Field) -> bool {
    field.visible.unwrap_or_else(|| field.visible_by_default())
}

pub fn render_json(payload: &RenderPayload<'_>) -> Value {
    let fields = payload
        .form
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("name".into(), Value::String(field.name.clone()));
            map.insert("type".into(), Value::String(field.kind.to_string()));
            if let Some(value) = &field.value {
                map.insert("value".into(), field_value_json(value));
            }
            if let Some(options) = &field.options {
                map.insert(
                    "options".into(),
                    Value::Array(options.iter().cloned().map(Value::String).collect()),
                );
            }
            map.insert("visible".into(), Value::Bool(is_shown(field)));
            map.insert(
                "errors".into(),
                Value::Array(
                    field
                        .errors
                        .iter()
                        .flatten()
                        .cloned()
                        .map(Value::String)
                        .collect(),
                ),
            );
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form": payload.form.name,
        "status": payload.status.as_str(),
        "visible": payload.visible,
        "total": payload.total,
        "fields": fields,
    })
}

pub fn render_text(payload: &RenderPayload<'_>) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {}", display_name(&payload.form.name)));
    lines.push(format!(
        "Status: {} ({}/{} visible)",
        payload.status.as_str(),
        payload.visible,
        payload.total
    ));

    lines.push("Visible fields:".to_string());
    for field in payload.form.fields.iter().filter(|field| is_shown(field)) {
        let mut entry = format!(" - {} ({})", field.name, field.kind);
        if let Some(value) = &field.value {
            entry.push_str(&format!(" = {}", value));
        }
        if let Some(options) = &field.options {
            entry.push_str(&format!(" [{}]", options.join(", ")));
        }
        lines.push(entry);
        for error in field.errors.iter().flatten() {
            lines.push(format!("     ! {}", error));
        }
    }

    let hidden = payload
        .form
        .fields
        .iter()
        .filter(|field| !is_shown(field))
        .map(|field| field.name.as_str())
        .collect::<Vec<_>>();
    if !hidden.is_empty() {
        lines.push(format!("Hidden fields: {}", hidden.join(", ")));
    }

    lines.join("\n")
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "<unnamed>" } else { name }
}

fn field_value_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::String(text.clone()),
        FieldValue::Bool(flag) => Value::Bool(*flag),
    }
}
