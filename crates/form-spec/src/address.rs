//! Update-by-name addressing shared by every setter.
//!
//! Reads return the first field with a matching name. Writes copy the field
//! list, transform the first match and return the new list. When nothing
//! matches, a fresh text field carrying the requested name is transformed and
//! appended instead of failing.

use tracing::warn;

use crate::spec::{Field, FieldType, Form};

pub fn position(fields: &[Field], name: &str) -> Option<usize> {
    fields.iter().position(|field| field.name == name)
}

pub fn find_field<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    position(fields, name).map(|index| &fields[index])
}

pub fn update_field(fields: &[Field], name: &str, update: impl FnOnce(&mut Field)) -> Vec<Field> {
    let mut next = fields.to_vec();
    match position(fields, name) {
        Some(index) => update(&mut next[index]),
        None => {
            warn!(field = name, "no field with this name; appending a new one");
            let mut field = Field::new(FieldType::Text, name);
            update(&mut field);
            next.push(field);
        }
    }
    next
}

/// Applies [`update_field`] to the fields of `form`, keeping its name.
pub fn update_form(form: &Form, name: &str, update: impl FnOnce(&mut Field)) -> Form {
    Form {
        name: form.name.clone(),
        fields: update_field(&form.fields, name, update),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::FieldValue;

    fn fields() -> Vec<Field> {
        vec![
            Field::new(FieldType::Text, "first"),
            Field::new(FieldType::Select, "second"),
            Field::new(FieldType::Boolean, "third"),
        ]
    }

    #[test]
    fn update_replaces_in_place() {
        let original = fields();
        let updated = update_field(&original, "second", |field| {
            field.options = Some(vec!["a".into()]);
        });

        assert_eq!(updated.len(), 3);
        assert_eq!(updated[1].options, Some(vec!["a".to_string()]));
        assert_eq!(updated[0], original[0]);
        assert_eq!(updated[2], original[2]);
        assert!(original[1].options.is_none());
    }

    #[test]
    fn update_appends_when_missing() {
        let updated = update_field(&fields(), "fourth", |field| {
            field.value = Some(FieldValue::from("x"));
        });

        assert_eq!(updated.len(), 4);
        assert_eq!(updated[3].name, "fourth");
        assert_eq!(updated[3].kind, FieldType::Text);
        assert_eq!(updated[3].value, Some(FieldValue::from("x")));
    }

    #[test]
    fn first_match_wins_for_duplicates() {
        let mut list = fields();
        list.push(Field::new(FieldType::Boolean, "first"));

        assert_eq!(position(&list, "first"), Some(0));
        let updated = update_field(&list, "first", |field| field.default_visibility = Some(false));
        assert_eq!(updated[0].default_visibility, Some(false));
        assert_eq!(updated[3].default_visibility, None);
    }
}
