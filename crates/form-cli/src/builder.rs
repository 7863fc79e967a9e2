use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use form_spec::{FieldType, Form, FormError, new_form, set_name, try_add_field};

/// A `type:name` pair given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub kind: FieldType,
    pub name: String,
}

impl FromStr for FieldInput {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (kind, name) = value
            .split_once(':')
            .ok_or_else(|| format!("field '{}' must look like type:name", value))?;
        let kind = kind.parse::<FieldType>().map_err(|err| err.to_string())?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("field '{}' is missing a name", value));
        }
        Ok(FieldInput {
            kind,
            name: name.to_string(),
        })
    }
}

/// Builds a design-stage form, refusing duplicate field names.
pub fn build_form(name: &str, fields: &[FieldInput]) -> Result<Form, FormError> {
    fields
        .iter()
        .try_fold(set_name(&new_form(), name), |form, field| {
            try_add_field(&form, field.kind, field.name.clone())
        })
}

pub fn write_form(form: &Form, path: &Path) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let contents = form.to_json_pretty().map_err(io::Error::other)?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_field_inputs() {
        assert_eq!(
            "select:favourite_colour".parse::<FieldInput>(),
            Ok(FieldInput {
                kind: FieldType::Select,
                name: "favourite_colour".into(),
            })
        );
        assert!("favourite_colour".parse::<FieldInput>().is_err());
        assert!("text: ".parse::<FieldInput>().is_err());
        assert_eq!(
            "number:age".parse::<FieldInput>(),
            Err("unknown field type 'number'".to_string())
        );
    }

    #[test]
    fn build_rejects_duplicates() {
        let fields = vec![
            "text:email".parse::<FieldInput>().unwrap(),
            "boolean:email".parse::<FieldInput>().unwrap(),
        ];
        assert!(matches!(
            build_form("Dup", &fields),
            Err(FormError::DuplicateField(name)) if name == "email"
        ));
    }

    #[test]
    fn writes_pretty_json() {
        let fields = vec!["text:given_name".parse::<FieldInput>().unwrap()];
        let form = build_form("Signup", &fields).expect("form");
        let dir = TempDir::new().expect("temp dir");

        let path = write_form(&form, &dir.path().join("nested").join("signup.json"))
            .expect("write form");
        let written = Form::from_json(&fs::read_to_string(path).expect("read")).expect("parse");
        assert_eq!(written, form);
    }
}
