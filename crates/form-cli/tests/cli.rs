use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::TempDir;

const CONTACT_FORM: &str = include_str!("../../form-spec/tests/fixtures/contact_form.json");

fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn check_command_succeeds_for_valid_values() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let form = write_fixture(dir.path(), "contact.json", CONTACT_FORM);
    let values = write_fixture(
        dir.path(),
        "values.json",
        &json!({ "email": "ben@example.com", "favourite_colour": "green" }).to_string(),
    );

    let output = Command::cargo_bin("dynaform")?
        .arg("check")
        .arg("--form")
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Status: valid (3/4 visible)"));
    assert!(stdout.contains("Hidden fields: favourite_shade_of_pink"));
    Ok(())
}

#[test]
fn check_command_fails_for_invalid_values() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let form = write_fixture(dir.path(), "contact.json", CONTACT_FORM);
    let values = write_fixture(
        dir.path(),
        "values.json",
        &json!({ "email": "not_an_email", "favourite_colour": "pink" }).to_string(),
    );

    let output = Command::cargo_bin("dynaform")?
        .args(["check", "--format", "json", "--form"])
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .output()?;

    assert!(!output.status.success());
    let ui: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(ui["status"], "invalid");
    assert_eq!(ui["fields"][0]["errors"], json!(["Not a valid email"]));
    assert_eq!(ui["fields"][2]["visible"], true);
    Ok(())
}

#[test]
fn values_command_prints_value_map() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let form = write_fixture(dir.path(), "contact.json", CONTACT_FORM);
    let values = write_fixture(
        dir.path(),
        "values.json",
        &json!({ "email": "ben@example.com", "subscribe": true }).to_string(),
    );

    let output = Command::cargo_bin("dynaform")?
        .arg("values")
        .arg("--form")
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .output()?;

    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(printed, json!({ "email": "ben@example.com", "subscribe": true }));
    Ok(())
}

#[test]
fn new_command_writes_into_output_dir() -> Result<(), Box<dyn Error>> {
    let workspace = assert_fs::TempDir::new()?;

    Command::cargo_bin("dynaform")?
        .env("DYNAFORM_OUTPUT_DIR", workspace.path())
        .args([
            "new",
            "--name",
            "Signup",
            "--field",
            "text:given_name",
            "--field",
            "select:favourite_colour",
        ])
        .assert()
        .success();

    let path = workspace.path().join("signup.form.json");
    let form: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(form["name"], "Signup");
    assert_eq!(
        form["fields"],
        json!([
            { "type": "text", "name": "given_name" },
            { "type": "select", "name": "favourite_colour" }
        ])
    );

    Command::cargo_bin("dynaform")?
        .env("DYNAFORM_OUTPUT_DIR", workspace.path())
        .args(["new", "--name", "Signup", "--field", "text:given_name"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn schema_command_prints_json_schema() -> Result<(), Box<dyn Error>> {
    let output = Command::cargo_bin("dynaform")?.arg("schema").output()?;
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout)?;
    assert!(schema["properties"]["fields"].is_object());
    Ok(())
}
