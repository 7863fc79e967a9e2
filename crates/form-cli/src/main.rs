pub mod builder;
mod render;

use builder::{FieldInput, build_form, write_form};
use clap::{Parser, Subcommand, ValueEnum};
use form_spec::{
    FieldValue, Form, check_visibility, collect_errors, form_schema, get_values, require_field,
    set_value, validate,
};
use render::{RenderPayload, render_json, render_text};
use serde_json::Value;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEFAULT_LOG_FILTER: &str = "dynaform=info,form_spec=warn";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Dynamic form helper",
    long_about = "Designs forms, fills them with values and reports validation and visibility"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a form with values, then validate it and resolve visibility.
    Check {
        /// Path to the form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Optional JSON object mapping field names to values.
        #[arg(long, value_name = "VALUES")]
        values: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Print the values of a filled form as JSON.
    Values {
        /// Path to the form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Optional JSON object mapping field names to values.
        #[arg(long, value_name = "VALUES")]
        values: Option<PathBuf>,
    },
    /// Print the JSON Schema of the form format.
    Schema,
    /// Create a form from `type:name` field definitions.
    New {
        /// Form name.
        #[arg(long)]
        name: String,
        /// Field definition such as `text:given_name`; repeat to add more.
        #[arg(long = "field", value_name = "TYPE:NAME")]
        fields: Vec<FieldInput>,
        /// Output file (relative paths resolve against DYNAFORM_OUTPUT_DIR when set).
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            form,
            values,
            format,
        } => run_check(form, values, format),
        Command::Values { form, values } => run_values(form, values),
        Command::Schema => run_schema(),
        Command::New {
            name,
            fields,
            out,
            force,
        } => run_new(name, fields, out, force),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_form(path: &Path) -> CliResult<Form> {
    let contents = fs::read_to_string(path)?;
    let form = Form::from_json(&contents)?;
    debug!(path = %path.display(), fields = form.fields.len(), "loaded form");
    Ok(form)
}

fn load_values(path: &Path) -> CliResult<Vec<(String, FieldValue)>> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    let object = value
        .as_object()
        .ok_or("values file must contain a JSON object")?;

    let mut values = Vec::with_capacity(object.len());
    for (name, value) in object {
        let value = serde_json::from_value::<FieldValue>(value.clone())
            .map_err(|_| format!("unsupported value for field '{}'", name))?;
        values.push((name.clone(), value));
    }
    Ok(values)
}

/// Applies values in key order. Unknown names are rejected rather than appended.
fn apply_values(mut form: Form, values: &[(String, FieldValue)]) -> CliResult<Form> {
    for (name, value) in values {
        require_field(&form, name)?;
        form = set_value(&form, name, value.clone());
    }
    Ok(form)
}

fn filled_form(form_path: &Path, values_path: Option<&Path>) -> CliResult<Form> {
    let form = load_form(form_path)?;
    match values_path {
        Some(path) => apply_values(form, &load_values(path)?),
        None => Ok(form),
    }
}

fn run_check(
    form_path: PathBuf,
    values_path: Option<PathBuf>,
    format: RenderMode,
) -> CliResult<()> {
    let form = filled_form(&form_path, values_path.as_deref())?;
    let annotated = check_visibility(&validate(&form));
    let payload = RenderPayload::new(&annotated);

    match format {
        RenderMode::Text => println!("{}", render_text(&payload)),
        RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json(&payload))?),
    }

    let report = collect_errors(&form);
    debug!(errors = report.errors.len(), "collected visible errors");
    if report.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn run_values(form_path: PathBuf, values_path: Option<PathBuf>) -> CliResult<()> {
    let form = filled_form(&form_path, values_path.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&get_values(&form))?);
    Ok(())
}

fn run_schema() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&form_schema()?)?);
    Ok(())
}

fn run_new(
    name: String,
    fields: Vec<FieldInput>,
    out: Option<PathBuf>,
    force: bool,
) -> CliResult<()> {
    let form = build_form(&name, &fields)?;
    let target = resolve_output_path(
        out.unwrap_or_else(|| PathBuf::from(format!("{}.form.json", sanitize_file_name(&name)))),
    );
    if target.exists() && !force {
        return Err(format!(
            "form {} already exists; rerun with --force to overwrite",
            target.display()
        )
        .into());
    }

    let written = write_form(&form, &target)?;
    info!(path = %written.display(), fields = form.fields.len(), "wrote form");
    println!("Created form at {}", written.display());
    Ok(())
}

fn resolve_output_path(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match env::var_os("DYNAFORM_OUTPUT_DIR") {
        Some(root) if !root.is_empty() => PathBuf::from(root).join(path),
        _ => path,
    }
}

fn sanitize_file_name(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "form".into()
    } else {
        cleaned
    }
}
