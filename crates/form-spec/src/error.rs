use thiserror::Error;

/// Faults raised by the strict helpers and the JSON loaders.
///
/// The core operations never fail: missing fields read as `None` and
/// validation failures are reported as data on the returned snapshot.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("field '{0}' does not exist")]
    UnknownField(String),
    #[error("field '{0}' is already defined")]
    DuplicateField(String),
    #[error("unknown field type '{0}'")]
    UnknownFieldType(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
