use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::spec::{Field, FieldValue, FormValues};

const EMAIL_PATTERN: &str = r"(?i)^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// Built-in email check: `None` on match, `"Not a valid email"` otherwise.
pub fn is_email(value: &str) -> Option<String> {
    if EMAIL.is_match(value) {
        None
    } else {
        Some("Not a valid email".into())
    }
}

static PATTERNS: LazyLock<Mutex<HashMap<String, Option<Regex>>>> = LazyLock::new(Default::default);

/// Compiles each distinct pattern once. `None` marks a pattern that does not compile.
fn compiled_pattern(pattern: &str) -> Option<Regex> {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(entry) = cache.get(pattern) {
        return entry.clone();
    }
    let regex = Regex::new(pattern).ok();
    cache.insert(pattern.to_string(), regex.clone());
    regex
}

type ValidationFn = dyn Fn(Option<&FieldValue>) -> Option<String> + Send + Sync;
type ConditionFn = dyn Fn(&FormValues) -> bool + Send + Sync;

/// Named in-memory validation closure. Never serialized.
#[derive(Clone)]
pub struct CustomValidation {
    name: String,
    check: Arc<ValidationFn>,
}

impl CustomValidation {
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(Option<&FieldValue>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomValidation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.check, &other.check)
    }
}

/// Named in-memory visibility predicate. Never serialized.
#[derive(Clone)]
pub struct CustomCondition {
    name: String,
    predicate: Arc<ConditionFn>,
}

impl CustomCondition {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&FormValues) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCondition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomCondition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

/// Rule run against a single field during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    Email,
    Required,
    MinLength {
        min: usize,
    },
    MaxLength {
        max: usize,
    },
    Pattern {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Select value must be one of the field's options.
    OneOfOptions,
    #[serde(skip)]
    Custom(CustomValidation),
}

impl ValidationRule {
    pub fn custom(
        name: impl Into<String>,
        check: impl Fn(Option<&FieldValue>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        ValidationRule::Custom(CustomValidation::new(name, check))
    }

    /// Runs the rule against `field`. An empty message counts as a pass.
    pub fn check(&self, field: &Field) -> Option<String> {
        let value = field.value.as_ref();
        let text = value.map(FieldValue::to_text).unwrap_or_default();

        let message = match self {
            ValidationRule::Email => is_email(&text),
            ValidationRule::Required => {
                if value.is_none() || text.is_empty() {
                    Some("This field is required".into())
                } else {
                    None
                }
            }
            ValidationRule::MinLength { min } => (text.chars().count() < *min)
                .then(|| format!("Must be at least {} characters", min)),
            ValidationRule::MaxLength { max } => (text.chars().count() > *max)
                .then(|| format!("Must be at most {} characters", max)),
            ValidationRule::Pattern { pattern, message } => match compiled_pattern(pattern) {
                Some(regex) if regex.is_match(&text) => None,
                Some(_) => Some(
                    message
                        .clone()
                        .unwrap_or_else(|| "Does not match the expected format".into()),
                ),
                None => Some("invalid pattern".into()),
            },
            ValidationRule::OneOfOptions => {
                let options = field.options.as_deref().unwrap_or_default();
                match value.and_then(FieldValue::as_str) {
                    Some(choice) if !options.iter().any(|option| option == choice) => {
                        Some("Not one of the available options".into())
                    }
                    _ => None,
                }
            }
            ValidationRule::Custom(custom) => (custom.check)(value),
        };

        message.filter(|message| !message.is_empty())
    }
}

/// Rule deciding whether a field is shown, given every current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ConditionalRule {
    When {
        expr: Expr,
    },
    #[serde(skip)]
    Custom(CustomCondition),
}

impl ConditionalRule {
    pub fn when(expr: Expr) -> Self {
        ConditionalRule::When { expr }
    }

    pub fn custom(
        name: impl Into<String>,
        predicate: impl Fn(&FormValues) -> bool + Send + Sync + 'static,
    ) -> Self {
        ConditionalRule::Custom(CustomCondition::new(name, predicate))
    }

    /// Unresolvable expressions count as `false`.
    pub fn evaluate(&self, values: &FormValues) -> bool {
        match self {
            ConditionalRule::When { expr } => expr.evaluate(values).unwrap_or(false),
            ConditionalRule::Custom(custom) => (custom.predicate)(values),
        }
    }
}
