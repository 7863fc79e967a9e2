#![allow(missing_docs)]

pub mod address;
pub mod design;
pub mod error;
pub mod expr;
pub mod fill;
pub mod pipeline;
pub mod rules;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use design::{
    add_conditional_rule, add_field, add_validation_rule, check_unique_names, get_name, new_form,
    set_default_visibility, set_field_options, set_name, try_add_field,
};
pub use error::FormError;
pub use expr::Expr;
pub use fill::{get_value, get_values, require_field, set_value};
pub use pipeline::Pipeline;
pub use rules::{ConditionalRule, CustomCondition, CustomValidation, ValidationRule, is_email};
pub use spec::form::form_schema;
pub use spec::{Field, FieldType, FieldValue, Form, FormValues};
pub use validate::{FieldError, ValidationReport, collect_errors, field_errors, validate};
pub use visibility::{VisibilityMap, check_visibility, is_visible, resolve_visibility};
