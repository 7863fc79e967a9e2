use std::fmt;

use crate::design;
use crate::fill;
use crate::rules::{ConditionalRule, ValidationRule};
use crate::spec::{FieldType, FieldValue, Form};
use crate::validate::validate;
use crate::visibility::check_visibility;

type Step = Box<dyn Fn(&Form) -> Form + Send + Sync>;

/// Ordered list of form transformations, applied in the order they were added.
///
/// ```
/// use form_spec::{FieldType, Pipeline, ValidationRule, new_form};
///
/// let form = Pipeline::new()
///     .add_field(FieldType::Text, "email")
///     .add_validation_rule("email", ValidationRule::Email)
///     .set_value("email", "not_an_email")
///     .validate()
///     .run(&new_form());
///
/// let errors = form.field("email").and_then(|field| field.errors.clone());
/// assert_eq!(errors, Some(vec!["Not a valid email".to_string()]));
/// ```
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, step: impl Fn(&Form) -> Form + Send + Sync + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn set_name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.then(move |form| design::set_name(form, name.clone()))
    }

    pub fn add_field(self, kind: FieldType, name: impl Into<String>) -> Self {
        let name = name.into();
        self.then(move |form| design::add_field(form, kind, name.clone()))
    }

    pub fn set_field_options<I, S>(self, field_name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let field_name = field_name.into();
        let options = options.into_iter().map(Into::into).collect::<Vec<String>>();
        self.then(move |form| design::set_field_options(form, &field_name, options.clone()))
    }

    pub fn set_default_visibility(self, field_name: impl Into<String>, visible: bool) -> Self {
        let field_name = field_name.into();
        self.then(move |form| design::set_default_visibility(form, &field_name, visible))
    }

    pub fn add_validation_rule(self, field_name: impl Into<String>, rule: ValidationRule) -> Self {
        let field_name = field_name.into();
        self.then(move |form| design::add_validation_rule(form, &field_name, rule.clone()))
    }

    pub fn add_conditional_rule(
        self,
        field_name: impl Into<String>,
        rule: ConditionalRule,
    ) -> Self {
        let field_name = field_name.into();
        self.then(move |form| design::add_conditional_rule(form, &field_name, rule.clone()))
    }

    pub fn set_value(self, field_name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let field_name = field_name.into();
        let value = value.into();
        self.then(move |form| fill::set_value(form, &field_name, value.clone()))
    }

    pub fn validate(self) -> Self {
        self.then(validate)
    }

    pub fn check_visibility(self) -> Self {
        self.then(check_visibility)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Threads `form` through every step. The input is left untouched.
    pub fn run(&self, form: &Form) -> Form {
        self.steps
            .iter()
            .fold(form.clone(), |current, step| step(&current))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.steps.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::new_form;
    use crate::expr::Expr;

    #[test]
    fn steps_apply_in_insertion_order() {
        let pipeline = Pipeline::new()
            .set_name("Order")
            .add_field(FieldType::Text, "a")
            .add_field(FieldType::Text, "b")
            .set_value("a", "first")
            .set_value("a", "second");

        assert_eq!(pipeline.len(), 5);
        let form = pipeline.run(&new_form());
        assert_eq!(form.name, "Order");
        assert_eq!(form.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(fill::get_value(&form, "a"), Some(&FieldValue::from("second")));
    }

    #[test]
    fn pipeline_is_reusable() {
        let pipeline = Pipeline::new()
            .add_field(FieldType::Select, "colour")
            .add_field(FieldType::Text, "shade")
            .add_conditional_rule("shade", ConditionalRule::when(Expr::equals("colour", "pink")))
            .check_visibility();

        let base = design::set_name(&new_form(), "Colours");
        let first = pipeline.run(&base);
        let second = pipeline.run(&base);
        assert_eq!(first, second);
        assert_eq!(first.fields.len(), 2);
        assert!(base.fields.is_empty());
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        let form = design::add_field(&new_form(), FieldType::Boolean, "flag");
        assert_eq!(pipeline.run(&form), form);
    }
}
