use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::{FieldValue, FormValues};

/// Boolean expression over the current form values, used by conditional rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Expr {
    LiteralBool { value: bool },
    Eq { field: String, value: FieldValue },
    IsSet { field: String },
    And { expressions: Vec<Expr> },
    Or { expressions: Vec<Expr> },
    Not { expression: Box<Expr> },
    Var { field: String },
}

impl Expr {
    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Expr::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_set(field: impl Into<String>) -> Self {
        Expr::IsSet {
            field: field.into(),
        }
    }

    pub fn var(field: impl Into<String>) -> Self {
        Expr::Var {
            field: field.into(),
        }
    }

    pub fn negate(expression: Expr) -> Self {
        Expr::Not {
            expression: Box::new(expression),
        }
    }

    /// Evaluates the expression, or `None` when a referenced value is missing.
    pub fn evaluate(&self, values: &FormValues) -> Option<bool> {
        match self {
            Expr::LiteralBool { value } => Some(*value),
            Expr::Eq { field, value } => values.get(field).map(|current| current == value),
            Expr::IsSet { field } => Some(
                values
                    .get(field)
                    .is_some_and(|value| value.as_str() != Some("")),
            ),
            Expr::And { expressions } => {
                for expr in expressions {
                    match expr.evaluate(values) {
                        Some(true) => continue,
                        Some(false) => return Some(false),
                        None => return None,
                    }
                }
                Some(true)
            }
            Expr::Or { expressions } => {
                for expr in expressions {
                    if let Some(true) = expr.evaluate(values) {
                        return Some(true);
                    }
                }
                Some(false)
            }
            Expr::Not { expression } => expression.evaluate(values).map(|value| !value),
            Expr::Var { field } => values.get(field).and_then(FieldValue::as_bool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> FormValues {
        FormValues::from([
            ("colour".into(), FieldValue::from("pink")),
            ("subscribe".into(), FieldValue::Bool(true)),
            ("nickname".into(), FieldValue::from("")),
        ])
    }

    #[test]
    fn eq_compares_values() {
        assert_eq!(Expr::equals("colour", "pink").evaluate(&values()), Some(true));
        assert_eq!(Expr::equals("colour", "green").evaluate(&values()), Some(false));
        assert_eq!(Expr::equals("missing", "pink").evaluate(&values()), None);
    }

    #[test]
    fn is_set_ignores_empty_text() {
        assert_eq!(Expr::is_set("colour").evaluate(&values()), Some(true));
        assert_eq!(Expr::is_set("nickname").evaluate(&values()), Some(false));
        assert_eq!(Expr::is_set("missing").evaluate(&values()), Some(false));
    }

    #[test]
    fn combinators_follow_boolean_logic() {
        let and = Expr::And {
            expressions: vec![Expr::var("subscribe"), Expr::equals("colour", "pink")],
        };
        let or = Expr::Or {
            expressions: vec![Expr::equals("missing", "x"), Expr::equals("colour", "green")],
        };
        assert_eq!(and.evaluate(&values()), Some(true));
        assert_eq!(or.evaluate(&values()), Some(false));
        assert_eq!(Expr::negate(and).evaluate(&values()), Some(false));
        assert_eq!(Expr::var("colour").evaluate(&values()), None);
    }

    #[test]
    fn deserializes_tagged_json() {
        let expr: Expr = serde_json::from_str(
            r#"{"op": "eq", "field": "favourite_colour", "value": "pink"}"#,
        )
        .unwrap();
        assert_eq!(expr, Expr::equals("favourite_colour", "pink"));
    }
}
