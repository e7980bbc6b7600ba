//! Boolean schema

use crate::schema::{Base, Zon};
use zon_core::{IssueKind, ValidationContext, Value};

/// Accepts `true` and `false`.
#[derive(Debug, Clone, Default)]
pub struct ZonBoolean {
    base: Base,
}

impl ZonBoolean {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Zon for ZonBoolean {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "boolean"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        if let Value::Bool(_) = value {
            Some(value.clone())
        } else {
            ctx.add_issue(
                IssueKind::TypeMismatch,
                format!("Expected boolean, received {}", value.type_name()),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean() {
        let schema = ZonBoolean::new();

        assert_eq!(
            schema.validate(&Value::from(true)).unwrap(),
            Value::from(true)
        );
        assert_eq!(
            schema.validate(&Value::from(false)).unwrap(),
            Value::from(false)
        );

        let err = schema.validate(&Value::from(0)).unwrap_err();
        assert_eq!(err.issues()[0].kind, IssueKind::TypeMismatch);
        assert_eq!(
            err.issues()[0].message,
            "Expected boolean, received integer"
        );
        assert!(schema.validate(&Value::from("true")).is_err());
    }
}
