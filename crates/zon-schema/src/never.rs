//! Never schema

use crate::schema::{Base, Zon};
use zon_core::{IssueKind, ValidationContext, Value};

/// Rejects every input.
#[derive(Debug, Clone, Default)]
pub struct ZonNever {
    base: Base,
}

impl ZonNever {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Zon for ZonNever {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "never"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        ctx.add_issue(
            IssueKind::TypeMismatch,
            format!("Expected nothing, received {}", value.type_name()),
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_rejects_everything() {
        let schema = ZonNever::new();
        for value in [Value::Null, Value::from(1), Value::from("x"), Value::from(true)] {
            let err = schema.validate(&value).unwrap_err();
            assert_eq!(err.len(), 1);
            assert_eq!(err.issues()[0].kind, IssueKind::TypeMismatch);
        }
    }
}
