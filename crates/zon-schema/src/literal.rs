//! Literal schema

use crate::schema::{Base, Zon};
use zon_core::{IssueKind, ValidationContext, Value};

/// Accepts exactly one value, compared by deep equality.
#[derive(Debug, Clone)]
pub struct ZonLiteral {
    base: Base,
    value: Value,
}

impl ZonLiteral {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            base: Base::default(),
            value: value.into(),
        }
    }

    /// The accepted value
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Zon for ZonLiteral {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "literal"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        if *value == self.value {
            Some(value.clone())
        } else {
            ctx.add_issue(
                IssueKind::InvalidLiteral,
                format!("Expected literal {}, received {value}", self.value),
            );
            None
        }
    }
}
