//! List schema

use crate::length::{LengthRule, Measured};
use crate::schema::{Base, Schema, Zon};
use std::sync::Arc;
use zon_core::{IssueKind, ValidationContext, Value};

/// Validates every element of a list against one schema.
#[derive(Debug, Clone)]
pub struct ZonList {
    base: Base,
    element: Arc<Schema>,
    lengths: Vec<LengthRule>,
}

impl ZonList {
    /// A list of `element`, any length
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            base: Base::default(),
            element: Arc::new(element.into()),
            lengths: Vec::new(),
        }
    }

    /// Schema every element must satisfy
    #[must_use]
    pub fn element(&self) -> &Schema {
        &self.element
    }

    /// Same constraints, different element schema
    pub(crate) fn with_element(&self, element: Schema) -> Self {
        let mut next = self.clone();
        next.element = Arc::new(element);
        next
    }

    fn with_length(&self, rule: LengthRule) -> Self {
        let mut next = self.clone();
        next.lengths.push(rule);
        next
    }

    /// At least `min` elements
    #[must_use]
    pub fn min(&self, min: usize) -> Self {
        self.with_length(LengthRule::Min(min))
    }

    /// At most `max` elements
    #[must_use]
    pub fn max(&self, max: usize) -> Self {
        self.with_length(LengthRule::Max(max))
    }

    /// Exactly `length` elements
    #[must_use]
    pub fn length(&self, length: usize) -> Self {
        self.with_length(LengthRule::Exact(length))
    }

    /// At least one element
    #[must_use]
    pub fn nonempty(&self) -> Self {
        self.min(1)
    }
}

impl Zon for ZonList {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "list"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        let Value::List(items) = value else {
            ctx.add_issue(
                IssueKind::TypeMismatch,
                format!("Expected list, received {}", value.type_name()),
            );
            return None;
        };

        let mark = ctx.issue_count();
        for rule in &self.lengths {
            rule.check(items.len(), Measured::List, ctx);
            if self.base.should_stop(ctx, mark) {
                return None;
            }
        }

        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(checked) = ctx.descend(index, |ctx| self.element.run(item, ctx)) {
                output.push(checked);
            }
            if self.base.should_stop(ctx, mark) {
                return None;
            }
        }

        (!ctx.dirty_since(mark)).then_some(Value::List(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{number, string};
    use zon_core::PathSegment;

    #[test]
    fn test_element_issues_carry_the_index() {
        let schema = ZonList::new(string());
        let input = Value::from(vec![Value::from("x"), Value::from(5), Value::from("y")]);

        let err = schema.validate(&input).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::TypeMismatch);
        assert_eq!(err.issues()[0].path, vec![PathSegment::Index(1)]);
    }

    #[test]
    fn test_every_element_is_checked() {
        let schema = ZonList::new(number().int());
        let input = Value::from(vec![Value::from("a"), Value::from(1), Value::from(2.5)]);

        let err = schema.validate(&input).unwrap_err();
        let paths: Vec<String> = err.issues().iter().map(|i| i.path_string()).collect();
        assert_eq!(paths, vec!["[0]", "[2]"]);

        assert_eq!(schema.fail_fast().validate(&input).unwrap_err().len(), 1);
    }

    #[test]
    fn test_length_and_elements_both_reported() {
        let schema = ZonList::new(string()).min(3);
        let err = schema.validate(&Value::from(vec![Value::from(1)])).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.issues()[0].kind, IssueKind::TooSmall);
        assert!(err.issues()[0].path.is_empty());
        assert_eq!(err.issues()[1].kind, IssueKind::TypeMismatch);
    }

    #[test]
    fn test_bounds() {
        let schema = ZonList::new(number()).nonempty().max(2);
        assert!(schema.validate(&Value::from(vec![1])).is_ok());
        assert!(schema.validate(&Value::List(Vec::new())).is_err());
        assert!(schema.validate(&Value::from(vec![1, 2, 3])).is_err());
        assert!(ZonList::new(number()).length(2).validate(&Value::from(vec![1, 2])).is_ok());
    }

    #[test]
    fn test_output_holds_transformed_elements() {
        let schema = ZonList::new(string().trim());
        let input = Value::from(vec![" a ", "b "]);
        assert_eq!(
            schema.validate(&input).unwrap(),
            Value::from(vec!["a", "b"])
        );
    }

    #[test]
    fn test_not_a_list() {
        let err = ZonList::new(string()).validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.issues()[0].message, "Expected list, received string");
    }
}
