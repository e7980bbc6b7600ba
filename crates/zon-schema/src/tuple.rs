//! Tuple schema

use crate::length::{LengthRule, Measured};
use crate::schema::{Base, Schema, Zon};
use std::sync::Arc;
use zon_core::{IssueKind, ValidationContext, Value};

/// Fixed positional item schemas, optionally followed by a rest schema.
///
/// A list shorter than the item count, or longer without a rest schema, is
/// rejected as a whole; elements are only checked once the arity fits.
#[derive(Debug, Clone)]
pub struct ZonTuple {
    base: Base,
    items: Arc<Vec<Schema>>,
    rest: Option<Arc<Schema>>,
}

impl ZonTuple {
    /// Exactly one element per item schema
    #[must_use]
    pub fn new(items: Vec<Schema>) -> Self {
        Self {
            base: Base::default(),
            items: Arc::new(items),
            rest: None,
        }
    }

    /// Validate every element past the fixed items against `schema`
    #[must_use]
    pub fn rest(&self, schema: impl Into<Schema>) -> Self {
        let mut next = self.clone();
        next.rest = Some(Arc::new(schema.into()));
        next
    }

    /// Positional item schemas
    #[must_use]
    pub fn items(&self) -> &[Schema] {
        &self.items
    }

    #[must_use]
    pub fn rest_schema(&self) -> Option<&Schema> {
        self.rest.as_deref()
    }

    /// Same shape with every child schema mapped through `f`
    pub(crate) fn map_children(&self, f: impl Fn(&Schema) -> Schema) -> Self {
        let mut next = self.clone();
        next.items = Arc::new(self.items.iter().map(&f).collect());
        next.rest = self.rest.as_deref().map(|rest| Arc::new(f(rest)));
        next
    }

    fn schema_at(&self, index: usize) -> Option<&Schema> {
        self.items.get(index).or(self.rest.as_deref())
    }
}

impl Zon for ZonTuple {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "tuple"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        let Value::List(elements) = value else {
            ctx.add_issue(
                IssueKind::TypeMismatch,
                format!("Expected tuple, received {}", value.type_name()),
            );
            return None;
        };

        let arity = if self.rest.is_some() {
            LengthRule::Min(self.items.len())
        } else {
            LengthRule::Exact(self.items.len())
        };
        if !arity.check(elements.len(), Measured::Tuple, ctx) {
            return None;
        }

        let mark = ctx.issue_count();
        let mut output = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let Some(schema) = self.schema_at(index) else {
                continue;
            };
            if let Some(checked) = ctx.descend(index, |ctx| schema.run(element, ctx)) {
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
    use crate::{boolean, number, string};

    fn pair() -> ZonTuple {
        ZonTuple::new(vec![string().into(), number().into()])
    }

    #[test]
    fn test_positional_items() {
        let input = Value::from(vec![Value::from("a"), Value::from(1)]);
        assert_eq!(pair().validate(&input).unwrap(), input);

        let swapped = Value::from(vec![Value::from(1), Value::from("a")]);
        let err = pair().validate(&swapped).unwrap_err();
        let paths: Vec<String> = err.issues().iter().map(|i| i.path_string()).collect();
        assert_eq!(paths, vec!["[0]", "[1]"]);
    }

    #[test]
    fn test_arity_without_rest() {
        let short = Value::from(vec!["a"]);
        let err = pair().validate(&short).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::TooSmall);
        assert!(err.issues()[0].path.is_empty());

        let long = Value::from(vec![Value::from("a"), Value::from(1), Value::from(2)]);
        let err = pair().validate(&long).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::TooBig);
    }

    #[test]
    fn test_rest_uses_absolute_indices() {
        let schema = pair().rest(boolean());
        assert!(schema.rest_schema().is_some());

        let ok = Value::from(vec![
            Value::from("a"),
            Value::from(1),
            Value::from(true),
            Value::from(false),
        ]);
        assert!(schema.validate(&ok).is_ok());

        let bad = Value::from(vec![
            Value::from("a"),
            Value::from(1),
            Value::from(true),
            Value::from("no"),
        ]);
        let err = schema.validate(&bad).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.issues()[0].path_string(), "[3]");

        let short = Value::from(vec!["a"]);
        assert!(schema.validate(&short).unwrap_err().has_kind(IssueKind::TooSmall));
    }

    #[test]
    fn test_empty_tuple() {
        let schema = ZonTuple::new(Vec::new());
        assert!(schema.items().is_empty());
        assert!(schema.validate(&Value::List(Vec::new())).is_ok());
        assert!(schema.validate(&Value::from(vec![1])).is_err());
    }
}
