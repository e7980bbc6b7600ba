//! Union schema

use crate::schema::{Base, Schema, Zon};
use std::sync::Arc;
use tracing::trace;
use zon_core::{IssueKind, ValidationContext, Value, ZonError, ZonIssue};

/// Accepts a value when any alternative does; the first match wins.
///
/// Each alternative runs in a forked context so a failed attempt leaves no
/// trace unless every alternative fails, in which case a single
/// `invalid_union` issue carries all their errors.
#[derive(Debug, Clone)]
pub struct ZonUnion {
    base: Base,
    options: Arc<Vec<Schema>>,
}

impl ZonUnion {
    /// Try `options` in order, keeping the first success
    pub fn new(options: Vec<Schema>) -> Self {
        Self {
            base: Base::default(),
            options: Arc::new(options),
        }
    }

    /// Alternatives in the order they are tried
    #[must_use]
    pub fn options(&self) -> &[Schema] {
        &self.options
    }
}

impl Zon for ZonUnion {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "union"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        let mut failures = Vec::with_capacity(self.options.len());

        for (index, option) in self.options.iter().enumerate() {
            trace!(
                path = %ctx.path_string(),
                alternative = index,
                schema = option.type_name(),
                "Trying union alternative"
            );
            let mut attempt = ctx.fork();
            let output = option.run(value, &mut attempt);
            let path = attempt.path().to_vec();
            match (output, attempt.into_error()) {
                (Some(output), None) => return Some(output),
                (_, Some(error)) => failures.push(error),
                (None, None) => failures.push(ZonError::new(vec![
                    ZonIssue::with_default_message(IssueKind::Custom, path),
                ])),
            }
        }

        ctx.push_issue(
            ZonIssue::with_default_message(IssueKind::InvalidUnion, ctx.path().to_vec())
                .with_union_errors(failures),
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{boolean, literal, number, string};

    fn string_or_number() -> ZonUnion {
        ZonUnion::new(vec![string().into(), number().into()])
    }

    #[test]
    fn test_any_alternative_matches() {
        let text = string_or_number().validate(&Value::from("a")).unwrap();
        assert_eq!(text, Value::from("a"));
        let five = string_or_number().validate(&Value::from(5)).unwrap();
        assert_eq!(five, Value::from(5));
        assert!(matches!(five, Value::Int(5)));
        assert_eq!(string_or_number().options().len(), 2);
    }

    #[test]
    fn test_first_match_wins() {
        let schema = ZonUnion::new(vec![
            string().to_upper_case().into(),
            string().to_lower_case().into(),
        ]);
        assert_eq!(
            schema.validate(&Value::from("MiXeD")).unwrap(),
            Value::from("MIXED")
        );
    }

    #[test]
    fn test_no_match_reports_every_alternative() {
        let err = string_or_number().validate(&Value::from(true)).unwrap_err();

        assert_eq!(err.len(), 1);
        let issue = &err.issues()[0];
        assert_eq!(issue.kind, IssueKind::InvalidUnion);
        assert_eq!(issue.union_errors.len(), 2);
        assert!(issue.union_errors.iter().all(|e| e.has_kind(IssueKind::TypeMismatch)));
        assert_eq!(err.flatten().len(), 3);
    }

    #[test]
    fn test_or_chaining() {
        let schema = literal("a").or(literal("b")).or(boolean());
        assert!(schema.validate(&Value::from("b")).is_ok());
        assert!(schema.validate(&Value::from(false)).is_ok());
        assert!(schema.validate(&Value::from("c")).is_err());
    }

    #[test]
    fn test_empty_union_rejects() {
        let err = ZonUnion::new(Vec::new()).validate(&Value::from(1)).unwrap_err();
        assert!(err.has_kind(IssueKind::InvalidUnion));
    }
}
