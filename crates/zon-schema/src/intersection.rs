//! Intersection schema

use crate::schema::{Base, Schema, Zon};
use std::sync::Arc;
use tracing::trace;
use zon_core::{IssueKind, Map, ValidationContext, Value};

/// Accepts a value only when every alternative does, and merges their outputs.
///
/// Map outputs merge key by key: later alternatives win conflicting keys and
/// nested maps merge recursively. Any other outputs must be equal.
#[derive(Debug, Clone)]
pub struct ZonIntersection {
    base: Base,
    options: Arc<Vec<Schema>>,
}

impl ZonIntersection {
    /// Every option must accept; outputs are merged in order
    pub fn new(options: Vec<Schema>) -> Self {
        Self {
            base: Base::default(),
            options: Arc::new(options),
        }
    }

    /// Alternatives in the order they run
    #[must_use]
    pub fn options(&self) -> &[Schema] {
        &self.options
    }
}

/// Merge the outputs of two alternatives, `None` when they disagree
fn merge_values(left: Value, right: Value) -> Option<Value> {
    match (left, right) {
        (Value::Map(left), Value::Map(right)) => Some(Value::Map(merge_maps(left, right))),
        (left, right) if left == right => Some(right),
        _ => None,
    }
}

fn merge_maps(mut left: Map, right: Map) -> Map {
    for (key, incoming) in right {
        if let Some(existing) = left.get_mut(&key) {
            *existing = match (std::mem::take(existing), incoming) {
                (Value::Map(current), Value::Map(incoming)) => {
                    Value::Map(merge_maps(current, incoming))
                }
                (_, incoming) => incoming,
            };
        } else {
            left.insert(key, incoming);
        }
    }
    left
}

impl Zon for ZonIntersection {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "intersection"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        let mark = ctx.issue_count();
        let mut outputs = Vec::with_capacity(self.options.len());

        for (index, option) in self.options.iter().enumerate() {
            trace!(
                path = %ctx.path_string(),
                alternative = index,
                schema = option.type_name(),
                "Running intersection alternative"
            );
            if let Some(output) = option.run(value, ctx) {
                outputs.push(output);
            }
            if self.base.should_stop(ctx, mark) {
                return None;
            }
        }

        if ctx.dirty_since(mark) {
            return None;
        }

        let mut outputs = outputs.into_iter();
        let first = outputs.next().unwrap_or_else(|| value.clone());
        let merged = outputs.try_fold(first, merge_values);
        if merged.is_none() {
            ctx.add_issue(
                IssueKind::InvalidIntersection,
                IssueKind::InvalidIntersection.default_message(),
            );
        }
        merged
    }
}
