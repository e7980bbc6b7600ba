//! Enum schema

use crate::schema::{Base, Zon};
use std::sync::Arc;
use zon_core::{IssueKind, ValidationContext, Value};

/// Accepts any member of a finite, ordered set of values.
#[derive(Debug, Clone)]
pub struct ZonEnum {
    base: Base,
    options: Arc<Vec<Value>>,
}

impl ZonEnum {
    /// Build from `options`, dropping later duplicates
    pub fn new<V: Into<Value>>(options: impl IntoIterator<Item = V>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for option in options {
            let option = option.into();
            if !unique.contains(&option) {
                unique.push(option);
            }
        }
        Self {
            base: Base::default(),
            options: Arc::new(unique),
        }
    }

    /// Accepted values in declaration order
    #[must_use]
    pub fn options(&self) -> &[Value] {
        &self.options
    }

    /// A new enum without `values`
    #[must_use]
    pub fn exclude<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Self {
        let removed: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self::new(
            self.options
                .iter()
                .filter(|option| !removed.contains(option))
                .cloned(),
        )
    }

    /// A new enum with only those of `values` that are members of this one
    #[must_use]
    pub fn extract<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Self {
        let kept: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self::new(
            self.options
                .iter()
                .filter(|option| kept.contains(option))
                .cloned(),
        )
    }

    fn describe(&self) -> String {
        let listed: Vec<String> = self.options.iter().map(ToString::to_string).collect();
        format!("[{}]", listed.join(", "))
    }
}

impl Zon for ZonEnum {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "enum"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        if self.options.contains(value) {
            Some(value.clone())
        } else {
            ctx.add_issue(
                IssueKind::InvalidEnumValue,
                format!(
                    "Invalid enum value. Expected one of {}, received {value}",
                    self.describe()
                ),
            );
            None
        }
    }
}
