//! Optional schema

use crate::schema::{Base, Schema, Zon, run_pipeline};
use std::sync::Arc;
use zon_core::{ValidationContext, Value};

/// Accepts the absent value (`Null`) or whatever the inner schema accepts.
///
/// An absent value short-circuits: neither the inner schema nor this node's
/// refinements and transformers run.
#[derive(Debug, Clone)]
pub struct ZonOptional {
    base: Base,
    inner: Arc<Schema>,
}

impl ZonOptional {
    pub fn new(inner: impl Into<Schema>) -> Self {
        Self {
            base: Base::default(),
            inner: Arc::new(inner.into()),
        }
    }

    /// The wrapped schema
    #[must_use]
    pub fn inner(&self) -> &Schema {
        &self.inner
    }

    /// A copy of the wrapped schema
    #[must_use]
    pub fn unwrap(&self) -> Schema {
        (*self.inner).clone()
    }

    pub(crate) fn with_inner(&self, inner: Schema) -> Self {
        let mut next = self.clone();
        next.inner = Arc::new(inner);
        next
    }
}

impl Zon for ZonOptional {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "optional"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        self.inner.run(value, ctx)
    }

    fn run(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        if value.is_null() {
            return Some(Value::Null);
        }
        run_pipeline(self, value, ctx)
    }
}
