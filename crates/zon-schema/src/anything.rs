//! Anything schema

use crate::schema::{Base, Zon};
use zon_core::{ValidationContext, Value};

/// Accepts every input unchanged.
#[derive(Debug, Clone, Default)]
pub struct ZonAnything {
    base: Base,
}

impl ZonAnything {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Zon for ZonAnything {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "anything"
    }

    fn check(&self, value: &Value, _ctx: &mut ValidationContext) -> Option<Value> {
        Some(value.clone())
    }
}
