//! Record schema
//!
//! A record validates a map against an ordered shape of field schemas. Keys
//! outside the shape are handled by the unknown-key policy, or by a catchall
//! schema when one is set. Shape helpers (`extend`, `pick`, `partial`, ...)
//! build new records that keep the policy, the catchall and fail-fast but not
//! refinements or transformers, which were written against the old shape.

use crate::enumeration::ZonEnum;
use crate::optional::ZonOptional;
use crate::schema::{Base, Schema, Zon};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zon_core::{IssueKind, Map, ValidationContext, Value};

static ABSENT: Value = Value::Null;

/// What happens to input keys that are not part of the shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Drop them from the output
    #[default]
    Strip,
    /// Reject the record with one `unrecognized_keys` issue
    Strict,
    /// Copy them to the output unchanged
    Passthrough,
}

/// Validates string-keyed maps field by field.
#[derive(Debug, Clone)]
pub struct ZonRecord {
    base: Base,
    shape: Arc<IndexMap<String, Schema>>,
    unknown_keys: UnknownKeys,
    catchall: Option<Arc<Schema>>,
}

impl ZonRecord {
    /// A record with the given fields, stripping unknown keys
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Self {
            base: Base::default(),
            shape: Arc::new(fields.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            unknown_keys: UnknownKeys::default(),
            catchall: None,
        }
    }

    /// Field schemas in declaration order
    #[must_use]
    pub fn shape(&self) -> &IndexMap<String, Schema> {
        &self.shape
    }

    /// Current unknown-key policy
    #[must_use]
    pub fn unknown_keys(&self) -> UnknownKeys {
        self.unknown_keys
    }

    #[must_use]
    pub fn catchall_schema(&self) -> Option<&Schema> {
        self.catchall.as_deref()
    }

    fn with_shape(&self, shape: IndexMap<String, Schema>) -> Self {
        Self {
            base: self.base.derived(),
            shape: Arc::new(shape),
            unknown_keys: self.unknown_keys,
            catchall: self.catchall.clone(),
        }
    }

    fn map_fields(&self, f: impl Fn(&str, &Schema) -> Schema) -> Self {
        self.with_shape(
            self.shape
                .iter()
                .map(|(key, schema)| (key.clone(), f(key, schema)))
                .collect(),
        )
    }

    fn with_policy(&self, unknown_keys: UnknownKeys) -> Self {
        let mut next = self.clone();
        next.unknown_keys = unknown_keys;
        next
    }

    /// Add fields, replacing existing ones with the same name in place
    #[must_use]
    pub fn extend<K: Into<String>>(&self, fields: impl IntoIterator<Item = (K, Schema)>) -> Self {
        let mut shape = (*self.shape).clone();
        for (key, schema) in fields {
            shape.insert(key.into(), schema);
        }
        self.with_shape(shape)
    }

    /// [`ZonRecord::extend`] with the fields of `other`
    #[must_use]
    pub fn merge(&self, other: &ZonRecord) -> Self {
        self.extend(other.shape.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    /// Keep only `keys`
    #[must_use]
    pub fn pick(&self, keys: &[&str]) -> Self {
        self.with_shape(
            self.shape
                .iter()
                .filter(|(key, _)| keys.contains(&key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Drop `keys`
    #[must_use]
    pub fn omit(&self, keys: &[&str]) -> Self {
        self.with_shape(
            self.shape
                .iter()
                .filter(|(key, _)| !keys.contains(&key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Make every field optional
    #[must_use]
    pub fn partial(&self) -> Self {
        self.map_fields(|_, schema| make_optional(schema.clone()))
    }

    /// Make only `keys` optional
    #[must_use]
    pub fn partial_keys(&self, keys: &[&str]) -> Self {
        self.map_fields(|key, schema| {
            if keys.contains(&key) {
                make_optional(schema.clone())
            } else {
                schema.clone()
            }
        })
    }

    /// Make every field optional, recursing into nested records, lists,
    /// tuples and optionals
    #[must_use]
    pub fn deep_partial(&self) -> Self {
        self.map_fields(|_, schema| make_optional(deep_partial(schema)))
    }

    /// Unwrap every optional field
    #[must_use]
    pub fn required(&self) -> Self {
        self.map_fields(|_, schema| make_required(schema))
    }

    /// Unwrap only the optional fields named in `keys`
    #[must_use]
    pub fn required_keys(&self, keys: &[&str]) -> Self {
        self.map_fields(|key, schema| {
            if keys.contains(&key) {
                make_required(schema)
            } else {
                schema.clone()
            }
        })
    }

    /// Enum of the field names
    #[must_use]
    pub fn keyof(&self) -> ZonEnum {
        ZonEnum::new(self.shape.keys().map(String::as_str))
    }

    /// Reject unknown keys
    #[must_use]
    pub fn strict(&self) -> Self {
        self.with_policy(UnknownKeys::Strict)
    }

    /// Drop unknown keys from the output
    #[must_use]
    pub fn strip(&self) -> Self {
        self.with_policy(UnknownKeys::Strip)
    }

    /// Keep unknown keys in the output as they are
    #[must_use]
    pub fn passthrough(&self) -> Self {
        self.with_policy(UnknownKeys::Passthrough)
    }

    /// Validate unknown keys against `schema` instead of applying the policy
    #[must_use]
    pub fn catchall(&self, schema: impl Into<Schema>) -> Self {
        let mut next = self.clone();
        next.catchall = Some(Arc::new(schema.into()));
        next
    }
}

fn make_optional(schema: Schema) -> Schema {
    if schema.is_optional() {
        schema
    } else {
        ZonOptional::new(schema).into()
    }
}

fn make_required(schema: &Schema) -> Schema {
    match schema {
        Schema::Optional(optional) => optional.unwrap(),
        other => other.clone(),
    }
}

fn deep_partial(schema: &Schema) -> Schema {
    match schema {
        Schema::Record(record) => record.deep_partial().into(),
        Schema::List(list) => list.with_element(deep_partial(list.element())).into(),
        Schema::Tuple(tuple) => tuple.map_children(deep_partial).into(),
        Schema::Optional(optional) => optional.with_inner(deep_partial(optional.inner())).into(),
        other => other.clone(),
    }
}

impl Zon for ZonRecord {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "record"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        let Value::Map(input) = value else {
            ctx.add_issue(
                IssueKind::TypeMismatch,
                format!("Expected record, received {}", value.type_name()),
            );
            return None;
        };

        let mark = ctx.issue_count();
        let mut output = Map::new();

        for (key, schema) in self.shape.iter() {
            let field = input.get(key);
            let checked = ctx.descend(key.as_str(), |ctx| {
                schema.run(field.unwrap_or(&ABSENT), ctx)
            });
            match checked {
                // absent optional fields stay absent
                Some(Value::Null) if field.is_none() => {}
                Some(checked) => {
                    output.insert(key.clone(), checked);
                }
                None => {}
            }
            if self.base.should_stop(ctx, mark) {
                return None;
            }
        }

        let unknown: Vec<(&String, &Value)> = input
            .iter()
            .filter(|(key, _)| !self.shape.contains_key(key.as_str()))
            .collect();

        if let Some(catchall) = &self.catchall {
            for (key, field) in unknown {
                if let Some(checked) = ctx.descend(key.as_str(), |ctx| catchall.run(field, ctx)) {
                    output.insert(key.clone(), checked);
                }
                if self.base.should_stop(ctx, mark) {
                    return None;
                }
            }
        } else {
            match self.unknown_keys {
                UnknownKeys::Strip => {}
                UnknownKeys::Passthrough => {
                    for (key, field) in unknown {
                        output.insert(key.clone(), field.clone());
                    }
                }
                UnknownKeys::Strict if !unknown.is_empty() => {
                    let keys: Vec<String> = unknown.iter().map(|(k, _)| format!("'{k}'")).collect();
                    ctx.add_issue(
                        IssueKind::UnrecognizedKeys,
                        format!("Unrecognized key(s) in record: {}", keys.join(", ")),
                    );
                }
                UnknownKeys::Strict => {}
            }
        }

        (!ctx.dirty_since(mark)).then_some(Value::Map(output))
    }
}
