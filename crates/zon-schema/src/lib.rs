#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # zon-schema
//!
//! Composable validation schemas for dynamic [`Value`]s.
//!
//! Schemas are built with the factory functions in this crate and refined by
//! chaining configuration calls. Every call returns a new schema; the receiver
//! is left untouched, so partially configured schemas can be shared and
//! extended freely.
//!
//! ## Example Usage
//!
//! ```rust
//! use zon_schema::prelude::*;
//! use zon_schema::Value;
//!
//! let user = record([
//!     ("name", string().min(1).trim().into()),
//!     ("email", string().email().into()),
//!     ("age", number().int().non_negative().optional().into()),
//! ]);
//!
//! let input: Value = serde_json::json!({
//!     "name": "  Ada ",
//!     "email": "ada@example.com",
//! })
//! .into();
//!
//! let output = user.validate(&input).unwrap();
//! assert_eq!(output.pointer(&["name".into()]), Some(&Value::from("Ada")));
//!
//! let bad: Value = serde_json::json!({ "name": "", "email": "nope" }).into();
//! let err = user.validate(&bad).unwrap_err();
//! assert_eq!(err.len(), 2);
//! ```

pub mod anything;
pub mod boolean;
pub mod enumeration;
pub mod intersection;
mod length;
pub mod list;
pub mod literal;
pub mod never;
pub mod number;
pub mod optional;
pub mod record;
pub mod schema;
pub mod string;
pub mod tuple;
pub mod union;

pub use anything::ZonAnything;
pub use boolean::ZonBoolean;
pub use enumeration::ZonEnum;
pub use intersection::ZonIntersection;
pub use list::ZonList;
pub use literal::ZonLiteral;
pub use never::ZonNever;
pub use number::{NumberBound, ZonNumber};
pub use optional::ZonOptional;
pub use record::{UnknownKeys, ZonRecord};
pub use schema::{Base, Refinement, SafeValidation, Schema, Transformer, Zon};
pub use string::ZonString;
pub use tuple::ZonTuple;
pub use union::ZonUnion;

pub use regex::Regex;
pub use zon_core::{
    IssueKind, Map, PathSegment, ValidationConfig, ValidationContext, Value, ZonError, ZonIssue,
};
pub use zon_format::{DatetimeOptions, FormatChecker, IpOptions, IpVersion};

use thiserror::Error;

/// Errors raised while building a schema
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Format(#[from] zon_format::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Everything needed to build and run schemas
pub mod prelude {
    pub use crate::schema::{Schema, Zon};
    pub use crate::{
        anything, boolean, enumeration, intersection, list, literal, never, number, optional,
        record, string, tuple, union,
    };
}

#[must_use]
pub fn string() -> ZonString {
    ZonString::new()
}

#[must_use]
pub fn number() -> ZonNumber {
    ZonNumber::new()
}

#[must_use]
pub fn boolean() -> ZonBoolean {
    ZonBoolean::new()
}

/// Accepts exactly `value`
pub fn literal(value: impl Into<Value>) -> ZonLiteral {
    ZonLiteral::new(value)
}

/// Accepts any of `options`
pub fn enumeration<V: Into<Value>>(options: impl IntoIterator<Item = V>) -> ZonEnum {
    ZonEnum::new(options)
}

#[must_use]
pub fn never() -> ZonNever {
    ZonNever::new()
}

#[must_use]
pub fn anything() -> ZonAnything {
    ZonAnything::new()
}

/// Accepts `Null` or whatever `inner` accepts
pub fn optional(inner: impl Into<Schema>) -> ZonOptional {
    ZonOptional::new(inner)
}

/// A list whose elements all satisfy `element`
pub fn list(element: impl Into<Schema>) -> ZonList {
    ZonList::new(element)
}

/// Positional item schemas
#[must_use]
pub fn tuple(items: Vec<Schema>) -> ZonTuple {
    ZonTuple::new(items)
}

/// A record with the given ordered fields
pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> ZonRecord {
    ZonRecord::new(fields)
}

/// First matching alternative wins
#[must_use]
pub fn union(options: Vec<Schema>) -> ZonUnion {
    ZonUnion::new(options)
}

/// Every alternative must match; outputs are merged
#[must_use]
pub fn intersection(options: Vec<Schema>) -> ZonIntersection {
    ZonIntersection::new(options)
}
