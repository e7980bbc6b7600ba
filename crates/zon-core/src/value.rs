//! Dynamic values validated by schemas

use crate::path::{PathSegment, format_path};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered string-keyed map used for record input and output.
pub type Map = IndexMap<String, Value>;

/// A dynamically typed value.
///
/// `Null` doubles as the "absent" value: a record field that is missing from the
/// input is validated as `Null`.
///
/// Equality is deep and numeric-aware, so `Int(1) == Float(1.0)`. Map equality
/// ignores key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null / absent value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Integer value
    Int(i64),

    /// Floating point value, NaN and infinities included
    Float(f64),

    /// String value
    String(String),

    /// Ordered sequence (lists and tuples)
    List(Vec<Value>),

    /// String-keyed map (records)
    Map(Map),
}

impl Value {
    /// Check if value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is an `Int` or a `Float`
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Borrow the string slice of a `String` value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of `Int` and `Float` values
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer view of `Int` values
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean view of `Bool` values
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the elements of a `List` value
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the entries of a `Map` value
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short type name used in issue messages
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Look up a nested value by path
    ///
    /// Keys index into maps, indices into lists. Returns `None` as soon as a
    /// segment does not resolve.
    #[must_use]
    pub fn pointer(&self, path: &[PathSegment]) -> Option<&Value> {
        let mut current = self;
        for segment in path {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Map(map)) => map.get(key)?,
                (PathSegment::Index(index), Value::List(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Convert into a `serde_json::Value`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRepresentable`] when a float is NaN or infinite,
    /// since JSON has no encoding for those.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        to_json_at(self, &mut Vec::new())
    }
}

fn to_json_at(value: &Value, path: &mut Vec<PathSegment>) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| Error::not_representable(format_path(path), format!("float {f}")))?,
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                out.push(to_json_at(item, path)?);
                path.pop();
            }
            serde_json::Value::Array(out)
        }
        Value::Map(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                path.push(PathSegment::Key(key.clone()));
                out.insert(key.clone(), to_json_at(item, path)?);
                path.pop();
            }
            serde_json::Value::Object(out)
        }
    })
}

impl PartialEq for Value {
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => *i as f64 == *f,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (index, (key, item)) in map.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.to_json()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_equality_crosses_representations() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Float(1.5));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn test_map_equality_ignores_key_order() {
        let a: Value = vec![("a", 1), ("b", 2)].into_iter().collect();
        let b: Value = vec![("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"name": "John", "tags": ["a", 1, 1.5, null, true]}));
        let map = value.as_map().unwrap();

        assert_eq!(map.get("name"), Some(&Value::from("John")));
        let tags = map.get("tags").and_then(Value::as_list).unwrap();
        assert_eq!(tags[1], Value::Int(1));
        assert!(matches!(tags[2], Value::Float(_)));
        assert!(tags[3].is_null());
        assert_eq!(tags[4].as_bool(), Some(true));
    }

    #[test]
    fn test_json_round_trip_keeps_key_order() {
        let source = json!({"b": 1, "a": [1, 2]});
        let value = Value::from(source.clone());
        assert_eq!(value.to_json().unwrap(), source);
    }

    #[test]
    fn test_to_json_rejects_non_finite() {
        let value = Value::from(vec![Value::Float(1.0), Value::Float(f64::INFINITY)]);
        let err = value.to_json().unwrap_err();
        match err {
            Error::NotRepresentable { path, .. } => assert_eq!(path, "[1]"),
            other => panic!("Expected NotRepresentable, got {other:?}"),
        }
    }

    #[test]
    fn test_pointer() {
        let value = Value::from(json!({"users": [{"name": "Ann"}, {"name": "Bob"}]}));
        let path = vec![
            PathSegment::from("users"),
            PathSegment::from(1usize),
            PathSegment::from("name"),
        ];
        assert_eq!(value.pointer(&path), Some(&Value::from("Bob")));
        assert_eq!(value.pointer(&[PathSegment::from("missing")]), None);
        assert_eq!(value.pointer(&[]), Some(&value));
    }

    #[test]
    fn test_display() {
        let value = Value::from(json!({"a": [1, "x", null]}));
        assert_eq!(value.to_string(), r#"{"a": [1, "x", null]}"#);
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(1).type_name(), "integer");
        assert_eq!(Value::from(1.5).type_name(), "float");
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(Value::from(vec![1]).type_name(), "list");
    }
}
