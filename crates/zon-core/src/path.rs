//! Path segments locating a value inside nested input

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step into nested input: a record field name or a list/tuple index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Position within a list or tuple
    Index(usize),

    /// Field name within a record
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{index}"),
            PathSegment::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        PathSegment::Key(key.clone())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Render a path as `departments[0].employees[0].address.zip`
///
/// The root path renders as an empty string.
#[must_use]
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
        }
    }
    out
}

/// Parse the notation produced by [`format_path`] back into segments
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] on unclosed brackets, non-numeric indices or
/// empty field names.
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        if part.is_empty() {
            if path.is_empty() {
                break;
            }
            return Err(Error::invalid_path(path, "empty field name"));
        }

        // Handle indexing like "items[0][1]"
        let (name, mut rest) = match part.find('[') {
            Some(open) => (&part[..open], &part[open..]),
            None => (part, ""),
        };

        if !name.is_empty() {
            segments.push(PathSegment::Key(name.to_string()));
        } else if rest.is_empty() {
            return Err(Error::invalid_path(path, "empty field name"));
        }

        while !rest.is_empty() {
            let close = rest
                .find(']')
                .ok_or_else(|| Error::invalid_path(path, format!("unclosed bracket in '{part}'")))?;
            let index: usize = rest[1..close]
                .parse()
                .map_err(|_| Error::invalid_path(path, format!("invalid index in '{part}'")))?;
            segments.push(PathSegment::Index(index));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(Error::invalid_path(
                    path,
                    format!("unexpected text after index in '{part}'"),
                ));
            }
        }
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> Vec<PathSegment> {
        vec![
            PathSegment::from("departments"),
            PathSegment::from(0usize),
            PathSegment::from("employees"),
            PathSegment::from(3usize),
            PathSegment::from("zip"),
        ]
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&segments()), "departments[0].employees[3].zip");
        assert_eq!(format_path(&[]), "");
        assert_eq!(
            format_path(&[PathSegment::from(1usize), PathSegment::from(2usize)]),
            "[1][2]"
        );
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            parse_path("departments[0].employees[3].zip").unwrap(),
            segments()
        );
        assert_eq!(parse_path("").unwrap(), Vec::new());
        assert_eq!(
            parse_path("[1][2]").unwrap(),
            vec![PathSegment::from(1usize), PathSegment::from(2usize)]
        );
    }

    #[test]
    fn test_parse_path_errors() {
        assert!(matches!(
            parse_path("items[0"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            parse_path("items[x]"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(parse_path("a..b"), Err(Error::InvalidPath { .. })));
        assert!(matches!(
            parse_path("items[0]x"),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(PathSegment::from("name").to_string(), "name");
        assert_eq!(PathSegment::from(7usize).to_string(), "7");
    }
}
