//! Structured validation issues and the aggregate error

use crate::path::{PathSegment, format_path};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// What went wrong, independent of where or with which message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Value has the wrong type for the schema
    TypeMismatch,
    /// Length or magnitude below the configured bound
    TooSmall,
    /// Length or magnitude above the configured bound
    TooBig,
    /// String does not match a format, pattern, or substring rule
    InvalidFormat,
    /// Number is not a multiple of the configured step
    NotMultipleOf,
    /// Number is NaN or infinite
    NotFinite,
    /// Value differs from the configured literal
    InvalidLiteral,
    /// Value is not among the configured enum options
    InvalidEnumValue,
    /// Record contains keys outside its shape
    UnrecognizedKeys,
    /// No union alternative accepted the value
    InvalidUnion,
    /// Intersection alternatives produced outputs that cannot be merged
    InvalidIntersection,
    /// A refinement predicate rejected the value
    Custom,
    /// Input nesting exceeded the configured maximum depth
    TooDeep,
}

impl IssueKind {
    /// Stable snake_case code for programmatic handling
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            IssueKind::TypeMismatch => "type_mismatch",
            IssueKind::TooSmall => "too_small",
            IssueKind::TooBig => "too_big",
            IssueKind::InvalidFormat => "invalid_format",
            IssueKind::NotMultipleOf => "not_multiple_of",
            IssueKind::NotFinite => "not_finite",
            IssueKind::InvalidLiteral => "invalid_literal",
            IssueKind::InvalidEnumValue => "invalid_enum_value",
            IssueKind::UnrecognizedKeys => "unrecognized_keys",
            IssueKind::InvalidUnion => "invalid_union",
            IssueKind::InvalidIntersection => "invalid_intersection",
            IssueKind::Custom => "custom",
            IssueKind::TooDeep => "too_deep",
        }
    }

    /// Default message template for this kind
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            IssueKind::TypeMismatch => "Unexpected type",
            IssueKind::TooSmall => "Value is too small",
            IssueKind::TooBig => "Value is too big",
            IssueKind::InvalidFormat => "Invalid format",
            IssueKind::NotMultipleOf => "Value is not a multiple of the step",
            IssueKind::NotFinite => "Number must be finite",
            IssueKind::InvalidLiteral => "Invalid literal value",
            IssueKind::InvalidEnumValue => "Invalid enum value",
            IssueKind::UnrecognizedKeys => "Unrecognized keys",
            IssueKind::InvalidUnion => "Value did not match any union alternative",
            IssueKind::InvalidIntersection => "Intersection results could not be merged",
            IssueKind::Custom => "Invalid input",
            IssueKind::TooDeep => "Input is nested too deeply",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZonIssue {
    /// What went wrong
    pub kind: IssueKind,
    /// Human-readable message
    pub message: String,
    /// Location in the input, from the root
    pub path: Vec<PathSegment>,
    /// Per-alternative failures of an `invalid_union` issue
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub union_errors: Vec<ZonError>,
}

impl ZonIssue {
    /// Create an issue
    pub fn new(kind: IssueKind, message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            kind,
            message: message.into(),
            path,
            union_errors: Vec::new(),
        }
    }

    /// Create an issue carrying the kind's default message
    #[must_use]
    pub fn with_default_message(kind: IssueKind, path: Vec<PathSegment>) -> Self {
        Self::new(kind, kind.default_message(), path)
    }

    /// Attach the failures of each union alternative
    #[must_use]
    pub fn with_union_errors(mut self, errors: Vec<ZonError>) -> Self {
        self.union_errors = errors;
        self
    }

    /// Path rendered as `a.b[0].c`
    #[must_use]
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for ZonIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{} ({})", self.message, self.kind)
        } else {
            let path = self.path_string();
            write!(f, "{path}: {} ({})", self.message, self.kind)
        }
    }
}

/// Aggregate of every issue recorded during a validation run.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("validation failed with {} issue(s): {}", .issues.len(), summarize(.issues))]
pub struct ZonError {
    issues: Vec<ZonIssue>,
}

fn summarize(issues: &[ZonIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ZonError {
    /// Create an error from recorded issues
    #[must_use]
    pub fn new(issues: Vec<ZonIssue>) -> Self {
        Self { issues }
    }

    /// Issues in the order they were recorded
    #[must_use]
    pub fn issues(&self) -> &[ZonIssue] {
        &self.issues
    }

    /// Take ownership of the issues
    #[must_use]
    pub fn into_issues(self) -> Vec<ZonIssue> {
        self.issues
    }

    /// Number of top-level issues
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether no issues were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues recorded at exactly `path`
    pub fn issues_at<'a>(&'a self, path: &'a [PathSegment]) -> impl Iterator<Item = &'a ZonIssue> {
        self.issues.iter().filter(move |issue| issue.path == path)
    }

    /// Whether any top-level issue has the given kind
    #[must_use]
    pub fn has_kind(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }

    /// Flattens all issues, union alternatives included, depth-first.
    #[must_use]
    pub fn flatten(&self) -> Vec<&ZonIssue> {
        let mut out = Vec::new();
        for issue in &self.issues {
            out.push(issue);
            for nested in &issue.union_errors {
                out.extend(nested.flatten());
            }
        }
        out
    }
}

impl From<Vec<ZonIssue>> for ZonError {
    fn from(issues: Vec<ZonIssue>) -> Self {
        Self::new(issues)
    }
}

impl IntoIterator for ZonError {
    type Item = ZonIssue;
    type IntoIter = std::vec::IntoIter<ZonIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a ZonError {
    type Item = &'a ZonIssue;
    type IntoIter = std::slice::Iter<'a, ZonIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
