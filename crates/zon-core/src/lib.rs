#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # zon-core
//!
//! Value model, issue paths, and the validation context shared by every zon schema.
//!
//! This crate has no notion of schemas. It defines the data a schema validates
//! ([`Value`]), how a location inside that data is addressed ([`PathSegment`]),
//! how failures are reported ([`ZonIssue`], [`ZonError`]) and the per-run state
//! that carries both through a validation ([`ValidationContext`]).

/// Per-run validation state and configuration.
pub mod context;
/// Structured validation issues and the aggregate error.
pub mod issue;
/// Path segments locating a value inside nested input.
pub mod path;
/// Dynamic value model.
pub mod value;

/// Run-scoped state plus the options that shape a run.
pub use context::{ValidationConfig, ValidationContext};
/// Issue taxonomy and aggregate error.
pub use issue::{IssueKind, ZonError, ZonIssue};
/// Path primitives and helpers.
pub use path::{PathSegment, format_path, parse_path};
/// Dynamic value and its map type.
pub use value::{Map, Value};

use thiserror::Error;

/// Errors that can occur when working with values and paths
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Value at {path} cannot be represented as JSON: {reason}")]
    NotRepresentable { path: String, reason: String },
}

impl Error {
    /// Build an invalid-path error with input path and parsing reason.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a representation error for the value at `path`.
    pub fn not_representable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotRepresentable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, Error>;
