#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # zon-format
//!
//! String format checks used by zon string schemas.
//!
//! Schemas only need the capability "does this string satisfy format F". That
//! capability is the [`FormatChecker`] trait; [`DefaultFormatChecker`] implements
//! it with `regex`, `url`, `uuid`, `chrono` and `std::net`. A schema can be handed
//! any other implementation.
//!
//! ## Example Usage
//!
//! ```rust
//! use zon_format::{DatetimeOptions, DefaultFormatChecker, Format, FormatChecker};
//!
//! let checker = DefaultFormatChecker;
//! let format = Format::Datetime(DatetimeOptions::new().offset(true));
//!
//! assert!(checker.check(&format, "2024-01-01T00:00:00+01"));
//! assert!(!checker.check(&Format::Email, "not-an-email"));
//! ```

pub mod checker;
pub mod datetime;
pub mod format;

pub use checker::{DefaultFormatChecker, FormatChecker, is_email, is_ip, is_url, is_uuid};
pub use datetime::{DatetimePattern, datetime_regex, is_datetime};
pub use format::{DatetimeOptions, Format, IpOptions, IpVersion};

use thiserror::Error;

/// Errors that can occur when preparing format checks
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid format options: {0}")]
    InvalidOptions(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
