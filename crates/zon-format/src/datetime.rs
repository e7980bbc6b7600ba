//! ISO 8601 datetime checks
//!
//! Shape is matched with a regex built from [`DatetimeOptions`]; the calendar
//! date is then confirmed with `chrono`, so `2023-02-29` is rejected while
//! `2024-02-29` passes.
//!
//! Offsets may be written as `+hh:mm`, `+hhmm` or `+hh`. Hour-only offsets are
//! valid ISO 8601 and are accepted.

use crate::format::DatetimeOptions;
use crate::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;

const DATE: &str = r"(\d{4}-\d{2}-\d{2})";
const TIME: &str = r"([01]\d|2[0-3]):[0-5]\d:[0-5]\d";
const OFFSET: &str = r"[+-]([01]\d|2[0-3])(:?[0-5]\d)?";

/// Maximum fractional-second digits accepted as a precision
pub const MAX_PRECISION: u32 = 9;

/// Build the anchored regex matching datetimes allowed by `opts`
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] when the precision exceeds
/// [`MAX_PRECISION`].
pub fn datetime_regex(opts: &DatetimeOptions) -> Result<Regex> {
    let fraction = match opts.precision {
        None => r"(\.\d+)?".to_string(),
        Some(0) => String::new(),
        Some(digits) if digits <= MAX_PRECISION => format!(r"\.\d{{{digits}}}"),
        Some(digits) => {
            return Err(Error::InvalidOptions(format!(
                "precision {digits} exceeds {MAX_PRECISION} digits"
            )));
        }
    };

    let mut zone = vec![if opts.local { "Z?" } else { "Z" }];
    if opts.offset {
        zone.push(OFFSET);
    }

    let pattern = format!("^{DATE}T{TIME}{fraction}({})$", zone.join("|"));
    Ok(Regex::new(&pattern)?)
}

/// A datetime shape compiled once from [`DatetimeOptions`]
#[derive(Debug, Clone)]
pub struct DatetimePattern {
    regex: Regex,
}

impl DatetimePattern {
    /// Compile the pattern for `opts`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when the precision exceeds
    /// [`MAX_PRECISION`].
    pub fn new(opts: &DatetimeOptions) -> Result<Self> {
        Ok(Self {
            regex: datetime_regex(opts)?,
        })
    }

    /// Shape matches and the date exists on the calendar
    #[must_use]
    pub fn is_match(&self, input: &str) -> bool {
        self.regex
            .captures(input)
            .and_then(|caps| caps.get(1))
            .is_some_and(|date| NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d").is_ok())
    }
}

/// Check `input` against the datetime rules in `opts`
///
/// Compiles the pattern on every call; hold a [`DatetimePattern`] when the
/// same options are checked repeatedly.
#[must_use]
pub fn is_datetime(input: &str, opts: &DatetimeOptions) -> bool {
    match DatetimePattern::new(opts) {
        Ok(pattern) => pattern.is_match(input),
        Err(e) => {
            warn!("Rejecting datetime, options unusable: {}", e);
            false
        }
    }
}
