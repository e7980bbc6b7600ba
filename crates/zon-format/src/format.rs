//! Format identifiers and their options

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which IP version an `ip` check accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    V4,
    V6,
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "v4"),
            IpVersion::V6 => write!(f, "v6"),
        }
    }
}

/// Options for IP address checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IpOptions {
    /// Required version (default: either)
    pub version: Option<IpVersion>,
}

impl IpOptions {
    /// Accept either version
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a specific version
    #[must_use]
    pub fn version(mut self, version: IpVersion) -> Self {
        self.version = Some(version);
        self
    }
}

/// Options for ISO 8601 datetime checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatetimeOptions {
    /// Exact number of fractional-second digits (default: any, including none)
    pub precision: Option<u32>,
    /// Allow a datetime without `Z` or offset (default: false)
    pub local: bool,
    /// Allow an explicit `+hh:mm`, `+hhmm` or `+hh` offset (default: false)
    pub offset: bool,
}

impl DatetimeOptions {
    /// Create options with defaults: UTC `Z` suffix required, any precision
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require exactly `digits` fractional-second digits
    #[must_use]
    pub fn precision(mut self, digits: u32) -> Self {
        self.precision = Some(digits);
        self
    }

    /// Allow datetimes without a timezone designator
    #[must_use]
    pub fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    /// Allow explicit offsets
    #[must_use]
    pub fn offset(mut self, offset: bool) -> Self {
        self.offset = offset;
        self
    }
}

/// A string format a [`crate::FormatChecker`] can verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum Format {
    Email,
    Url,
    Uuid,
    Ip(IpOptions),
    Datetime(DatetimeOptions),
}

impl Format {
    /// Short name used in issue messages
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Format::Email => "email",
            Format::Url => "url",
            Format::Uuid => "uuid",
            Format::Ip(_) => "ip",
            Format::Datetime(_) => "datetime",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Ip(IpOptions {
                version: Some(version),
            }) => write!(f, "ip{version}"),
            other => f.write_str(other.name()),
        }
    }
}
