//! Format checker capability and its default implementation

use crate::datetime::is_datetime;
use crate::format::{Format, IpOptions, IpVersion};
use regex::Regex;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern is valid")
});

/// Decides whether a string satisfies a [`Format`].
///
/// Implementations must be pure: the same input always yields the same answer.
pub trait FormatChecker: fmt::Debug + Send + Sync {
    /// Returns true when `input` satisfies `format`
    fn check(&self, format: &Format, input: &str) -> bool;
}

/// Checker backed by `regex`, `url`, `uuid`, `chrono` and `std::net`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatChecker;

impl FormatChecker for DefaultFormatChecker {
    fn check(&self, format: &Format, input: &str) -> bool {
        match format {
            Format::Email => is_email(input),
            Format::Url => is_url(input),
            Format::Uuid => is_uuid(input),
            Format::Ip(opts) => is_ip(input, opts),
            Format::Datetime(opts) => is_datetime(input, opts),
        }
    }
}

/// Email address with a dotted domain and an alphabetic top-level label
#[must_use]
pub fn is_email(input: &str) -> bool {
    EMAIL_RE.is_match(input)
}

/// Absolute URL as understood by the WHATWG URL parser
#[must_use]
pub fn is_url(input: &str) -> bool {
    url::Url::parse(input).is_ok()
}

/// UUID in hyphenated, simple, braced or URN form
#[must_use]
pub fn is_uuid(input: &str) -> bool {
    uuid::Uuid::try_parse(input).is_ok()
}

/// IPv4 or IPv6 literal, restricted to one version when `opts.version` is set
#[must_use]
pub fn is_ip(input: &str, opts: &IpOptions) -> bool {
    let v4 = || input.parse::<Ipv4Addr>().is_ok();
    let v6 = || input.parse::<Ipv6Addr>().is_ok();

    match opts.version {
        Some(IpVersion::V4) => v4(),
        Some(IpVersion::V6) => v6(),
        None => v4() || v6(),
    }
}
