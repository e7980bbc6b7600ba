//! String schema

use crate::Result;
use crate::length::{LengthRule, Measured};
use crate::schema::{Base, Transformer, Zon};
use regex::Regex;
use std::sync::Arc;
use tracing::warn;
use zon_core::{IssueKind, ValidationContext, Value};
use zon_format::{
    DatetimeOptions, DatetimePattern, DefaultFormatChecker, Format, FormatChecker, IpOptions,
};

/// One constraint of a string schema, evaluated in declaration order
#[derive(Debug, Clone)]
enum StringCheck {
    Length(LengthRule),
    Format {
        format: Format,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
    /// Compiled when the check is added; `None` when the options are unusable
    Datetime(Option<DatetimePattern>),
    Includes(String),
    StartsWith(String),
    EndsWith(String),
}

/// Validates text values.
#[derive(Debug, Clone)]
pub struct ZonString {
    base: Base,
    checks: Vec<StringCheck>,
    checker: Arc<dyn FormatChecker>,
}

impl Default for ZonString {
    fn default() -> Self {
        Self {
            base: Base::default(),
            checks: Vec::new(),
            checker: Arc::new(DefaultFormatChecker),
        }
    }
}

impl ZonString {
    /// A string schema without constraints
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_check(&self, check: StringCheck) -> Self {
        let mut next = self.clone();
        next.checks.push(check);
        next
    }

    fn with_transformer(&self, transformer: Transformer) -> Self {
        let mut next = self.clone();
        next.base.push_transformer(transformer);
        next
    }

    fn with_format(&self, format: Format, message: Option<String>) -> Self {
        self.with_check(StringCheck::Format { format, message })
    }

    /// Use `checker` for email, url, uuid and ip checks
    #[must_use]
    pub fn with_format_checker(&self, checker: impl FormatChecker + 'static) -> Self {
        let mut next = self.clone();
        next.checker = Arc::new(checker);
        next
    }

    /// At least `min` characters
    #[must_use]
    pub fn min(&self, min: usize) -> Self {
        self.with_check(StringCheck::Length(LengthRule::Min(min)))
    }

    /// At most `max` characters
    #[must_use]
    pub fn max(&self, max: usize) -> Self {
        self.with_check(StringCheck::Length(LengthRule::Max(max)))
    }

    /// Exactly `length` characters
    #[must_use]
    pub fn length(&self, length: usize) -> Self {
        self.with_check(StringCheck::Length(LengthRule::Exact(length)))
    }

    /// At least one character
    #[must_use]
    pub fn nonempty(&self) -> Self {
        self.min(1)
    }

    /// Email address
    #[must_use]
    pub fn email(&self) -> Self {
        self.with_format(Format::Email, None)
    }

    /// [`ZonString::email`] reporting `message` on failure
    #[must_use]
    pub fn email_with_message(&self, message: impl Into<String>) -> Self {
        self.with_format(Format::Email, Some(message.into()))
    }

    /// Absolute URL
    #[must_use]
    pub fn url(&self) -> Self {
        self.with_format(Format::Url, None)
    }

    /// [`ZonString::url`] reporting `message` on failure
    #[must_use]
    pub fn url_with_message(&self, message: impl Into<String>) -> Self {
        self.with_format(Format::Url, Some(message.into()))
    }

    /// Hyphenated UUID
    #[must_use]
    pub fn uuid(&self) -> Self {
        self.with_format(Format::Uuid, None)
    }

    /// [`ZonString::uuid`] reporting `message` on failure
    #[must_use]
    pub fn uuid_with_message(&self, message: impl Into<String>) -> Self {
        self.with_format(Format::Uuid, Some(message.into()))
    }

    /// IP address literal, optionally restricted to one version
    #[must_use]
    pub fn ip(&self, opts: IpOptions) -> Self {
        self.with_format(Format::Ip(opts), None)
    }

    /// ISO 8601 datetime as allowed by `opts`
    ///
    /// Options that cannot be satisfied (a precision above nine digits) make
    /// every input fail; use [`ZonString::try_datetime`] to catch them early.
    #[must_use]
    pub fn datetime(&self, opts: DatetimeOptions) -> Self {
        let pattern = DatetimePattern::new(&opts)
            .inspect_err(|e| warn!("Datetime check rejects every input: {}", e))
            .ok();
        self.with_check(StringCheck::Datetime(pattern))
    }

    /// [`ZonString::datetime`], rejecting unusable options up front
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Format`] when `opts` cannot be turned into a check.
    pub fn try_datetime(&self, opts: DatetimeOptions) -> Result<Self> {
        let pattern = DatetimePattern::new(&opts)?;
        Ok(self.with_check(StringCheck::Datetime(Some(pattern))))
    }

    /// Must match `regex` somewhere in the string (anchor it for a full match)
    #[must_use]
    pub fn regex(&self, regex: Regex) -> Self {
        self.with_check(StringCheck::Pattern {
            regex,
            message: None,
        })
    }

    /// [`ZonString::regex`] reporting `message` on failure
    #[must_use]
    pub fn regex_with_message(&self, regex: Regex, message: impl Into<String>) -> Self {
        self.with_check(StringCheck::Pattern {
            regex,
            message: Some(message.into()),
        })
    }

    /// Compile `pattern` and require a match
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Pattern`] when `pattern` is not a valid regex.
    pub fn try_regex(&self, pattern: &str) -> Result<Self> {
        Ok(self.regex(Regex::new(pattern)?))
    }

    /// Contains `needle`
    #[must_use]
    pub fn includes(&self, needle: impl Into<String>) -> Self {
        self.with_check(StringCheck::Includes(needle.into()))
    }

    /// Begins with `prefix`
    #[must_use]
    pub fn starts_with(&self, prefix: impl Into<String>) -> Self {
        self.with_check(StringCheck::StartsWith(prefix.into()))
    }

    /// Ends with `suffix`
    #[must_use]
    pub fn ends_with(&self, suffix: impl Into<String>) -> Self {
        self.with_check(StringCheck::EndsWith(suffix.into()))
    }

    /// Strip leading and trailing whitespace from the validated value
    #[must_use]
    pub fn trim(&self) -> Self {
        self.with_transformer(Transformer::new("trim", |value| {
            map_text(value, |s| s.trim().to_string())
        }))
    }

    /// Lowercase the validated value
    #[must_use]
    pub fn to_lower_case(&self) -> Self {
        self.with_transformer(Transformer::new("to_lower_case", |value| {
            map_text(value, str::to_lowercase)
        }))
    }

    /// Uppercase the validated value
    #[must_use]
    pub fn to_upper_case(&self) -> Self {
        self.with_transformer(Transformer::new("to_upper_case", |value| {
            map_text(value, str::to_uppercase)
        }))
    }

    fn apply(&self, check: &StringCheck, text: &str, ctx: &mut ValidationContext) {
        match check {
            StringCheck::Length(rule) => {
                rule.check(text.chars().count(), Measured::String, ctx);
            }
            StringCheck::Format { format, message } => {
                if !self.checker.check(format, text) {
                    let message = message.clone().unwrap_or_else(|| format!("Invalid {format}"));
                    ctx.add_issue(IssueKind::InvalidFormat, message);
                }
            }
            StringCheck::Pattern { regex, message } => {
                if !regex.is_match(text) {
                    let message = message
                        .clone()
                        .unwrap_or_else(|| format!("String must match pattern {}", regex.as_str()));
                    ctx.add_issue(IssueKind::InvalidFormat, message);
                }
            }
            StringCheck::Datetime(pattern) => {
                if !pattern.as_ref().is_some_and(|p| p.is_match(text)) {
                    ctx.add_issue(IssueKind::InvalidFormat, "Invalid datetime");
                }
            }
            StringCheck::Includes(needle) => {
                if !text.contains(needle.as_str()) {
                    ctx.add_issue(
                        IssueKind::InvalidFormat,
                        format!("String must include \"{needle}\""),
                    );
                }
            }
            StringCheck::StartsWith(prefix) => {
                if !text.starts_with(prefix.as_str()) {
                    ctx.add_issue(
                        IssueKind::InvalidFormat,
                        format!("String must start with \"{prefix}\""),
                    );
                }
            }
            StringCheck::EndsWith(suffix) => {
                if !text.ends_with(suffix.as_str()) {
                    ctx.add_issue(
                        IssueKind::InvalidFormat,
                        format!("String must end with \"{suffix}\""),
                    );
                }
            }
        }
    }
}

fn map_text(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    }
}

impl Zon for ZonString {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "string"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        let Value::String(text) = value else {
            ctx.add_issue(
                IssueKind::TypeMismatch,
                format!("Expected string, received {}", value.type_name()),
            );
            return None;
        };

        let mark = ctx.issue_count();
        for check in &self.checks {
            self.apply(check, text, ctx);
            if self.base.should_stop(ctx, mark) {
                return None;
            }
        }

        (!ctx.dirty_since(mark)).then(|| value.clone())
    }
}
