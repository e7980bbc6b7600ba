//! Number schema
//!
//! Bounds and steps keep the representation they were given. An `Int` value
//! is compared against an integer bound exactly, and against a float bound
//! without first rounding the integer through `f64`.

use crate::schema::{Base, Zon};
use std::cmp::Ordering;
use std::fmt;
use zon_core::{IssueKind, ValidationContext, Value};

/// Relative tolerance on the quotient for float `multiple_of` checks
const STEP_TOLERANCE: f64 = 1e-9;

/// 2^63, the first float past `i64::MAX`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// A bound or step for a [`ZonNumber`] check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberBound {
    Int(i128),
    Float(f64),
}

impl fmt::Display for NumberBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberBound::Int(i) => write!(f, "{i}"),
            NumberBound::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<i32> for NumberBound {
    fn from(i: i32) -> Self {
        NumberBound::Int(i128::from(i))
    }
}

impl From<i64> for NumberBound {
    fn from(i: i64) -> Self {
        NumberBound::Int(i128::from(i))
    }
}

impl From<u32> for NumberBound {
    fn from(i: u32) -> Self {
        NumberBound::Int(i128::from(i))
    }
}

impl From<u64> for NumberBound {
    fn from(i: u64) -> Self {
        NumberBound::Int(i128::from(i))
    }
}

impl From<f32> for NumberBound {
    fn from(x: f32) -> Self {
        NumberBound::Float(f64::from(x))
    }
}

impl From<f64> for NumberBound {
    fn from(x: f64) -> Self {
        NumberBound::Float(x)
    }
}

#[derive(Debug, Clone)]
enum NumberCheck {
    Gt(NumberBound),
    Gte(NumberBound),
    Lt(NumberBound),
    Lte(NumberBound),
    Int,
    Float,
    MultipleOf(NumberBound),
    Finite,
}

/// Validates `Int` and `Float` values.
#[derive(Debug, Clone, Default)]
pub struct ZonNumber {
    base: Base,
    checks: Vec<NumberCheck>,
}

impl ZonNumber {
    /// A number schema without constraints
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_check(&self, check: NumberCheck) -> Self {
        let mut next = self.clone();
        next.checks.push(check);
        next
    }

    /// Strictly greater than `bound`
    #[must_use]
    pub fn gt(&self, bound: impl Into<NumberBound>) -> Self {
        self.with_check(NumberCheck::Gt(bound.into()))
    }

    /// Greater than or equal to `bound`
    #[must_use]
    pub fn gte(&self, bound: impl Into<NumberBound>) -> Self {
        self.with_check(NumberCheck::Gte(bound.into()))
    }

    /// Strictly less than `bound`
    #[must_use]
    pub fn lt(&self, bound: impl Into<NumberBound>) -> Self {
        self.with_check(NumberCheck::Lt(bound.into()))
    }

    /// Less than or equal to `bound`
    #[must_use]
    pub fn lte(&self, bound: impl Into<NumberBound>) -> Self {
        self.with_check(NumberCheck::Lte(bound.into()))
    }

    /// Alias of [`ZonNumber::gte`]
    #[must_use]
    pub fn min(&self, bound: impl Into<NumberBound>) -> Self {
        self.gte(bound)
    }

    /// Alias of [`ZonNumber::lte`]
    #[must_use]
    pub fn max(&self, bound: impl Into<NumberBound>) -> Self {
        self.lte(bound)
    }

    /// Value must be represented as an integer
    #[must_use]
    pub fn int(&self) -> Self {
        self.with_check(NumberCheck::Int)
    }

    /// Value must be represented as a float
    #[must_use]
    pub fn float(&self) -> Self {
        self.with_check(NumberCheck::Float)
    }

    /// Strictly greater than zero
    #[must_use]
    pub fn positive(&self) -> Self {
        self.gt(0)
    }

    /// Strictly less than zero
    #[must_use]
    pub fn negative(&self) -> Self {
        self.lt(0)
    }

    /// Zero or greater
    #[must_use]
    pub fn non_negative(&self) -> Self {
        self.gte(0)
    }

    /// Zero or less
    #[must_use]
    pub fn non_positive(&self) -> Self {
        self.lte(0)
    }

    /// Value must be a whole multiple of `step`; a zero step rejects everything
    #[must_use]
    pub fn multiple_of(&self, step: impl Into<NumberBound>) -> Self {
        self.with_check(NumberCheck::MultipleOf(step.into()))
    }

    /// Alias of [`ZonNumber::multiple_of`]
    #[must_use]
    pub fn step(&self, step: impl Into<NumberBound>) -> Self {
        self.multiple_of(step)
    }

    /// Reject NaN and infinities
    #[must_use]
    pub fn finite(&self) -> Self {
        self.with_check(NumberCheck::Finite)
    }
}

/// Exact ordering of an integer against a float; `None` for NaN
fn cmp_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I64_LIMIT * 2.0 {
        return Some(Ordering::Less);
    }
    if float < -I64_LIMIT {
        return Some(Ordering::Greater);
    }

    let whole = float.trunc();
    #[allow(clippy::cast_possible_truncation)]
    let whole_int = whole as i128;
    let fraction = float - whole;
    Some(
        int.cmp(&whole_int)
            .then_with(|| 0.0_f64.partial_cmp(&fraction).unwrap_or(Ordering::Equal)),
    )
}

/// Ordering of `value` against `bound`, `None` when either side is NaN
fn compare(value: &Value, bound: NumberBound) -> Option<Ordering> {
    match (value, bound) {
        (Value::Int(v), NumberBound::Int(b)) => Some(i128::from(*v).cmp(&b)),
        (Value::Int(v), NumberBound::Float(b)) => cmp_int_float(i128::from(*v), b),
        (Value::Float(v), NumberBound::Int(b)) => cmp_int_float(b, *v).map(Ordering::reverse),
        (Value::Float(v), NumberBound::Float(b)) => v.partial_cmp(&b),
        _ => None,
    }
}

/// Integer form of `step` when it holds a whole number
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral_step(step: NumberBound) -> Option<i128> {
    match step {
        NumberBound::Int(s) => Some(s),
        NumberBound::Float(s) if s.is_finite() && s.fract() == 0.0 && s.abs() < I64_LIMIT => {
            Some(s as i128)
        }
        NumberBound::Float(_) => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn is_multiple_of(value: &Value, step: NumberBound) -> bool {
    if let (Value::Int(v), Some(s)) = (value, integral_step(step)) {
        return s != 0 && i128::from(*v) % s == 0;
    }

    let step = match step {
        NumberBound::Int(s) => s as f64,
        NumberBound::Float(s) => s,
    };
    match value.as_f64() {
        Some(v) if step != 0.0 && step.is_finite() && v.is_finite() => {
            let quotient = v / step;
            (quotient - quotient.round()).abs() < STEP_TOLERANCE
        }
        _ => false,
    }
}

fn apply(check: &NumberCheck, value: &Value, ctx: &mut ValidationContext) {
    match check {
        NumberCheck::Gt(bound) if !compare(value, *bound).is_some_and(Ordering::is_gt) => {
            ctx.add_issue(
                IssueKind::TooSmall,
                format!("Number must be greater than {bound}"),
            );
        }
        NumberCheck::Gte(bound) if !compare(value, *bound).is_some_and(Ordering::is_ge) => {
            ctx.add_issue(
                IssueKind::TooSmall,
                format!("Number must be greater than or equal to {bound}"),
            );
        }
        NumberCheck::Lt(bound) if !compare(value, *bound).is_some_and(Ordering::is_lt) => {
            ctx.add_issue(
                IssueKind::TooBig,
                format!("Number must be less than {bound}"),
            );
        }
        NumberCheck::Lte(bound) if !compare(value, *bound).is_some_and(Ordering::is_le) => {
            ctx.add_issue(
                IssueKind::TooBig,
                format!("Number must be less than or equal to {bound}"),
            );
        }
        NumberCheck::Int if !matches!(value, Value::Int(_)) => {
            ctx.add_issue(
                IssueKind::TypeMismatch,
                format!("Expected integer, received {}", value.type_name()),
            );
        }
        NumberCheck::Float if !matches!(value, Value::Float(_)) => {
            ctx.add_issue(
                IssueKind::TypeMismatch,
                format!("Expected float, received {}", value.type_name()),
            );
        }
        NumberCheck::MultipleOf(step) if !is_multiple_of(value, *step) => {
            ctx.add_issue(
                IssueKind::NotMultipleOf,
                format!("Number must be a multiple of {step}"),
            );
        }
        NumberCheck::Finite if matches!(value, Value::Float(x) if !x.is_finite()) => {
            ctx.add_issue(IssueKind::NotFinite, IssueKind::NotFinite.default_message());
        }
        _ => {}
    }
}

impl Zon for ZonNumber {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "number"
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        if !matches!(value, Value::Int(_) | Value::Float(_)) {
            ctx.add_issue(
                IssueKind::TypeMismatch,
                format!("Expected number, received {}", value.type_name()),
            );
            return None;
        }

        let mark = ctx.issue_count();
        for check in &self.checks {
            apply(check, value, ctx);
            if self.base.should_stop(ctx, mark) {
                return None;
            }
        }

        (!ctx.dirty_since(mark)).then(|| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(schema: &ZonNumber, input: impl Into<Value>) -> Vec<IssueKind> {
        match schema.validate(&input.into()) {
            Ok(_) => Vec::new(),
            Err(e) => e.issues().iter().map(|i| i.kind).collect(),
        }
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(kinds(&ZonNumber::new(), "1"), vec![IssueKind::TypeMismatch]);
        assert_eq!(
            kinds(&ZonNumber::new(), true),
            vec![IssueKind::TypeMismatch]
        );
        assert!(kinds(&ZonNumber::new(), 1).is_empty());
        assert!(kinds(&ZonNumber::new(), 1.5).is_empty());
    }

    #[test]
    fn test_bounds() {
        let schema = ZonNumber::new().gt(1).lte(5);
        assert!(kinds(&schema, 5).is_empty());
        assert!(kinds(&schema, 1.5).is_empty());
        assert_eq!(kinds(&schema, 1), vec![IssueKind::TooSmall]);
        assert_eq!(kinds(&schema, 5.01), vec![IssueKind::TooBig]);

        let schema = ZonNumber::new().gte(1).lt(5);
        assert!(kinds(&schema, 1).is_empty());
        assert_eq!(kinds(&schema, 5), vec![IssueKind::TooBig]);

        let schema = ZonNumber::new().min(0).max(10);
        assert!(kinds(&schema, 0).is_empty());
        assert!(kinds(&schema, 10).is_empty());
    }

    #[test]
    fn test_bound_messages() {
        let err = ZonNumber::new().gt(3).validate(&Value::from(2)).unwrap_err();
        assert_eq!(err.issues()[0].message, "Number must be greater than 3");
    }

    #[test]
    fn test_sign_helpers() {
        assert!(kinds(&ZonNumber::new().positive(), 1).is_empty());
        assert_eq!(
            kinds(&ZonNumber::new().positive(), 0),
            vec![IssueKind::TooSmall]
        );
        assert!(kinds(&ZonNumber::new().non_negative(), 0).is_empty());
        assert!(kinds(&ZonNumber::new().negative(), -0.5).is_empty());
        assert_eq!(
            kinds(&ZonNumber::new().negative(), 0),
            vec![IssueKind::TooBig]
        );
        assert!(kinds(&ZonNumber::new().non_positive(), 0).is_empty());
    }

    #[test]
    fn test_int_and_float_representation() {
        assert!(kinds(&ZonNumber::new().int(), 3).is_empty());
        assert_eq!(
            kinds(&ZonNumber::new().int(), 3.0),
            vec![IssueKind::TypeMismatch]
        );
        assert!(kinds(&ZonNumber::new().float(), 3.0).is_empty());
        assert_eq!(
            kinds(&ZonNumber::new().float(), 3),
            vec![IssueKind::TypeMismatch]
        );
    }

    #[test]
    fn test_multiple_of() {
        let schema = ZonNumber::new().multiple_of(3);
        assert!(kinds(&schema, 9).is_empty());
        assert!(kinds(&schema, -9).is_empty());
        assert!(kinds(&schema, 0).is_empty());
        assert_eq!(kinds(&schema, 10), vec![IssueKind::NotMultipleOf]);

        let schema = ZonNumber::new().step(0.1);
        assert!(kinds(&schema, 0.3).is_empty());
        assert!(kinds(&schema, 2).is_empty());
        assert_eq!(kinds(&schema, 0.35), vec![IssueKind::NotMultipleOf]);

        assert!(kinds(&ZonNumber::new().multiple_of(-1), i64::MIN).is_empty());
        assert_eq!(
            kinds(&ZonNumber::new().multiple_of(0), 0),
            vec![IssueKind::NotMultipleOf]
        );
    }

    #[test]
    fn test_integers_past_float_precision() {
        // 2^53 + 1 has no exact f64 representation
        let odd = 9_007_199_254_740_993_i64;

        let float_bound = ZonNumber::new().int().lte(9_007_199_254_740_992.0);
        assert_eq!(kinds(&float_bound, odd), vec![IssueKind::TooBig]);
        assert!(kinds(&float_bound, odd - 1).is_empty());

        assert!(kinds(&ZonNumber::new().lte(odd), odd).is_empty());
        assert_eq!(
            kinds(&ZonNumber::new().lt(odd), odd),
            vec![IssueKind::TooBig]
        );
        assert_eq!(
            kinds(&ZonNumber::new().gt(odd), odd),
            vec![IssueKind::TooSmall]
        );
        assert!(kinds(&ZonNumber::new().max(u64::MAX), i64::MAX).is_empty());

        let even = ZonNumber::new().multiple_of(2.0);
        assert_eq!(kinds(&even, odd), vec![IssueKind::NotMultipleOf]);
        assert!(kinds(&even, odd + 1).is_empty());
        let even = ZonNumber::new().multiple_of(2);
        assert_eq!(kinds(&even, odd), vec![IssueKind::NotMultipleOf]);
    }

    #[test]
    fn test_float_against_integer_bound() {
        let schema = ZonNumber::new().gte(i64::MAX);
        assert!(kinds(&schema, 1e19).is_empty());
        assert_eq!(kinds(&schema, 9.2e18), vec![IssueKind::TooSmall]);
        assert_eq!(kinds(&schema, f64::NAN), vec![IssueKind::TooSmall]);
    }

    #[test]
    fn test_finite() {
        let schema = ZonNumber::new().finite();
        assert!(kinds(&schema, 1e300).is_empty());
        assert_eq!(kinds(&schema, f64::INFINITY), vec![IssueKind::NotFinite]);
        assert_eq!(kinds(&schema, f64::NAN), vec![IssueKind::NotFinite]);
    }

    #[test]
    fn test_every_constraint_reported() {
        let schema = ZonNumber::new().int().positive().multiple_of(2);
        assert_eq!(
            kinds(&schema, -1.5),
            vec![
                IssueKind::TypeMismatch,
                IssueKind::TooSmall,
                IssueKind::NotMultipleOf
            ]
        );
        assert_eq!(kinds(&schema.fail_fast(), -1.5).len(), 1);
    }
}
