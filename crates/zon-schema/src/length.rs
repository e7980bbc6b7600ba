//! Length bounds shared by strings, lists and tuples

use std::fmt;
use zon_core::{IssueKind, ValidationContext};

/// What is being measured, used to word issue messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Measured {
    String,
    List,
    Tuple,
}

impl Measured {
    fn unit(self) -> &'static str {
        match self {
            Measured::String => "character(s)",
            Measured::List | Measured::Tuple => "element(s)",
        }
    }
}

impl fmt::Display for Measured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measured::String => write!(f, "String"),
            Measured::List => write!(f, "List"),
            Measured::Tuple => write!(f, "Tuple"),
        }
    }
}

/// An inclusive bound on a length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LengthRule {
    Min(usize),
    Max(usize),
    Exact(usize),
}

impl LengthRule {
    /// Record `too_small`/`too_big` when `len` breaks the rule; returns whether it held
    pub(crate) fn check(self, len: usize, measured: Measured, ctx: &mut ValidationContext) -> bool {
        let unit = measured.unit();
        let violation = match self {
            LengthRule::Min(min) if len < min => Some((
                IssueKind::TooSmall,
                format!("{measured} must contain at least {min} {unit}"),
            )),
            LengthRule::Max(max) if len > max => Some((
                IssueKind::TooBig,
                format!("{measured} must contain at most {max} {unit}"),
            )),
            LengthRule::Exact(exact) if len != exact => {
                let kind = if len < exact {
                    IssueKind::TooSmall
                } else {
                    IssueKind::TooBig
                };
                Some((kind, format!("{measured} must contain exactly {exact} {unit}")))
            }
            _ => None,
        };

        match violation {
            Some((kind, message)) => {
                ctx.add_issue(kind, message);
                false
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let mut ctx = ValidationContext::default();

        assert!(LengthRule::Min(3).check(3, Measured::String, &mut ctx));
        assert!(LengthRule::Max(3).check(3, Measured::String, &mut ctx));
        assert!(LengthRule::Exact(3).check(3, Measured::String, &mut ctx));
        assert!(!ctx.is_dirty());
    }

    #[test]
    fn test_violation_messages() {
        let mut ctx = ValidationContext::default();

        assert!(!LengthRule::Min(2).check(1, Measured::String, &mut ctx));
        assert!(!LengthRule::Max(1).check(2, Measured::List, &mut ctx));
        assert!(!LengthRule::Exact(2).check(1, Measured::Tuple, &mut ctx));
        assert!(!LengthRule::Exact(2).check(3, Measured::Tuple, &mut ctx));

        let issues = ctx.issues();
        assert_eq!(issues[0].kind, IssueKind::TooSmall);
        assert_eq!(
            issues[0].message,
            "String must contain at least 2 character(s)"
        );
        assert_eq!(issues[1].kind, IssueKind::TooBig);
        assert_eq!(issues[1].message, "List must contain at most 1 element(s)");
        assert_eq!(issues[2].kind, IssueKind::TooSmall);
        assert_eq!(issues[3].kind, IssueKind::TooBig);
        assert_eq!(issues[3].message, "Tuple must contain exactly 2 element(s)");
    }
}
