//! Validation context

use crate::issue::{IssueKind, ZonError, ZonIssue};
use crate::path::{PathSegment, format_path};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Options for a single validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Stop every node at its first recorded issue
    pub fail_fast: bool,
    /// Maximum nesting depth to descend into (`None` = unlimited)
    pub max_depth: Option<usize>,
}

impl ValidationConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fail-fast for the whole run
    #[must_use]
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Bound the nesting depth
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// State of one validation run: the current path and every issue recorded so far.
///
/// A context is created per top-level `validate` call and never shared between
/// runs. Descending into a child extends the path only for the duration of the
/// child check, so issues always carry the exact location of the failure.
#[derive(Debug, Default)]
pub struct ValidationContext {
    config: ValidationConfig,
    path: Vec<PathSegment>,
    issues: Vec<ZonIssue>,
}

impl ValidationContext {
    /// Create a context for a new run
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            path: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Configuration of this run
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Current path from the root
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Issues recorded so far
    #[must_use]
    pub fn issues(&self) -> &[ZonIssue] {
        &self.issues
    }

    /// Number of issues recorded so far, usable as a mark for [`Self::dirty_since`]
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Whether any issue has been recorded
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Whether issues were recorded after `mark` was taken
    #[must_use]
    pub fn dirty_since(&self, mark: usize) -> bool {
        self.issues.len() > mark
    }

    /// Record an issue at the current path
    pub fn add_issue(&mut self, kind: IssueKind, message: impl Into<String>) {
        let issue = ZonIssue::new(kind, message, self.path.clone());
        trace!(path = %issue.path_string(), kind = %kind, "issue recorded");
        self.issues.push(issue);
    }

    /// Record an already-built issue unchanged
    pub fn push_issue(&mut self, issue: ZonIssue) {
        self.issues.push(issue);
    }

    /// Record several already-built issues unchanged
    pub fn add_issues(&mut self, issues: impl IntoIterator<Item = ZonIssue>) {
        self.issues.extend(issues);
    }

    /// Run `f` with `segment` appended to the path
    ///
    /// When the configured depth limit would be exceeded a `too_deep` issue is
    /// recorded and `f` is not called.
    pub fn descend<R>(
        &mut self,
        segment: impl Into<PathSegment>,
        f: impl FnOnce(&mut Self) -> Option<R>,
    ) -> Option<R> {
        self.path.push(segment.into());
        let result = if self
            .config
            .max_depth
            .is_some_and(|max| self.path.len() > max)
        {
            self.add_issue(IssueKind::TooDeep, IssueKind::TooDeep.default_message());
            None
        } else {
            f(self)
        };
        self.path.pop();
        result
    }

    /// Start an isolated sub-run at the current path with an empty issue list
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            config: self.config,
            path: self.path.clone(),
            issues: Vec::new(),
        }
    }

    /// Turn a finished fork into an error, or `None` when it stayed clean
    #[must_use]
    pub fn into_error(self) -> Option<ZonError> {
        if self.issues.is_empty() {
            None
        } else {
            Some(ZonError::new(self.issues))
        }
    }

    /// Finish the run: the validated value when nothing was recorded, the aggregate error otherwise
    ///
    /// # Errors
    ///
    /// Returns a [`ZonError`] holding every recorded issue.
    pub fn finish(mut self, value: Option<Value>) -> Result<Value, ZonError> {
        match value {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => {
                if self.issues.is_empty() {
                    self.add_issue(IssueKind::Custom, IssueKind::Custom.default_message());
                }
                Err(ZonError::new(self.issues))
            }
        }
    }

    /// Current path rendered as `a.b[0]`
    #[must_use]
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}
