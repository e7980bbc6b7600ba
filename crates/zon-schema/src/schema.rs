//! The common schema interface and the orchestration every variant hooks into

use crate::anything::ZonAnything;
use crate::boolean::ZonBoolean;
use crate::enumeration::ZonEnum;
use crate::intersection::ZonIntersection;
use crate::list::ZonList;
use crate::literal::ZonLiteral;
use crate::never::ZonNever;
use crate::number::ZonNumber;
use crate::optional::ZonOptional;
use crate::record::ZonRecord;
use crate::string::ZonString;
use crate::tuple::ZonTuple;
use crate::union::ZonUnion;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use zon_core::{IssueKind, ValidationConfig, ValidationContext, Value, ZonError};

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// A user predicate run after the built-in checks pass
#[derive(Clone)]
pub struct Refinement {
    predicate: Predicate,
    message: String,
}

impl Refinement {
    /// Whether `value` satisfies the predicate
    #[must_use]
    pub fn holds(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    /// Message recorded when the predicate fails
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A value-to-value function applied once validation succeeded
#[derive(Clone)]
pub struct Transformer {
    name: &'static str,
    apply: TransformFn,
}

impl Transformer {
    /// Create a named transformer
    pub fn new(name: &'static str, apply: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    /// Name shown in debug output
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply the transformer
    #[must_use]
    pub fn apply(&self, value: Value) -> Value {
        (self.apply)(value)
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transformer({})", self.name)
    }
}

/// Configuration every schema variant carries besides its own checks
#[derive(Debug, Clone, Default)]
pub struct Base {
    refinements: Vec<Refinement>,
    transformers: Vec<Transformer>,
    fail_fast: bool,
}

impl Base {
    /// Refinements in declaration order
    #[must_use]
    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    /// Transformers in declaration order
    #[must_use]
    pub fn transformers(&self) -> &[Transformer] {
        &self.transformers
    }

    /// Whether this node stops at its first issue
    #[must_use]
    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Fresh base for a schema derived from this one: only fail-fast carries over
    pub(crate) fn derived(&self) -> Self {
        Self {
            fail_fast: self.fail_fast,
            ..Self::default()
        }
    }

    pub(crate) fn push_transformer(&mut self, transformer: Transformer) {
        self.transformers.push(transformer);
    }

    /// True when fail-fast applies and an issue was recorded after `mark`
    pub(crate) fn should_stop(&self, ctx: &ValidationContext, mark: usize) -> bool {
        (self.fail_fast || ctx.config().fail_fast) && ctx.dirty_since(mark)
    }
}

/// Outcome of [`Zon::safe_validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum SafeValidation {
    /// The validated, transformed copy of the input
    Valid(Value),
    /// Every issue recorded during the run
    Invalid(ZonError),
}

impl SafeValidation {
    /// Whether validation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, SafeValidation::Valid(_))
    }

    /// The validated value, if any
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            SafeValidation::Valid(value) => Some(value),
            SafeValidation::Invalid(_) => None,
        }
    }

    /// The aggregate error, if any
    #[must_use]
    pub fn error(&self) -> Option<&ZonError> {
        match self {
            SafeValidation::Valid(_) => None,
            SafeValidation::Invalid(error) => Some(error),
        }
    }

    /// Convert into a `Result`
    ///
    /// # Errors
    ///
    /// Returns the aggregate error of a failed validation.
    pub fn into_result(self) -> Result<Value, ZonError> {
        self.into()
    }
}

impl From<Result<Value, ZonError>> for SafeValidation {
    fn from(result: Result<Value, ZonError>) -> Self {
        match result {
            Ok(value) => SafeValidation::Valid(value),
            Err(error) => SafeValidation::Invalid(error),
        }
    }
}

impl From<SafeValidation> for Result<Value, ZonError> {
    fn from(outcome: SafeValidation) -> Self {
        match outcome {
            SafeValidation::Valid(value) => Ok(value),
            SafeValidation::Invalid(error) => Err(error),
        }
    }
}

/// The capability set shared by every schema.
///
/// Implementors supply [`Zon::check`], the structural type check plus the
/// variant's own constraints. Everything else (refinements, transformers,
/// run entry points and the chaining helpers) is provided.
///
/// Chaining methods take `&self` and return a new schema; the receiver is
/// never modified.
pub trait Zon: Clone + fmt::Debug + Into<Schema> + Send + Sync {
    /// Shared configuration of this node
    fn base(&self) -> &Base;

    /// Mutable access used by the chaining helpers on a fresh copy
    fn base_mut(&mut self) -> &mut Base;

    /// Short name of the variant (`"string"`, `"record"`, ...)
    fn type_name(&self) -> &'static str;

    /// Structural check plus this node's own constraints
    ///
    /// Returns the checked value (built from child outputs for collections)
    /// when nothing was recorded by this node or its children, `None`
    /// otherwise.
    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value>;

    /// Full pipeline for this node: check, refinements, transformers
    fn run(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        run_pipeline(self, value, ctx)
    }

    /// Validate `value` with the default configuration
    ///
    /// # Errors
    ///
    /// Returns a [`ZonError`] with every issue found in the input.
    fn validate(&self, value: &Value) -> Result<Value, ZonError> {
        self.validate_with(value, &ValidationConfig::default())
    }

    /// Validate `value` with an explicit run configuration
    ///
    /// # Errors
    ///
    /// Returns a [`ZonError`] with every issue found in the input.
    fn validate_with(&self, value: &Value, config: &ValidationConfig) -> Result<Value, ZonError> {
        debug!(schema = self.type_name(), "Starting validation run");
        let mut ctx = ValidationContext::new(*config);
        let output = self.run(value, &mut ctx);
        let result = ctx.finish(output);
        match &result {
            Ok(_) => debug!(schema = self.type_name(), "Validation succeeded"),
            Err(e) => debug!(
                schema = self.type_name(),
                issues = e.len(),
                "Validation failed"
            ),
        }
        result
    }

    /// Validate without failing: the outcome carries either value or error
    fn safe_validate(&self, value: &Value) -> SafeValidation {
        self.validate(value).into()
    }

    /// [`Zon::safe_validate`] with an explicit run configuration
    fn safe_validate_with(&self, value: &Value, config: &ValidationConfig) -> SafeValidation {
        self.validate_with(value, config).into()
    }

    /// Require `predicate` to hold once the built-in checks pass
    #[must_use]
    fn refine(&self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.refine_with_message(predicate, IssueKind::Custom.default_message())
    }

    /// [`Zon::refine`] with a custom failure message
    #[must_use]
    fn refine_with_message(
        &self,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        let mut next = self.clone();
        next.base_mut().refinements.push(Refinement {
            predicate: Arc::new(predicate),
            message: message.into(),
        });
        next
    }

    /// Append a transformer applied to the validated value
    #[must_use]
    fn transform(&self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        let mut next = self.clone();
        next.base_mut().push_transformer(Transformer::new("custom", f));
        next
    }

    /// Stop this node at its first issue
    #[must_use]
    fn fail_fast(&self) -> Self {
        let mut next = self.clone();
        next.base_mut().fail_fast = true;
        next
    }

    /// Also accept the absent value
    #[must_use]
    fn optional(&self) -> ZonOptional {
        ZonOptional::new(self.clone())
    }

    /// A list whose elements must satisfy this schema
    #[must_use]
    fn list(&self) -> ZonList {
        ZonList::new(self.clone())
    }

    /// Require both this schema and `other`
    #[must_use]
    fn and_also(&self, other: impl Into<Schema>) -> ZonIntersection {
        ZonIntersection::new(vec![self.clone().into(), other.into()])
    }

    /// Accept either this schema or `other`
    #[must_use]
    fn or(&self, other: impl Into<Schema>) -> ZonUnion {
        ZonUnion::new(vec![self.clone().into(), other.into()])
    }
}

/// Check, then refinements in order (stopping at the first failure), then transformers
pub(crate) fn run_pipeline<Z: Zon>(
    schema: &Z,
    value: &Value,
    ctx: &mut ValidationContext,
) -> Option<Value> {
    let mark = ctx.issue_count();
    let checked = schema.check(value, ctx)?;
    if ctx.dirty_since(mark) {
        return None;
    }

    let base = schema.base();
    if let Some(failed) = base.refinements.iter().find(|r| !r.holds(&checked)) {
        ctx.add_issue(IssueKind::Custom, failed.message.clone());
        return None;
    }

    Some(
        base.transformers
            .iter()
            .fold(checked, |value, transformer| transformer.apply(value)),
    )
}

/// Any schema, erased for composition.
#[derive(Debug, Clone)]
pub enum Schema {
    String(ZonString),
    Number(ZonNumber),
    Boolean(ZonBoolean),
    Literal(ZonLiteral),
    Enum(ZonEnum),
    Never(ZonNever),
    Anything(ZonAnything),
    List(ZonList),
    Tuple(ZonTuple),
    Record(ZonRecord),
    Union(ZonUnion),
    Intersection(ZonIntersection),
    Optional(ZonOptional),
}

macro_rules! dispatch {
    ($schema:expr, $inner:ident => $body:expr) => {
        match $schema {
            Schema::String($inner) => $body,
            Schema::Number($inner) => $body,
            Schema::Boolean($inner) => $body,
            Schema::Literal($inner) => $body,
            Schema::Enum($inner) => $body,
            Schema::Never($inner) => $body,
            Schema::Anything($inner) => $body,
            Schema::List($inner) => $body,
            Schema::Tuple($inner) => $body,
            Schema::Record($inner) => $body,
            Schema::Union($inner) => $body,
            Schema::Intersection($inner) => $body,
            Schema::Optional($inner) => $body,
        }
    };
}

impl Zon for Schema {
    fn base(&self) -> &Base {
        dispatch!(self, inner => inner.base())
    }

    fn base_mut(&mut self) -> &mut Base {
        dispatch!(self, inner => inner.base_mut())
    }

    fn type_name(&self) -> &'static str {
        dispatch!(self, inner => inner.type_name())
    }

    fn check(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        dispatch!(self, inner => inner.check(value, ctx))
    }

    fn run(&self, value: &Value, ctx: &mut ValidationContext) -> Option<Value> {
        dispatch!(self, inner => inner.run(value, ctx))
    }
}

impl Schema {
    /// Whether this schema is an optional wrapper
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Schema::Optional(_))
    }

    /// Borrow the record variant
    #[must_use]
    pub fn as_record(&self) -> Option<&ZonRecord> {
        match self {
            Schema::Record(record) => Some(record),
            _ => None,
        }
    }
}

macro_rules! impl_into_schema {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Schema {
                fn from(schema: $ty) -> Self {
                    Schema::$variant(schema)
                }
            }
        )*
    };
}

impl_into_schema! {
    String => ZonString,
    Number => ZonNumber,
    Boolean => ZonBoolean,
    Literal => ZonLiteral,
    Enum => ZonEnum,
    Never => ZonNever,
    Anything => ZonAnything,
    List => ZonList,
    Tuple => ZonTuple,
    Record => ZonRecord,
    Union => ZonUnion,
    Intersection => ZonIntersection,
    Optional => ZonOptional,
}
