//! The fluent method set shared by bound builders and sub-expressions.

use testpredicate_predicate::catalogue::{self, ErrorMatcher, ErrorTarget, TypeDescriptor};
use testpredicate_predicate::{Context, Predicate, PredicateError, Terminal, Transformation};
use testpredicate_value::Value;

/// Fluent predicate construction.
///
/// Transformation methods return the chain for further calls; terminal
/// methods close it and return [`Chain::Output`]: an evaluation for a
/// builder bound to a value, the finished [`Predicate`] for a
/// sub-expression.
pub trait Chain: Sized {
    type Output;

    /// Append a transformation.
    fn transform(self, transformation: Transformation) -> Self;

    /// Install the terminal and close the chain.
    fn terminate(self, terminal: Terminal) -> Self::Output;

    // ──────────────────────────────────────────────
    // Transformations
    // ──────────────────────────────────────────────

    fn to_string(self) -> Self {
        self.transform(catalogue::to_string())
    }

    fn to_lower(self) -> Self {
        self.transform(catalogue::to_lower())
    }

    fn to_upper(self) -> Self {
        self.transform(catalogue::to_upper())
    }

    fn length(self) -> Self {
        self.transform(catalogue::length())
    }

    fn capacity(self) -> Self {
        self.transform(catalogue::capacity())
    }

    fn map_keys(self) -> Self {
        self.transform(catalogue::map_keys())
    }

    fn map_values(self) -> Self {
        self.transform(catalogue::map_values())
    }

    /// Continue with the value at `keypath`, e.g. `"lines.sku"`.
    fn field(self, keypath: &str) -> Self {
        self.transform(catalogue::field(keypath))
    }

    /// Call the subject and continue with the value it panicked with.
    fn panics_and_recovered_value(self) -> Self {
        self.transform(catalogue::panics_and_recovered_value())
    }

    fn as_error(self, target: ErrorTarget) -> Self {
        self.transform(catalogue::as_error(target))
    }

    fn eval(
        self,
        description: impl Into<String>,
        f: impl Fn(Value, &mut Context) -> Result<Value, PredicateError> + 'static,
    ) -> Self {
        self.transform(catalogue::eval(description, f))
    }

    // ──────────────────────────────────────────────
    // Booleans, nil and equality
    // ──────────────────────────────────────────────

    fn is_true(self) -> Self::Output {
        self.terminate(catalogue::is_true())
    }

    fn is_false(self) -> Self::Output {
        self.terminate(catalogue::is_false())
    }

    fn is_nil(self) -> Self::Output {
        self.terminate(catalogue::is_nil())
    }

    fn is_not_nil(self) -> Self::Output {
        self.terminate(catalogue::is_not_nil())
    }

    fn is_equal_to(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_equal_to(rhs))
    }

    fn eq(self, rhs: impl Into<Value>) -> Self::Output {
        self.is_equal_to(rhs)
    }

    fn is_not_equal_to(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_not_equal_to(rhs))
    }

    fn ne(self, rhs: impl Into<Value>) -> Self::Output {
        self.is_not_equal_to(rhs)
    }

    // ──────────────────────────────────────────────
    // Ordering
    // ──────────────────────────────────────────────

    fn is_less_than(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_less_than(rhs))
    }

    fn lt(self, rhs: impl Into<Value>) -> Self::Output {
        self.is_less_than(rhs)
    }

    fn is_less_or_equal_to(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_less_or_equal_to(rhs))
    }

    fn le(self, rhs: impl Into<Value>) -> Self::Output {
        self.is_less_or_equal_to(rhs)
    }

    fn is_greater_than(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_greater_than(rhs))
    }

    fn gt(self, rhs: impl Into<Value>) -> Self::Output {
        self.is_greater_than(rhs)
    }

    fn is_greater_or_equal_to(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_greater_or_equal_to(rhs))
    }

    fn ge(self, rhs: impl Into<Value>) -> Self::Output {
        self.is_greater_or_equal_to(rhs)
    }

    fn is_close_to(self, rhs: impl Into<Value>, tolerance: f64) -> Self::Output {
        self.terminate(catalogue::is_close_to(rhs, tolerance))
    }

    // ──────────────────────────────────────────────
    // Sequences, strings and sets
    // ──────────────────────────────────────────────

    fn is_empty(self) -> Self::Output {
        self.terminate(catalogue::is_empty())
    }

    fn is_not_empty(self) -> Self::Output {
        self.terminate(catalogue::is_not_empty())
    }

    fn starts_with(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::starts_with(rhs))
    }

    fn has_prefix(self, rhs: impl Into<Value>) -> Self::Output {
        self.starts_with(rhs)
    }

    fn contains(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::contains(rhs))
    }

    fn ends_with(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::ends_with(rhs))
    }

    fn has_suffix(self, rhs: impl Into<Value>) -> Self::Output {
        self.ends_with(rhs)
    }

    fn matches(self, re: &str) -> Self::Output {
        self.terminate(catalogue::matches(re))
    }

    fn is_equal_set(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_equal_set(rhs))
    }

    fn is_disjoint_set_from(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_disjoint_set_from(rhs))
    }

    fn is_subset_of(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_subset_of(rhs))
    }

    fn is_superset_of(self, rhs: impl Into<Value>) -> Self::Output {
        self.terminate(catalogue::is_superset_of(rhs))
    }

    // ──────────────────────────────────────────────
    // Quantifiers
    // ──────────────────────────────────────────────

    fn all(self, p: Predicate) -> Self::Output {
        self.terminate(catalogue::all(p))
    }

    fn any(self, p: Predicate) -> Self::Output {
        self.terminate(catalogue::any(p))
    }

    fn all_keys(self, p: Predicate) -> Self::Output {
        self.terminate(catalogue::all_keys(p))
    }

    fn any_key(self, p: Predicate) -> Self::Output {
        self.terminate(catalogue::any_key(p))
    }

    fn all_values(self, p: Predicate) -> Self::Output {
        self.terminate(catalogue::all_values(p))
    }

    fn any_value(self, p: Predicate) -> Self::Output {
        self.terminate(catalogue::any_value(p))
    }

    // ──────────────────────────────────────────────
    // Panics, errors, types and extensions
    // ──────────────────────────────────────────────

    fn panics(self) -> Self::Output {
        self.terminate(catalogue::panics())
    }

    fn is_error(self, expected: impl Into<ErrorMatcher>) -> Self::Output {
        self.terminate(catalogue::is_error(expected))
    }

    fn is_a(self, target: impl Into<TypeDescriptor>) -> Self::Output {
        self.terminate(catalogue::is_a(target))
    }

    fn is(
        self,
        description: impl Into<String>,
        f: impl Fn(&Value, &mut Context) -> Result<bool, PredicateError> + 'static,
    ) -> Self::Output {
        self.terminate(catalogue::is(description, f))
    }

    fn passes(self, p: Predicate) -> Self::Output {
        self.terminate(catalogue::passes(p))
    }
}
