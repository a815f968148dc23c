use testpredicate_prettyprint::format_value;
use testpredicate_value::{compare_unordered, Value};

use crate::error::PredicateError;
use crate::predicate::Terminal;

/// Passes if the subject is `true`.
pub fn is_true() -> Terminal {
    Terminal::new("{} is true", |v, _| match v {
        Value::Bool(b) => Ok(*b),
        _ => Err(PredicateError::NeverBool {
            type_name: v.type_name(),
            expected: true,
        }),
    })
}

/// Passes if the subject is `false`.
pub fn is_false() -> Terminal {
    Terminal::new("{} is false", |v, _| match v {
        Value::Bool(b) => Ok(!b),
        _ => Err(PredicateError::NeverBool {
            type_name: v.type_name(),
            expected: false,
        }),
    })
}

/// Passes if the subject is null. Kinds that have no null state are
/// rejected rather than failed.
pub fn is_nil() -> Terminal {
    Terminal::new("{} is nil", |v, _| {
        if !v.is_nullable() {
            return Err(PredicateError::NeverNil {
                type_name: v.type_name(),
            });
        }
        Ok(v.is_null())
    })
}

pub fn is_not_nil() -> Terminal {
    Terminal::new("{} is not nil", |v, _| {
        if !v.is_nullable() {
            return Err(PredicateError::CanNeverBeNil {
                type_name: v.type_name(),
            });
        }
        Ok(!v.is_null())
    })
}

/// Passes if the subject equals `rhs` under the lenient comparator, which
/// compares numbers by value across widths and sequences element-wise.
pub fn is_equal_to(rhs: impl Into<Value>) -> Terminal {
    let rhs = rhs.into();
    Terminal::new(format!("{{}} == {}", format_value(&rhs)), move |v, _| {
        Ok(compare_unordered(v, &rhs)?)
    })
}

/// Passes if the subject is comparable with `rhs` and differs from it.
pub fn is_not_equal_to(rhs: impl Into<Value>) -> Terminal {
    let rhs = rhs.into();
    Terminal::new(format!("{{}} != {}", format_value(&rhs)), move |v, _| {
        Ok(!compare_unordered(v, &rhs)?)
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
