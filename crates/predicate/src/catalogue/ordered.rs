use std::cmp::Ordering;

use testpredicate_prettyprint::format_value;
use testpredicate_value::{compare_ordered, max_absolute_difference, Value};

use crate::context::ContextValue;
use crate::predicate::Terminal;

fn ordered(op: &str, rhs: Value, accept: fn(Ordering) -> bool) -> Terminal {
    Terminal::new(
        format!("{{}} {} {}", op, format_value(&rhs)),
        move |v, _| Ok(accept(compare_ordered(v, &rhs)?)),
    )
}

/// Passes if the subject orders strictly before `rhs`.
pub fn is_less_than(rhs: impl Into<Value>) -> Terminal {
    ordered("<", rhs.into(), Ordering::is_lt)
}

pub fn is_less_or_equal_to(rhs: impl Into<Value>) -> Terminal {
    ordered("<=", rhs.into(), Ordering::is_le)
}

pub fn is_greater_than(rhs: impl Into<Value>) -> Terminal {
    ordered(">", rhs.into(), Ordering::is_gt)
}

pub fn is_greater_or_equal_to(rhs: impl Into<Value>) -> Terminal {
    ordered(">=", rhs.into(), Ordering::is_ge)
}

/// Passes if no number of the subject is further than `tolerance` from the
/// matching number of `rhs`. Works on scalars and on equal-length lists.
pub fn is_close_to(rhs: impl Into<Value>, tolerance: f64) -> Terminal {
    let rhs = rhs.into();
    Terminal::new(
        format!("{{}} ≈ {} ± {}", format_value(&rhs), tolerance),
        move |v, ctx| {
            let delta = max_absolute_difference(v, &rhs)?;
            ctx.push(ContextValue::new("difference", delta));
            Ok(delta <= tolerance)
        },
    )
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
