//! Set relations between two indexable collections, ignoring order and
//! repetitions.
//!
//! Set membership is strict: `1i32` and `1.0f64` are distinct members even
//! though they compare equal under `is_equal_to`.

use testpredicate_prettyprint::format_value;
use testpredicate_value::{Set, Value};

use crate::context::{Context, ContextValue};
use crate::error::PredicateError;
use crate::predicate::Terminal;

/// Listed members stop once the rendered text reaches this many bytes.
const MAX_LISTED_LEN: usize = 50;

/// Render set members for a failure report, eliding the tail of long sets.
pub fn format_set_values(set: &Set) -> String {
    let mut buf = String::new();
    for v in set.iter() {
        if buf.len() >= MAX_LISTED_LEN {
            buf.push_str(", ...");
            break;
        }
        if !buf.is_empty() {
            buf.push_str(", ");
        }
        buf.push_str(&format_value(v));
    }
    buf
}

fn set_relation(
    template: String,
    rhs: Value,
    relation: fn(&Set, &Set, &mut Context) -> bool,
) -> Terminal {
    Terminal::new(template, move |v, ctx| {
        let lhs = Set::from_value(v)?;
        let rhs = Set::from_value(&rhs)?;
        Ok(relation(&lhs, &rhs, ctx))
    })
}

fn listed(name: &str, set: &Set) -> ContextValue {
    ContextValue::preformatted(name, format_set_values(set))
}

/// Passes if both collections hold the same members.
pub fn is_equal_set(rhs: impl Into<Value>) -> Terminal {
    let rhs = rhs.into();
    let template = format!("set({{}}) == {}", format_value(&rhs));
    set_relation(template, rhs, |lhs, rhs, ctx| {
        let extra = lhs.minus(rhs);
        let missing = rhs.minus(lhs);
        let equal = extra.is_empty() && missing.is_empty();
        if !equal {
            ctx.push(listed("extra values", &extra));
            ctx.push(listed("missing values", &missing));
        }
        equal
    })
}

/// Passes if the collections share no member.
pub fn is_disjoint_set_from(rhs: impl Into<Value>) -> Terminal {
    let rhs = rhs.into();
    let template = format!("set({{}}) ∩ {} == ∅", format_value(&rhs));
    set_relation(template, rhs, |lhs, rhs, ctx| {
        let common = lhs.intersect(rhs);
        if !common.is_empty() {
            ctx.push(listed("common values", &common));
        }
        common.is_empty()
    })
}

/// Passes if every member of the subject is a member of `rhs`.
pub fn is_subset_of(rhs: impl Into<Value>) -> Terminal {
    let rhs = rhs.into();
    let template = format!("set({{}}) ⊂ {}", format_value(&rhs));
    set_relation(template, rhs, |lhs, rhs, ctx| {
        let extra = lhs.minus(rhs);
        if !extra.is_empty() {
            ctx.push(listed("extra values", &extra));
        }
        extra.is_empty()
    })
}

pub fn is_superset_of(rhs: impl Into<Value>) -> Terminal {
    let rhs = rhs.into();
    let template = format!("set({{}}) ⊃ {}", format_value(&rhs));
    set_relation(template, rhs, |lhs, rhs, ctx| {
        let missing = rhs.minus(lhs);
        if !missing.is_empty() {
            ctx.push(listed("missing values", &missing));
        }
        missing.is_empty()
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
