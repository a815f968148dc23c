//! Lenient ordered and unordered comparison.
//!
//! Both comparators walk the same ladder of strategies and stop at the
//! first one that applies to both operands:
//!
//! 1. both integers viewable as `i64`
//! 2. both integers viewable as `u64`
//! 3. both numbers exactly viewable as `f64`
//! 4. both strings, both byte buffers, both timestamps
//! 5. both sequences, compared element by element
//!
//! Anything else is either an error (ordered) or a strict structural
//! comparison of two values of the same type (unordered).

use std::cmp::Ordering;

use crate::error::ValueError;
use crate::numeric::{as_float, as_int, as_uint};
use crate::sequence::SeqView;
use crate::value::{Kind, Value};

// ──────────────────────────────────────────────
// Ordered comparison
// ──────────────────────────────────────────────

/// Order two values. Fails when no rung of the ladder applies or when a
/// float operand is NaN.
pub fn compare_ordered(lhs: &Value, rhs: &Value) -> Result<Ordering, ValueError> {
    if let (Some(a), Some(b)) = (as_int(lhs), as_int(rhs)) {
        return Ok(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (as_uint(lhs), as_uint(rhs)) {
        return Ok(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (as_float(lhs), as_float(rhs)) {
        return a.partial_cmp(&b).ok_or(ValueError::NotANumber);
    }
    match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => return Ok(a.cmp(b)),
        (Value::Bytes(a), Value::Bytes(b)) => return Ok(a.cmp(b)),
        (Value::Time(a), Value::Time(b)) => return Ok(a.cmp(b)),
        _ => {}
    }
    if let (Some(a), Some(b)) = (SeqView::of(lhs), SeqView::of(rhs)) {
        return compare_ordered_sequences(a, b);
    }

    let (lhs_type, rhs_type) = (lhs.type_name(), rhs.type_name());
    if lhs_type == rhs_type {
        Err(ValueError::NotOrderComparable {
            type_name: lhs_type,
        })
    } else {
        Err(ValueError::NotOrderComparablePair {
            lhs: lhs_type,
            rhs: rhs_type,
        })
    }
}

fn compare_ordered_sequences(a: SeqView<'_>, b: SeqView<'_>) -> Result<Ordering, ValueError> {
    for (index, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let result = compare_ordered(&x, &y).map_err(|err| ValueError::AtIndex {
            index,
            source: Box::new(err),
        })?;
        if result != Ordering::Equal {
            return Ok(result);
        }
    }
    Ok(a.len().cmp(&b.len()))
}

// ──────────────────────────────────────────────
// Unordered comparison
// ──────────────────────────────────────────────

/// Test two values for equality, with numeric coercion across kinds and
/// element-wise comparison of sequences.
pub fn compare_unordered(lhs: &Value, rhs: &Value) -> Result<bool, ValueError> {
    if let (Some(a), Some(b)) = (as_int(lhs), as_int(rhs)) {
        return Ok(a == b);
    }
    if let (Some(a), Some(b)) = (as_uint(lhs), as_uint(rhs)) {
        return Ok(a == b);
    }
    if let (Some(a), Some(b)) = (as_float(lhs), as_float(rhs)) {
        return Ok(a == b);
    }
    match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => return Ok(a == b),
        (Value::Bytes(a), Value::Bytes(b)) => return Ok(a == b),
        (Value::Time(a), Value::Time(b)) => return Ok(a == b),
        _ => {}
    }
    if let (Some(a), Some(b)) = (SeqView::of(lhs), SeqView::of(rhs)) {
        return compare_unordered_sequences(a, b);
    }

    if !same_type(lhs, rhs) {
        return Err(ValueError::NeverEqual {
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        });
    }
    Ok(deep_equal(lhs, rhs))
}

fn compare_unordered_sequences(a: SeqView<'_>, b: SeqView<'_>) -> Result<bool, ValueError> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (index, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let equal = compare_unordered(&x, &y).map_err(|err| ValueError::AtIndex {
            index,
            source: Box::new(err),
        })?;
        if !equal {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Maps are one type regardless of their content; everything else goes by
/// type name.
fn same_type(lhs: &Value, rhs: &Value) -> bool {
    lhs.kind() == rhs.kind() && (lhs.kind() == Kind::Map || lhs.type_name() == rhs.type_name())
}

/// Strict structural equality: same variant, same numeric kind, and
/// recursively equal content. Map entries match regardless of order.
pub fn deep_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a, ka), Value::Int(b, kb)) => ka == kb && a == b,
        (Value::UInt(a, ka), Value::UInt(b, kb)) => ka == kb && a == b,
        (Value::Float(a, ka), Value::Float(b, kb)) => ka == kb && a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bytes(a), Value::Bytes(b)) => a == b,
        (Value::Time(a), Value::Time(b)) => a == b,
        (Value::Seq(a, _), Value::Seq(b, _)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, v)| {
                    b.iter()
                        .any(|(k2, v2)| deep_equal(k, k2) && deep_equal(v, v2))
                })
        }
        (Value::Record(a), Value::Record(b)) => {
            a.name() == b.name()
                && a.fields().len() == b.fields().len()
                && a.fields()
                    .iter()
                    .zip(b.fields())
                    .all(|((ka, va), (kb, vb))| ka == kb && deep_equal(va, vb))
        }
        (Value::Error(a), Value::Error(b)) => a.same_as(b),
        (Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
        (Value::Opaque(a), Value::Opaque(b)) => a.tag() == b.tag() && a.repr() == b.repr(),
        _ => false,
    }
}

// ──────────────────────────────────────────────
// Max absolute difference
// ──────────────────────────────────────────────

/// Largest absolute difference between two numbers, or between the
/// elements of two lists of the same length.
pub fn max_absolute_difference(lhs: &Value, rhs: &Value) -> Result<f64, ValueError> {
    if let (Some(a), Some(b)) = (list_view(lhs), list_view(rhs)) {
        if a.len() != b.len() {
            return Err(ValueError::LengthMismatch {
                lhs: a.len(),
                rhs: b.len(),
            });
        }
        let mut max = 0.0;
        for (index, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            let d = max_absolute_difference(&x, &y).map_err(|err| {
                ValueError::DifferenceAtIndex {
                    index,
                    source: Box::new(err),
                }
            })?;
            if d > max {
                max = d;
            }
        }
        return Ok(max);
    }

    let a = as_float(lhs).ok_or_else(|| ValueError::NotFloat {
        type_name: lhs.type_name(),
    })?;
    let b = as_float(rhs).ok_or_else(|| ValueError::NotFloat {
        type_name: rhs.type_name(),
    })?;
    Ok((a - b).abs())
}

/// Lists for numeric purposes: sequences and byte buffers, not strings.
fn list_view(v: &Value) -> Option<SeqView<'_>> {
    match v {
        Value::String(_) => None,
        _ => SeqView::of(v),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
