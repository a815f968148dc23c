//! Numeric coercion.
//!
//! Comparisons try to view both operands as `i64`, then `u64`, then `f64`.
//! A coercion only succeeds when it is exact, so a successful view never
//! changes the value being compared.

use crate::value::Value;

/// Largest integer magnitude that `f64` represents exactly.
const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

/// View an integer value as `i64`. Fails for non-integers and for unsigned
/// values above `i64::MAX`.
pub fn as_int(v: &Value) -> Option<i64> {
    match v {
        Value::Int(n, _) => Some(*n),
        Value::UInt(n, _) => i64::try_from(*n).ok(),
        _ => None,
    }
}

/// View an integer value as `u64`. Fails for non-integers and for negative
/// signed values.
pub fn as_uint(v: &Value) -> Option<u64> {
    match v {
        Value::Int(n, _) => u64::try_from(*n).ok(),
        Value::UInt(n, _) => Some(*n),
        _ => None,
    }
}

/// View a numeric value as `f64`. Integers of 64-bit kinds only convert
/// when their magnitude is at most 2^53.
pub fn as_float(v: &Value) -> Option<f64> {
    match v {
        Value::Float(x, _) => Some(*x),
        Value::Int(n, kind) => {
            if kind.fits_f64() || n.unsigned_abs() <= MAX_EXACT_FLOAT_INT {
                Some(*n as f64)
            } else {
                None
            }
        }
        Value::UInt(n, kind) => {
            if kind.fits_f64() || *n <= MAX_EXACT_FLOAT_INT {
                Some(*n as f64)
            } else {
                None
            }
        }
        _ => None,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn as_int_rejects_large_unsigned() {
        assert_eq!(as_int(&Value::from(u64::MAX)), None);
        assert_eq!(as_int(&Value::from(i64::MAX as u64)), Some(i64::MAX));
        assert_eq!(as_int(&Value::from(-3i8)), Some(-3));
        assert_eq!(as_int(&Value::from(1.0)), None);
        assert_eq!(as_int(&Value::from("1")), None);
    }

    #[test]
    fn as_uint_rejects_negative() {
        assert_eq!(as_uint(&Value::from(-1)), None);
        assert_eq!(as_uint(&Value::from(0)), Some(0));
        assert_eq!(as_uint(&Value::from(u64::MAX)), Some(u64::MAX));
    }

    #[test]
    fn as_float_limits_wide_integers() {
        assert_eq!(as_float(&Value::from(1i64 << 53)), Some((1u64 << 53) as f64));
        assert_eq!(as_float(&Value::from((1i64 << 53) + 1)), None);
        assert_eq!(as_float(&Value::from(-(1i64 << 53) - 1)), None);
        assert_eq!(as_float(&Value::from((1u64 << 53) + 1)), None);
        assert_eq!(as_float(&Value::from(i32::MAX)), Some(i32::MAX as f64));
        assert_eq!(as_float(&Value::from(u32::MAX)), Some(u32::MAX as f64));
        assert_eq!(as_float(&Value::from(0.5f32)), Some(0.5));
    }

    #[test]
    fn char_is_an_integer() {
        assert_eq!(as_int(&Value::from('a')), Some(97));
        assert_eq!(as_float(&Value::from('a')), Some(97.0));
    }

    proptest! {
        #[test]
        fn uint_int_round_trip(x in 0i64..=i64::MAX) {
            let u = as_uint(&Value::from(x)).unwrap();
            prop_assert_eq!(as_int(&Value::from(u)), Some(x));
        }

        #[test]
        fn float_view_is_exact(x in any::<i64>()) {
            if let Some(f) = as_float(&Value::from(x)) {
                prop_assert_eq!(f as i64, x);
            }
        }
    }
}
