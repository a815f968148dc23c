//! Canonical source-like rendering of values.
//!
//! The output is what `{:?}` prints for a [`Value`] and is the input format
//! of the pretty-printer: composites open with their type followed by `{`,
//! elements are separated by `, ` and record or map entries use `key: value`.

use std::fmt::Write;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::value::{FloatKind, IntKind, Value};

pub(crate) fn render(v: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, v);
    out
}

/// RFC 3339 when representable, `time`'s own format otherwise.
pub(crate) fn format_time(t: &OffsetDateTime) -> String {
    t.format(&Rfc3339).unwrap_or_else(|_| t.to_string())
}

fn write_value(out: &mut String, v: &Value) {
    // Writing into a String cannot fail.
    let _ = match v {
        Value::Null => write!(out, "None"),
        Value::Bool(b) => write!(out, "{}", b),
        Value::Int(n, IntKind::Char) => match u32::try_from(*n).ok().and_then(char::from_u32) {
            Some(c) => write!(out, "{:?}", c),
            None => write!(out, "{}", n),
        },
        Value::Int(n, _) => write!(out, "{}", n),
        Value::UInt(n, _) => write!(out, "{}", n),
        Value::Float(x, FloatKind::F32) => write!(out, "{:?}", *x as f32),
        Value::Float(x, FloatKind::F64) => write!(out, "{:?}", x),
        Value::String(s) => write!(out, "{:?}", s),
        Value::Bytes(b) => write!(out, "b\"{}\"", b.escape_ascii()),
        Value::Time(t) => write!(out, "time({:?})", format_time(t)),
        Value::Seq(items, _) => {
            out.push_str(&v.type_name());
            write_list(out, items.iter(), |out, item| write_value(out, item));
            Ok(())
        }
        Value::Map(entries) => {
            out.push_str(&v.type_name());
            write_list(out, entries.iter(), |out, (k, val)| {
                write_value(out, k);
                out.push_str(": ");
                write_value(out, val);
            });
            Ok(())
        }
        Value::Record(record) => {
            out.push_str(&record.type_name());
            if record.name().is_none() || !record.fields().is_empty() {
                write_list(out, record.fields().iter(), |out, (k, val)| {
                    out.push_str(k);
                    out.push_str(": ");
                    write_value(out, val);
                });
            }
            Ok(())
        }
        Value::Error(err) => write!(out, "{:?}", err),
        Value::Func(_) => write!(out, "fn()"),
        Value::Opaque(opaque) => write!(out, "{}", opaque.repr()),
    };
}

fn write_list<T>(out: &mut String, items: impl Iterator<Item = T>, mut each: impl FnMut(&mut String, T)) {
    out.push('{');
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        each(out, item);
    }
    out.push('}');
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ErrorValue, Record};
    use time::macros::datetime;

    #[test]
    fn scalars() {
        assert_eq!(render(&Value::Null), "None");
        assert_eq!(render(&Value::from(true)), "true");
        assert_eq!(render(&Value::from(-12)), "-12");
        assert_eq!(render(&Value::from(1.0)), "1.0");
        assert_eq!(render(&Value::from(0.1f32)), "0.1");
        assert_eq!(render(&Value::from('x')), "'x'");
        assert_eq!(render(&Value::from("a \"q\"")), r#""a \"q\"""#);
        assert_eq!(render(&Value::bytes(b"ab\n".to_vec())), r#"b"ab\n""#);
    }

    #[test]
    fn time_uses_rfc3339() {
        let t = datetime!(2024-03-01 12:30:00 UTC);
        assert_eq!(render(&Value::from(t)), r#"time("2024-03-01T12:30:00Z")"#);
    }

    #[test]
    fn composites() {
        assert_eq!(render(&Value::from(vec![1, 2])), "[i32]{1, 2}");
        assert_eq!(render(&Value::Seq(vec![], None)), "[any]{}");
        let map = Value::Map(vec![(Value::from("a"), Value::from(1u8))]);
        assert_eq!(render(&map), r#"map[string]u8{"a": 1}"#);
    }

    #[test]
    fn records() {
        let point = Record::new("Point").field("x", 1).field("y", 2);
        assert_eq!(render(&Value::from(point)), "Point{x: 1, y: 2}");
        assert_eq!(render(&Value::from(Record::new("Unit"))), "Unit");
        let anon = Record::anonymous().field("a", "s");
        assert_eq!(render(&Value::from(anon)), r#"struct { a string }{a: "s"}"#);
    }

    #[test]
    fn errors_and_functions() {
        let err = ErrorValue::msg("boom").with_type_name("IoError");
        assert_eq!(render(&Value::Error(err)), r#"IoError("boom")"#);
        assert_eq!(render(&Value::callable(|| {})), "fn()");
        assert_eq!(render(&Value::opaque(Some(3))), "Some(3)");
    }
}
