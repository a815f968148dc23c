//! Conversions from Rust values into [`Value`].

use std::collections::{BTreeMap, HashMap};
use std::error::Error;

use time::OffsetDateTime;

use crate::value::{
    element_type_name, Callable, ErrorValue, FloatKind, IntKind, Opaque, Record, UIntKind, Value,
};

macro_rules! from_signed {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(v as i64, IntKind::$kind)
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::UInt(v as u64, UIntKind::$kind)
                }
            }
        )*
    };
}

from_signed!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
from_unsigned!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Int(c as i64, IntKind::Char)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64, FloatKind::F32)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v, FloatKind::F64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<OffsetDateTime> for Value {
    fn from(t: OffsetDateTime) -> Self {
        Value::Time(t)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::Error(e)
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Value::Func(f)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl From<Box<dyn Error + 'static>> for Value {
    fn from(err: Box<dyn Error + 'static>) -> Self {
        Value::Error(ErrorValue::from_boxed(err))
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for Value {
    fn from(err: Box<dyn Error + Send + Sync + 'static>) -> Self {
        let err: Box<dyn Error + 'static> = err;
        Value::Error(ErrorValue::from_boxed(err))
    }
}

/// `Ok(v)` converts to `v`, `Err(e)` to an error value.
impl<T: Into<Value>, E: Error + 'static> From<Result<T, E>> for Value {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => v.into(),
            Err(e) => Value::Error(ErrorValue::new(e)),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Element type kept for empty sequences only; otherwise the elements
/// name it.
fn typed_seq<T>(items: Vec<Value>) -> Value {
    let element = if items.is_empty() {
        Some(element_type_name::<T>()).filter(|name| name != "any")
    } else {
        None
    };
    Value::Seq(items, element)
}

/// Keeps the capacity of the source vector.
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        let mut items = Vec::with_capacity(v.capacity());
        items.extend(v.into_iter().map(Into::into));
        typed_seq::<T>(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        typed_seq::<T>(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        typed_seq::<T>(v.iter().cloned().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(m: BTreeMap<K, V>) -> Self {
        Value::Map(m.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Entries are sorted by the canonical form of their keys so that the
/// result does not depend on hash order.
impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(m: HashMap<K, V, S>) -> Self {
        let mut entries: Vec<(String, Value, Value)> = m
            .into_iter()
            .map(|(k, v)| {
                let k: Value = k.into();
                (format!("{:?}", k), k, v.into())
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Map(entries.into_iter().map(|(_, k, v)| (k, v)).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i, IntKind::I64)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u, UIntKind::U64)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN), FloatKind::F64)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect(), None)
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Seq(iter.into_iter().collect(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_maps_none_to_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(3)), Value::from(3));
    }

    #[test]
    fn result_maps_err_to_error() {
        let ok: Result<i32, std::num::ParseIntError> = "12".parse();
        assert_eq!(Value::from(ok), Value::from(12));
        let err: Result<i32, std::num::ParseIntError> = "x".parse();
        let v = Value::from(err);
        assert_eq!(v.type_name(), "ParseIntError");
    }

    #[test]
    fn hash_map_is_sorted_by_key() {
        let mut m = HashMap::new();
        m.insert("b", 2);
        m.insert("a", 1);
        m.insert("c", 3);
        match Value::from(m) {
            Value::Map(entries) => {
                let keys: Vec<String> = entries.iter().map(|(k, _)| k.to_string()).collect();
                assert_eq!(keys, vec!["a", "b", "c"]);
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn json_values_convert() {
        let v = Value::from(json!({"a": [1, -2, 2.5], "b": null, "c": "x"}));
        assert_eq!(v.type_name(), "map[string]any");
        assert_eq!(crate::field(&v, "a"), Value::from(vec![
            Value::Int(1, IntKind::I64),
            Value::Int(-2, IntKind::I64),
            Value::Float(2.5, FloatKind::F64),
        ]));
        assert!(crate::field(&v, "b").is_null());
    }
}
