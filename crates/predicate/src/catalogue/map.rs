use testpredicate_value::Value;

use crate::context::ContextValue;
use crate::error::PredicateError;
use crate::predicate::Transformation;

/// Replace a map by the sequence of its keys, in entry order.
pub fn map_keys() -> Transformation {
    Transformation::new("{}.Keys()", |v, ctx| {
        let entries = match v {
            Value::Map(entries) => entries,
            other => {
                return Err(PredicateError::NoMapPart {
                    type_name: other.type_name(),
                    part: "keys",
                })
            }
        };
        let keys = Value::Seq(entries.into_iter().map(|(k, _)| k).collect(), None);
        ctx.push(ContextValue::new("keys", keys.clone()));
        Ok(keys)
    })
}

/// Replace a map by the sequence of its values, in entry order.
pub fn map_values() -> Transformation {
    Transformation::new("{}.Values()", |v, ctx| {
        let entries = match v {
            Value::Map(entries) => entries,
            other => {
                return Err(PredicateError::NoMapPart {
                    type_name: other.type_name(),
                    part: "values",
                })
            }
        };
        let values = Value::Seq(entries.into_iter().map(|(_, v)| v).collect(), None);
        ctx.push(ContextValue::new("values", values.clone()));
        Ok(values)
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::testing::transform;
    use std::collections::BTreeMap;

    fn sample() -> BTreeMap<&'static str, i32> {
        [("a", 1), ("b", 2)].into_iter().collect()
    }

    #[test]
    fn keys_and_values() {
        assert_eq!(transform(map_keys(), sample()), Ok(Value::from(vec!["a", "b"])));
        assert_eq!(transform(map_values(), sample()), Ok(Value::from(vec![1, 2])));
    }

    #[test]
    fn non_maps_are_rejected() {
        assert_eq!(
            transform(map_keys(), vec![1]),
            Err("value of type '[i32]' does not have keys".to_string())
        );
        assert_eq!(
            transform(map_values(), "x"),
            Err("value of type 'string' does not have values".to_string())
        );
    }
}
