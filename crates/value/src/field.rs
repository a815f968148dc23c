//! Keypath-based field extraction.

use crate::value::Value;

/// Navigate `value` along a dot-separated `keypath`.
///
/// Each key names a record field, a record method (whose first result is
/// used), or a string map key. Sequences are traversed element by element,
/// so the result nests one sequence level per sequence crossed along the
/// path. Any step that cannot be resolved yields `Value::Null`.
///
/// For maps the whole key is looked up first; when it is missing, longer
/// dotted prefixes of the remaining path are tried as a single key and the
/// longest one present wins, so `{"a.b": 1}` answers `a.b`.
pub fn field(value: &Value, keypath: &str) -> Value {
    let keys: Vec<&str> = keypath.split('.').collect();
    extract(value, &keys)
}

fn extract(value: &Value, keys: &[&str]) -> Value {
    let Some((key, rest)) = keys.split_first() else {
        return value.clone();
    };
    match value {
        Value::Null => Value::Null,
        Value::Seq(items, _) => items.iter().map(|item| extract(item, keys)).collect(),
        Value::Record(record) => {
            let next = match record.get(key) {
                Some(v) => v.clone(),
                None => record.call(key).unwrap_or(Value::Null),
            };
            extract(&next, rest)
        }
        Value::Map(entries) => match lookup_map(entries, keys) {
            Some((next, consumed)) => extract(next, &keys[consumed..]),
            None => Value::Null,
        },
        _ => Value::Null,
    }
}

/// Resolve the leading key(s) of `keys` in a string-keyed map. Returns the
/// entry and the number of keys it consumed.
fn lookup_map<'a>(entries: &'a [(Value, Value)], keys: &[&str]) -> Option<(&'a Value, usize)> {
    let get = |name: &str| {
        entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(name))
            .map(|(_, v)| v)
    };
    if let Some(v) = get(keys[0]) {
        return Some((v, 1));
    }
    (2..=keys.len())
        .rev()
        .find_map(|n| get(&keys[..n].join(".")).map(|v| (v, n)))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;

    fn map(entries: Vec<(&str, Value)>) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Value::from(k), v))
                .collect(),
        )
    }

    fn person(name: &str, age: i32) -> Value {
        let n = name.to_string();
        Value::from(
            Record::new("Person")
                .field("name", name)
                .field("age", age)
                .method("Upper", move || Value::from(n.to_uppercase())),
        )
    }

    #[test]
    fn record_fields_and_methods() {
        let p = person("ann", 31);
        assert_eq!(field(&p, "name"), Value::from("ann"));
        assert_eq!(field(&p, "age"), Value::from(31));
        assert_eq!(field(&p, "Upper"), Value::from("ANN"));
        assert!(field(&p, "missing").is_null());
    }

    #[test]
    fn nested_path() {
        let v = Value::from(Record::new("Team").field("lead", person("bob", 40)));
        assert_eq!(field(&v, "lead.name"), Value::from("bob"));
        assert!(field(&v, "lead.name.more").is_null());
    }

    #[test]
    fn sequences_are_broadcast() {
        let team = Value::from(vec![person("a", 1), person("b", 2)]);
        assert_eq!(field(&team, "age"), Value::from(vec![1, 2]));

        let nested = Value::from(vec![
            Value::from(Record::new("G").field("members", team.clone())),
            Value::from(Record::new("G").field("members", Value::from(vec![person("c", 3)]))),
        ]);
        assert_eq!(
            field(&nested, "members.age"),
            Value::from(vec![Value::from(vec![1, 2]), Value::from(vec![3])])
        );
    }

    #[test]
    fn unresolved_elements_become_null() {
        let v = Value::from(vec![person("a", 1), Value::from(3)]);
        assert_eq!(field(&v, "age"), Value::from(vec![Value::from(1), Value::Null]));
    }

    #[test]
    fn map_keys_prefer_plain_then_longest_dotted() {
        let v = map(vec![
            ("a", map(vec![("b", Value::from(1))])),
            ("x.y", Value::from(2)),
            ("x.y.z", Value::from(3)),
            ("p", Value::from(4)),
            ("p.q", Value::from(5)),
        ]);
        assert_eq!(field(&v, "a.b"), Value::from(1));
        assert_eq!(field(&v, "x.y"), Value::from(2));
        assert_eq!(field(&v, "x.y.z"), Value::from(3));
        assert!(field(&v, "p.q").is_null());
        assert!(field(&v, "nothing").is_null());
    }
}
