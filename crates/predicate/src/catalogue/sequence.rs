use testpredicate_prettyprint::format_value;
use testpredicate_value::sequence::index_of_subsequence;
use testpredicate_value::{SeqView, Value};

use crate::context::ContextValue;
use crate::error::PredicateError;
use crate::predicate::{Terminal, Transformation};

// ──────────────────────────────────────────────
// Transformations
// ──────────────────────────────────────────────

/// Length of a string (in bytes), byte buffer, sequence or map.
pub fn length() -> Transformation {
    Transformation::new("length({})", |v, ctx| {
        let len = v.len().ok_or_else(|| PredicateError::NoProperty {
            type_name: v.type_name(),
            property: "length",
        })?;
        ctx.push(ContextValue::preformatted("length", len));
        Ok(Value::from(len))
    })
}

/// Allocated capacity of a sequence or byte buffer.
pub fn capacity() -> Transformation {
    Transformation::new("capacity({})", |v, ctx| {
        let cap = v.capacity().ok_or_else(|| PredicateError::NoProperty {
            type_name: v.type_name(),
            property: "capacity",
        })?;
        ctx.push(ContextValue::preformatted("capacity", cap));
        Ok(Value::from(cap))
    })
}

// ──────────────────────────────────────────────
// Emptiness
// ──────────────────────────────────────────────

fn emptiness(description: &str, want_empty: bool) -> Terminal {
    Terminal::new(description, move |v, ctx| {
        let len = v.len().ok_or_else(|| PredicateError::NoEmptiness {
            type_name: v.type_name(),
        })?;
        ctx.push(ContextValue::preformatted("length", len));
        Ok((len == 0) == want_empty)
    })
}

pub fn is_empty() -> Terminal {
    emptiness("{} is empty", true)
}

pub fn is_not_empty() -> Terminal {
    emptiness("{} is not empty", false)
}

// ──────────────────────────────────────────────
// Subsequences
// ──────────────────────────────────────────────

/// Shared shape of the subsequence terminals. Both operands must be
/// sequences; a subject shorter than `rhs` fails with an explanation.
fn subsequence(
    relation: &str,
    rhs: Value,
    found: fn(&SeqView<'_>, &SeqView<'_>) -> bool,
) -> Terminal {
    Terminal::new(
        format!("{{}} {} {}", relation, format_value(&rhs)),
        move |v, ctx| {
            let seq = SeqView::require(v)?;
            let sub = SeqView::require(&rhs)?;
            if seq.len() < sub.len() {
                ctx.push(ContextValue::error(PredicateError::TooShort {
                    len: seq.len(),
                    sub_len: sub.len(),
                }));
                return Ok(false);
            }
            Ok(found(&seq, &sub))
        },
    )
}

/// Passes if the subject begins with the elements of `rhs`. Elements
/// compare leniently, so `"aa"` starts with `[97]`.
pub fn starts_with(rhs: impl Into<Value>) -> Terminal {
    subsequence("starts with", rhs.into(), |seq, sub| {
        index_of_subsequence(&seq.slice(0..sub.len()), sub) == Some(0)
    })
}

/// Passes if the elements of `rhs` appear contiguously anywhere in the
/// subject.
pub fn contains(rhs: impl Into<Value>) -> Terminal {
    subsequence("contains", rhs.into(), |seq, sub| {
        index_of_subsequence(seq, sub).is_some()
    })
}

pub fn ends_with(rhs: impl Into<Value>) -> Terminal {
    subsequence("ends with", rhs.into(), |seq, sub| {
        let start = seq.len() - sub.len();
        index_of_subsequence(&seq.slice(start..seq.len()), sub) == Some(0)
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::testing::{anything, chain, check, entry, error_message, transform};
    use crate::outcome::Outcome;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn lengths() {
        assert_eq!(transform(length(), "héllo"), Ok(Value::from(6usize)));
        assert_eq!(transform(length(), vec![1, 2]), Ok(Value::from(2usize)));
        let map: BTreeMap<&str, i32> = [("a", 1)].into_iter().collect();
        assert_eq!(transform(length(), map), Ok(Value::from(1usize)));
        assert_eq!(
            transform(length(), 3),
            Err("value of type 'i32' does not have a length".to_string())
        );
    }

    #[test]
    fn length_is_recorded_in_context() {
        let (_, ctx) = chain(vec![length()], anything()).evaluate(Value::from("abc"));
        let len = entry(&ctx, "length").map(|c| (c.value.to_string(), c.preformatted));
        assert_eq!(len, Some(("3".to_string(), true)));
    }

    #[test]
    fn capacities() {
        assert_eq!(transform(capacity(), Vec::<i32>::with_capacity(8)), Ok(Value::from(8usize)));
        assert_eq!(
            transform(capacity(), "abc"),
            Err("value of type 'string' does not have a capacity".to_string())
        );
    }

    #[test]
    fn emptiness_checks() {
        assert_eq!(check(is_empty(), ""), Outcome::Passed);
        assert_eq!(check(is_empty(), vec![1]), Outcome::Failed);
        assert_eq!(check(is_not_empty(), vec![1]), Outcome::Passed);
        assert_eq!(
            error_message(is_empty(), 1.5),
            Some("value of type 'f64' cannot be tested for emptiness".to_string())
        );
    }

    #[test]
    fn prefixes_and_suffixes() {
        assert_eq!(check(starts_with("ab"), "abc"), Outcome::Passed);
        assert_eq!(check(starts_with("bc"), "abc"), Outcome::Failed);
        assert_eq!(check(ends_with("bc"), "abc"), Outcome::Passed);
        assert_eq!(check(ends_with(vec![1]), vec![1, 2]), Outcome::Failed);
        assert_eq!(check(starts_with(vec![97, 98]), "abc"), Outcome::Passed);
        assert_eq!(check(starts_with(""), "abc"), Outcome::Passed);
    }

    #[test]
    fn contains_finds_any_offset() {
        assert_eq!(check(contains("ab"), "abc"), Outcome::Passed);
        assert_eq!(check(contains("bc"), "abc"), Outcome::Passed);
        assert_eq!(check(contains(vec![2, 3]), vec![1, 2, 3, 4]), Outcome::Passed);
        assert_eq!(check(contains(vec![3, 2]), vec![1, 2, 3, 4]), Outcome::Failed);
    }

    #[test]
    fn short_subjects_fail_with_an_explanation() {
        assert_eq!(check(contains("abcd"), "abc"), Outcome::Failed);
        assert_eq!(
            error_message(contains("abcd"), "abc"),
            Some(
                "sequence of length 3 is too short to contain a subsequence of length 4"
                    .to_string()
            )
        );
    }

    #[test]
    fn non_sequences_are_invalid() {
        assert_eq!(
            error_message(contains("a"), 1),
            Some("value of type 'i32' is not a sequence".to_string())
        );
        assert_eq!(
            error_message(contains(1), "a"),
            Some("value of type 'i32' is not a sequence".to_string())
        );
    }

    proptest! {
        #[test]
        fn contains_matches_a_window_search(
            seq in prop::collection::vec(0i32..4, 0..12),
            sub in prop::collection::vec(0i32..4, 0..4),
        ) {
            let expected = sub.len() <= seq.len()
                && (sub.is_empty() || seq.windows(sub.len()).any(|w| w == sub.as_slice()));
            let outcome = check(contains(sub.clone()), seq.clone());
            prop_assert_eq!(outcome, Outcome::from_bool(expected));
        }
    }
}
