use regex::Regex;
use testpredicate_value::Value;

use crate::context::ContextValue;
use crate::error::PredicateError;
use crate::predicate::{Terminal, Transformation};

/// Passes if the subject is a string matching the regular expression `re`.
///
/// A pattern that does not compile makes every evaluation invalid.
pub fn matches(re: &str) -> Terminal {
    let compiled = Regex::new(re);
    Terminal::new(format!("{{}} =~ /{}/", re), move |v, _| {
        let Value::String(s) = v else {
            return Err(PredicateError::NotMatchable {
                type_name: v.type_name(),
            });
        };
        match &compiled {
            Ok(re) => Ok(re.is_match(s)),
            Err(err) => Err(err.clone().into()),
        }
    })
}

/// Replace the subject by its human-readable form.
pub fn to_string() -> Transformation {
    Transformation::new("{}.String()", |v, ctx| {
        let s = Value::String(v.to_string());
        ctx.push(ContextValue::new("string", s.clone()));
        Ok(s)
    })
}

fn convert_case(
    description: &str,
    label: &'static str,
    case: &'static str,
    convert: fn(&str) -> String,
) -> Transformation {
    Transformation::new(description, move |v, ctx| {
        let Value::String(s) = &v else {
            return Err(PredicateError::NotCaseConvertible {
                type_name: v.type_name(),
                case,
            });
        };
        let converted = Value::String(convert(s));
        ctx.push(ContextValue::new(label, converted.clone()));
        Ok(converted)
    })
}

pub fn to_lower() -> Transformation {
    convert_case("ToLower({})", "lower", "lowercase", str::to_lowercase)
}

pub fn to_upper() -> Transformation {
    convert_case("ToUpper({})", "upper", "uppercase", str::to_uppercase)
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
    use testpredicate_value::Record;

    #[test]
    fn regex_matching() {
        assert_eq!(check(matches(r"^\d+$"), "123"), Outcome::Passed);
        assert_eq!(check(matches(r"^\d+$"), "12a"), Outcome::Failed);
        assert_eq!(
            error_message(matches("a"), 1),
            Some("value of type 'i32' cannot be matched against a regexp".to_string())
        );
        let msg = error_message(matches("(a"), "a").unwrap_or_default();
        assert!(msg.starts_with("failed to compile regexp: "), "{}", msg);
    }

    #[test]
    fn to_string_uses_the_human_form() {
        assert_eq!(transform(to_string(), 123), Ok(Value::from("123")));
        assert_eq!(transform(to_string(), "abc"), Ok(Value::from("abc")));
        let r = Record::new("P").field("x", 1);
        assert_eq!(transform(to_string(), r), Ok(Value::from("P { x: 1 }")));
    }

    #[test]
    fn to_string_records_pretty_printed_string() {
        let (_, ctx) = chain(vec![to_string()], anything()).evaluate(Value::from(123));
        let s = entry(&ctx, "string");
        assert_eq!(s.map(|c| c.preformatted), Some(false));
        assert_eq!(s.map(|c| c.value.clone()), Some(Value::from("123")));
    }

    #[test]
    fn case_conversion() {
        assert_eq!(transform(to_lower(), "AbC"), Ok(Value::from("abc")));
        assert_eq!(transform(to_upper(), "AbC"), Ok(Value::from("ABC")));
        assert_eq!(
            transform(to_upper(), 1u8),
            Err("value of type 'u8' cannot be transformed to uppercase".to_string())
        );
        assert_eq!(
            transform(to_lower(), vec![1]),
            Err("value of type '[i32]' cannot be transformed to lowercase".to_string())
        );
    }

    proptest! {
        #[test]
        fn ascii_case_round_trip(s in "[a-z0-9 ]{0,40}") {
            let upper = transform(to_upper(), s.as_str()).map_err(TestCaseError::fail)?;
            let lower = transform(to_lower(), upper).map_err(TestCaseError::fail)?;
            prop_assert_eq!(lower, Value::from(s.as_str()));
        }
    }
}
