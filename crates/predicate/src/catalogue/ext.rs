//! Extension points for predicates the catalogue does not cover.

use testpredicate_value::Value;

use crate::context::Context;
use crate::error::PredicateError;
use crate::outcome::Outcome;
use crate::predicate::{Predicate, Terminal, Transformation};

/// User-defined terminal. `description` is a template where `{}` stands
/// for the subject, as in `"{} is even"`.
pub fn is(
    description: impl Into<String>,
    f: impl Fn(&Value, &mut Context) -> Result<bool, PredicateError> + 'static,
) -> Terminal {
    Terminal::new(description, f)
}

/// User-defined transformation, described by a template such as
/// `"double({})"`.
pub fn eval(
    description: impl Into<String>,
    f: impl Fn(Value, &mut Context) -> Result<Value, PredicateError> + 'static,
) -> Transformation {
    Transformation::new(description, f)
}

/// Delegates to a nested predicate. The nested context is kept, minus the
/// `expected` and `value` entries the outer chain already carries.
pub fn passes(sub: Predicate) -> Terminal {
    Terminal::new(sub.describe("{}"), move |v, ctx| {
        let (outcome, inner) = sub.evaluate(v.clone());
        let mut error = None;
        for c in inner {
            match c.name.as_str() {
                "expected" | "value" => {}
                "error" if outcome == Outcome::Invalid => error = Some(c.value.to_string()),
                _ => ctx.push(c),
            }
        }
        match outcome {
            Outcome::Invalid => Err(PredicateError::custom(
                error.unwrap_or_else(|| "sub-predicate is invalid".to_string()),
            )),
            _ => Ok(outcome.is_success()),
        }
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::compare::is_equal_to;
    use crate::catalogue::sequence::length;
    use crate::catalogue::testing::{chain, check, entry, error_message, evaluate, transform};
    use crate::context::ContextValue;

    fn is_custom() -> Terminal {
        is("{} is custom", |v, _| Ok(v.is_null()))
    }

    #[test]
    fn custom_terminal() {
        assert_eq!(check(is_custom(), Value::Null), Outcome::Passed);
        assert_eq!(check(is_custom(), 123), Outcome::Failed);
        assert_eq!(is_custom().description, "{} is custom");
    }

    #[test]
    fn custom_terminal_can_attach_context() {
        let even = is("{} is even", |v, ctx| {
            let n = testpredicate_value::as_int(v)
                .ok_or_else(|| PredicateError::custom("not an integer"))?;
            ctx.push(ContextValue::new("half", n / 2));
            Ok(n % 2 == 0)
        });
        let (outcome, ctx) = evaluate(even, 7);
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(entry(&ctx, "half").map(|c| c.value.clone()), Some(Value::from(3i64)));
    }

    #[test]
    fn custom_transformation() {
        let t = eval("custom({})", |v, _| Ok(Value::from(v.to_string())));
        assert_eq!(transform(t, 123), Ok(Value::from("123")));
    }

    #[test]
    fn passes_delegates() {
        let p = || chain(Vec::new(), is_equal_to(3));
        assert_eq!(check(passes(p()), 3), Outcome::Passed);
        assert_eq!(check(passes(p()), 2), Outcome::Failed);
        assert_eq!(passes(p()).description, "{} == 3");
    }

    #[test]
    fn passes_keeps_the_nested_context() {
        let p = chain(vec![length()], is_equal_to(4));
        let (outcome, ctx) = evaluate(passes(p), "abc");
        assert_eq!(outcome, Outcome::Failed);
        let names: Vec<&str> = ctx.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["expected", "value", "length"]);
        assert_eq!(ctx[0].value.to_string(), "length(value) == 4");
    }

    #[test]
    fn invalid_nested_predicates_are_invalid() {
        let p = chain(Vec::new(), is_equal_to(123));
        assert_eq!(
            error_message(passes(p), "123"),
            Some("values of type 'string' and 'i32' are never equal".to_string())
        );
    }
}
