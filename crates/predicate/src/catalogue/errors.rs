//! Predicates on error values and their `source()` chains.

use std::error::Error;
use std::fmt;

use regex::Regex;
use testpredicate_value::{short_type_name, ErrorValue, Value};

use crate::context::ContextValue;
use crate::error::PredicateError;
use crate::predicate::{Terminal, Transformation};

// ──────────────────────────────────────────────
// is_error
// ──────────────────────────────────────────────

/// What [`is_error`] expects of its subject.
#[derive(Debug, Clone)]
pub enum ErrorMatcher {
    /// The subject is null: no error occurred.
    None,
    /// The subject is, or wraps, this error.
    Error(ErrorValue),
    /// Any error.
    Any,
    /// An error whose message contains this text.
    Substring(String),
    /// An error whose message matches this pattern.
    Pattern(Regex),
    /// Built from a value that cannot describe an error; always invalid.
    Unsupported { type_name: String },
}

impl ErrorMatcher {
    pub fn error<E: Error + 'static>(err: E) -> Self {
        ErrorMatcher::Error(ErrorValue::new(err))
    }

    fn description(&self) -> String {
        match self {
            ErrorMatcher::None => "{} is no error".to_string(),
            ErrorMatcher::Error(e) => format!("{{}} is error '{}'", e),
            ErrorMatcher::Any | ErrorMatcher::Unsupported { .. } => "{} is an error".to_string(),
            ErrorMatcher::Substring(s) => format!("{{}} is error containing '{}'", s),
            ErrorMatcher::Pattern(re) => format!("{{}} is error matching /{}/", re),
        }
    }
}

/// An empty string matches any error.
impl From<&str> for ErrorMatcher {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            ErrorMatcher::Any
        } else {
            ErrorMatcher::Substring(s.to_string())
        }
    }
}

impl From<String> for ErrorMatcher {
    fn from(s: String) -> Self {
        ErrorMatcher::from(s.as_str())
    }
}

impl From<Regex> for ErrorMatcher {
    fn from(re: Regex) -> Self {
        ErrorMatcher::Pattern(re)
    }
}

impl From<ErrorValue> for ErrorMatcher {
    fn from(e: ErrorValue) -> Self {
        ErrorMatcher::Error(e)
    }
}

/// Null, errors, strings and opaque regexes describe an expectation; any
/// other value gives an [`ErrorMatcher::Unsupported`].
impl From<Value> for ErrorMatcher {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => ErrorMatcher::None,
            Value::Error(e) => ErrorMatcher::Error(e),
            Value::String(s) => ErrorMatcher::from(s),
            Value::Opaque(o) => match o.downcast_ref::<Regex>() {
                Some(re) => ErrorMatcher::Pattern(re.clone()),
                None => ErrorMatcher::Unsupported {
                    type_name: o.tag().to_string(),
                },
            },
            other => ErrorMatcher::Unsupported {
                type_name: other.type_name(),
            },
        }
    }
}

/// Passes if the subject, an error or null, satisfies `expected`.
///
/// The message of an error subject is recorded as `message`.
pub fn is_error(expected: impl Into<ErrorMatcher>) -> Terminal {
    let expected = expected.into();
    Terminal::new(expected.description(), move |v, ctx| {
        if let ErrorMatcher::Unsupported { type_name } = &expected {
            return Err(PredicateError::InvalidIsErrorArgument {
                type_name: type_name.clone(),
            });
        }
        let subject = match v {
            Value::Null => None,
            Value::Error(e) => Some(e),
            other => {
                return Err(PredicateError::NotError {
                    type_name: other.type_name(),
                })
            }
        };
        if let Some(e) = subject {
            ctx.push(ContextValue::new("message", e.message()));
        }

        Ok(match (&expected, subject) {
            (ErrorMatcher::None, subject) => subject.is_none(),
            (_, None) => false,
            (ErrorMatcher::Error(want), Some(e)) => e.is(want),
            (ErrorMatcher::Substring(s), Some(e)) => e.message().contains(s.as_str()),
            (ErrorMatcher::Pattern(re), Some(e)) => re.is_match(e.message()),
            (ErrorMatcher::Any | ErrorMatcher::Unsupported { .. }, Some(_)) => true,
        })
    })
}

// ──────────────────────────────────────────────
// as_error
// ──────────────────────────────────────────────

/// Error type searched for by [`as_error`].
#[derive(Clone)]
pub struct ErrorTarget {
    name: String,
    downcast: Option<fn(&ErrorValue) -> bool>,
}

impl ErrorTarget {
    /// Links that downcast to `E`, or that carry its short type name.
    pub fn of<E: Error + 'static>() -> Self {
        let downcast: fn(&ErrorValue) -> bool = |link| link.downcast_ref::<E>().is_some();
        ErrorTarget {
            name: short_type_name::<E>(),
            downcast: Some(downcast),
        }
    }

    /// Links whose type name is `name`.
    pub fn named(name: impl Into<String>) -> Self {
        ErrorTarget {
            name: name.into(),
            downcast: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, link: &ErrorValue) -> bool {
        self.downcast.is_some_and(|f| f(link)) || link.type_name() == self.name
    }
}

impl fmt::Debug for ErrorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorTarget").field(&self.name).finish()
    }
}

/// Continue with the first error of the subject's chain that matches
/// `target`.
pub fn as_error(target: ErrorTarget) -> Transformation {
    Transformation::new(format!("{{}}.As({})", target.name), move |v, ctx| {
        if target.name.is_empty() {
            return Err(PredicateError::EmptyErrorTarget);
        }
        let Value::Error(err) = &v else {
            return Err(PredicateError::NotError {
                type_name: v.type_name(),
            });
        };
        match err.chain().find(|link| target.matches(link)) {
            Some(link) => {
                let found = Value::Error(link.clone());
                ctx.push(ContextValue::new("target", found.clone()));
                ctx.push(ContextValue::new("message", err.message()));
                Ok(found)
            }
            None => {
                ctx.push(ContextValue::new("message", err.message()));
                Err(PredicateError::NotErrorOf {
                    type_name: v.type_name(),
                    target: target.name.clone(),
                })
            }
        }
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
