//! Predicate chains for testpredicate.
//!
//! A [`Predicate`] is zero or more [`Transformation`]s followed by one
//! [`Terminal`]. Evaluating it against a [`Value`] yields an [`Outcome`]
//! and a [`Context`]: the labelled values collected along the way, which
//! [`format_context`] renders as a failure report.
//!
//! The [`catalogue`] module holds the concrete stages: equality and
//! ordering, sequences and sets, strings, maps, quantifiers, field
//! extraction, panics, errors and types.
//!
//! ```
//! use testpredicate_predicate::{catalogue, Outcome, Predicate};
//! use testpredicate_value::Value;
//!
//! let mut p = Predicate::new();
//! p.register_transformation(catalogue::length());
//! p.register_predicate(catalogue::is_equal_to(3));
//! assert_eq!(p.describe("x"), "length(x) == 3");
//!
//! let (outcome, _) = p.evaluate(Value::from("abc"));
//! assert_eq!(outcome, Outcome::Passed);
//! ```

pub mod catalogue;
pub mod context;
pub mod error;
pub mod outcome;
pub mod predicate;

pub use context::{format_context, Context, ContextValue};
pub use error::{ErrorKind, PredicateError};
pub use outcome::Outcome;
pub use predicate::{Predicate, PredicateFn, Terminal, TransformFn, Transformation, PLACEHOLDER};
pub use testpredicate_value::Value;
