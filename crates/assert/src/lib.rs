//! Fluent predicate assertions for Rust tests.
//!
//! An assertion captures a subject, chains transformations, and ends with a
//! terminal that evaluates the chain immediately:
//!
//! ```
//! use testpredicate::prelude::*;
//!
//! let t = TestContext::new();
//! verify::that(&t, 123).to_string().length().eq(3);
//! verify::that(&t, vec![1, 2, 3]).all(subexpr::value().lt(10));
//! require::that(&t, "hello").has_prefix("he");
//! ```
//!
//! [`verify`] reports failures and lets the test continue; [`require`]
//! aborts it. Failures are rendered as aligned `name: value` reports naming
//! what was expected, the subject, and whatever the chain computed on the
//! way. Every assertion must reach a terminal: one that does not is
//! reported when the test ends.
//!
//! Assertions talk to the host harness through the [`Reporter`] trait.
//! [`TestContext`] adapts plain `#[test]` functions, [`bdd`] runs
//! `given`/`when`/`then` trees leaf by leaf, and [`RecordingReporter`]
//! records failures for testing extensions.

pub mod bdd;
pub mod builder;
pub mod chain;
#[cfg(feature = "logtest")]
pub mod logtest;
pub mod reporter;
pub mod require;
pub mod subexpr;
pub mod verify;

pub use builder::{Builder, Evaluation};
pub use chain::Chain;
pub use reporter::{RecordingReporter, Report, Reporter, TestContext};
pub use testpredicate_predicate::catalogue::{Capability, ErrorMatcher, ErrorTarget, TypeDescriptor};
pub use testpredicate_predicate::{ContextValue, Outcome, Predicate, PredicateError};
pub use testpredicate_value::{to_value, Kind, Record, Value};

pub mod prelude {
    //! Everything needed to write assertions.
    pub use crate::bdd;
    pub use crate::chain::Chain;
    pub use crate::reporter::{RecordingReporter, Reporter, TestContext};
    pub use crate::{require, subexpr, verify};
    pub use testpredicate_predicate::catalogue::{
        Capability, ErrorMatcher, ErrorTarget, TypeDescriptor,
    };
    pub use testpredicate_value::{Kind, Value};
}
