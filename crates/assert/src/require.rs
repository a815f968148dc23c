//! Fatal assertions: a failing chain is reported and aborts the test.

use testpredicate_value::Value;

use crate::builder::Builder;
use crate::reporter::Reporter;

/// Extra context entry shown when an assertion fails.
pub use testpredicate_predicate::ContextValue as Context;

/// Start a chain on `value`. The test is aborted if the chain fails.
#[track_caller]
pub fn that<'r>(reporter: &'r dyn Reporter, value: impl Into<Value>) -> Builder<'r> {
    Builder::new(reporter, value.into(), true)
}

/// Like [`that`], with extra entries appended to the failure report.
#[track_caller]
pub fn that_with<'r>(
    reporter: &'r dyn Reporter,
    value: impl Into<Value>,
    context: impl IntoIterator<Item = Context>,
) -> Builder<'r> {
    Builder::new(reporter, value.into(), true).with_context(context)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
