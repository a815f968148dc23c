//! Non-fatal assertions: a failing chain is reported and the test goes on.

use testpredicate_value::Value;

use crate::builder::Builder;
use crate::reporter::Reporter;

/// Extra context entry shown when an assertion fails.
pub use testpredicate_predicate::ContextValue as Context;

/// Start a chain on `value`. The test continues if the chain fails.
#[track_caller]
pub fn that<'r>(reporter: &'r dyn Reporter, value: impl Into<Value>) -> Builder<'r> {
    Builder::new(reporter, value.into(), false)
}

/// Like [`that`], with extra entries appended to the failure report.
#[track_caller]
pub fn that_with<'r>(
    reporter: &'r dyn Reporter,
    value: impl Into<Value>,
    context: impl IntoIterator<Item = Context>,
) -> Builder<'r> {
    Builder::new(reporter, value.into(), false).with_context(context)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chain;
    use crate::reporter::RecordingReporter;

    #[test]
    fn failures_do_not_abort() {
        let r = RecordingReporter::new();
        let completed = r.run(|| {
            that(&r, 1).eq(2);
            that(&r, 2).eq(3);
        });
        assert!(completed);
        assert_eq!(r.messages().len(), 2);
        assert!(r.reports().iter().all(|report| !report.fatal));
    }

    #[test]
    fn callsite_is_the_caller() {
        let r = RecordingReporter::new();
        let line = line!() + 1;
        let b = that(&r, 1);
        assert_eq!(b.location().line(), line);
        assert_eq!(b.location().file(), file!());
        b.eq(1);
    }

    #[test]
    fn context_is_appended() {
        let r = RecordingReporter::new();
        let v = 3;
        that_with(&r, v, [Context::new("double", v * 2)]).eq(7);
        assert!(r.messages()[0].ends_with("double:   6\n"));
    }
}
