//! The capability surface assertions need from the host test framework.
//!
//! A [`Reporter`] receives formatted failures, aborts the current test on
//! fatal ones, and runs cleanup callbacks when the test ends. [`TestContext`]
//! adapts the plain libtest harness; [`RecordingReporter`] records everything
//! for tests of the assertion layer itself.

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use tracing::{debug, warn};

/// Callback run when the enclosing test ends. It receives the reporter it
/// was registered with.
pub type Cleanup = Box<dyn FnOnce(&dyn Reporter)>;

pub trait Reporter {
    /// Mark the calling frame as a helper. Hosts without callsite
    /// attribution ignore it.
    fn helper(&self) {}

    /// Report a failure and let the test continue.
    fn error(&self, message: &str);

    /// Report a failure and abort the current test.
    fn fatal(&self, message: &str) -> !;

    /// Register a callback to run at test end. Callbacks run last-in
    /// first-out.
    fn cleanup(&self, f: Cleanup);
}

/// Unwind payload used to abort a test without going through the panic
/// hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abort;

/// Abort the current test by unwinding with an [`Abort`] payload.
pub fn abort() -> ! {
    resume_unwind(Box::new(Abort))
}

/// Pop and run `cleanups` until none are left, including the ones
/// registered by cleanups themselves.
fn drain_cleanups(cleanups: &RefCell<Vec<Cleanup>>, reporter: &dyn Reporter) {
    loop {
        let next = cleanups.borrow_mut().pop();
        match next {
            Some(f) => f(reporter),
            None => break,
        }
    }
}

// ──────────────────────────────────────────────
// libtest adapter
// ──────────────────────────────────────────────

/// Reporting context for ordinary `#[test]` functions.
///
/// Non-fatal failures accumulate and are raised as a single panic when the
/// context is dropped, after the cleanups ran. Fatal failures panic at once
/// with every failure reported so far.
///
/// ```should_panic
/// use testpredicate::prelude::*;
///
/// let t = TestContext::new();
/// verify::that(&t, 1).eq(2);
/// ```
#[derive(Default)]
pub struct TestContext {
    failures: RefCell<Vec<String>>,
    cleanups: RefCell<Vec<Cleanup>>,
}

impl TestContext {
    pub fn new() -> Self {
        TestContext::default()
    }

    pub fn failed(&self) -> bool {
        !self.failures.borrow().is_empty()
    }

    fn report(&self) -> String {
        self.failures.borrow().join("\n")
    }
}

impl Reporter for TestContext {
    fn error(&self, message: &str) {
        warn!(target: "testpredicate", "{}", message);
        self.failures.borrow_mut().push(message.to_string());
    }

    fn fatal(&self, message: &str) -> ! {
        self.error(message);
        panic!("\n{}", self.report());
    }

    fn cleanup(&self, f: Cleanup) {
        self.cleanups.borrow_mut().push(f);
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        drain_cleanups(&self.cleanups, &*self);
        if self.failed() && !std::thread::panicking() {
            panic!("\n{}", self.report());
        }
    }
}

// ──────────────────────────────────────────────
// Recording double
// ──────────────────────────────────────────────

/// One failure received by a [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub message: String,
    pub fatal: bool,
}

/// Reporter that records failures instead of failing the test.
///
/// `fatal` records the report and unwinds with [`Abort`]; wrap the code
/// under test in [`RecordingReporter::run`] to observe it. Cleanups only run
/// when [`RecordingReporter::finish`] is called.
#[derive(Default)]
pub struct RecordingReporter {
    reports: RefCell<Vec<Report>>,
    cleanups: RefCell<Vec<Cleanup>>,
    helpers: Cell<usize>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        RecordingReporter::default()
    }

    /// Run `f`, returning `false` if it was aborted by a fatal report.
    /// Other panics propagate.
    pub fn run(&self, f: impl FnOnce()) -> bool {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(()) => true,
            Err(payload) if payload.is::<Abort>() => {
                debug!(target: "testpredicate", "recorded test aborted");
                false
            }
            Err(payload) => resume_unwind(payload),
        }
    }

    /// Run the registered cleanups, as the host would at test end.
    pub fn finish(&self) {
        drain_cleanups(&self.cleanups, self);
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    /// Messages of every report, fatal or not.
    pub fn messages(&self) -> Vec<String> {
        self.reports
            .borrow()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn is_failed(&self) -> bool {
        !self.reports.borrow().is_empty()
    }

    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.borrow().len()
    }

    /// Number of `helper()` calls received.
    pub fn helper_calls(&self) -> usize {
        self.helpers.get()
    }
}

impl Reporter for RecordingReporter {
    fn helper(&self) {
        self.helpers.set(self.helpers.get() + 1);
    }

    fn error(&self, message: &str) {
        self.reports.borrow_mut().push(Report {
            message: message.to_string(),
            fatal: false,
        });
    }

    fn fatal(&self, message: &str) -> ! {
        self.reports.borrow_mut().push(Report {
            message: message.to_string(),
            fatal: true,
        });
        abort()
    }

    fn cleanup(&self, f: Cleanup) {
        self.cleanups.borrow_mut().push(f);
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn cleanups_run_last_in_first_out() {
        let r = RecordingReporter::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let order = Rc::clone(&order);
            r.cleanup(Box::new(move |_: &dyn Reporter| order.borrow_mut().push(i)));
        }
        assert_eq!(r.pending_cleanups(), 3);
        r.finish();
        assert_eq!(*order.borrow(), vec![2, 1, 0]);
        assert_eq!(r.pending_cleanups(), 0);
    }

    #[test]
    fn cleanups_can_report() {
        let r = RecordingReporter::new();
        r.cleanup(Box::new(|host: &dyn Reporter| host.error("late")));
        assert!(!r.is_failed());
        r.finish();
        assert_eq!(r.messages(), vec!["late".to_string()]);
    }

    #[test]
    fn fatal_reports_abort_the_run() {
        let r = RecordingReporter::new();
        let completed = r.run(|| {
            r.error("first");
            r.fatal("second");
        });
        assert!(!completed);
        assert_eq!(
            r.reports(),
            vec![
                Report { message: "first".into(), fatal: false },
                Report { message: "second".into(), fatal: true },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "unrelated")]
    fn other_panics_propagate() {
        RecordingReporter::new().run(|| panic!("unrelated"));
    }

    #[test]
    fn test_context_passes_without_failures() {
        let t = TestContext::new();
        t.cleanup(Box::new(|_: &dyn Reporter| {}));
        assert!(!t.failed());
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_context_raises_failures_on_drop() {
        let t = TestContext::new();
        t.error("boom");
    }

    #[test]
    #[should_panic(expected = "from cleanup")]
    fn test_context_raises_failures_reported_by_cleanups() {
        let t = TestContext::new();
        t.cleanup(Box::new(|host: &dyn Reporter| host.error("from cleanup")));
    }

    #[test]
    #[should_panic(expected = "a\nb")]
    fn test_context_fatal_includes_earlier_failures() {
        let t = TestContext::new();
        t.error("a");
        t.fatal("b");
    }
}
