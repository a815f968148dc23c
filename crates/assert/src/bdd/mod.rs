//! BDD-style bifurcated tests.
//!
//! Every leaf of a `given`/`when`/`then` tree runs exactly once, and each
//! run replays the enclosing bodies from the top. State declared inside a
//! body is therefore fresh for every leaf, while state declared outside
//! the root is shared by all of them.
//!
//! ```
//! use std::cell::Cell;
//! use testpredicate::prelude::*;
//!
//! let host = RecordingReporter::new();
//! let passes = Cell::new(0);
//! bdd::given(&host, "a counter", |t| {
//!     passes.set(passes.get() + 1);
//!     let count = Cell::new(0);
//!     t.when("incremented", |t| {
//!         count.set(count.get() + 1);
//!         t.then("it is one", |t| {
//!             verify::that(t, count.get()).eq(1);
//!         });
//!         t.then("it is not two", |t| {
//!             verify::that(t, count.get()).ne(2);
//!         });
//!     });
//! });
//! assert_eq!(passes.get(), 2);
//! assert!(!host.is_failed());
//! ```

mod tracker;

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use tracing::trace;

use crate::reporter::{abort, Abort, Cleanup, Reporter};

pub use tracker::Tracker;

/// Reporting context of one node of a bifurcated test.
///
/// Failures go to the host prefixed with the path of the node. A fatal
/// failure ends the current leaf only; the other leaves still run.
pub struct T<'a> {
    host: &'a dyn Reporter,
    path: String,
    tracker: Tracker,
    failed: Cell<bool>,
    cleanups: RefCell<Vec<Cleanup>>,
}

/// Run `body` once per leaf of the tree it defines.
///
/// Returns `true` if no node reported a failure.
pub fn wrap(host: &dyn Reporter, name: &str, body: impl Fn(&T<'_>)) -> bool {
    let mut tracker = Tracker::new();
    let mut success = true;
    let mut pass = 0;
    while tracker.next() {
        if tracker.active() {
            pass += 1;
            trace!(target: "testpredicate", scenario = name, pass, "bifurcated pass");
            success &= run_node(host, name.to_string(), tracker.sub_tracker(), &body);
        }
    }
    success
}

/// [`wrap`] with a `Given ` prefix.
pub fn given(host: &dyn Reporter, name: &str, body: impl Fn(&T<'_>)) -> bool {
    wrap(host, &format!("Given {}", name), body)
}

fn run_node(host: &dyn Reporter, path: String, tracker: Tracker, body: &dyn Fn(&T<'_>)) -> bool {
    let t = T {
        host,
        path,
        tracker,
        failed: Cell::new(false),
        cleanups: RefCell::new(Vec::new()),
    };
    let result = catch_unwind(AssertUnwindSafe(|| body(&t)));
    t.run_cleanups();
    match result {
        Ok(()) => !t.failed.get(),
        Err(payload) if payload.is::<Abort>() => {
            trace!(target: "testpredicate", path = %t.path, "leaf aborted");
            false
        }
        Err(payload) => resume_unwind(payload),
    }
}

impl<'a> T<'a> {
    /// Open a branch. Its body runs only on the pass that selects it.
    ///
    /// Returns `false` if the branch ran and reported a failure.
    pub fn run(&self, name: &str, body: impl Fn(&T<'_>)) -> bool {
        if !self.tracker.active() {
            return true;
        }
        let path = format!("{}/{}", self.path, name);
        trace!(target: "testpredicate", path = %path, "running branch");
        let ok = run_node(self.host, path, self.tracker.sub_tracker(), &body);
        if !ok {
            self.failed.set(true);
        }
        ok
    }

    /// [`T::run`] with a `when ` prefix.
    pub fn when(&self, name: &str, body: impl Fn(&T<'_>)) -> bool {
        self.run(&format!("when {}", name), body)
    }

    /// [`T::run`] with a `then ` prefix.
    pub fn then(&self, name: &str, body: impl Fn(&T<'_>)) -> bool {
        self.run(&format!("then {}", name), body)
    }

    /// Slash-separated names from the root to this node.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn failed(&self) -> bool {
        self.failed.get()
    }

    fn run_cleanups(&self) {
        loop {
            let next = self.cleanups.borrow_mut().pop();
            match next {
                Some(f) => f(self),
                None => break,
            }
        }
    }
}

impl Reporter for T<'_> {
    fn helper(&self) {
        self.host.helper();
    }

    fn error(&self, message: &str) {
        self.failed.set(true);
        self.host.error(&format!("{}\n{}", self.path, message));
    }

    fn fatal(&self, message: &str) -> ! {
        self.error(message);
        abort()
    }

    fn cleanup(&self, f: Cleanup) {
        self.cleanups.borrow_mut().push(f);
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
