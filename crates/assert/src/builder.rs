//! Builders bound to a reporter and a subject.

use std::cell::Cell;
use std::panic::Location;
use std::rc::Rc;

use testpredicate_predicate::{
    format_context, Context, ContextValue, Outcome, Predicate, Terminal, Transformation,
};
use testpredicate_value::Value;
use tracing::warn;

use crate::chain::Chain;
use crate::reporter::Reporter;

/// A predicate chain under construction against a captured subject.
///
/// The terminal method evaluates the chain at once and reports a failure
/// to the reporter, aborting the test if the builder is fatal. A builder
/// dropped without a terminal is reported when the reporter runs its
/// cleanups.
pub struct Builder<'r> {
    reporter: &'r dyn Reporter,
    value: Value,
    fatal: bool,
    predicate: Predicate,
    location: &'static Location<'static>,
    context: Vec<ContextValue>,
    terminated: Rc<Cell<bool>>,
}

impl<'r> Builder<'r> {
    /// Capture `value` and register the completeness check with
    /// `reporter`. The callsite recorded is the caller's.
    #[track_caller]
    pub fn new(reporter: &'r dyn Reporter, value: Value, fatal: bool) -> Self {
        let location = Location::caller();
        let terminated = Rc::new(Cell::new(false));
        let flag = Rc::clone(&terminated);
        reporter.cleanup(Box::new(move |host: &dyn Reporter| {
            if !flag.get() {
                verify_completeness(host, location);
            }
        }));
        Builder {
            reporter,
            value,
            fatal,
            predicate: Predicate::new(),
            location,
            context: Vec::new(),
            terminated,
        }
    }

    /// Extra entries appended to the report when the chain fails.
    pub fn with_context(mut self, context: impl IntoIterator<Item = ContextValue>) -> Self {
        self.context.extend(context);
        self
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }
}

fn verify_completeness(host: &dyn Reporter, location: &Location<'_>) {
    warn!(
        target: "testpredicate",
        file = location.file(),
        line = location.line(),
        "predicate chain never terminated"
    );
    host.helper();
    host.error(&format!(
        "{}:{}:\npredicate chain does not evaluate anything",
        location.file(),
        location.line()
    ));
}

impl Chain for Builder<'_> {
    type Output = Evaluation;

    fn transform(mut self, transformation: Transformation) -> Self {
        self.predicate.register_transformation(transformation);
        self
    }

    fn terminate(mut self, terminal: Terminal) -> Evaluation {
        self.reporter.helper();
        self.predicate.register_predicate(terminal);
        self.terminated.set(true);

        let (outcome, mut context) = self.predicate.evaluate(self.value);
        if !outcome.is_success() {
            context.extend(self.context);
            let message = format!(
                "{}:{}:\n{}",
                self.location.file(),
                self.location.line(),
                format_context(&context)
            );
            warn!(
                target: "testpredicate",
                file = self.location.file(),
                line = self.location.line(),
                outcome = %outcome,
                fatal = self.fatal,
                "assertion failed"
            );
            if self.fatal {
                self.reporter.fatal(&message);
            }
            self.reporter.error(&message);
        }
        Evaluation { outcome, context }
    }
}

/// Result of a terminated builder.
#[derive(Debug)]
pub struct Evaluation {
    outcome: Outcome,
    context: Context,
}

impl Evaluation {
    pub fn passed(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The chain's context, followed on failure by the builder's extra
    /// entries.
    pub fn context(&self) -> &[ContextValue] {
        &self.context
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::RecordingReporter;

    fn strip_location(message: &str) -> &str {
        message.split_once(":\n").map_or(message, |(_, rest)| rest)
    }

    #[test]
    fn passing_chains_report_nothing() {
        let r = RecordingReporter::new();
        let e = Builder::new(&r, Value::from(123), false).to_string().length().eq(3);
        assert!(e.passed());
        r.finish();
        assert!(!r.is_failed());
    }

    #[test]
    fn failures_are_reported_with_the_callsite() {
        let r = RecordingReporter::new();
        let line = line!() + 1;
        let e = Builder::new(&r, Value::from(1), false).lt(0);
        assert_eq!(e.outcome(), Outcome::Failed);
        let messages = r.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with(&format!("{}:{}:\n", file!(), line)));
        assert_eq!(
            strip_location(&messages[0]),
            "expected: value < 0\nvalue:    1\n"
        );
        assert!(r.helper_calls() > 0);
    }

    #[test]
    fn extra_context_follows_the_chain_context() {
        let r = RecordingReporter::new();
        let e = Builder::new(&r, Value::from(2), false)
            .with_context([ContextValue::new("double", 4)])
            .eq(3);
        let names: Vec<&str> = e.context().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["expected", "value", "double"]);
        assert!(r.messages()[0].ends_with("double:   4\n"));
    }

    #[test]
    fn fatal_builders_abort() {
        let r = RecordingReporter::new();
        let mut after = false;
        let completed = r.run(|| {
            Builder::new(&r, Value::from(1), true).eq(2);
            after = true;
        });
        assert!(!completed);
        assert!(!after);
        assert!(r.reports()[0].fatal);
    }

    #[test]
    fn unterminated_builders_are_reported_at_cleanup() {
        let r = RecordingReporter::new();
        let line = line!() + 1;
        let b = Builder::new(&r, Value::from(1), false).length();
        drop(b);
        assert!(!r.is_failed());
        r.finish();
        assert_eq!(
            r.messages(),
            vec![format!(
                "{}:{}:\npredicate chain does not evaluate anything",
                file!(),
                line
            )]
        );
    }

    #[test]
    fn terminated_builders_pass_the_completeness_check() {
        let r = RecordingReporter::new();
        Builder::new(&r, Value::from(1), false).eq(1);
        r.finish();
        assert!(r.messages().is_empty());
    }
}
