//! Recording of `tracing` events for assertions over emitted logs.
//!
//! ```
//! use testpredicate::logtest::Recorder;
//! use testpredicate::prelude::*;
//!
//! let logs = Recorder::capture(|| {
//!     tracing::info!(user = "ann", "logged in");
//! });
//! let t = RecordingReporter::new();
//! verify::that(&t, logs.messages()).eq(vec!["logged in"]);
//! verify::that(&t, logs.entries()).any(subexpr::value().field("fields.user").eq("ann"));
//! assert!(!t.is_failed());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use testpredicate_value::{Record, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: tracing::Level,
    pub target: String,
    pub message: String,
    /// Every field but `message`, rendered as text.
    pub fields: BTreeMap<String, String>,
}

/// Entries become `LogEntry` records with `level`, `target`, `message` and
/// `fields` members.
impl From<LogEntry> for Value {
    fn from(entry: LogEntry) -> Self {
        Value::from(
            Record::new("LogEntry")
                .field("level", entry.level.as_str())
                .field("target", entry.target)
                .field("message", entry.message)
                .field("fields", entry.fields),
        )
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, text: String) {
        if field.name() == "message" {
            self.message = text;
        } else {
            self.fields.insert(field.name().to_string(), text);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }
}

/// A [`Layer`] keeping every event it sees.
///
/// Clones share the same buffer, so a recorder can be installed in a
/// subscriber and still be queried afterwards.
#[derive(Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    /// Run `f` with a fresh recorder as the thread's default subscriber and
    /// return the recorder.
    pub fn capture(f: impl FnOnce()) -> Recorder {
        let recorder = Recorder::new();
        recorder.record(f);
        recorder
    }

    /// Run `f` with this recorder as the thread's default subscriber.
    pub fn record<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        self.entries.lock().push(LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info, warn, Level};

    #[test]
    fn records_messages_and_fields() {
        let logs = Recorder::capture(|| {
            info!(target: "orders", id = 7, customer = "ann", "order placed");
            warn!("stock low");
        });
        let entries = logs.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::INFO);
        assert_eq!(entries[0].target, "orders");
        assert_eq!(entries[0].message, "order placed");
        assert_eq!(entries[0].fields.get("id").map(String::as_str), Some("7"));
        assert_eq!(entries[0].fields.get("customer").map(String::as_str), Some("ann"));
        assert_eq!(logs.messages(), vec!["order placed", "stock low"]);
    }

    #[test]
    fn recording_is_scoped() {
        let logs = Recorder::new();
        debug!("before");
        let n = logs.record(|| {
            debug!("inside");
            1
        });
        debug!("after");
        assert_eq!(n, 1);
        assert_eq!(logs.messages(), vec!["inside"]);
        logs.clear();
        assert!(logs.is_empty());
    }

    #[test]
    fn entries_convert_to_records() {
        let logs = Recorder::capture(|| info!(user = "bob", "hello"));
        let v = Value::from(logs.entries().remove(0));
        assert_eq!(v.type_name(), "LogEntry");
        assert_eq!(testpredicate_value::field(&v, "message"), Value::from("hello"));
        assert_eq!(testpredicate_value::field(&v, "level"), Value::from("INFO"));
        assert_eq!(testpredicate_value::field(&v, "fields.user"), Value::from("bob"));
    }
}
