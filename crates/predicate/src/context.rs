//! Evaluation context: the labelled values a chain collects while it runs,
//! and their display as a failure report.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use testpredicate_prettyprint::{default_formatter, Formatter};
use testpredicate_value::Value;
use unicode_width::UnicodeWidthStr;

/// Labelled datum attached to an evaluation trace.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextValue {
    pub name: String,
    pub value: Value,
    /// Render `value` with its human form instead of the pretty-printer.
    pub preformatted: bool,
}

/// Context values in insertion order.
pub type Context = Vec<ContextValue>;

impl ContextValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        ContextValue {
            name: name.into(),
            value: value.into(),
            preformatted: false,
        }
    }

    pub fn preformatted(name: impl Into<String>, value: impl Into<Value>) -> Self {
        ContextValue {
            name: name.into(),
            value: value.into(),
            preformatted: true,
        }
    }

    /// The `error` entry recording why a chain was not applicable.
    pub fn error(message: impl std::fmt::Display) -> Self {
        ContextValue::preformatted("error", message.to_string())
    }
}

/// Entries shown first, in this order.
const LEADING: [&str; 3] = ["expected", "error", "value"];

static CONTEXT_FORMATTER: Lazy<Formatter> =
    Lazy::new(|| default_formatter().clone().with_width(120));

/// Render `ctx` as a failure report, one `name: value` line per entry.
///
/// Names are padded to the widest one. `expected`, `error` and `value`
/// come first; every other entry follows in insertion order. Multi-line
/// values are indented to the column of the first value.
pub fn format_context(ctx: &[ContextValue]) -> String {
    let name_width = ctx.iter().map(|c| c.name.width()).max().unwrap_or(0);
    let formatter = CONTEXT_FORMATTER
        .clone()
        .with_newline(format!("\n{}", " ".repeat(name_width + 2)));

    let leading = LEADING
        .iter()
        .flat_map(|name| ctx.iter().filter(move |c| c.name == *name));
    let rest = ctx.iter().filter(|c| !LEADING.contains(&c.name.as_str()));

    let mut out = String::new();
    for entry in leading.chain(rest) {
        let pad = " ".repeat(name_width - entry.name.width());
        let value = if entry.preformatted {
            entry.value.to_string()
        } else {
            formatter.format(&entry.value)
        };
        let _ = writeln!(out, "{}:{} {}", entry.name, pad, value);
    }
    out
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
