use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use testpredicate_value::Value;
use unicode_width::UnicodeWidthStr;

use crate::layout::{align_values, collapse_leaves, wrap_tokens, write_tokens};
use crate::token::{build_tree, tokenize};

/// Layout settings for [`Formatter::format`].
///
/// All fields have defaults, so a partial configuration deserializes:
///
/// ```
/// use testpredicate_prettyprint::Formatter;
///
/// let f: Formatter = serde_json::from_str(r#"{"width": 100}"#).unwrap();
/// assert_eq!(f.width, 100);
/// assert_eq!(f.max_wrapped, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formatter {
    /// Target line width, in display columns.
    pub width: usize,
    /// Width assumed for tokens whose indentation alone fills the line.
    pub min_width: usize,
    /// Marker appended to a line that continues on the next one.
    pub wrap_prefix: String,
    /// Marker prepended to a continuation line.
    pub wrap_suffix: String,
    /// Maximum number of lines a collapsed list keeps.
    pub max_wrapped: usize,
    pub indent: String,
    pub newline: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter {
            width: 80,
            min_width: 40,
            wrap_prefix: "↩".to_string(),
            wrap_suffix: "↪".to_string(),
            max_wrapped: 10,
            indent: "    ".to_string(),
            newline: "\n".to_string(),
        }
    }
}

static DEFAULT: Lazy<Formatter> = Lazy::new(Formatter::default);

/// The shared default formatter.
pub fn default_formatter() -> &'static Formatter {
    &DEFAULT
}

/// Format `value` with the default settings.
pub fn format_value(value: &Value) -> String {
    DEFAULT.format(value)
}

impl Formatter {
    pub fn new() -> Self {
        Formatter::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn with_wrap_markers(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.wrap_prefix = prefix.into();
        self.wrap_suffix = suffix.into();
        self
    }

    pub fn with_max_wrapped(mut self, max_wrapped: usize) -> Self {
        self.max_wrapped = max_wrapped;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    /// Lay out the canonical source form of `value`.
    pub fn format(&self, value: &Value) -> String {
        self.format_source(&format!("{:?}", value))
    }

    /// Lay out text already in canonical source form.
    pub fn format_source(&self, source: &str) -> String {
        let mut tokens = build_tree(tokenize(source));
        collapse_leaves(&mut tokens, self);
        align_values(&mut tokens);
        wrap_tokens(&mut tokens, self);

        let mut lines = Vec::new();
        write_tokens(&mut lines, &tokens, self);
        lines.join(&self.newline)
    }

    /// Width left for a token at `level`. Falls back to `min_width` once
    /// the indentation reaches the line width.
    pub(crate) fn available(&self, level: usize) -> usize {
        let indent = UnicodeWidthStr::width(self.indent.as_str()) * level;
        match self.width.saturating_sub(indent) {
            0 => self.min_width,
            rest => rest,
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use testpredicate_value::Record;

    #[test]
    fn scalars_print_on_one_line() {
        assert_eq!(format_value(&Value::from(123)), "123");
        assert_eq!(format_value(&Value::from("123")), "\"123\"");
        assert_eq!(format_value(&Value::Null), "None");
    }

    #[test]
    fn small_lists_collapse() {
        assert_eq!(format_value(&Value::from(vec![1, 2, 3])), "[i32]{ 1, 2, 3 }");
        assert_eq!(format_value(&Value::Seq(vec![], None)), "[any]{}");
    }

    #[test]
    fn records_align_fields() {
        let r = Record::new("User").field("id", 7).field("name", "ann");
        assert_eq!(
            format_value(&Value::from(r)),
            "User{\n    id:   7,\n    name: \"ann\",\n}"
        );
    }

    #[test]
    fn newline_carries_continuation_indent() {
        let f = Formatter::default().with_newline("\n  ");
        let r = Record::new("P").field("x", 1);
        assert_eq!(f.format(&Value::from(r)), "P{\n      x: 1,\n  }");
    }

    #[test]
    fn available_width_shrinks_with_indentation() {
        let f = Formatter::default();
        assert_eq!(f.available(0), 80);
        assert_eq!(f.available(2), 72);
        assert_eq!(f.available(13), 28);
        assert_eq!(f.available(19), 4);
        assert_eq!(f.available(20), 40);
        assert_eq!(f.available(30), 40);
    }

    #[test]
    fn default_is_shared() {
        assert!(std::ptr::eq(default_formatter(), default_formatter()));
        assert_eq!(*default_formatter(), Formatter::new());
    }
}
