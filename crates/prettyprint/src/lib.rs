//! Bounded-width pretty-printer for testpredicate values.
//!
//! A value is rendered in its canonical source form, cut into a token tree,
//! and laid out so that diagnostics stay readable: short lists are collapsed
//! onto one line, long ones into rows truncated around an ellipsis, values
//! of consecutive `key: value` lines are aligned, and anything still too wide
//! is wrapped with continuation markers.
//!
//! ```
//! use testpredicate_prettyprint::format_value;
//! use testpredicate_value::Value;
//!
//! assert_eq!(format_value(&Value::from(vec![1, 2])), "[i32]{ 1, 2 }");
//! ```

mod formatter;
mod layout;
mod token;

pub use formatter::{default_formatter, format_value, Formatter};
pub use layout::wrap_string;
