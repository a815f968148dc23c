//! Width and height bounds of the pretty-printer on realistic values.

use proptest::prelude::*;
use rand::Rng;
use testpredicate_prettyprint::{format_value, wrap_string, Formatter};
use testpredicate_value::{Record, Value};

const LONG_TEXT: &str = "MakeBoolPredicate wraps a predicate function\nreturning bool into a \
predicateinterface. Any error returned from the function is interpreted as an invalid evaluation.";

fn line_widths(s: &str) -> Vec<usize> {
    s.split('\n').map(|l| l.chars().count()).collect()
}

fn random_ints(max: i64, n: usize) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(0..max)).collect()
}

#[test]
fn large_list_is_truncated_with_annotation() {
    let data = Record::new("Data").field("values", random_ints(1_000_000_000_000_000_000, 200));
    let s = format_value(&Value::from(data));

    let lines: Vec<&str> = s.split('\n').collect();
    assert!(lines.len() > 1);
    assert!(lines.len() <= 14, "{} lines:\n{}", lines.len(), s);
    assert!(line_widths(&s).iter().all(|&w| w <= 80), "{}", s);
    assert!(lines.iter().any(|l| l.trim() == "// len() = 200"));
    assert!(lines.iter().any(|l| l.trim() == "...,"));
    assert_eq!(lines[0], "Data{");
    assert_eq!(lines[lines.len() - 1], "}");
}

#[test]
fn anonymous_struct_with_nested_values() {
    let nested = Record::anonymous().field("name", "aaa").field("value", 123.456);
    let index: Vec<i32> = [1, 5, 2, 3, 41, 12].repeat(5);
    let value = Record::anonymous()
        .field("name", "my name")
        .field("path", "/aaa/bbb/ccc/d")
        .field("options", vec!["readable", "aaa{", "bbb}", "build-target"])
        .field("nested", vec![Value::from(nested)])
        .field("index", index)
        .field("details", format!("{}{}", LONG_TEXT, "x".repeat(99)));
    let s = format_value(&Value::from(value));

    assert!(s.starts_with("struct {...} {\n"), "{}", s);
    assert!(s.contains("\"aaa{\""));
    assert!(s.contains("// len() = 30"));
    assert!(line_widths(&s).len() > 1);
    assert!(line_widths(&s).iter().all(|&w| w <= 81), "{}", s);
}

#[test]
fn deeply_nested_strings_stay_within_width() {
    let text = ["xxxxxxxxxx"; 6].join(" ");
    let mut value = Value::from(Record::new("Leaf").field("text", text.clone()));
    for _ in 0..12 {
        value = Value::from(Record::new("Node").field("child", value));
    }
    let s = format_value(&value);

    assert!(line_widths(&s).iter().all(|&w| w <= 81), "{}", s);
    assert!(s.contains('↩'), "{}", s);
    let unwrapped: String = s
        .split('\n')
        .map(|l| l.trim_start().trim_start_matches('↪').trim_end_matches('↩'))
        .collect();
    assert!(unwrapped.contains(&format!("text: \"{}\"", text)), "{}", s);
}

#[test]
fn long_strings_wrap_with_markers() {
    let s = format_value(&Value::from(LONG_TEXT));
    let lines: Vec<&str> = s.split('\n').collect();
    assert!(lines.len() > 1);
    assert!(lines[0].ends_with('↩'));
    assert!(lines[1].trim_start().starts_with('↪'));
    assert!(!lines[lines.len() - 1].ends_with('↩'));
    assert!(line_widths(&s).iter().all(|&w| w <= 80), "{}", s);
}

#[test]
fn custom_markers_and_indent() {
    let f = Formatter::new()
        .with_width(40)
        .with_indent("\t")
        .with_wrap_markers(">>", "<<");
    let s = f.format(&Value::from(LONG_TEXT));
    assert!(s.lines().next().is_some_and(|l| l.ends_with(">>")));
    assert!(s.lines().nth(1).is_some_and(|l| l.starts_with("\t<<")));
}

#[test]
fn wrap_string_never_loses_text() {
    let lines = wrap_string(LONG_TEXT, 17);
    assert_eq!(lines.concat(), LONG_TEXT);
    assert!(lines
        .iter()
        .all(|l| l.chars().filter(|c| !c.is_control()).count() <= 17));
}

proptest! {
    #[test]
    fn lines_fit_the_configured_width(
        width in 60usize..120,
        items in prop::collection::vec("[a-z ]{0,30}", 0..40),
        counts in prop::collection::vec(any::<u32>(), 0..60),
    ) {
        let value = Record::new("Sample")
            .field("items", items)
            .field("counts", counts);
        let s = Formatter::new().with_width(width).format(&Value::from(value));
        for w in line_widths(&s) {
            prop_assert!(w <= width, "line of {} columns exceeds {}:\n{}", w, width, s);
        }
    }

    #[test]
    fn wrap_string_preserves_content(s in "[a-z \\\\]{0,200}", width in 0usize..50) {
        let lines = wrap_string(&s, width);
        prop_assert_eq!(lines.concat(), s);
    }
}
