//! Layout passes over the token tree: collapse leaves into rows, align
//! `key: value` runs, wrap tokens that are still too wide, then emit lines.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::formatter::Formatter;
use crate::token::Token;

/// Siblings of branches with this many children or more are always
/// annotated with their original length once collapsed into rows.
const ANNOTATE_MIN_CHILDREN: usize = 7;

/// Rows are annotated whenever there are more of them than this.
const ANNOTATE_MIN_ROWS: usize = 3;

fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

// ──────────────────────────────────────────────
// Collapse
// ──────────────────────────────────────────────

pub(crate) fn collapse_leaves(tokens: &mut [Token], f: &Formatter) {
    for token in tokens {
        if token.is_collapsible() {
            try_collapse(token, f);
        } else {
            collapse_leaves(&mut token.children, f);
        }
    }
}

fn try_collapse(token: &mut Token, f: &Formatter) {
    let available = f.available(token.level);
    let base = width(&token.text) + width(&token.trailing);
    let widths: Vec<usize> = token.children.iter().map(|c| width(&c.text) + 1).collect();
    let total: usize = widths.iter().sum();
    let max = widths.iter().copied().max().unwrap_or(0);

    if base + total < available {
        collapse_single_line(token);
    } else {
        let average = total / widths.len().max(1);
        if average < available / 3 && max < available / 2 {
            collapse_multiline(token, f);
        }
    }
}

fn collapse_single_line(token: &mut Token) {
    let mut line = token.text.clone();
    for child in &token.children {
        line.push(' ');
        line.push_str(&child.text);
    }
    if line.ends_with(',') {
        line.pop();
    }
    line.push(' ');
    line.push_str(&token.trailing);

    token.text = line;
    token.trailing.clear();
    token.original_child_count = token.children.len();
    token.children.clear();
}

fn collapse_multiline(token: &mut Token, f: &Formatter) {
    let available = f.available(token.level + 1);
    let mut rows = Vec::new();
    let mut row = String::new();
    for child in &token.children {
        if !row.is_empty() && width(&row) + width(&child.text) + 1 > available {
            rows.push(Token::plain(std::mem::take(&mut row)));
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(&child.text);
    }
    if !row.is_empty() {
        rows.push(Token::plain(row));
    }

    token.original_child_count = token.children.len();
    token.children = rows;
    truncate_rows(token, f.max_wrapped);
}

/// Keep at most `max_lines` child lines, ellipsis and length annotation
/// included. The kept rows are split between head and tail.
fn truncate_rows(token: &mut Token, max_lines: usize) {
    let count = token.original_child_count;
    let mut rows = std::mem::take(&mut token.children);
    let annotate = count >= ANNOTATE_MIN_CHILDREN || rows.len() > ANNOTATE_MIN_ROWS;
    let budget = if annotate {
        max_lines.saturating_sub(1)
    } else {
        max_lines
    };

    if rows.len() > budget {
        let keep = budget.saturating_sub(1);
        let tail_len = keep / 2;
        let head_len = keep - tail_len;
        let tail = rows.split_off(rows.len() - tail_len);
        rows.truncate(head_len);
        rows.push(Token::plain("...,"));
        rows.extend(tail);
    }
    if annotate {
        rows.push(Token::plain(format!("// len() = {}", count)));
    }

    token.children = rows;
    let level = token.level;
    token.set_level(level);
}

// ──────────────────────────────────────────────
// Key / value alignment
// ──────────────────────────────────────────────

/// Align the values of consecutive `key: value` siblings. A run ends after
/// a sibling that has children of its own.
pub(crate) fn align_values(tokens: &mut [Token]) {
    for token in tokens {
        align_values(&mut token.children);

        let children = &mut token.children;
        let mut start = 0;
        for i in 0..children.len() {
            if !children[i].children.is_empty() {
                align_run(&mut children[start..=i]);
                start = i + 1;
            }
        }
        align_run(&mut children[start..]);
    }
}

fn align_run(run: &mut [Token]) {
    let Some(column) = run
        .iter()
        .filter_map(|t| t.kv_sep.map(|sep| width(&t.text[..sep])))
        .max()
    else {
        return;
    };
    for token in run {
        align_value(token, column + 2);
    }
}

fn align_value(token: &mut Token, column: usize) {
    let Some(sep) = token.kv_sep else {
        return;
    };
    let key = &token.text[..=sep];
    let value = token.text[sep + 1..].trim_start();
    let pad = column.saturating_sub(width(key)).max(1);
    token.text = format!("{}{}{}", key, " ".repeat(pad), value);
}

// ──────────────────────────────────────────────
// Wrapping
// ──────────────────────────────────────────────

/// Split every token wider than the space left at its level. The
/// continuation lines become the first children of the token, one level
/// deeper.
pub(crate) fn wrap_tokens(tokens: &mut [Token], f: &Formatter) {
    for token in tokens {
        wrap_tokens(&mut token.children, f);
        if width(&token.text) > f.available(token.level) {
            wrap_token(token, f);
        }
    }
}

fn wrap_token(token: &mut Token, f: &Formatter) {
    let markers = width(&f.wrap_prefix) + width(&f.wrap_suffix);
    let chunk = f.available(token.level + 1).saturating_sub(markers);
    let lines = wrap_string(&token.text, chunk);
    let Some((first, rest)) = lines.split_first() else {
        return;
    };

    token.text = format!("{}{}", first, f.wrap_prefix);
    let last = rest.len().saturating_sub(1);
    let mut continuations: Vec<Token> = rest
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let marker = if i == last { "" } else { f.wrap_prefix.as_str() };
            let mut t = Token::plain(format!("{}{}{}", f.wrap_suffix, line, marker));
            t.level = token.level + 1;
            t
        })
        .collect();
    continuations.append(&mut token.children);
    token.children = continuations;
}

/// Break `s` into lines of at most `width` columns.
///
/// Lines preferably end after a run of whitespace or after a backslash
/// escape, as long as that keeps the line at least half full; otherwise the
/// line is cut at the width. A single character wider than `width` still
/// gets a line of its own.
pub fn wrap_string(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = s.chars().collect();
    let char_width = |c: char| UnicodeWidthChar::width(c).unwrap_or(0);
    let mut lines = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = start;
        let mut used = 0;
        while end < chars.len() {
            let w = char_width(chars[end]);
            if used + w > width && end > start {
                break;
            }
            used += w;
            end += 1;
        }
        if end == chars.len() {
            lines.push(chars[start..].iter().collect());
            break;
        }

        let mut cut = end;
        let mut used = 0;
        let mut i = start;
        while i < end {
            if chars[i] == '\\' && i + 1 < end {
                used += char_width(chars[i]) + char_width(chars[i + 1]);
                i += 2;
                if used * 2 >= width {
                    cut = i;
                }
                continue;
            }
            used += char_width(chars[i]);
            i += 1;
            let breaks = chars[i - 1].is_whitespace() && !chars[i].is_whitespace();
            if breaks && used * 2 >= width {
                cut = i;
            }
        }
        lines.push(chars[start..cut].iter().collect());
        start = cut;
    }
    lines
}

// ──────────────────────────────────────────────
// Output
// ──────────────────────────────────────────────

pub(crate) fn write_tokens(lines: &mut Vec<String>, tokens: &[Token], f: &Formatter) {
    for token in tokens {
        let indent = f.indent.repeat(token.level);
        if token.children.is_empty() {
            lines.push(format!("{}{}{}", indent, token.text, token.trailing));
            continue;
        }
        lines.push(format!("{}{}", indent, token.text));
        write_tokens(lines, &token.children, f);
        if !token.trailing.is_empty() {
            lines.push(format!("{}{}", indent, token.trailing));
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
