//! Tokenizer and token tree.
//!
//! The input is the canonical source form of a value (`Name{a: 1, b: [i32]{1, 2}}`).
//! It is cut after every `,` and `{` and before every `}`; quoted strings are
//! atomic. Tokens ending in `{` open a branch that the matching `}` token
//! closes, which gives the tree the layout passes work on.

/// Node of the layout tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Token {
    pub level: usize,
    pub text: String,
    /// Byte offset of the `:` of a `key: value` token.
    pub kv_sep: Option<usize>,
    /// Closing delimiter of a branch, printed after its children.
    pub trailing: String,
    pub children: Vec<Token>,
    /// Number of children before collapsing into rows.
    pub original_child_count: usize,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Token {
            kv_sep: scan_kv_sep(&text),
            text,
            ..Token::default()
        }
    }

    /// A token that is never treated as a key-value pair.
    pub fn plain(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            ..Token::default()
        }
    }

    pub fn is_opening(&self) -> bool {
        self.text.ends_with('{')
    }

    pub fn is_closing(&self) -> bool {
        self.text.starts_with('}')
    }

    /// A branch whose children are all plain leaves, and can therefore be
    /// joined into one or several rows.
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
            && self
                .children
                .iter()
                .all(|c| c.children.is_empty() && c.kv_sep.is_none())
    }

    pub fn set_level(&mut self, level: usize) {
        self.level = level;
        for child in &mut self.children {
            child.set_level(level + 1);
        }
    }
}

fn scan_kv_sep(s: &str) -> Option<usize> {
    for (i, b) in s.bytes().enumerate() {
        match b {
            b':' => return Some(i),
            b'"' | b'\'' => return None,
            _ => {}
        }
    }
    None
}

// ──────────────────────────────────────────────
// Tokenizer
// ──────────────────────────────────────────────

pub(crate) fn tokenize(mut input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    while !input.is_empty() {
        let (token, rest) = next_token(input);
        if !token.text.is_empty() {
            tokens.push(token);
        }
        input = rest;
    }
    tokens
}

fn next_token(input: &str) -> (Token, &str) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let start = skip_spaces(bytes, 0);
    let mut j = start;
    while j < len {
        match bytes[j] {
            quote @ (b'"' | b'\'') => j = skip_quoted(bytes, j + 1, quote),
            b',' | b'{' => {
                let mut text = input[start..=j].to_string();
                let mut rest = &input[j + 1..];
                if opens_struct_type(&text) {
                    let (next, after) = next_token(skip_struct(rest));
                    rest = after;
                    if next.text == "{" {
                        text.push_str("...} {");
                    } else {
                        text.push_str("...}");
                        text.push_str(&next.text);
                    }
                }
                return (Token::new(text), rest);
            }
            b'}' if j == start => {
                return match bytes.get(j + 1) {
                    Some(b',') => (Token::new("},"), &input[j + 2..]),
                    Some(_) => (Token::new("},"), &input[j + 1..]),
                    None => (Token::new("}"), ""),
                };
            }
            b'}' => {
                let text = format!("{},", &input[start..j]);
                return (Token::new(text), &input[j..]);
            }
            _ => j += 1,
        }
    }
    (Token::new(&input[start..]), "")
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() && bytes[i] != quote {
        if bytes[i] == b'\\' {
            i += 1;
        }
        i += 1;
    }
    (i + 1).min(bytes.len())
}

/// Whether a token ends with the `struct {` opening an anonymous type.
fn opens_struct_type(text: &str) -> bool {
    let Some(head) = text.strip_suffix('{') else {
        return false;
    };
    let head = head.trim_end();
    match head.strip_suffix("struct") {
        Some(before) => !before
            .bytes()
            .last()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_'),
        None => false,
    }
}

/// Skip past the `}` that closes an anonymous struct type.
fn skip_struct(s: &str) -> &str {
    let mut depth = 1;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return &s[i + 1..];
                }
            }
            _ => {}
        }
    }
    ""
}

// ──────────────────────────────────────────────
// Tree
// ──────────────────────────────────────────────

/// Rebuild the nesting of a flat token list.
pub(crate) fn build_tree(tokens: Vec<Token>) -> Vec<Token> {
    let mut iter = tokens.into_iter();
    let mut roots = Vec::new();
    while let Some(mut token) = build_branch(&mut iter) {
        token.set_level(0);
        roots.push(token);
    }
    roots
}

fn build_branch(tokens: &mut impl Iterator<Item = Token>) -> Option<Token> {
    let mut token = tokens.next()?;
    if !token.is_opening() {
        return Some(token);
    }
    while let Some(child) = build_branch(tokens) {
        if child.is_closing() {
            token.trailing = child.text;
            return Some(token);
        }
        token.children.push(child);
    }
    Some(token)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_composites() {
        let tokens = tokenize("Point{x: 1, y: [i32]{1, 2}}");
        assert_eq!(
            texts(&tokens),
            vec!["Point{", "x: 1,", "y: [i32]{", "1,", "2,", "},", "}"]
        );
    }

    #[test]
    fn quoted_strings_are_atomic() {
        let tokens = tokenize(r#"[string]{"a, {b}", "c\"}"}"#);
        assert_eq!(
            texts(&tokens),
            vec!["[string]{", r#""a, {b}","#, r#""c\"}","#, "}"]
        );
        let chars = tokenize("[char]{'{', '}'}");
        assert_eq!(texts(&chars), vec!["[char]{", "'{',", "'}',", "}"]);
    }

    #[test]
    fn anonymous_struct_types_collapse() {
        let tokens = tokenize(r#"struct { a string; b [i32] }{a: "s", b: [i32]{}}"#);
        assert_eq!(texts(&tokens)[0], "struct {...} {");
        let nested = tokenize(r#"[struct { a string }]{struct { a string }{a: "s"}}"#);
        assert_eq!(texts(&nested)[..2], ["[struct {...}]{", "struct {...} {"]);
    }

    #[test]
    fn words_containing_struct_are_not_types() {
        let tokens = tokenize("Destruct{a: 1}");
        assert_eq!(texts(&tokens), vec!["Destruct{", "a: 1,", "}"]);
    }

    #[test]
    fn kv_separator_stops_at_quotes() {
        assert_eq!(Token::new("name: \"x\"").kv_sep, Some(4));
        assert_eq!(Token::new("\"a:b\": 1").kv_sep, None);
        assert_eq!(Token::new("12,").kv_sep, None);
    }

    #[test]
    fn tree_nests_branches() {
        let tree = build_tree(tokenize("A{b: B{c: 1}, d: 2}"));
        assert_eq!(tree.len(), 1);
        let root = &tree[0];
        assert_eq!(root.text, "A{");
        assert_eq!(root.trailing, "}");
        assert_eq!(texts(&root.children), vec!["b: B{", "d: 2,"]);
        assert_eq!(root.children[0].trailing, "},");
        assert_eq!(root.children[0].children[0].level, 2);
    }

    #[test]
    fn empty_branch_has_no_children() {
        let tree = build_tree(tokenize("[any]{}"));
        assert_eq!(tree[0].text, "[any]{");
        assert!(tree[0].children.is_empty());
        assert_eq!(tree[0].trailing, "}");
    }
}
