//! The [`Value`] sum type and its payloads.
//!
//! A `Value` is the runtime shape of an assertion subject. Numeric variants
//! keep the width of the Rust type they were converted from so that
//! diagnostics name the original type and set membership can tell `1i32`
//! and `1i64` apart, while the comparator in [`crate::compare`] still treats
//! them as equal.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use time::OffsetDateTime;

use crate::source;

// ──────────────────────────────────────────────
// Numeric kinds
// ──────────────────────────────────────────────

/// Width of a signed integer value. `Char` holds a Unicode scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    Char,
}

impl IntKind {
    pub fn name(self) -> &'static str {
        match self {
            IntKind::I8 => "i8",
            IntKind::I16 => "i16",
            IntKind::I32 => "i32",
            IntKind::I64 => "i64",
            IntKind::Isize => "isize",
            IntKind::Char => "char",
        }
    }

    /// Whether every value of this kind is exactly representable as `f64`.
    pub fn fits_f64(self) -> bool {
        !matches!(self, IntKind::I64 | IntKind::Isize)
    }
}

/// Width of an unsigned integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UIntKind {
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl UIntKind {
    pub fn name(self) -> &'static str {
        match self {
            UIntKind::U8 => "u8",
            UIntKind::U16 => "u16",
            UIntKind::U32 => "u32",
            UIntKind::U64 => "u64",
            UIntKind::Usize => "usize",
        }
    }

    pub fn fits_f64(self) -> bool {
        !matches!(self, UIntKind::U64 | UIntKind::Usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

impl FloatKind {
    pub fn name(self) -> &'static str {
        match self {
            FloatKind::F32 => "f32",
            FloatKind::F64 => "f64",
        }
    }
}

/// Discriminant of a [`Value`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    UInt,
    Float,
    String,
    Bytes,
    Time,
    Seq,
    Map,
    Record,
    Error,
    Func,
    Opaque,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "signed integer",
            Kind::UInt => "unsigned integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Time => "time",
            Kind::Seq => "sequence",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Error => "error",
            Kind::Func => "function",
            Kind::Opaque => "opaque value",
        };
        f.write_str(name)
    }
}

// ──────────────────────────────────────────────
// Value
// ──────────────────────────────────────────────

/// A dynamically typed assertion subject.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64, IntKind),
    UInt(u64, UIntKind),
    Float(f64, FloatKind),
    String(String),
    Bytes(Vec<u8>),
    Time(OffsetDateTime),
    /// Elements, and the element type name of a sequence converted empty
    /// from a typed Rust collection.
    Seq(Vec<Value>, Option<String>),
    Map(Vec<(Value, Value)>),
    Record(Record),
    Error(ErrorValue),
    Func(Callable),
    Opaque(Opaque),
}

impl Value {
    /// Wrap raw bytes. `Vec<u8>` converts to a sequence of `u8` through
    /// `From`; use this constructor to get the dedicated bytes variant.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(bytes.into())
    }

    pub fn error<E: Error + 'static>(err: E) -> Value {
        Value::Error(ErrorValue::new(err))
    }

    pub fn callable(f: impl Fn() + 'static) -> Value {
        Value::Func(Callable::new(f))
    }

    pub fn opaque<T: fmt::Debug + 'static>(inner: T) -> Value {
        Value::Opaque(Opaque::new(inner))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(..) => Kind::Int,
            Value::UInt(..) => Kind::UInt,
            Value::Float(..) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Bytes(_) => Kind::Bytes,
            Value::Time(_) => Kind::Time,
            Value::Seq(..) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Error(_) => Kind::Error,
            Value::Func(_) => Kind::Func,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    /// Name of the runtime type, as shown in diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_, kind) => kind.name().to_string(),
            Value::UInt(_, kind) => kind.name().to_string(),
            Value::Float(_, kind) => kind.name().to_string(),
            Value::String(_) => "string".to_string(),
            Value::Bytes(_) => "bytes".to_string(),
            Value::Time(_) => "time".to_string(),
            Value::Seq(items, element) => match element {
                Some(name) if items.is_empty() => format!("[{}]", name),
                _ => format!("[{}]", common_type(items.iter())),
            },
            Value::Map(entries) => format!(
                "map[{}]{}",
                common_type(entries.iter().map(|(k, _)| k)),
                common_type(entries.iter().map(|(_, v)| v))
            ),
            Value::Record(record) => record.type_name(),
            Value::Error(err) => err.type_name().to_string(),
            Value::Func(_) => "fn()".to_string(),
            Value::Opaque(opaque) => opaque.tag().to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Number of elements of a string (in bytes), byte buffer, sequence or
    /// map. `None` for every other kind.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.len()),
            Value::Bytes(b) => Some(b.len()),
            Value::Seq(items, _) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Allocated capacity of a sequence or byte buffer.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Value::Bytes(b) => Some(b.capacity()),
            Value::Seq(items, _) => Some(items.capacity()),
            _ => None,
        }
    }

    /// Whether the kind has a null state, i.e. whether asking if it is nil
    /// is meaningful.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Bytes(_)
                | Value::Seq(..)
                | Value::Map(_)
                | Value::Error(_)
                | Value::Func(_)
                | Value::Opaque(_)
        )
    }
}

fn common_type<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    let mut name: Option<String> = None;
    for value in values {
        let t = value.type_name();
        match &name {
            None => name = Some(t),
            Some(n) if *n == t => {}
            Some(_) => return "any".to_string(),
        }
    }
    name.unwrap_or_else(|| "any".to_string())
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::compare::deep_equal(self, other)
    }
}

/// `Debug` renders the canonical source form consumed by the pretty-printer.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&source::render(self))
    }
}

/// `Display` renders the human form used by the `to_string` transform.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n, IntKind::Char) => match u32::try_from(*n).ok().and_then(char::from_u32) {
                Some(c) => write!(f, "{}", c),
                None => write!(f, "{}", n),
            },
            Value::Int(n, _) => write!(f, "{}", n),
            Value::UInt(n, _) => write!(f, "{}", n),
            Value::Float(x, FloatKind::F32) => write!(f, "{}", *x as f32),
            Value::Float(x, FloatKind::F64) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            Value::Bytes(b) => write!(f, "{:?}", b),
            Value::Time(t) => f.write_str(&source::format_time(t)),
            Value::Seq(items, _) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Record(record) => {
                if let Some(name) = record.name() {
                    f.write_str(name)?;
                    if record.fields().is_empty() {
                        return Ok(());
                    }
                    f.write_str(" ")?;
                }
                f.write_str("{ ")?;
                for (i, (k, v)) in record.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str(" }")
            }
            Value::Error(err) => f.write_str(err.message()),
            Value::Func(_) => f.write_str("fn()"),
            Value::Opaque(opaque) => f.write_str(opaque.repr()),
        }
    }
}

// ──────────────────────────────────────────────
// Records
// ──────────────────────────────────────────────

/// A struct-like value: an optional type name, ordered named fields, and
/// niladic methods reachable through field extraction.
#[derive(Clone, Default)]
pub struct Record {
    name: Option<String>,
    fields: Vec<(String, Value)>,
    methods: Vec<Method>,
}

#[derive(Clone)]
struct Method {
    name: String,
    call: Rc<dyn Fn() -> Vec<Value>>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: Some(name.into()),
            ..Record::default()
        }
    }

    /// A record without a type name, rendered as `struct { ... }`.
    pub fn anonymous() -> Self {
        Record::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Attach a niladic method, evaluated lazily by field extraction.
    pub fn method(mut self, name: impl Into<String>, f: impl Fn() -> Value + 'static) -> Self {
        self.methods.push(Method {
            name: name.into(),
            call: Rc::new(move || vec![f()]),
        });
        self
    }

    /// Attach a niladic method with several results; only the first one is
    /// visible through field extraction.
    pub fn method_multi(
        mut self,
        name: impl Into<String>,
        f: impl Fn() -> Vec<Value> + 'static,
    ) -> Self {
        self.methods.push(Method {
            name: name.into(),
            call: Rc::new(f),
        });
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Invoke the method `name`, returning its first result.
    pub fn call(&self, name: &str) -> Option<Value> {
        let method = self.methods.iter().find(|m| m.name == name)?;
        Some((method.call)().into_iter().next().unwrap_or(Value::Null))
    }

    pub fn type_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => {
                if self.fields.is_empty() {
                    return "struct {}".to_string();
                }
                let fields: Vec<String> = self
                    .fields
                    .iter()
                    .map(|(k, v)| format!("{} {}", k, v.type_name()))
                    .collect();
                format!("struct {{ {} }}", fields.join("; "))
            }
        }
    }
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Snapshot of an error and its `source()` chain.
///
/// Errors captured from a live `std::error::Error` keep a handle on it so
/// that every link can still be downcast; errors built with
/// [`ErrorValue::msg`] only carry their type name and message.
#[derive(Clone)]
pub struct ErrorValue {
    type_name: String,
    message: String,
    source: Option<Box<ErrorValue>>,
    origin: Option<Origin>,
}

#[derive(Clone)]
struct Origin {
    root: Rc<dyn Error + 'static>,
    depth: usize,
}

impl Origin {
    fn resolve(&self) -> Option<&(dyn Error + 'static)> {
        let mut current: &(dyn Error + 'static) = self.root.as_ref();
        for _ in 0..self.depth {
            current = current.source()?;
        }
        Some(current)
    }
}

/// Type name given to chain links whose concrete type is not known.
const UNKNOWN_ERROR_TYPE: &str = "error";

impl ErrorValue {
    pub fn new<E: Error + 'static>(err: E) -> Self {
        Self::capture(Rc::new(err), 0, short_type_name::<E>())
    }

    pub fn from_boxed(err: Box<dyn Error + 'static>) -> Self {
        Self::capture(Rc::from(err), 0, UNKNOWN_ERROR_TYPE.to_string())
    }

    /// A plain error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        ErrorValue {
            type_name: UNKNOWN_ERROR_TYPE.to_string(),
            message: message.into(),
            source: None,
            origin: None,
        }
    }

    /// Set the error this one wraps.
    pub fn with_source(mut self, source: ErrorValue) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    fn capture(root: Rc<dyn Error + 'static>, depth: usize, type_name: String) -> Self {
        let origin = Origin { root, depth };
        let (message, wraps) = match origin.resolve() {
            Some(err) => (err.to_string(), err.source().is_some()),
            None => (String::new(), false),
        };
        let source = if wraps {
            Some(Box::new(Self::capture(
                Rc::clone(&origin.root),
                depth + 1,
                UNKNOWN_ERROR_TYPE.to_string(),
            )))
        } else {
            None
        };
        ErrorValue {
            type_name,
            message,
            source,
            origin: Some(origin),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> Option<&ErrorValue> {
        self.source.as_deref()
    }

    /// This error followed by every error it wraps.
    pub fn chain(&self) -> impl Iterator<Item = &ErrorValue> {
        std::iter::successors(Some(self), |e| e.source())
    }

    /// The live error behind this link, if it was captured from one.
    pub fn as_dyn(&self) -> Option<&(dyn Error + 'static)> {
        self.origin.as_ref().and_then(Origin::resolve)
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.as_dyn()?.downcast_ref::<E>()
    }

    /// Whether `expected` appears anywhere in this error's chain.
    ///
    /// Links match on message; type names must agree unless one side is
    /// an untyped link.
    pub fn is(&self, expected: &ErrorValue) -> bool {
        self.chain().any(|link| {
            link.message == expected.message
                && (link.type_name == expected.type_name
                    || link.type_name == UNKNOWN_ERROR_TYPE
                    || expected.type_name == UNKNOWN_ERROR_TYPE)
        })
    }

    pub(crate) fn same_as(&self, other: &ErrorValue) -> bool {
        self.type_name == other.type_name
            && self.message == other.message
            && match (&self.source, &other.source) {
                (None, None) => true,
                (Some(a), Some(b)) => a.same_as(b),
                _ => false,
            }
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.type_name, self.message)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ──────────────────────────────────────────────
// Callables and opaque values
// ──────────────────────────────────────────────

/// A niladic function subject, as consumed by the panic predicates.
#[derive(Clone)]
pub struct Callable(Rc<dyn Fn()>);

impl Callable {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Callable(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

/// A value the model has no structural view of. It is identified by its
/// type tag and rendered with its `Debug` output.
#[derive(Clone)]
pub struct Opaque {
    tag: String,
    repr: String,
    inner: Rc<dyn Any>,
}

impl Opaque {
    pub fn new<T: fmt::Debug + 'static>(inner: T) -> Self {
        Opaque {
            tag: short_type_name::<T>(),
            repr: format!("{:?}", inner),
            inner: Rc::new(inner),
        }
    }

    /// Wrap a type-erased value, for payloads whose concrete type is not
    /// known statically (e.g. a panic payload).
    pub fn from_any(tag: impl Into<String>, repr: impl Into<String>, inner: Box<dyn Any>) -> Self {
        Opaque {
            tag: tag.into(),
            repr: repr.into(),
            inner: Rc::from(inner),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn repr(&self) -> &str {
        &self.repr
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

/// `std::any::type_name` with module paths stripped from every segment,
/// e.g. `Vec<core::num::error::ParseIntError>` becomes `Vec<ParseIntError>`.
pub fn short_type_name<T: ?Sized>() -> String {
    shorten_type_name(std::any::type_name::<T>())
}

fn shorten_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
    }
    out
}

/// The [`Value::type_name`] that values converted from `T` carry, or `any`
/// when it depends on the value.
pub(crate) fn element_type_name<T: ?Sized>() -> String {
    value_type_name(&short_type_name::<T>())
}

fn value_type_name(rust: &str) -> String {
    let t = rust.trim().trim_start_matches('&');
    match t {
        "str" | "String" | "Cow<str>" => return "string".to_string(),
        "OffsetDateTime" => return "time".to_string(),
        "()" => return "null".to_string(),
        "Callable" => return "fn()".to_string(),
        "Value" | "Record" | "ErrorValue" | "Opaque" => return "any".to_string(),
        _ => {}
    }
    if let Some(inner) = generic_args(t, "Vec").or_else(|| generic_args(t, "VecDeque")) {
        return format!("[{}]", value_type_name(inner));
    }
    if let Some(inner) = t.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let element = inner.rsplit_once(';').map_or(inner, |(e, _)| e);
        return format!("[{}]", value_type_name(element));
    }
    if let Some(inner) = generic_args(t, "Option") {
        return value_type_name(inner);
    }
    if let Some(args) = generic_args(t, "BTreeMap").or_else(|| generic_args(t, "HashMap")) {
        let mut parts = split_args(args).into_iter();
        if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
            return format!("map[{}]{}", value_type_name(k), value_type_name(v));
        }
    }
    if t.starts_with("Box<dyn") {
        return "any".to_string();
    }
    t.to_string()
}

/// The text between `name<` and the closing `>`.
fn generic_args<'a>(t: &'a str, name: &str) -> Option<&'a str> {
    t.strip_prefix(name)?.strip_prefix('<')?.strip_suffix('>')
}

/// Split generic arguments at top-level commas.
fn split_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer {
        inner: std::num::ParseIntError,
    }

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer failure")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.inner)
        }
    }

    fn parse_error() -> std::num::ParseIntError {
        "x".parse::<i32>().unwrap_err()
    }

    #[test]
    fn short_type_name_strips_paths() {
        assert_eq!(short_type_name::<std::num::ParseIntError>(), "ParseIntError");
        assert_eq!(
            shorten_type_name("alloc::vec::Vec<core::num::error::ParseIntError>"),
            "Vec<ParseIntError>"
        );
        assert_eq!(shorten_type_name("i32"), "i32");
    }

    #[test]
    fn type_names_follow_rust_primitives() {
        assert_eq!(Value::from(1i32).type_name(), "i32");
        assert_eq!(Value::from(1u64).type_name(), "u64");
        assert_eq!(Value::from(1.5f32).type_name(), "f32");
        assert_eq!(Value::from('a').type_name(), "char");
        assert_eq!(Value::from("abc").type_name(), "string");
        assert_eq!(Value::from(vec![1, 2]).type_name(), "[i32]");
        assert_eq!(Value::from(vec![Value::from(1), Value::from("a")]).type_name(), "[any]");
        assert_eq!(Value::Seq(vec![], None).type_name(), "[any]");
        assert_eq!(Value::from(Vec::<i32>::new()).type_name(), "[i32]");
        assert_eq!(Value::from(Vec::<String>::new()).type_name(), "[string]");
        assert_eq!(Value::from(Vec::<Vec<&str>>::new()).type_name(), "[[string]]");
        assert_eq!(Value::from(Vec::<Value>::new()).type_name(), "[any]");
        assert_eq!(Value::from(Vec::<Option<u8>>::new()).type_name(), "[u8]");
        let empty: &[f64] = &[];
        assert_eq!(Value::from(empty).type_name(), "[f64]");
        assert_eq!(
            Value::from(Vec::<std::collections::BTreeMap<String, i64>>::new()).type_name(),
            "[map[string]i64]"
        );
        assert_eq!(Value::Null.type_name(), "null");
    }

    #[test]
    fn record_type_names() {
        let named = Record::new("Point").field("x", 1).field("y", 2);
        assert_eq!(named.type_name(), "Point");
        let anon = Record::anonymous().field("name", "a").field("value", 1.5);
        assert_eq!(anon.type_name(), "struct { name string; value f64 }");
    }

    #[test]
    fn record_methods_capture_first_result() {
        let record = Record::new("R")
            .method("single", || Value::from(3))
            .method_multi("multi", || vec![Value::from("a"), Value::from("b")])
            .method_multi("none", Vec::new);
        assert_eq!(record.call("single"), Some(Value::from(3)));
        assert_eq!(record.call("multi"), Some(Value::from("a")));
        assert_eq!(record.call("none"), Some(Value::Null));
        assert_eq!(record.call("missing"), None);
    }

    #[test]
    fn error_chain_is_captured() {
        let err = ErrorValue::new(Outer {
            inner: parse_error(),
        });
        assert_eq!(err.type_name(), "Outer");
        assert_eq!(err.message(), "outer failure");
        let links: Vec<&str> = err.chain().map(|e| e.message()).collect();
        assert_eq!(links, vec!["outer failure", "invalid digit found in string"]);
        let inner = err.source().unwrap();
        assert!(inner.downcast_ref::<std::num::ParseIntError>().is_some());
    }

    #[test]
    fn error_is_matches_wrapped_links() {
        let err = ErrorValue::new(Outer {
            inner: parse_error(),
        });
        assert!(err.is(&ErrorValue::new(parse_error())));
        assert!(err.is(&ErrorValue::msg("outer failure")));
        assert!(!err.is(&ErrorValue::msg("something else")));
    }

    #[test]
    fn human_form() {
        assert_eq!(Value::from(123).to_string(), "123");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        let record = Record::new("Point").field("x", 1).field("y", "a");
        assert_eq!(Value::Record(record).to_string(), "Point { x: 1, y: a }");
        assert_eq!(Value::Record(Record::new("Unit")).to_string(), "Unit");
    }

    #[test]
    fn capacity_is_preserved_from_vec() {
        let mut v: Vec<i32> = Vec::with_capacity(16);
        v.extend([1, 2, 3]);
        let value = Value::from(v);
        assert_eq!(value.len(), Some(3));
        assert_eq!(value.capacity(), Some(16));
        assert_eq!(Value::from("abc").capacity(), None);
    }

    #[test]
    fn nullable_kinds() {
        assert!(Value::Null.is_nullable());
        assert!(Value::from(vec![1]).is_nullable());
        assert!(!Value::from(1).is_nullable());
        assert!(!Value::from("a").is_nullable());
    }
}
