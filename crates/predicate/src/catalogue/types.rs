use std::fmt;

use testpredicate_value::{short_type_name, Kind, SeqView, Value};

use crate::context::ContextValue;
use crate::predicate::Terminal;

/// Group of kinds sharing a behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Integers and floats.
    Numeric,
    Integer,
    /// Strings, byte buffers and sequences.
    Sequence,
    Map,
    /// Kinds that have a null state.
    Nullable,
    Callable,
    Error,
    /// Kinds the ordered comparator accepts.
    Ordered,
}

impl Capability {
    fn satisfied_by(self, v: &Value) -> bool {
        match self {
            Capability::Numeric => matches!(v.kind(), Kind::Int | Kind::UInt | Kind::Float),
            Capability::Integer => matches!(v.kind(), Kind::Int | Kind::UInt),
            Capability::Sequence => SeqView::of(v).is_some(),
            Capability::Map => v.kind() == Kind::Map,
            Capability::Nullable => v.is_nullable(),
            Capability::Callable => v.kind() == Kind::Func,
            Capability::Error => v.kind() == Kind::Error,
            Capability::Ordered => matches!(
                v.kind(),
                Kind::Int
                    | Kind::UInt
                    | Kind::Float
                    | Kind::String
                    | Kind::Bytes
                    | Kind::Time
                    | Kind::Seq
            ),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::Numeric => "numeric value",
            Capability::Integer => "integer",
            Capability::Sequence => "sequence",
            Capability::Map => "map",
            Capability::Nullable => "nullable value",
            Capability::Callable => "callable value",
            Capability::Error => "error value",
            Capability::Ordered => "ordered value",
        };
        f.write_str(s)
    }
}

/// Target of [`is_a`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Exact runtime type name, as in diagnostics (`i32`, `[string]`, `User`).
    Named(String),
    Kind(Kind),
    Capability(Capability),
}

impl TypeDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named(name.into())
    }

    /// The runtime type name a `T` converts to.
    ///
    /// Strings map to `string` and vectors and slices to `[T]`; other
    /// types keep their short Rust name, which is also the name of records
    /// serialized from structs.
    pub fn of<T: ?Sized>() -> Self {
        TypeDescriptor::Named(value_type_name(&short_type_name::<T>()))
    }

    fn matches(&self, v: &Value) -> bool {
        if v.is_null() {
            return false;
        }
        match self {
            TypeDescriptor::Named(name) => v.type_name() == *name,
            TypeDescriptor::Kind(kind) => v.kind() == *kind,
            TypeDescriptor::Capability(cap) => cap.satisfied_by(v),
        }
    }
}

fn value_type_name(rust_name: &str) -> String {
    let name = rust_name.trim_start_matches('&');
    if matches!(name, "String" | "str") {
        return "string".to_string();
    }
    let element = name
        .strip_prefix("Vec<")
        .and_then(|s| s.strip_suffix('>'))
        .or_else(|| name.strip_prefix('[').and_then(|s| s.strip_suffix(']')));
    match element {
        Some(inner) => format!("[{}]", value_type_name(inner)),
        None => name.to_string(),
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Named(name) => f.write_str(name),
            TypeDescriptor::Kind(kind) => write!(f, "{}", kind),
            TypeDescriptor::Capability(cap) => write!(f, "{}", cap),
        }
    }
}

impl From<Kind> for TypeDescriptor {
    fn from(kind: Kind) -> Self {
        TypeDescriptor::Kind(kind)
    }
}

impl From<Capability> for TypeDescriptor {
    fn from(cap: Capability) -> Self {
        TypeDescriptor::Capability(cap)
    }
}

impl From<&str> for TypeDescriptor {
    fn from(name: &str) -> Self {
        TypeDescriptor::named(name)
    }
}

/// Passes if the subject has the described type. Null has no type and
/// never passes. On failure the subject's type is recorded as `type`.
pub fn is_a(target: impl Into<TypeDescriptor>) -> Terminal {
    let target = target.into();
    Terminal::new(format!("{{}} is a {}", target), move |v, ctx| {
        let r = target.matches(v);
        if !r {
            ctx.push(ContextValue::preformatted("type", v.type_name()));
        }
        Ok(r)
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::testing::{check, entry, evaluate};
    use crate::outcome::Outcome;
    use testpredicate_value::Record;

    struct User;

    #[test]
    fn named_types() {
        assert_eq!(check(is_a(TypeDescriptor::of::<i32>()), 3), Outcome::Passed);
        assert_eq!(check(is_a(TypeDescriptor::of::<i64>()), 3), Outcome::Failed);
        assert_eq!(check(is_a(TypeDescriptor::of::<String>()), "x"), Outcome::Passed);
        assert_eq!(check(is_a(TypeDescriptor::of::<&str>()), "x"), Outcome::Passed);
        assert_eq!(
            check(is_a(TypeDescriptor::of::<Vec<String>>()), vec!["a"]),
            Outcome::Passed
        );
        assert_eq!(
            check(is_a(TypeDescriptor::of::<User>()), Record::new("User")),
            Outcome::Passed
        );
    }

    #[test]
    fn kinds_and_capabilities() {
        assert_eq!(check(is_a(Kind::Int), 3i8), Outcome::Passed);
        assert_eq!(check(is_a(Kind::Int), 3u8), Outcome::Failed);
        assert_eq!(check(is_a(Capability::Numeric), 3u8), Outcome::Passed);
        assert_eq!(check(is_a(Capability::Sequence), "abc"), Outcome::Passed);
        assert_eq!(check(is_a(Capability::Ordered), true), Outcome::Failed);
        assert_eq!(check(is_a(Capability::Callable), Value::callable(|| {})), Outcome::Passed);
        assert_eq!(check(is_a(Capability::Nullable), Value::Null), Outcome::Failed);
    }

    #[test]
    fn failure_records_the_actual_type() {
        let (outcome, ctx) = evaluate(is_a("u64"), vec![1.5]);
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(ctx[0].value.to_string(), "value is a u64");
        assert_eq!(
            entry(&ctx, "type").map(|c| c.value.clone()),
            Some(Value::from("[f64]"))
        );
    }

    #[test]
    fn descriptions() {
        assert_eq!(is_a(Capability::Integer).description, "{} is a integer");
        assert_eq!(is_a(Kind::Map).description, "{} is a map");
    }
}
