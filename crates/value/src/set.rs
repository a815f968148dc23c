//! Sets of heterogeneous values.
//!
//! Membership uses strict identity: `1i32`, `1i64` and `1.0` are three
//! distinct members even though the lenient comparator finds them equal.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::compare::deep_equal;
use crate::error::ValueError;
use crate::sequence::SeqView;
use crate::value::Value;

/// An insertion-ordered set of values.
#[derive(Clone, Default)]
pub struct Set {
    members: Vec<Value>,
    index: HashSet<Member>,
}

impl Set {
    pub fn new() -> Self {
        Set::default()
    }

    /// Collect the elements of a string, byte buffer or sequence.
    pub fn from_value(v: &Value) -> Result<Set, ValueError> {
        let view = SeqView::of(v).ok_or_else(|| ValueError::NotIndexable {
            type_name: v.type_name(),
        })?;
        Ok(view.iter().map(|item| item.into_owned()).collect())
    }

    /// Insert `v`, returning whether it was not already a member.
    pub fn insert(&mut self, v: Value) -> bool {
        if self.index.insert(Member(v.clone())) {
            self.members.push(v);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, v: &Value) -> bool {
        self.index.contains(&Member(v.clone()))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.members.iter()
    }

    pub fn union(&self, other: &Set) -> Set {
        self.iter().chain(other.iter()).cloned().collect()
    }

    pub fn minus(&self, other: &Set) -> Set {
        self.iter().filter(|v| !other.contains(v)).cloned().collect()
    }

    pub fn intersect(&self, other: &Set) -> Set {
        self.iter().filter(|v| other.contains(v)).cloned().collect()
    }
}

impl FromIterator<Value> for Set {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = Set::new();
        for v in iter {
            set.insert(v);
        }
        set
    }
}

impl IntoIterator for Set {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl std::fmt::Debug for Set {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.members.iter()).finish()
    }
}

// ──────────────────────────────────────────────
// Identity hashing
// ──────────────────────────────────────────────

/// Hash key with the same notion of equality as [`deep_equal`].
#[derive(Clone)]
struct Member(Value);

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(&self.0, &other.0)
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

fn hash_value<H: Hasher>(v: &Value, state: &mut H) {
    v.kind().hash(state);
    match v {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Int(n, kind) => {
            kind.hash(state);
            n.hash(state);
        }
        Value::UInt(n, kind) => {
            kind.hash(state);
            n.hash(state);
        }
        Value::Float(x, kind) => {
            kind.hash(state);
            // 0.0 and -0.0 are equal, so they must hash alike.
            let bits = if *x == 0.0 { 0 } else { x.to_bits() };
            bits.hash(state);
        }
        Value::String(s) => s.hash(state),
        Value::Bytes(b) => b.hash(state),
        Value::Time(t) => t.hash(state),
        Value::Seq(items, _) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        // Entry order does not affect equality.
        Value::Map(entries) => entries.len().hash(state),
        Value::Record(record) => {
            record.name().hash(state);
            for (name, field) in record.fields() {
                name.hash(state);
                hash_value(field, state);
            }
        }
        Value::Error(err) => {
            err.type_name().hash(state);
            err.message().hash(state);
        }
        Value::Func(_) => {}
        Value::Opaque(opaque) => {
            opaque.tag().hash(state);
            opaque.repr().hash(state);
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
