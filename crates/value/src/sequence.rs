//! Indexable sequences: strings (as bytes), byte buffers and value lists.

use std::borrow::Cow;
use std::ops::Range;

use crate::compare::compare_unordered;
use crate::error::ValueError;
use crate::value::{UIntKind, Value};

/// Borrowed, indexable view over a sequence-like value.
#[derive(Debug, Clone, Copy)]
pub enum SeqView<'a> {
    Values(&'a [Value]),
    Bytes(&'a [u8]),
}

impl<'a> SeqView<'a> {
    /// View strings, byte buffers and sequences; `None` for anything else.
    pub fn of(v: &'a Value) -> Option<SeqView<'a>> {
        match v {
            Value::String(s) => Some(SeqView::Bytes(s.as_bytes())),
            Value::Bytes(b) => Some(SeqView::Bytes(b)),
            Value::Seq(items, _) => Some(SeqView::Values(items)),
            _ => None,
        }
    }

    /// Like [`SeqView::of`], failing with a "not a sequence" error.
    pub fn require(v: &'a Value) -> Result<SeqView<'a>, ValueError> {
        SeqView::of(v).ok_or_else(|| ValueError::NotSequence {
            type_name: v.type_name(),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            SeqView::Values(items) => items.len(),
            SeqView::Bytes(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `i`; bytes are surfaced as `u8` values.
    pub fn get(&self, i: usize) -> Option<Cow<'a, Value>> {
        match self {
            SeqView::Values(items) => items.get(i).map(Cow::Borrowed),
            SeqView::Bytes(bytes) => bytes
                .get(i)
                .map(|b| Cow::Owned(Value::UInt(*b as u64, UIntKind::U8))),
        }
    }

    /// Sub-view over `range`; empty when the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> SeqView<'a> {
        match self {
            SeqView::Values(items) => SeqView::Values(items.get(range).unwrap_or(&[])),
            SeqView::Bytes(bytes) => SeqView::Bytes(bytes.get(range).unwrap_or(&[])),
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Cow<'a, Value>> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

pub fn is_sequence(v: &Value) -> bool {
    SeqView::of(v).is_some()
}

/// Index of the first occurrence of `sub` in `seq`, comparing elements with
/// the lenient unordered comparator. Elements that cannot be compared are
/// treated as different.
pub fn index_of_subsequence(seq: &SeqView<'_>, sub: &SeqView<'_>) -> Option<usize> {
    let (n, m) = (seq.len(), sub.len());
    if m > n {
        return None;
    }
    (0..=n - m).find(|&i| {
        (0..m).all(|j| match (seq.get(i + j), sub.get(j)) {
            (Some(a), Some(b)) => compare_unordered(&a, &b).unwrap_or(false),
            _ => false,
        })
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
