//! Quantifiers applying a nested predicate to the elements of a sequence
//! or to the keys or values of a map.
//!
//! The context of the first offending element is kept, minus its
//! `expected` entry, with every name suffixed by the element's position:
//! `value @(2)`, or `value @(2,0)` when quantifiers nest.

use testpredicate_prettyprint::format_value;
use testpredicate_value::{SeqView, Value};

use crate::context::{Context, ContextValue};
use crate::error::PredicateError;
use crate::outcome::Outcome;
use crate::predicate::{Predicate, Terminal};

struct Element {
    /// Position inside `@(...)`.
    label: String,
    /// How the element is named in notes and errors.
    name: String,
    value: Value,
}

fn sequence_elements(v: &Value) -> Result<Vec<Element>, PredicateError> {
    let view = match v {
        Value::String(_) => None,
        _ => SeqView::of(v),
    };
    let view = view.ok_or_else(|| PredicateError::NotCollection {
        type_name: v.type_name(),
    })?;
    Ok(view
        .iter()
        .enumerate()
        .map(|(i, item)| Element {
            label: i.to_string(),
            name: format!("value[{}]", i),
            value: item.into_owned(),
        })
        .collect())
}

enum MapPart {
    Keys,
    Values,
}

fn map_elements(v: &Value, part: MapPart) -> Result<Vec<Element>, PredicateError> {
    let Value::Map(entries) = v else {
        return Err(PredicateError::NotMap {
            type_name: v.type_name(),
        });
    };
    Ok(entries
        .iter()
        .map(|(k, val)| {
            let key = format_value(k);
            match part {
                MapPart::Keys => Element {
                    name: format!("key {}", key),
                    label: key,
                    value: k.clone(),
                },
                MapPart::Values => Element {
                    name: format!("value[{}]", key),
                    label: key,
                    value: val.clone(),
                },
            }
        })
        .collect())
}

/// Prefix `index` to the position of a context entry name.
///
/// The existing position runs to the final `)`, so rendered map keys that
/// contain parentheses or commas stay intact.
fn scoped_name(name: &str, index: &str) -> String {
    if let Some(i) = name.find(" @(").filter(|_| name.ends_with(')')) {
        let inner = &name[i + 3..name.len() - 1];
        return format!("{} @({},{})", &name[..i], index, inner);
    }
    format!("{} @({})", name, index)
}

fn scoped(ctx: Context, index: &str) -> impl Iterator<Item = ContextValue> + '_ {
    ctx.into_iter()
        .filter(|c| c.name != "expected")
        .map(move |mut c| {
            c.name = scoped_name(&c.name, index);
            c
        })
}

fn every(p: &Predicate, elements: Vec<Element>, ctx: &mut Context) -> Result<bool, PredicateError> {
    for e in elements {
        let (outcome, sub) = p.evaluate(e.value);
        match outcome {
            Outcome::Passed => {}
            Outcome::Failed => {
                ctx.extend(scoped(sub, &e.label));
                return Ok(false);
            }
            Outcome::Invalid => {
                ctx.extend(scoped(sub, &e.label));
                return Err(PredicateError::InvalidElement { element: e.name });
            }
        }
    }
    Ok(true)
}

fn some(p: &Predicate, elements: Vec<Element>, ctx: &mut Context) -> Result<bool, PredicateError> {
    let mut first_failure: Option<Context> = None;
    for e in elements {
        let shown = format_value(&e.value);
        let (outcome, sub) = p.evaluate(e.value);
        match outcome {
            Outcome::Passed => {
                ctx.push(ContextValue::preformatted(
                    "note",
                    format!("passed for {}: {}", e.name, shown),
                ));
                return Ok(true);
            }
            Outcome::Failed => {
                if first_failure.is_none() {
                    first_failure = Some(scoped(sub, &e.label).collect());
                }
            }
            Outcome::Invalid => {
                ctx.extend(scoped(sub, &e.label));
                return Err(PredicateError::InvalidElement { element: e.name });
            }
        }
    }
    ctx.extend(first_failure.unwrap_or_default());
    Ok(false)
}

// ──────────────────────────────────────────────
// Sequences
// ──────────────────────────────────────────────

/// Passes if every element of a sequence or byte buffer passes `p`.
/// An empty collection passes.
pub fn all(p: Predicate) -> Terminal {
    Terminal::new(format!("∀ x ∈ {{}}, {}", p.describe("x")), move |v, ctx| {
        every(&p, sequence_elements(v)?, ctx)
    })
}

/// Passes as soon as one element passes `p`. Otherwise the context of the
/// first failing element is reported.
pub fn any(p: Predicate) -> Terminal {
    Terminal::new(format!("∃ x ∈ {{}}, {}", p.describe("x")), move |v, ctx| {
        some(&p, sequence_elements(v)?, ctx)
    })
}

// ──────────────────────────────────────────────
// Maps
// ──────────────────────────────────────────────

pub fn all_keys(p: Predicate) -> Terminal {
    Terminal::new(
        format!("∀ k ∈ keys({{}}), {}", p.describe("k")),
        move |v, ctx| every(&p, map_elements(v, MapPart::Keys)?, ctx),
    )
}

pub fn any_key(p: Predicate) -> Terminal {
    Terminal::new(
        format!("∃ k ∈ keys({{}}), {}", p.describe("k")),
        move |v, ctx| some(&p, map_elements(v, MapPart::Keys)?, ctx),
    )
}

pub fn all_values(p: Predicate) -> Terminal {
    Terminal::new(
        format!("∀ v ∈ values({{}}), {}", p.describe("v")),
        move |v, ctx| every(&p, map_elements(v, MapPart::Values)?, ctx),
    )
}

pub fn any_value(p: Predicate) -> Terminal {
    Terminal::new(
        format!("∃ v ∈ values({{}}), {}", p.describe("v")),
        move |v, ctx| some(&p, map_elements(v, MapPart::Values)?, ctx),
    )
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
