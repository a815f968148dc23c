//! Shorthands for evaluating single catalogue entries in unit tests.

use testpredicate_value::Value;

use crate::context::{Context, ContextValue};
use crate::outcome::Outcome;
use crate::predicate::{Predicate, Terminal, Transformation};

pub(crate) fn chain(transformations: Vec<Transformation>, terminal: Terminal) -> Predicate {
    let mut p = Predicate::new();
    for t in transformations {
        p.register_transformation(t);
    }
    p.register_predicate(terminal);
    p
}

pub(crate) fn evaluate(terminal: Terminal, v: impl Into<Value>) -> (Outcome, Context) {
    chain(Vec::new(), terminal).evaluate(v.into())
}

pub(crate) fn check(terminal: Terminal, v: impl Into<Value>) -> Outcome {
    evaluate(terminal, v).0
}

pub(crate) fn error_message(terminal: Terminal, v: impl Into<Value>) -> Option<String> {
    let (_, ctx) = evaluate(terminal, v);
    entry(&ctx, "error").map(|c| c.value.to_string())
}

pub(crate) fn entry<'a>(ctx: &'a [ContextValue], name: &str) -> Option<&'a ContextValue> {
    ctx.iter().find(|c| c.name == name)
}

/// Terminal passing whatever its subject is, for testing transformations.
pub(crate) fn anything() -> Terminal {
    Terminal::new("{}", |_, _| Ok(true))
}

/// Apply a single transformation and return the transformed subject.
pub(crate) fn transform(t: Transformation, v: impl Into<Value>) -> Result<Value, String> {
    let mut ctx = Context::new();
    (t.func)(v.into(), &mut ctx).map_err(|e| e.to_string())
}
