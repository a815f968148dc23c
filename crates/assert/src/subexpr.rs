//! Unbound chains, evaluated later by quantifiers and `passes`.

use testpredicate_predicate::{Predicate, Terminal, Transformation};

use crate::chain::Chain;

/// A chain with no subject. Its terminal methods return the [`Predicate`].
#[derive(Debug, Default)]
pub struct SubExpr {
    predicate: Predicate,
}

/// Start a sub-expression, as in `verify::that(t, v).all(subexpr::value().lt(10))`.
pub fn value() -> SubExpr {
    SubExpr::default()
}

impl Chain for SubExpr {
    type Output = Predicate;

    fn transform(mut self, transformation: Transformation) -> Self {
        self.predicate.register_transformation(transformation);
        self
    }

    fn terminate(mut self, terminal: Terminal) -> Predicate {
        self.predicate.register_predicate(terminal);
        self.predicate
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
