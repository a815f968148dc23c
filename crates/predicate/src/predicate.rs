//! Predicate chains: zero or more transformations followed by a terminal.

use std::fmt;

use testpredicate_value::Value;
use tracing::debug;

use crate::context::{Context, ContextValue};
use crate::error::PredicateError;
use crate::outcome::Outcome;

/// Placeholder standing for the subject in description templates.
pub const PLACEHOLDER: &str = "{}";

pub type TransformFn = Box<dyn Fn(Value, &mut Context) -> Result<Value, PredicateError>>;
pub type PredicateFn = Box<dyn Fn(&Value, &mut Context) -> Result<bool, PredicateError>>;

/// Non-terminal stage of a chain: rewrites the subject.
pub struct Transformation {
    pub description: String,
    pub func: TransformFn,
}

impl Transformation {
    pub fn new(
        description: impl Into<String>,
        func: impl Fn(Value, &mut Context) -> Result<Value, PredicateError> + 'static,
    ) -> Self {
        Transformation {
            description: description.into(),
            func: Box::new(func),
        }
    }
}

/// Terminal stage of a chain: decides whether the subject passes.
pub struct Terminal {
    pub description: String,
    pub func: PredicateFn,
}

impl Terminal {
    pub fn new(
        description: impl Into<String>,
        func: impl Fn(&Value, &mut Context) -> Result<bool, PredicateError> + 'static,
    ) -> Self {
        Terminal {
            description: description.into(),
            func: Box::new(func),
        }
    }
}

/// A composed predicate chain.
///
/// Descriptions are templates where `{}` denotes the subject. The chain's
/// description substitutes inward from the terminal, so that transforms
/// `{}.String()` then `ToLower({})` under terminal `{} is empty` read
/// `ToLower(x.String()) is empty` for subject `x`.
#[derive(Default)]
pub struct Predicate {
    transformations: Vec<Transformation>,
    terminal: Option<Terminal>,
}

impl Predicate {
    pub fn new() -> Self {
        Predicate::default()
    }

    pub fn register_transformation(&mut self, transformation: Transformation) {
        self.transformations.push(transformation);
    }

    /// Install the terminal.
    ///
    /// # Panics
    ///
    /// If a terminal is already installed.
    pub fn register_predicate(&mut self, terminal: Terminal) {
        if self.terminal.is_some() {
            panic!("register_predicate() should only be called once per predicate");
        }
        self.terminal = Some(terminal);
    }

    pub fn is_complete(&self) -> bool {
        self.terminal.is_some()
    }

    /// Composed description of the chain applied to `subject`.
    pub fn describe(&self, subject: &str) -> String {
        let mut desc = self
            .terminal
            .as_ref()
            .map_or_else(|| PLACEHOLDER.to_string(), |t| t.description.clone());
        for t in self.transformations.iter().rev() {
            desc = desc.replacen(PLACEHOLDER, &t.description, 1);
        }
        desc.replacen(PLACEHOLDER, subject, 1)
    }

    /// Run the chain against `value`.
    ///
    /// The returned context always starts with `expected` (the description
    /// applied to `value`) and `value`, followed by whatever the stages
    /// recorded. The first error stops the chain and yields `Invalid`.
    ///
    /// The subject itself is moved into the chain; only the `value` entry
    /// is a clone.
    pub fn evaluate(&self, value: Value) -> (Outcome, Context) {
        let description = self.describe("value");
        let mut ctx = vec![
            ContextValue::preformatted("expected", description.as_str()),
            ContextValue::new("value", value.clone()),
        ];

        let outcome = self.run(value, &mut ctx);
        debug!(
            target: "testpredicate",
            description = %description,
            outcome = %outcome,
            "evaluated predicate chain"
        );
        (outcome, ctx)
    }

    fn run(&self, value: Value, ctx: &mut Context) -> Outcome {
        let Some(terminal) = &self.terminal else {
            ctx.push(ContextValue::error(PredicateError::Incomplete));
            return Outcome::Invalid;
        };

        let mut subject = value;
        for t in &self.transformations {
            match (t.func)(subject, ctx) {
                Ok(next) => subject = next,
                Err(err) => {
                    ctx.push(ContextValue::error(err));
                    return Outcome::Invalid;
                }
            }
        }

        match (terminal.func)(&subject, ctx) {
            Ok(passed) => Outcome::from_bool(passed),
            Err(err) => {
                ctx.push(ContextValue::error(err));
                Outcome::Invalid
            }
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("description", &self.describe("value"))
            .field("complete", &self.is_complete())
            .finish()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
