use std::any::Any;
use std::cell::Cell;
use std::panic::{self, catch_unwind, AssertUnwindSafe};

use once_cell::sync::OnceCell;
use testpredicate_value::{Callable, Opaque, Value};
use tracing::trace;

use crate::context::ContextValue;
use crate::error::PredicateError;
use crate::predicate::{Terminal, Transformation};

/// How a guarded call ended.
enum Termination {
    Returned,
    /// Panicked with `()` as payload.
    EmptyPanic,
    Panicked(Value),
}

fn callable(v: &Value) -> Result<&Callable, PredicateError> {
    match v {
        Value::Func(f) => Ok(f),
        _ => Err(PredicateError::NotCallable {
            type_name: v.type_name(),
        }),
    }
}

thread_local! {
    static GUARDED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: OnceCell<()> = OnceCell::new();

/// Wrap the process panic hook once so that panics raised inside a guarded
/// call on the current thread print nothing. Every other panic still goes
/// to the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !GUARDED.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

fn guarded_call(f: &Callable) -> Termination {
    install_quiet_hook();
    let outer = GUARDED.with(|g| g.replace(true));
    let result = catch_unwind(AssertUnwindSafe(|| f.call()));
    GUARDED.with(|g| g.set(outer));
    match result {
        Ok(()) => Termination::Returned,
        Err(payload) => {
            let termination = match payload_value(payload) {
                Some(v) => Termination::Panicked(v),
                None => Termination::EmptyPanic,
            };
            trace!(target: "testpredicate", "captured panic from subject");
            termination
        }
    }
}

/// Lower a panic payload. `None` for the `()` payload.
fn payload_value(payload: Box<dyn Any + Send>) -> Option<Value> {
    if payload.is::<()>() {
        return None;
    }
    let payload = match payload.downcast::<&'static str>() {
        Ok(s) => return Some(Value::from(*s)),
        Err(p) => p,
    };
    let payload = match payload.downcast::<String>() {
        Ok(s) => return Some(Value::String(*s)),
        Err(p) => p,
    };
    Some(Value::Opaque(Opaque::from_any(
        "Box<dyn Any>",
        "Box<dyn Any>",
        payload,
    )))
}

/// Passes if calling the subject panics.
///
/// A panic carrying `()` cannot be told apart from other panics by
/// callers, so it makes the evaluation invalid.
pub fn panics() -> Terminal {
    Terminal::new("{}() panics", |v, _| match guarded_call(callable(v)?) {
        Termination::Returned => Ok(false),
        Termination::EmptyPanic => Err(PredicateError::EmptyPanic),
        Termination::Panicked(_) => Ok(true),
    })
}

/// Call the subject and continue with its panic payload. `()` payloads
/// become null; a call that returns is an error.
pub fn panics_and_recovered_value() -> Transformation {
    Transformation::new("recover({}())", |v, ctx| {
        let recovered = match guarded_call(callable(&v)?) {
            Termination::Returned => return Err(PredicateError::DidNotPanic),
            Termination::EmptyPanic => Value::Null,
            Termination::Panicked(payload) => payload,
        };
        ctx.push(ContextValue::new("recovered", recovered.clone()));
        Ok(recovered)
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
