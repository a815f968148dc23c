use testpredicate_value::field as extract;

use crate::context::ContextValue;
use crate::predicate::Transformation;

/// Replace the subject by the value found at the dot-separated `keypath`.
///
/// Steps go through record fields, niladic methods and map keys; a
/// sequence broadcasts the rest of the path over its elements. A step that
/// resolves to nothing yields null rather than an error, so that the
/// following predicate reports the mismatch.
pub fn field(keypath: &str) -> Transformation {
    let keypath = keypath.to_string();
    Transformation::new(format!("{{}}.{}", keypath), move |v, ctx| {
        let r = extract(&v, &keypath);
        ctx.push(ContextValue::new(format!("$.{}", keypath), r.clone()));
        Ok(r)
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
