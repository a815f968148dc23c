//! Dynamic value model for testpredicate.
//!
//! Every assertion subject is lowered into a [`Value`] before it flows
//! through a predicate chain. This crate owns that model together with the
//! lenient comparator used by equality and ordering predicates, the
//! sequence and set primitives, and keypath-based field extraction.
//!
//! Values are built either directly (`Value::from(3)`, [`Record::new`]) or
//! through the serde adapter [`to_value`], which keeps struct and variant
//! names so that diagnostics show them.

pub mod compare;
pub mod convert;
pub mod error;
pub mod field;
pub mod numeric;
pub mod ser;
pub mod sequence;
pub mod set;
mod source;
pub mod value;

pub use compare::{compare_ordered, compare_unordered, deep_equal, max_absolute_difference};
pub use error::ValueError;
pub use field::field;
pub use numeric::{as_float, as_int, as_uint};
pub use ser::to_value;
pub use sequence::SeqView;
pub use set::Set;
pub use value::{
    short_type_name, Callable, ErrorValue, FloatKind, IntKind, Kind, Opaque, Record, UIntKind,
    Value,
};
