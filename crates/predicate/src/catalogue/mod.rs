//! Concrete transformations and terminals.
//!
//! Each entry returns a [`Transformation`](crate::Transformation) or a
//! [`Terminal`](crate::Terminal) carrying its description template; the
//! fluent builder registers them on a [`Predicate`](crate::Predicate).

pub mod collection;
pub mod compare;
pub mod errors;
pub mod ext;
pub mod field;
pub mod map;
pub mod ordered;
pub mod panic;
pub mod sequence;
pub mod set;
pub mod string;
pub mod types;

#[cfg(test)]
mod testing;

pub use collection::{all, all_keys, all_values, any, any_key, any_value};
pub use compare::{is_equal_to, is_false, is_nil, is_not_equal_to, is_not_nil, is_true};
pub use errors::{as_error, is_error, ErrorMatcher, ErrorTarget};
pub use ext::{eval, is, passes};
pub use field::field;
pub use map::{map_keys, map_values};
pub use ordered::{
    is_close_to, is_greater_or_equal_to, is_greater_than, is_less_or_equal_to, is_less_than,
};
pub use panic::{panics, panics_and_recovered_value};
pub use sequence::{capacity, contains, ends_with, is_empty, is_not_empty, length, starts_with};
pub use set::{format_set_values, is_disjoint_set_from, is_equal_set, is_subset_of, is_superset_of};
pub use string::{matches, to_lower, to_string, to_upper};
pub use types::{is_a, Capability, TypeDescriptor};
