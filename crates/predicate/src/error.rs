use testpredicate_value::ValueError;
use thiserror::Error;

/// Why a transformation or terminal could not be applied.
///
/// The message of every variant ends up on the `error:` line of a failure
/// report, so variants carry the runtime type names involved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredicateError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("value of type '{type_name}' is never {expected}")]
    NeverBool { type_name: String, expected: bool },

    #[error("value of type '{type_name}' is never nil")]
    NeverNil { type_name: String },

    #[error("value of type '{type_name}' can never be nil")]
    CanNeverBeNil { type_name: String },

    #[error("value of type '{type_name}' does not have a {property}")]
    NoProperty {
        type_name: String,
        property: &'static str,
    },

    #[error("value of type '{type_name}' cannot be tested for emptiness")]
    NoEmptiness { type_name: String },

    #[error("sequence of length {len} is too short to contain a subsequence of length {sub_len}")]
    TooShort { len: usize, sub_len: usize },

    #[error("value of type '{type_name}' cannot be matched against a regexp")]
    NotMatchable { type_name: String },

    #[error("failed to compile regexp: {0}")]
    Regex(#[from] regex::Error),

    #[error("value of type '{type_name}' cannot be transformed to {case}")]
    NotCaseConvertible {
        type_name: String,
        case: &'static str,
    },

    #[error("value of type '{type_name}' does not have {part}")]
    NoMapPart {
        type_name: String,
        part: &'static str,
    },

    #[error("value of type '{type_name}' is not a collection")]
    NotCollection { type_name: String },

    #[error("value of type '{type_name}' is not a map")]
    NotMap { type_name: String },

    #[error("sub-predicate is invalid for {element}")]
    InvalidElement { element: String },

    #[error("value of type '{type_name}' is not callable")]
    NotCallable { type_name: String },

    #[error("value() did not panic")]
    DidNotPanic,

    #[error("value() panicked without a payload")]
    EmptyPanic,

    #[error("value of type '{type_name}' is not an error")]
    NotError { type_name: String },

    #[error("value of type '{type_name}' is not a '{target}'")]
    NotErrorOf { type_name: String, target: String },

    #[error("invalid argument of type '{type_name}' for 'IsError()' predicate")]
    InvalidIsErrorArgument { type_name: String },

    #[error("error target must name an error type")]
    EmptyErrorTarget,

    #[error("predicate chain does not evaluate anything")]
    Incomplete,

    #[error("{message}")]
    Custom { message: String },
}

/// Broad category of a [`PredicateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The subject's runtime type does not support the predicate.
    TypeMismatch,
    /// Sequences of incompatible lengths or shapes.
    ShapeMismatch,
    /// Two values could not be compared.
    Uncomparable,
    /// An argument of the predicate itself is unusable.
    MalformedInput,
    /// A guarded callable did or did not panic when the other was needed.
    AbnormalTermination,
    /// The chain has no terminal.
    Incomplete,
    /// Raised by an extension predicate.
    Custom,
}

impl PredicateError {
    /// Error raised from an extension predicate or transformation.
    pub fn custom(message: impl Into<String>) -> Self {
        PredicateError::Custom {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PredicateError::Value(err) => value_error_kind(err),
            PredicateError::NeverBool { .. }
            | PredicateError::NeverNil { .. }
            | PredicateError::CanNeverBeNil { .. }
            | PredicateError::NoProperty { .. }
            | PredicateError::NoEmptiness { .. }
            | PredicateError::NotMatchable { .. }
            | PredicateError::NotCaseConvertible { .. }
            | PredicateError::NoMapPart { .. }
            | PredicateError::NotCollection { .. }
            | PredicateError::NotMap { .. }
            | PredicateError::NotCallable { .. }
            | PredicateError::NotError { .. }
            | PredicateError::NotErrorOf { .. } => ErrorKind::TypeMismatch,
            PredicateError::TooShort { .. } => ErrorKind::ShapeMismatch,
            PredicateError::InvalidElement { .. } => ErrorKind::Uncomparable,
            PredicateError::Regex(_)
            | PredicateError::InvalidIsErrorArgument { .. }
            | PredicateError::EmptyErrorTarget => ErrorKind::MalformedInput,
            PredicateError::DidNotPanic | PredicateError::EmptyPanic => {
                ErrorKind::AbnormalTermination
            }
            PredicateError::Incomplete => ErrorKind::Incomplete,
            PredicateError::Custom { .. } => ErrorKind::Custom,
        }
    }
}

fn value_error_kind(err: &ValueError) -> ErrorKind {
    match err {
        ValueError::LengthMismatch { .. } => ErrorKind::ShapeMismatch,
        ValueError::DifferenceAtIndex { source, .. } | ValueError::AtIndex { source, .. } => {
            value_error_kind(source)
        }
        ValueError::NotFloat { .. }
        | ValueError::NotSequence { .. }
        | ValueError::NotIndexable { .. } => ErrorKind::TypeMismatch,
        ValueError::NotOrderComparable { .. }
        | ValueError::NotOrderComparablePair { .. }
        | ValueError::NotANumber
        | ValueError::NeverEqual { .. } => ErrorKind::Uncomparable,
        ValueError::Conversion(_) => ErrorKind::MalformedInput,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_types() {
        let err = PredicateError::NeverBool {
            type_name: "i32".to_string(),
            expected: true,
        };
        assert_eq!(err.to_string(), "value of type 'i32' is never true");

        let err = PredicateError::NoProperty {
            type_name: "bool".to_string(),
            property: "length",
        };
        assert_eq!(err.to_string(), "value of type 'bool' does not have a length");
    }

    #[test]
    fn value_errors_are_transparent() {
        let err = PredicateError::from(ValueError::NotSequence {
            type_name: "i32".to_string(),
        });
        assert_eq!(err.to_string(), "value of type 'i32' is not a sequence");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn nested_value_errors_keep_their_category() {
        let err = PredicateError::from(ValueError::DifferenceAtIndex {
            index: 1,
            source: Box::new(ValueError::LengthMismatch { lhs: 1, rhs: 2 }),
        });
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        let err = PredicateError::from(ValueError::NeverEqual {
            lhs: "string".to_string(),
            rhs: "i32".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Uncomparable);
    }

    #[test]
    fn categories() {
        assert_eq!(PredicateError::DidNotPanic.kind(), ErrorKind::AbnormalTermination);
        assert_eq!(PredicateError::EmptyErrorTarget.kind(), ErrorKind::MalformedInput);
        assert_eq!(PredicateError::custom("x").kind(), ErrorKind::Custom);
        assert_eq!(PredicateError::Incomplete.kind(), ErrorKind::Incomplete);
    }
}
