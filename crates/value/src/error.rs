use thiserror::Error;

/// Errors produced by the value engine.
///
/// Messages are part of the diagnostic output shown to test authors, so
/// each variant renders a complete sentence naming the offending types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("values of type '{type_name}' are not order comparable")]
    NotOrderComparable { type_name: String },

    #[error("values of type '{lhs}' and '{rhs}' are not order comparable")]
    NotOrderComparablePair { lhs: String, rhs: String },

    #[error("NaN values are not order comparable")]
    NotANumber,

    #[error("values of type '{lhs}' and '{rhs}' are never equal")]
    NeverEqual { lhs: String, rhs: String },

    #[error("comparison of values at index {index} failed, {source}")]
    AtIndex {
        index: usize,
        source: Box<ValueError>,
    },

    #[error("value length ({lhs} and {rhs}) mismatched")]
    LengthMismatch { lhs: usize, rhs: usize },

    #[error("failed to compare values at index {index}, {source}")]
    DifferenceAtIndex {
        index: usize,
        source: Box<ValueError>,
    },

    #[error("value of type '{type_name}' cannot be converted to float")]
    NotFloat { type_name: String },

    #[error("value of type '{type_name}' is not a sequence")]
    NotSequence { type_name: String },

    #[error("value of type '{type_name}' is not an indexable collection")]
    NotIndexable { type_name: String },

    #[error("failed to convert value: {0}")]
    Conversion(String),
}

impl serde::ser::Error for ValueError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ValueError::Conversion(msg.to_string())
    }
}
