use std::fmt;

/// Three-valued result of evaluating a predicate chain.
///
/// `Invalid` means the chain could not be meaningfully applied to the
/// subject (type mismatch, malformed argument). It is never a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Passed,
    Failed,
    Invalid,
}

impl Outcome {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Outcome::Passed
        } else {
            Outcome::Failed
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Passed
    }

    /// Passed or Failed: the predicate applied to the subject.
    pub fn is_valid(self) -> bool {
        self != Outcome::Invalid
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
