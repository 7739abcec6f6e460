use std::fmt;

/// A problem found while rewriting, written into the file as an XML comment
/// directly above the offending line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A `definition` field with no English text
    MissingSourceValue,
    /// The provider dropped the sentinel of the n-th protected span
    MissingProtectedToken(usize),
    /// The emitted line has mismatched `{}`, `[]` or `()`
    UnbalancedBrackets,
}

impl Diagnostic {
    /// Start of every diagnostic comment line
    pub const COMMENT_PREFIX: &'static str = "<!-- ERROR: ";

    pub fn to_comment(&self) -> String {
        format!("{}{} -->", Self::COMMENT_PREFIX, self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingSourceValue => write!(f, "Missing definition."),
            Diagnostic::MissingProtectedToken(index) => write!(f, "Missing link #{}.", index),
            Diagnostic::UnbalancedBrackets => write!(f, "Mismatched brackets."),
        }
    }
}
