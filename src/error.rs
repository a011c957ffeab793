//! Flat error tags for the compile and match pipelines.
//!
//! Kept as a flat enum rather than a hierarchy on purpose: callers need to
//! branch on *which* thing went wrong, not on how the error is nested.

use thiserror::Error;

/// Everything that can go wrong while turning a pattern into a [`crate::Matcher`].
///
/// Every variant here corresponds to one of the tags in the reference
/// design's error-handling section. None of these are fatal to the
/// process: a caller can always try again with a different pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The pattern was empty (the reference design treats null and empty
    /// patterns as the same condition; this crate has no null pointers, so
    /// only emptiness applies).
    #[error("pattern is empty")]
    PatternEmptyOrNull,

    /// The pattern exceeded [`crate::MAX_PATTERN_LEN`] bytes.
    #[error("pattern exceeds the {} byte limit", crate::MAX_PATTERN_LEN)]
    PatternTooLong,

    /// The pattern contained a byte outside printable ASCII (32..=126).
    #[error("pattern contains a non-printable byte")]
    PatternNonPrintableByte,

    /// A bracket expression was present but its contents were not one of
    /// the four recognized shorthands (`[0-9]`, `[a-z]`, `[A-Z]`, `[a-zA-Z]`).
    #[error("bracket expression is not a recognized character class")]
    PatternBadClassRange,

    /// A `(` was never closed, or a `)` had no matching `(`.
    #[error("unmatched parenthesis")]
    PatternUnmatchedParen,

    /// An operator (`|`, `*`, `+`, `?`) had no operand to apply to. Surfaces
    /// as a malformed fragment stack at the end of NFA construction.
    #[error("operator with no operand")]
    PatternTrailingOperator,

    /// The pattern ended with a bare `\` and no byte to escape.
    #[error("escape character at end of pattern")]
    PatternEscapeAtEndOfInput,
}

/// Everything that can go wrong while matching against a compiled [`crate::Matcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Either the target text was empty, or the matcher was already in an
    /// error state from a failed compile.
    #[error("invalid match input (empty text or matcher in error state)")]
    InvalidInput,
}
