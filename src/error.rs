//! Error types returned by the tokenizer and by the numeric conversion helpers.
//!
//! The two error enums are kept separate because they belong to different
//! phases of use: [`TokenizeError`] is returned by [`crate::Tokenizer::tokenize`]
//! and also recorded on the instance; [`ConversionError`] is returned directly
//! by [`crate::to_long`]/[`crate::to_double`], whose callers (a type-inference
//! policy trying int, then double, then string) need a fresh result per
//! attempt rather than a slot they must remember to clear.

use thiserror::Error;

/// Error produced by a [`crate::Tokenizer::tokenize`] pass.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// Header mode was requested but the source ended before `skip_rows`
    /// complete lines were consumed.
    #[error("source ended before skip_rows lines were consumed")]
    InvalidLine,
    /// A data row produced more non-excluded fields than `num_cols`, or
    /// referenced a real column index beyond `use_cols`.
    #[error("row has more fields than num_cols")]
    TooManyCols,
    /// A data row finished with fewer included fields than `num_cols` and
    /// `fill_extra_cols` was false.
    #[error("row has fewer fields than num_cols")]
    NotEnoughCols,
}

/// Error produced by [`crate::to_long`] / [`crate::to_double`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    /// The parse consumed zero bytes, or did not consume the entire field.
    #[error("value is not a complete number")]
    Syntax,
    /// The value parsed but is outside the representable range.
    #[error("value is out of range")]
    Overflow,
}

/// The error last recorded on a [`crate::Tokenizer`] instance, mirroring the
/// C-style error-code slot from the spec this crate implements. Only
/// tokenize-phase errors are recorded here: [`crate::to_long`]/[`crate::to_double`]
/// are free functions with no instance to write through, so they report
/// purely through their `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastError {
    NoError,
    Tokenize(TokenizeError),
}

impl Default for LastError {
    fn default() -> Self {
        LastError::NoError
    }
}
