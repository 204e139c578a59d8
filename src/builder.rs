//! Tokenizer configuration (spec §6, "Construction").
//!
//! Shaped after `csv_core::ReaderBuilder`: a consuming builder with one
//! setter per configurable code point or policy flag, finished off by
//! [`TokenizerBuilder::build`].

use crate::tokenizer::Tokenizer;

/// Builds a [`Tokenizer`]. Defaults: comma delimiter, no quote character,
/// no comment character, `fill_extra_cols` off, both whitespace-stripping
/// policies off — the same "do nothing extra" defaults `csv_core` uses.
#[derive(Debug, Clone)]
pub struct TokenizerBuilder {
    delimiter: u32,
    comment: Option<u32>,
    quote: Option<u32>,
    fill_extra_cols: bool,
    strip_whitespace_lines: bool,
    strip_whitespace_fields: bool,
}

impl TokenizerBuilder {
    pub fn new() -> Self {
        TokenizerBuilder {
            delimiter: ',' as u32,
            comment: None,
            quote: None,
            fill_extra_cols: false,
            strip_whitespace_lines: false,
            strip_whitespace_fields: false,
        }
    }

    /// Sets the field delimiter. Defaults to `,`.
    pub fn delimiter(mut self, c: char) -> Self {
        self.delimiter = c as u32;
        self
    }

    /// Sets the comment character; a line opening with it (after any
    /// skipped leading whitespace) is discarded. Unset by default, meaning
    /// no comment character is recognized.
    pub fn comment(mut self, c: char) -> Self {
        self.comment = Some(c as u32);
        self
    }

    /// Clears the comment character, equivalent to the spec's `comment==0`.
    pub fn no_comment(mut self) -> Self {
        self.comment = None;
        self
    }

    /// Sets the quote character. Unset by default, meaning quoting is
    /// disabled entirely.
    pub fn quote(mut self, c: char) -> Self {
        self.quote = Some(c as u32);
        self
    }

    /// Clears the quote character, equivalent to the spec's `quote==0`.
    pub fn no_quote(mut self) -> Self {
        self.quote = None;
        self
    }

    /// When set, short data rows are padded with empty fields instead of
    /// raising [`crate::TokenizeError::NotEnoughCols`].
    pub fn fill_extra_cols(mut self, yes: bool) -> Self {
        self.fill_extra_cols = yes;
        self
    }

    /// When set, leading whitespace at the start of a line (and before a
    /// non-whitespace delimiter's trailing empty field) is skipped rather
    /// than treated as content.
    pub fn strip_whitespace_lines(mut self, yes: bool) -> Self {
        self.strip_whitespace_lines = yes;
        self
    }

    /// When set, leading and trailing whitespace within each unquoted field
    /// is stripped. Never touches bytes inside a quoted region.
    pub fn strip_whitespace_fields(mut self, yes: bool) -> Self {
        self.strip_whitespace_fields = yes;
        self
    }

    pub fn build(self) -> Tokenizer {
        Tokenizer::from_builder(
            self.delimiter,
            self.comment,
            self.quote,
            self.fill_extra_cols,
            self.strip_whitespace_lines,
            self.strip_whitespace_fields,
        )
    }
}

impl Default for TokenizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
