//! The tokenizer state machine (spec §4.3): the core of this crate.
//!
//! Drives a source buffer code point by code point through seven states,
//! writing completed fields into per-column output buffers. Grounded on the
//! teacher's `CSVStreamParser` byte-state-machine in spirit (a code-point
//! classifying loop feeding an append-only output), rewired here to the
//! seven states and column-store semantics this crate targets.

use crate::buffer::ColumnBuffer;
use crate::codepoint::decode_utf8;
use crate::error::{LastError, TokenizeError};
use crate::iter::FieldIterator;

const NEWLINE: u32 = b'\n' as u32;

fn is_structural_whitespace(c: u32) -> bool {
    c == b' ' as u32 || c == b'\t' as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StartLine,
    StartField,
    StartQuotedField,
    Field,
    QuotedField,
    QuotedFieldNewline,
    Comment,
}

/// Byte-stream CSV/TSV tokenizer. Construct via [`Tokenizer::builder`].
///
/// The source buffer is never stored on the instance: each [`Self::tokenize`]
/// call borrows it only for the duration of the call, per the borrowed-source
/// design (see DESIGN.md). Output buffers and row/column bookkeeping persist
/// across calls until the next pass replaces them.
pub struct Tokenizer {
    pub(crate) delimiter: u32,
    pub(crate) comment: Option<u32>,
    pub(crate) quote: Option<u32>,
    pub(crate) fill_extra_cols: bool,
    pub(crate) strip_whitespace_lines: bool,
    pub(crate) strip_whitespace_fields: bool,
    num_cols: usize,
    num_rows: usize,
    header: ColumnBuffer,
    columns: Vec<ColumnBuffer>,
    last_error: LastError,
}

impl Tokenizer {
    /// Starts building a tokenizer with [`crate::TokenizerBuilder`].
    pub fn builder() -> crate::builder::TokenizerBuilder {
        crate::builder::TokenizerBuilder::new()
    }

    pub(crate) fn from_builder(
        delimiter: u32,
        comment: Option<u32>,
        quote: Option<u32>,
        fill_extra_cols: bool,
        strip_whitespace_lines: bool,
        strip_whitespace_fields: bool,
    ) -> Self {
        Tokenizer {
            delimiter,
            comment,
            quote,
            fill_extra_cols,
            strip_whitespace_lines,
            strip_whitespace_fields,
            num_cols: 0,
            num_rows: 0,
            header: ColumnBuffer::new(),
            columns: Vec::new(),
            last_error: LastError::NoError,
        }
    }

    /// Sets the declared number of output columns for the next data-mode
    /// pass. Typically set from the field count of a prior header pass.
    pub fn set_num_cols(&mut self, num_cols: usize) {
        self.num_cols = num_cols;
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of completed data rows from the most recent data-mode pass.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn last_error(&self) -> LastError {
        self.last_error
    }

    /// Reads successive fields out of the header buffer from the most
    /// recent header-mode pass.
    pub fn iter_header(&self) -> FieldIterator<'_> {
        self.header.iter()
    }

    /// Reads successive fields out of output column `col` from the most
    /// recent data-mode pass.
    pub fn iter_column(&self, col: usize) -> FieldIterator<'_> {
        self.columns[col].iter()
    }

    /// Runs one tokenize pass over `source` (spec §4.3).
    ///
    /// `use_cols[k]` nonzero means real column `k` is included in the
    /// output; `skip_rows` counts newlines to consume before parsing
    /// begins. In header mode the pass stops after one line; in data mode
    /// it runs until `source` is exhausted. By convention `source` should
    /// end with a trailing `\n` so the final record is always terminated.
    pub fn tokenize(
        &mut self,
        source: &[u8],
        header_mode: bool,
        use_cols: &[bool],
        skip_rows: usize,
    ) -> Result<(), TokenizeError> {
        self.header = ColumnBuffer::new();
        self.columns = if header_mode {
            Vec::new()
        } else {
            (0..self.num_cols).map(|_| ColumnBuffer::new()).collect()
        };
        self.num_rows = 0;

        let mut cursor = 0usize;
        let mut skipped = 0usize;
        while skipped < skip_rows {
            match source.get(cursor) {
                None => {
                    return if header_mode {
                        self.fail(TokenizeError::InvalidLine)
                    } else {
                        self.last_error = LastError::NoError;
                        Ok(())
                    };
                }
                Some(&b) => {
                    cursor += 1;
                    if b == b'\n' {
                        skipped += 1;
                    }
                }
            }
        }

        match self.run(source, cursor, header_mode, use_cols) {
            Ok(()) => {
                self.last_error = LastError::NoError;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, e: TokenizeError) -> Result<(), TokenizeError> {
        self.last_error = LastError::Tokenize(e);
        Err(e)
    }

    fn target_cursor(&self, header_mode: bool, col: usize) -> usize {
        if header_mode {
            self.header.cursor()
        } else {
            self.columns[col].cursor()
        }
    }

    fn push(&mut self, header_mode: bool, col: usize, field_included: bool, bytes: &[u8]) {
        if header_mode {
            self.header.push_bytes(bytes);
        } else if field_included {
            self.columns[col].push_bytes(bytes);
        }
    }

    /// Discards whatever has been written for the field in progress. Used
    /// when a comment character turns up mid-field (only reachable with
    /// both strip flags off): without this, the abandoned bytes would sit
    /// unterminated ahead of the next row's first field in the same column.
    fn discard_partial_field(
        &mut self,
        header_mode: bool,
        col: usize,
        field_included: bool,
        field_start_cursor: usize,
    ) {
        if header_mode {
            self.header.truncate_to(field_start_cursor);
        } else if field_included {
            self.columns[col].truncate_to(field_start_cursor);
        }
    }

    fn end_field(
        &mut self,
        header_mode: bool,
        col: &mut usize,
        real_col: &mut usize,
        use_cols: &[bool],
        field_was_quoted: bool,
    ) -> Result<(), TokenizeError> {
        if header_mode {
            if self.strip_whitespace_fields && !field_was_quoted {
                self.header.trim_trailing_whitespace();
            }
            self.header.terminate_field();
            *real_col += 1;
            return Ok(());
        }

        if *real_col >= use_cols.len() {
            return Err(TokenizeError::TooManyCols);
        }
        if use_cols[*real_col] {
            if *col >= self.num_cols {
                return Err(TokenizeError::TooManyCols);
            }
            if self.strip_whitespace_fields && !field_was_quoted {
                self.columns[*col].trim_trailing_whitespace();
            }
            self.columns[*col].terminate_field();
            *col += 1;
        }
        *real_col += 1;
        Ok(())
    }

    fn end_line(&mut self, header_mode: bool, col: &mut usize) -> Result<(), TokenizeError> {
        if header_mode {
            return Ok(());
        }
        if *col < self.num_cols {
            if self.fill_extra_cols {
                while *col < self.num_cols {
                    self.columns[*col].terminate_field();
                    *col += 1;
                }
            } else {
                return Err(TokenizeError::NotEnoughCols);
            }
        }
        self.num_rows += 1;
        Ok(())
    }

    fn run(
        &mut self,
        source: &[u8],
        mut cursor: usize,
        header_mode: bool,
        use_cols: &[bool],
    ) -> Result<(), TokenizeError> {
        let mut state = State::StartLine;
        let mut col = 0usize;
        let mut real_col = 0usize;
        let mut whitespace_only = true;
        let mut field_was_quoted = false;
        let mut field_included = header_mode || use_cols.first().copied().unwrap_or(false);
        let mut field_start_cursor = 0usize;
        let mut done = false;

        while !done && cursor < source.len() {
            let (scalar, raw_len) = decode_utf8(&source[cursor..]);
            // `raw_len` is read off the lead byte alone and can overrun a
            // truncated multi-byte sequence at the end of `source`; clamp it
            // to what's actually left so every push slice stays in bounds.
            let len = raw_len.min(source.len() - cursor);
            let mut repeat = true;

            while repeat {
                repeat = false;
                match state {
                    State::StartLine => {
                        if scalar == NEWLINE {
                            // stay
                        } else if is_structural_whitespace(scalar) && self.strip_whitespace_lines {
                            // stay
                        } else if self.comment == Some(scalar) {
                            state = State::Comment;
                        } else {
                            col = 0;
                            real_col = 0;
                            state = State::StartField;
                            whitespace_only = true;
                            field_was_quoted = false;
                            field_included = header_mode
                                || (real_col < use_cols.len() && use_cols[real_col]);
                            field_start_cursor = if field_included {
                                self.target_cursor(header_mode, col)
                            } else {
                                0
                            };
                            repeat = true;
                        }
                    }

                    State::StartField => {
                        if is_structural_whitespace(scalar) && self.strip_whitespace_fields {
                            // skip
                        } else if self.comment == Some(scalar) && !self.strip_whitespace_lines {
                            state = State::Comment;
                        } else if scalar == self.delimiter {
                            self.end_field(
                                header_mode,
                                &mut col,
                                &mut real_col,
                                use_cols,
                                field_was_quoted,
                            )?;
                            state = State::StartField;
                            whitespace_only = true;
                            field_was_quoted = false;
                            field_included = header_mode
                                || (real_col < use_cols.len() && use_cols[real_col]);
                            field_start_cursor = if field_included {
                                self.target_cursor(header_mode, col)
                            } else {
                                0
                            };
                        } else if scalar == NEWLINE {
                            let delimiter_is_whitespace = is_structural_whitespace(self.delimiter);
                            if !delimiter_is_whitespace && self.strip_whitespace_lines {
                                self.end_field(
                                    header_mode,
                                    &mut col,
                                    &mut real_col,
                                    use_cols,
                                    field_was_quoted,
                                )?;
                            }
                            self.end_line(header_mode, &mut col)?;
                            if header_mode {
                                done = true;
                            }
                            state = State::StartLine;
                        } else if Some(scalar) == self.quote {
                            state = State::StartQuotedField;
                            field_was_quoted = true;
                        } else {
                            state = State::Field;
                            repeat = true;
                        }
                    }

                    State::StartQuotedField => {
                        if is_structural_whitespace(scalar) && self.strip_whitespace_fields {
                            // skip
                        } else if Some(scalar) == self.quote {
                            self.end_field(
                                header_mode,
                                &mut col,
                                &mut real_col,
                                use_cols,
                                field_was_quoted,
                            )?;
                            state = State::StartField;
                            whitespace_only = true;
                            field_was_quoted = false;
                            field_included = header_mode
                                || (real_col < use_cols.len() && use_cols[real_col]);
                            field_start_cursor = if field_included {
                                self.target_cursor(header_mode, col)
                            } else {
                                0
                            };
                        } else {
                            state = State::QuotedField;
                            repeat = true;
                        }
                    }

                    State::Field => {
                        if self.comment == Some(scalar) && col == 0 && whitespace_only {
                            self.discard_partial_field(
                                header_mode,
                                col,
                                field_included,
                                field_start_cursor,
                            );
                            state = State::Comment;
                        } else if scalar == self.delimiter {
                            self.end_field(
                                header_mode,
                                &mut col,
                                &mut real_col,
                                use_cols,
                                field_was_quoted,
                            )?;
                            state = State::StartField;
                            whitespace_only = true;
                            field_was_quoted = false;
                            field_included = header_mode
                                || (real_col < use_cols.len() && use_cols[real_col]);
                            field_start_cursor = if field_included {
                                self.target_cursor(header_mode, col)
                            } else {
                                0
                            };
                        } else if scalar == NEWLINE {
                            self.end_field(
                                header_mode,
                                &mut col,
                                &mut real_col,
                                use_cols,
                                field_was_quoted,
                            )?;
                            self.end_line(header_mode, &mut col)?;
                            if header_mode {
                                done = true;
                            }
                            state = State::StartLine;
                        } else {
                            self.push(
                                header_mode,
                                col,
                                field_included,
                                &source[cursor..cursor + len],
                            );
                            if !is_structural_whitespace(scalar) {
                                whitespace_only = false;
                            }
                        }
                    }

                    State::QuotedField => {
                        if Some(scalar) == self.quote {
                            state = State::Field;
                        } else if scalar == NEWLINE {
                            self.push(
                                header_mode,
                                col,
                                field_included,
                                &source[cursor..cursor + len],
                            );
                            state = State::QuotedFieldNewline;
                        } else {
                            self.push(
                                header_mode,
                                col,
                                field_included,
                                &source[cursor..cursor + len],
                            );
                        }
                    }

                    State::QuotedFieldNewline => {
                        if is_structural_whitespace(scalar) && self.strip_whitespace_lines {
                            // skip
                        } else if scalar == NEWLINE {
                            // skip
                        } else if Some(scalar) == self.quote {
                            state = State::Field;
                        } else {
                            state = State::QuotedField;
                            repeat = true;
                        }
                    }

                    State::Comment => {
                        if scalar == NEWLINE {
                            state = State::StartLine;
                        }
                    }
                }
            }

            cursor += len;
        }

        Ok(())
    }
}
