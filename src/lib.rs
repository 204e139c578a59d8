//! A byte-stream CSV/TSV tokenizer.
//!
//! Reads a UTF-8 text buffer describing a delimited tabular file (an
//! optional header line, rows of delimited fields that may be quoted, and
//! optional comment lines) and produces, for each selected column, a
//! compact concatenated byte buffer of null-terminated field values. This
//! crate covers the tokenizer and its output buffers only: typed numeric
//! conversion is a thin layer on top ([`to_long`], [`to_double`]), and
//! higher-level concerns like dtype inference, column-name resolution, and
//! file I/O live outside it.
//!
//! ```
//! use delim_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder()
//!     .delimiter(',')
//!     .quote('"')
//!     .build();
//!
//! let source = b"a,b\n1,2\n";
//! tokenizer.tokenize(source, true, &[true, true], 0).unwrap();
//! let header: Vec<_> = tokenizer.iter_header().collect();
//! assert_eq!(header, vec![&b"a"[..], &b"b"[..]]);
//!
//! tokenizer.set_num_cols(2);
//! tokenizer.tokenize(source, false, &[true, true], 1).unwrap();
//! assert_eq!(tokenizer.iter_column(0).next(), Some(&b"1"[..]));
//! ```

mod buffer;
mod builder;
mod codepoint;
mod convert;
mod error;
mod iter;
mod tokenizer;

pub use builder::TokenizerBuilder;
pub use codepoint::decode_utf8;
pub use convert::{to_double, to_long};
pub use error::{ConversionError, LastError, TokenizeError};
pub use iter::FieldIterator;
pub use tokenizer::Tokenizer;
