//! No-backtrack SQL lexical scanner.
//!
//! This crate is the "cooked" half of a two-layer lexer (see
//! [`sqlscan_core`] for the raw half): keywords, escape decoding,
//! dollar-quote matching, and the full token/state-machine vocabulary live
//! here, driven directly against a [`sqlscan_core::Cursor`] rather than
//! through an intermediate raw-token stream.
//!
//! ```
//! use sqlscan::{Scanner, ScannerConfig, SourceBuffer, TokenKind};
//!
//! let buf = SourceBuffer::new(b"SELECT 1;");
//! let mut scanner = Scanner::new(&buf, ScannerConfig::new());
//!
//! let first = scanner.next_token().unwrap();
//! assert!(matches!(first.kind, TokenKind::Keyword(_, "select")));
//! ```
//!
//! Parsing, semantic analysis, planning, statement execution, catalog
//! access, streaming I/O, Unicode normalization, and wire protocols are
//! explicitly out of scope: this crate turns bytes into located tokens and
//! nothing more.

mod collaborators;
mod config;
mod error;
mod escape;
mod keywords;
mod literal;
mod scanner;
mod uescape;
mod token;

pub use collaborators::{
    AsciiIdentifierCase, DefaultKeywordResolver, EncodingQuery, IdentifierCase, KeywordResolver,
    MultibyteValidator, Utf8EncodingQuery, Utf8MultibyteValidator,
};
pub use config::{BackslashQuote, EscapeStringWarning, ScannerConfig, StandardConformingStrings, NAMEDATALEN};
pub use error::{LexError, LexErrorKind, LexWarning, LexWarningKind};
pub use keywords::KeywordKind;
pub use scanner::Scanner;
pub use sqlscan_core::SourceBuffer;
pub use token::{Token, TokenKind};
