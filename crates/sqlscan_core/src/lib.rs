//! Low-level byte scanner for SQL source text.
//!
//! This crate provides a standalone cursor and raw boundary scanner with
//! **zero `sqlscan` dependencies**. It is the "raw" half of a two-layer
//! lexer architecture (modeled after `rustc_lexer` / `rustc_parse::lexer`):
//!
//! - **`sqlscan_core`** (this crate): owns the sentinel-terminated source
//!   buffer and the byte cursor, and classifies single-character and
//!   multi-character punctuation. It knows nothing about keywords, escape
//!   sequences, or dollar-quote delimiters.
//! - **`sqlscan`**: the full no-backtrack state machine. It drives a
//!   [`Cursor`] directly (literal bodies, comment nesting and dollar-quote
//!   matching all need escape-aware and configuration-aware push-back
//!   decisions that `sqlscan_core` cannot make on its own), and uses
//!   [`SourceBuffer`] for sentinel-terminated, bounds-check-free scanning.
//!
//! # Why no raw/cook split for literals
//!
//! Unlike a scanner whose string bodies are opaque until a later "cooking"
//! pass, this grammar requires escape-awareness *while* searching for the
//! terminating quote (`\'` inside an extended string must not end the
//! literal), and the `backslash_quote`/`standard_conforming_strings`
//! configuration flags change what counts as an escape. That logic lives
//! in `sqlscan`, not here; this crate supplies only the byte-level
//! primitives (sentinel buffer, cursor, push-back, classification tables).

mod cursor;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use source_buffer::SourceBuffer;
pub use tag::{is_hex_digit, is_ident_cont, is_ident_start, is_whitespace};
