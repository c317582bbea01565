//! Token payloads and the [`Token`] envelope.
//!
//! Unlike [`sqlscan_core`]'s raw tags (a fixed-size `(tag, len)` pair with
//! no owned data), a cooked token here may own a decoded literal body, so
//! `TokenKind` is a plain sum type rather than a `repr(u8)` discriminant
//! table. Every variant still documents the grammar rule in the state
//! machine that produces it.

use crate::keywords::KeywordKind;

/// A single scanned token, paired with the byte offset of its first byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: u32,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, pos: u32) -> Self {
        Self { kind, pos }
    }
}

/// The decoded payload of a scanned token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare identifier, downcased and truncated to `NAMEDATALEN - 1`
    /// bytes (rule 23, non-keyword branch).
    Ident(Vec<u8>),
    /// A reserved or unreserved keyword, with its canonical lowercase
    /// spelling (rule 23, keyword branch).
    Keyword(KeywordKind, &'static str),
    /// An integer literal that fit in a signed 32-bit value (rule 18).
    IConst(i32),
    /// A numeric literal that either overflowed `i32`, or always carried a
    /// fractional/exponent part (rules 18 overflow, 19, 20, 21, 22). Carries
    /// the exact source text.
    FConst(Vec<u8>),
    /// A standard, extended, or Unicode-escaped string literal body
    /// (`xq`/`xe`/`xus`), fully decoded.
    SConst(Vec<u8>),
    /// A bit-string literal body (`xb`), including the leading `b`.
    BConst(Vec<u8>),
    /// A hex-string literal body (`xh`), including the leading `x`.
    XConst(Vec<u8>),
    /// A `$n` positional parameter reference (rule 17).
    Param(i32),
    /// `::` (rule 14).
    TypeCast,
    /// A multi-character operator, or `!=` normalized to `<>` (rule 16).
    Op(Vec<u8>),
    /// A single self-delimiting punctuation byte (rule 15): one of
    /// `` , ( ) [ ] . ; : + - * / % ^ < > = ``.
    Self_(u8),
    /// Any other byte, echoed verbatim (rule 24).
    Other(u8),
    /// End of input (rule 25).
    Eof,
}

impl TokenKind {
    /// `true` for [`TokenKind::Eof`].
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_its_start_offset() {
        let tok = Token::new(TokenKind::IConst(7), 42);
        assert_eq!(tok.pos, 42);
        assert_eq!(tok.kind, TokenKind::IConst(7));
    }

    #[test]
    fn is_eof_only_true_for_eof_variant() {
        assert!(TokenKind::Eof.is_eof());
        assert!(!TokenKind::Self_(b';').is_eof());
    }
}
