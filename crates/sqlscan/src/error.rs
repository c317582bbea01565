//! Scanner error and warning types.
//!
//! Every error this scanner raises is **hard**: none are recovered or
//! substituted for in place (there is no U+FFFD-replacement path here).
//! `LexError` is hand-rolled rather than `thiserror`-derived, and carries
//! no rendering logic of its own — a caller wiring this into a larger
//! diagnostic pipeline is expected to map `kind` to its own presentation,
//! the same division of labor the host lexer this crate was adapted from
//! uses (its `LexError` has no `Display` impl either; rendering lives in
//! the compiler driver, not the lexer).

/// A hard scanning error together with the byte offset of the construct
/// that triggered it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub pos: u32,
}

impl LexError {
    #[must_use]
    pub fn new(kind: LexErrorKind, pos: u32) -> Self {
        Self { kind, pos }
    }

    /// A short, human-readable description of the error, independent of
    /// any particular diagnostic renderer.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.message()
    }
}

/// The seventeen hard error kinds this scanner can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// EOF reached inside a `/* ... */` comment.
    UnterminatedComment,
    /// EOF reached inside a `b'...'` bit-string literal.
    UnterminatedBitString,
    /// EOF reached inside an `x'...'` hex-string literal.
    UnterminatedHexString,
    /// EOF reached inside a `'...'`/`e'...'`/`u&'...'` quoted string.
    UnterminatedQuotedString,
    /// EOF reached inside a `$tag$...$tag$` dollar-quoted string.
    UnterminatedDollarString,
    /// EOF reached inside a `"..."`/`u&"..."` quoted identifier.
    UnterminatedQuotedIdent,
    /// A `"..."` delimited identifier whose body is empty.
    ZeroLengthDelimitedIdent,
    /// A `\u`/`\U` escape decoded to a high surrogate not followed by a
    /// matching low surrogate (or a low surrogate with no preceding high
    /// surrogate).
    InvalidUnicodeSurrogatePair,
    /// `\u`/`\U` not followed by the required number of hex digits.
    InvalidUnicodeEscape,
    /// A Unicode escape's hex digits decoded to 0, or to a value greater
    /// than `0x10FFFF`.
    InvalidUnicodeEscapeValue,
    /// The character named in a `UESCAPE '<c>'` clause is a hex digit,
    /// `+`, a quote character, or whitespace.
    InvalidUnicodeEscapeChar,
    /// A Unicode escape decoded to a codepoint above `0x7F` while the
    /// server encoding is not UTF-8.
    UnicodeEscapeNonUtf8ServerEncoding,
    /// `\'` used inside an extended string under a `backslash_quote`
    /// policy that forbids it.
    UnsafeBackslashQuote,
    /// A `u&'...'`/`u&"..."` literal used while
    /// `standard_conforming_strings` is off.
    UnsafeUnicodeEscapeStringConstant,
    /// An operator, after trimming, is still `>= NAMEDATALEN` bytes long.
    OperatorTooLong,
    /// Internal: a byte outside `[0-9A-Fa-f]` reached a hex-digit decoder.
    /// Should be unreachable; every call site first checks the digit
    /// class before decoding.
    InvalidHexadecimalDigit,
    /// A literal body containing raw (non-escape-decoded) bytes above
    /// `0x7F` failed the collaborator's multibyte validation, i.e. it is
    /// not well-formed text in the server encoding.
    InvalidMultibyteSequence,
}

impl LexErrorKind {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnterminatedComment => "unterminated /* comment".to_string(),
            Self::UnterminatedBitString => "unterminated bit string literal".to_string(),
            Self::UnterminatedHexString => {
                "unterminated hexadecimal string literal".to_string()
            }
            Self::UnterminatedQuotedString => "unterminated quoted string".to_string(),
            Self::UnterminatedDollarString => "unterminated dollar-quoted string".to_string(),
            Self::UnterminatedQuotedIdent => "unterminated quoted identifier".to_string(),
            Self::ZeroLengthDelimitedIdent => "zero-length delimited identifier".to_string(),
            Self::InvalidUnicodeSurrogatePair => "invalid Unicode surrogate pair".to_string(),
            Self::InvalidUnicodeEscape => "invalid Unicode escape".to_string(),
            Self::InvalidUnicodeEscapeValue => "invalid Unicode escape value".to_string(),
            Self::InvalidUnicodeEscapeChar => "invalid Unicode escape character".to_string(),
            Self::UnicodeEscapeNonUtf8ServerEncoding => {
                "Unicode escape values cannot be used for code point values above 007F when the server encoding is not UTF8".to_string()
            }
            Self::UnsafeBackslashQuote => {
                r"unsafe use of \' in a string literal".to_string()
            }
            Self::UnsafeUnicodeEscapeStringConstant => {
                "unsafe use of string constant with Unicode escapes".to_string()
            }
            Self::OperatorTooLong => "operator too long".to_string(),
            Self::InvalidHexadecimalDigit => "invalid hexadecimal digit".to_string(),
            Self::InvalidMultibyteSequence => {
                "invalid byte sequence for encoding".to_string()
            }
        }
    }
}

/// A recoverable warning, issued at most once per literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexWarning {
    pub kind: LexWarningKind,
    pub pos: u32,
}

impl LexWarning {
    #[must_use]
    pub fn new(kind: LexWarningKind, pos: u32) -> Self {
        Self { kind, pos }
    }
}

/// The three warning kinds this scanner issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexWarningKind {
    /// `\'` accepted inside an extended string under a permissive
    /// `backslash_quote` policy, in a context where standard SQL would
    /// reject it.
    NonstandardBackslashQuote,
    /// `\\` used inside an extended string.
    NonstandardBackslashBackslash,
    /// Any other recognized escape used inside an extended string.
    NonstandardEscape,
}

impl LexWarningKind {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::NonstandardBackslashQuote => {
                r"nonstandard use of \' in a string literal"
            }
            Self::NonstandardBackslashBackslash => {
                r"nonstandard use of \\ in a string literal"
            }
            Self::NonstandardEscape => "nonstandard use of escape in a string literal",
        }
    }
}
