//! Scanner configuration, snapshotted by value at [`crate::Scanner::new`].
//!
//! The behavior of the extended-string (`xe`) and Unicode-escape states
//! depends on three independently toggleable flags. Rather than re-reading
//! ambient global state per token, the caller passes a [`ScannerConfig`]
//! once; it is `Copy` so capturing it costs nothing.

/// Maximum identifier length, in bytes, including the trailing NUL a C
/// caller would expect; identifiers are truncated to `NAMEDATALEN - 1`
/// bytes at a UTF-8 character boundary. Matches the common build default.
pub const NAMEDATALEN: usize = 64;

/// Whether `'...'` strings are standard SQL strings (no backslash escapes)
/// or PostgreSQL's historical extended-string dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StandardConformingStrings {
    Off,
    #[default]
    On,
}

/// Policy governing `\'` inside an extended string literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BackslashQuote {
    /// `\'` is always a hard error.
    Off,
    /// `\'` is always accepted.
    On,
    /// `\'` is accepted only when the client encoding cannot contain a
    /// stray `'` byte as a continuation of a multibyte sequence.
    #[default]
    SafeEncoding,
}

/// Whether the first escape sequence in a literal should be warned about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EscapeStringWarning {
    Off,
    #[default]
    On,
}

/// Snapshot of the scanner's three configuration flags, captured once at
/// [`crate::Scanner::new`] and held for the life of the scan.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScannerConfig {
    pub standard_conforming_strings: StandardConformingStrings,
    pub backslash_quote: BackslashQuote,
    pub escape_string_warning: EscapeStringWarning,
}

impl ScannerConfig {
    /// The configuration a fresh session defaults to: standard-conforming
    /// strings on, `backslash_quote` in the safe-encoding tri-state, and
    /// escape-string warnings on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
