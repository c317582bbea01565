//! Collaborator traits.
//!
//! The scanner treats keyword resolution, identifier casing, multibyte
//! validation, and encoding queries as external collaborators rather than
//! baking their policy into the state machine (mirroring how the host
//! lexer this crate is adapted from keeps locale/ABI-sensitive concerns
//! out of its pure token-boundary logic). Each trait below ships a
//! default implementation so the crate is usable standalone; a caller
//! embedding this scanner in a larger engine with real locale or
//! non-UTF-8-server-encoding support can supply its own.

use crate::config::NAMEDATALEN;
use crate::error::{LexError, LexErrorKind};
use crate::keywords::{self, KeywordKind};

/// Resolves case-folded identifier text to a keyword, if any (C8).
pub trait KeywordResolver {
    fn lookup(&self, text: &[u8]) -> Option<(KeywordKind, &'static str)>;
}

/// The length-bucketed keyword table (see [`crate::keywords`]).
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultKeywordResolver;

impl KeywordResolver for DefaultKeywordResolver {
    fn lookup(&self, text: &[u8]) -> Option<(KeywordKind, &'static str)> {
        keywords::lookup(text)
    }
}

/// Downcases and truncates identifier text to the collaborator's locale
/// rules and `NAMEDATALEN` boundary.
pub trait IdentifierCase {
    /// Fold `text` to lower case and truncate to `NAMEDATALEN - 1` bytes
    /// at a safe boundary, returning a newly owned buffer.
    fn downcase_truncate(&self, text: &[u8]) -> Vec<u8>;

    /// Truncate an already-case-preserved identifier in place.
    fn truncate(&self, buf: &mut Vec<u8>);
}

/// ASCII-only case folding (no external locale available standalone);
/// truncates at the nearest UTF-8 character boundary so a multibyte
/// identifier is never split mid-sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiIdentifierCase;

impl AsciiIdentifierCase {
    fn truncate_at_char_boundary(buf: &mut Vec<u8>) {
        let max = NAMEDATALEN - 1;
        if buf.len() <= max {
            return;
        }
        let mut cut = max;
        while cut > 0 && !is_utf8_char_boundary(buf, cut) {
            cut -= 1;
        }
        buf.truncate(cut);
    }
}

fn is_utf8_char_boundary(buf: &[u8], i: usize) -> bool {
    match buf.get(i) {
        None => true,
        Some(&b) => (b as i8) >= -0x40, // not a UTF-8 continuation byte
    }
}

impl IdentifierCase for AsciiIdentifierCase {
    fn downcase_truncate(&self, text: &[u8]) -> Vec<u8> {
        let mut out: Vec<u8> = text.iter().map(u8::to_ascii_lowercase).collect();
        Self::truncate_at_char_boundary(&mut out);
        out
    }

    fn truncate(&self, buf: &mut Vec<u8>) {
        Self::truncate_at_char_boundary(buf);
    }
}

/// Validates a literal body's bytes against the server encoding, and
/// reports its length in codepoints.
pub trait MultibyteValidator {
    /// `start` is the byte offset of `buf`'s first byte in the source,
    /// so an error can carry the real position of the offending byte
    /// rather than an offset relative to the literal body alone.
    fn validate(&self, buf: &[u8], start: u32) -> Result<(), LexError>;
    fn length(&self, buf: &[u8]) -> usize;
}

/// Validates `buf` as UTF-8 and counts Unicode scalar values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8MultibyteValidator;

impl MultibyteValidator for Utf8MultibyteValidator {
    fn validate(&self, buf: &[u8], start: u32) -> Result<(), LexError> {
        std::str::from_utf8(buf).map(|_| ()).map_err(|e| {
            LexError::new(
                LexErrorKind::InvalidMultibyteSequence,
                start + e.valid_up_to() as u32,
            )
        })
    }

    fn length(&self, buf: &[u8]) -> usize {
        String::from_utf8_lossy(buf).chars().count()
    }
}

/// Answers encoding questions that gate several escape-related error
/// paths (`\u`/`\U` codepoint validity, `\'` safety).
pub trait EncodingQuery {
    fn server_is_utf8(&self) -> bool;
    fn client_is_client_only(&self) -> bool;
}

/// Always reports a UTF-8 server encoding and a non-client-only client
/// encoding — the common case, and the only case this standalone crate
/// can itself observe.
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8EncodingQuery;

impl EncodingQuery for Utf8EncodingQuery {
    fn server_is_utf8(&self) -> bool {
        true
    }

    fn client_is_client_only(&self) -> bool {
        false
    }
}
