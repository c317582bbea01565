//! Character classification predicates.
//!
//! These mirror the lex-style character classes the grammar dispatches on
//! (`ident_start`, `ident_cont`, whitespace, hex digit) without attaching
//! any token-kind semantics — classification here is purely "what byte
//! class is this", leaving what to do about it to the state machine.

/// ASCII whitespace recognized between tokens: space, tab, newline,
/// carriage return, form feed.
#[inline]
#[must_use]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// First byte of an identifier: ASCII letter, underscore, or any byte with
/// the high bit set (a multibyte character under the server encoding, or a
/// single-byte high-bit character under a non-UTF-8 client encoding).
#[inline]
#[must_use]
pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

/// Continuation byte of an identifier: everything `is_ident_start` allows,
/// plus ASCII digits and `$`.
#[inline]
#[must_use]
pub fn is_ident_cont(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit() || b == b'$'
}

/// Hex digit, case-insensitive: `[0-9A-Fa-f]`.
#[inline]
#[must_use]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}
