//! Escape decoders (C4).
//!
//! Unlike a lexer whose string bodies are cooked in a separate pass after
//! boundary scanning finishes, this grammar's quote-termination decisions
//! are themselves escape-aware (`\'` inside an extended string must not
//! end the literal), so these decoders are called incrementally by the
//! `xe` state in [`crate::scanner`] as each escape is consumed, not by a
//! single post-hoc walk over a finished buffer.

use sqlscan_core::Cursor;

use crate::error::LexErrorKind;

/// Resolve a single-character C-style escape (`\b \f \n \r \t`). Returns
/// `None` for any other byte, which the caller treats as "strip the
/// backslash, keep the literal byte".
#[must_use]
pub fn resolve_common_escape(c: u8) -> Option<u8> {
    match c {
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

/// Decode `\[0-7]{1,3}` (the leading backslash already consumed, `cursor`
/// positioned at the first octal digit, which the caller has confirmed is
/// present). Consumes up to 3 octal digits.
pub fn decode_octal_escape(cursor: &mut Cursor<'_>) -> u8 {
    let mut value: u32 = 0;
    for _ in 0..3 {
        let b = cursor.current();
        if !(b'0'..=b'7').contains(&b) {
            break;
        }
        value = value * 8 + u32::from(b - b'0');
        cursor.advance();
    }
    (value & 0xFF) as u8
}

/// Decode `\x[0-9A-Fa-f]{1,2}` (leading backslash and `x` already
/// consumed, `cursor` positioned at the first hex digit, which the caller
/// has confirmed is present). Consumes up to 2 hex digits.
pub fn decode_hex_byte_escape(cursor: &mut Cursor<'_>) -> u8 {
    let mut value: u32 = 0;
    for _ in 0..2 {
        let b = cursor.current();
        let Some(digit) = (b as char).to_digit(16) else {
            break;
        };
        value = value * 16 + digit;
        cursor.advance();
    }
    (value & 0xFF) as u8
}

/// Decode exactly `width` hex digits starting at the cursor's current
/// position (used for `\uXXXX`, width 4, and `\UXXXXXXXX`, width 8).
/// Returns `Err` if fewer than `width` hex digits are available before a
/// non-hex-digit byte or EOF — the truncated-escape hard error.
pub fn decode_fixed_hex_escape(cursor: &mut Cursor<'_>, width: u32) -> Result<u32, LexErrorKind> {
    let mut value: u32 = 0;
    for _ in 0..width {
        let b = cursor.current();
        let Some(digit) = (b as char).to_digit(16) else {
            return Err(LexErrorKind::InvalidUnicodeEscape);
        };
        value = value * 16 + digit;
        cursor.advance();
    }
    Ok(value)
}

/// `true` for the high half of a UTF-16 surrogate pair (`0xD800..0xDC00`).
#[must_use]
pub fn is_high_surrogate(c: u32) -> bool {
    (0xD800..0xDC00).contains(&c)
}

/// `true` for the low half of a UTF-16 surrogate pair (`0xDC00..0xE000`).
#[must_use]
pub fn is_low_surrogate(c: u32) -> bool {
    (0xDC00..0xE000).contains(&c)
}

/// Compute the partial codepoint to hold while waiting for the paired low
/// surrogate, from a decoded high surrogate value.
#[must_use]
pub fn surrogate_top(high: u32) -> u32 {
    ((high & 0x3FF) << 10) + 0x10000
}

/// Combine a stored `surrogate_top` with a decoded low surrogate into the
/// final supplementary-plane codepoint.
#[must_use]
pub fn combine_surrogate_pair(top: u32, low: u32) -> u32 {
    (low & 0x3FF) + top
}

/// Validate and UTF-8-encode a codepoint (`addunicode`).
///
/// Rejects `c == 0` and `c > 0x10FFFF`. If `c > 0x7F` and the server
/// encoding is not UTF-8, rejects with
/// [`LexErrorKind::UnicodeEscapeNonUtf8ServerEncoding`]. Returns the
/// encoded bytes and whether the codepoint was non-ASCII (the caller uses
/// this to set `saw_non_ascii`).
pub fn codepoint_to_utf8(
    c: u32,
    server_is_utf8: bool,
) -> Result<([u8; 4], usize, bool), LexErrorKind> {
    if c == 0 || c > 0x10FFFF {
        return Err(LexErrorKind::InvalidUnicodeEscapeValue);
    }
    let non_ascii = c > 0x7F;
    if non_ascii && !server_is_utf8 {
        return Err(LexErrorKind::UnicodeEscapeNonUtf8ServerEncoding);
    }
    Ok((encode_utf8(c), utf8_len(c), non_ascii))
}

fn utf8_len(c: u32) -> usize {
    match c {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}

/// Encode a 21-bit codepoint to UTF-8 without going through `char`, since
/// an intermediate (never-externally-observable) surrogate value could in
/// principle reach this function if the surrogate-pairing protocol were
/// ever violated by a caller bypassing [`crate::scanner`]; `char::from_u32`
/// would panic-free-but-silently reject such values, whereas this matches
/// the reference encoder's behavior of encoding whatever codepoint it is
/// given.
fn encode_utf8(c: u32) -> [u8; 4] {
    match c {
        0..=0x7F => [c as u8, 0, 0, 0],
        0x80..=0x7FF => [
            0xC0 | (c >> 6) as u8,
            0x80 | (c & 0x3F) as u8,
            0,
            0,
        ],
        0x800..=0xFFFF => [
            0xE0 | (c >> 12) as u8,
            0x80 | ((c >> 6) & 0x3F) as u8,
            0x80 | (c & 0x3F) as u8,
            0,
        ],
        _ => [
            0xF0 | (c >> 18) as u8,
            0x80 | ((c >> 12) & 0x3F) as u8,
            0x80 | ((c >> 6) & 0x3F) as u8,
            0x80 | (c & 0x3F) as u8,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlscan_core::SourceBuffer;

    fn cursor_over(src: &[u8]) -> SourceBuffer {
        SourceBuffer::new(src)
    }

    #[test]
    fn resolves_known_common_escapes() {
        assert_eq!(resolve_common_escape(b'n'), Some(b'\n'));
        assert_eq!(resolve_common_escape(b't'), Some(b'\t'));
        assert_eq!(resolve_common_escape(b'r'), Some(b'\r'));
        assert_eq!(resolve_common_escape(b'b'), Some(0x08));
        assert_eq!(resolve_common_escape(b'f'), Some(0x0C));
        assert_eq!(resolve_common_escape(b'q'), None);
    }

    #[test]
    fn decodes_octal_escape_up_to_three_digits() {
        let buf = cursor_over(b"101rest");
        let mut c = buf.cursor();
        assert_eq!(decode_octal_escape(&mut c), 0o101);
        assert_eq!(c.pos(), 3);
    }

    #[test]
    fn decodes_octal_escape_stops_at_non_octal() {
        let buf = cursor_over(b"19rest"); // '9' is not octal
        let mut c = buf.cursor();
        assert_eq!(decode_octal_escape(&mut c), 0o1);
        assert_eq!(c.pos(), 1);
    }

    #[test]
    fn decodes_hex_byte_escape_up_to_two_digits() {
        let buf = cursor_over(b"fFrest");
        let mut c = buf.cursor();
        assert_eq!(decode_hex_byte_escape(&mut c), 0xFF);
        assert_eq!(c.pos(), 2);
    }

    #[test]
    fn decodes_fixed_hex_escape_exact_width() {
        let buf = cursor_over(b"d834rest");
        let mut c = buf.cursor();
        assert_eq!(decode_fixed_hex_escape(&mut c, 4).unwrap(), 0xD834);
        assert_eq!(c.pos(), 4);
    }

    #[test]
    fn fixed_hex_escape_errors_on_truncation() {
        let buf = cursor_over(b"d8'"); // quote terminates before 4 digits
        let mut c = buf.cursor();
        assert_eq!(
            decode_fixed_hex_escape(&mut c, 4),
            Err(LexErrorKind::InvalidUnicodeEscape)
        );
    }

    #[test]
    fn surrogate_pair_classification() {
        assert!(is_high_surrogate(0xD834));
        assert!(!is_high_surrogate(0xDD1E));
        assert!(is_low_surrogate(0xDD1E));
        assert!(!is_low_surrogate(0xD834));
    }

    #[test]
    fn surrogate_pair_combines_to_expected_codepoint() {
        // U+1D11E (musical G clef): high D834, low DD1E.
        let top = surrogate_top(0xD834);
        let combined = combine_surrogate_pair(top, 0xDD1E);
        assert_eq!(combined, 0x1D11E);
    }

    #[test]
    fn codepoint_to_utf8_encodes_ascii() {
        let (bytes, len, non_ascii) = codepoint_to_utf8(b'A' as u32, true).unwrap();
        assert_eq!(&bytes[..len], b"A");
        assert!(!non_ascii);
    }

    #[test]
    fn codepoint_to_utf8_encodes_supplementary_plane() {
        let (bytes, len, non_ascii) = codepoint_to_utf8(0x1D11E, true).unwrap();
        assert_eq!(&bytes[..len], &[0xF0, 0x9D, 0x84, 0x9E]);
        assert!(non_ascii);
    }

    #[test]
    fn codepoint_to_utf8_rejects_zero_and_out_of_range() {
        assert!(codepoint_to_utf8(0, true).is_err());
        assert!(codepoint_to_utf8(0x110000, true).is_err());
    }

    #[test]
    fn codepoint_to_utf8_rejects_non_ascii_on_non_utf8_server() {
        assert!(codepoint_to_utf8(0xE9, false).is_err());
        assert!(codepoint_to_utf8(b'z' as u32, false).is_ok());
    }
}
