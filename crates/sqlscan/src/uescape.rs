//! UESCAPE post-processor (C5).
//!
//! Runs once, after a `u&'...'` / `u&"..."` literal body has been fully
//! collected by the `xus`/`xui` states, rather than during the initial
//! scan: the escape character is only known once the trailing `UESCAPE
//! '<c>'` clause (if any) has been seen, so this pass necessarily comes
//! after boundary scanning rather than interleaved with it.

use crate::escape::codepoint_to_utf8;
use crate::error::LexErrorKind;

/// `true` if `e` is a legal UESCAPE delimiter character: anything except a
/// hex digit, `+`, a quote character, or whitespace.
#[must_use]
pub fn is_valid_escape_char(e: u8) -> bool {
    !(e.is_ascii_hexdigit() || e == b'+' || e == b'\'' || e == b'"' || e.is_ascii_whitespace())
}

/// Rewrite `body`, substituting every `e`-prefixed 4-hex or `e+`-prefixed
/// 6-hex escape with its UTF-8 encoding. `prefix_width` is the number of
/// bytes of literal-opener prefix (`U&"` / `U&'`, i.e. 3) to add to
/// in-body offsets when reporting an error location.
pub fn process(
    body: &[u8],
    escape_char: u8,
    server_is_utf8: bool,
    prefix_width: u32,
) -> Result<Vec<u8>, (LexErrorKind, u32)> {
    debug_assert!(is_valid_escape_char(escape_char));

    let mut out = Vec::with_capacity(body.len());
    let mut i = 0usize;

    while i < body.len() {
        let b = body[i];
        if b != escape_char {
            out.push(b);
            i += 1;
            continue;
        }

        if body.get(i + 1) == Some(&escape_char) {
            out.push(escape_char);
            i += 2;
            continue;
        }

        if let Some(hex) = body.get(i + 1..i + 5) {
            if hex.iter().all(u8::is_ascii_hexdigit) {
                let value = parse_hex(hex);
                push_codepoint(&mut out, value, server_is_utf8, prefix_width, i)?;
                i += 5;
                continue;
            }
        }

        if body.get(i + 1) == Some(&b'+') {
            if let Some(hex) = body.get(i + 2..i + 8) {
                if hex.iter().all(u8::is_ascii_hexdigit) {
                    let value = parse_hex(hex);
                    push_codepoint(&mut out, value, server_is_utf8, prefix_width, i)?;
                    i += 8;
                    continue;
                }
            }
        }

        return Err((
            LexErrorKind::InvalidUnicodeEscapeValue,
            prefix_width + i as u32,
        ));
    }

    Ok(out)
}

fn push_codepoint(
    out: &mut Vec<u8>,
    value: u32,
    server_is_utf8: bool,
    prefix_width: u32,
    at: usize,
) -> Result<(), (LexErrorKind, u32)> {
    match codepoint_to_utf8(value, server_is_utf8) {
        Ok((bytes, len, _)) => {
            out.extend_from_slice(&bytes[..len]);
            Ok(())
        }
        Err(kind) => Err((kind, prefix_width + at as u32)),
    }
}

fn parse_hex(digits: &[u8]) -> u32 {
    digits.iter().fold(0u32, |acc, &d| {
        acc * 16 + u32::from((d as char).to_digit(16).unwrap_or(0))
    })
}
