//! The scanner state machine (C6): the central driver that classifies the
//! next token under the current start condition, transitions between
//! conditions, and enforces the no-backtrack property.
//!
//! Whitespace, `--` comments, and `/* */` comments never produce a token;
//! [`Scanner::next_token`] loops internally past them. Every literal start
//! condition (`xb`, `xh`, `xq`, `xe`, `xus`, `xd`, `xui`, `xdolq`) is
//! implemented as its own method that owns the scan from opener to
//! terminator and returns the finished token directly, rather than as named
//! states threaded through repeated `next_token` calls — a single literal
//! never spans more than one `next_token` invocation, so there is nothing
//! to carry between calls beyond the cursor position itself.

use sqlscan_core::{is_ident_cont, is_ident_start, is_whitespace, Cursor, SourceBuffer};

use crate::collaborators::{
    AsciiIdentifierCase, DefaultKeywordResolver, EncodingQuery, IdentifierCase, KeywordResolver,
    MultibyteValidator, Utf8EncodingQuery, Utf8MultibyteValidator,
};
use crate::config::{BackslashQuote, EscapeStringWarning, ScannerConfig, StandardConformingStrings, NAMEDATALEN};
use crate::error::{LexError, LexErrorKind, LexWarning, LexWarningKind};
use crate::escape;
use crate::keywords::KeywordKind;
use crate::literal::LiteralBuffer;
use crate::token::{Token, TokenKind};
use crate::uescape;

/// Operator-class characters, length-16 plus backtick: `~!@#^&|`?+-*/%<>=`.
const OPERATOR_CHARS: &[u8] = b"~!@#^&|`?+-*/%<>=";
/// The subset of operator characters that, alone, are emitted as a
/// self-delimiting token rather than a one-byte `Op`.
const SELF_OPERATOR_BYTES: &[u8] = b"+-*/%^<>=";
/// Characters that block the trailing `+`/`-` trimming step when found
/// immediately before the trimmed character.
const TRIM_BLOCK_CHARS: &[u8] = b"~!@#^&|`?%";

fn is_operator_char(b: u8) -> bool {
    OPERATOR_CHARS.contains(&b)
}

/// Dollar-quote tag characters. Deliberately narrower than
/// [`sqlscan_core::is_ident_cont`]: a tag cannot itself contain `$`, since
/// `$` is the delimiter.
fn is_dolq_cont(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

fn find_comment_start(op: &[u8]) -> Option<usize> {
    let mut earliest = None;
    for pat in [&b"/*"[..], &b"--"[..]] {
        if let Some(p) = op.windows(2).position(|w| w == pat) {
            earliest = Some(earliest.map_or(p, |e: usize| e.min(p)));
        }
    }
    earliest
}

/// The scanner. Owns a [`Cursor`] over the caller's [`SourceBuffer`], a
/// snapshotted [`ScannerConfig`], and its collaborators. `Scanner` is not
/// `Clone`/`Copy`: it accumulates warnings across the life of a scan.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    config: ScannerConfig,
    keyword_resolver: Box<dyn KeywordResolver>,
    ident_case: Box<dyn IdentifierCase>,
    validator: Box<dyn MultibyteValidator>,
    encoding: Box<dyn EncodingQuery>,
    literal: LiteralBuffer,
    warnings: Vec<LexWarning>,
}

impl<'a> Scanner<'a> {
    /// Build a scanner over `buffer` with the default, UTF-8-only
    /// collaborator set (see [`crate::collaborators`]).
    #[must_use]
    pub fn new(buffer: &'a SourceBuffer, config: ScannerConfig) -> Self {
        Self::with_collaborators(
            buffer,
            config,
            Box::new(DefaultKeywordResolver),
            Box::new(AsciiIdentifierCase),
            Box::new(Utf8MultibyteValidator),
            Box::new(Utf8EncodingQuery),
        )
    }

    /// Build a scanner with caller-supplied collaborators — for embedding
    /// this scanner in an engine with real locale or non-UTF-8-server
    /// support.
    #[must_use]
    pub fn with_collaborators(
        buffer: &'a SourceBuffer,
        config: ScannerConfig,
        keyword_resolver: Box<dyn KeywordResolver>,
        ident_case: Box<dyn IdentifierCase>,
        validator: Box<dyn MultibyteValidator>,
        encoding: Box<dyn EncodingQuery>,
    ) -> Self {
        tracing::debug!(source_len = buffer.len(), "scanner initialized");
        Self {
            cursor: buffer.cursor(),
            config,
            keyword_resolver,
            ident_case,
            validator,
            encoding,
            literal: LiteralBuffer::new(),
            warnings: Vec::new(),
        }
    }

    /// Drain the warnings accumulated so far. Each literal issues at most
    /// one.
    pub fn take_warnings(&mut self) -> Vec<LexWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Convert a byte offset into a 1-based codepoint position, via the
    /// [`MultibyteValidator`] collaborator's length helper.
    #[must_use]
    pub fn error_position(&self, byte_offset: u32) -> usize {
        let end = byte_offset.min(self.cursor.source_len());
        self.validator.length(self.cursor.slice(0, end)) + 1
    }

    /// Scan and return the next token, or [`TokenKind::Eof`] at end of
    /// input. Whitespace and comments are consumed internally and never
    /// observed by the caller.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            if let Some(token) = self.scan_one()? {
                tracing::trace!(pos = token.pos, kind = ?token.kind, "token");
                return Ok(token);
            }
        }
    }

    /// One dispatch step. `Ok(None)` means "whitespace or comment consumed,
    /// call again" — the only case where `next_token`'s loop spins.
    fn scan_one(&mut self) -> Result<Option<Token>, LexError> {
        if self.cursor.is_eof() {
            return Ok(Some(Token::new(TokenKind::Eof, self.cursor.pos())));
        }

        let start = self.cursor.pos();
        let b = self.cursor.current();

        // 1. whitespace, `--` comment
        if is_whitespace(b) {
            self.cursor.eat_whitespace();
            return Ok(None);
        }
        if b == b'-' && self.cursor.peek2() == b'-' {
            self.cursor.eat_until_newline_or_eof();
            return Ok(None);
        }

        // 2. `/* */` comment, possibly nested
        if b == b'/' && self.cursor.peek2() == b'*' {
            self.skip_comment(start)?;
            return Ok(None);
        }

        // 3. bit literal
        if matches!(b, b'b' | b'B') && self.cursor.peek2() == b'\'' {
            self.cursor.advance_n(2);
            return self
                .bit_or_hex_literal(start, b'b', LexErrorKind::UnterminatedBitString)
                .map(Some);
        }

        // 4. hex literal
        if matches!(b, b'x' | b'X') && self.cursor.peek2() == b'\'' {
            self.cursor.advance_n(2);
            return self
                .bit_or_hex_literal(start, b'x', LexErrorKind::UnterminatedHexString)
                .map(Some);
        }

        // 5. national-character opener: push back the quote by never
        // consuming it.
        if matches!(b, b'n' | b'N') && self.cursor.peek2() == b'\'' {
            self.cursor.advance();
            return Ok(Some(Token::new(
                TokenKind::Keyword(KeywordKind::Nchar, "nchar"),
                start,
            )));
        }

        // 6/7. standard or extended string
        if b == b'\'' {
            self.cursor.advance();
            return if self.config.standard_conforming_strings == StandardConformingStrings::On {
                self.xq(start).map(Some)
            } else {
                self.xe(start, true).map(Some)
            };
        }
        if matches!(b, b'e' | b'E') && self.cursor.peek2() == b'\'' {
            self.cursor.advance_n(2);
            return self.xe(start, false).map(Some);
        }

        // 8/12/13. Unicode-escaped string/identifier, or failed u&
        if matches!(b, b'u' | b'U') && self.cursor.peek2() == b'&' {
            match self.cursor.peek_at(2) {
                b'\'' => {
                    if self.config.standard_conforming_strings != StandardConformingStrings::On {
                        return Err(LexError::new(
                            LexErrorKind::UnsafeUnicodeEscapeStringConstant,
                            start,
                        ));
                    }
                    self.cursor.advance_n(3);
                    return self.xus(start).map(Some);
                }
                b'"' => {
                    self.cursor.advance_n(3);
                    return self.xui(start).map(Some);
                }
                _ => {
                    // rule 13: leave the cursor untouched; the identifier
                    // rule below matches just the leading letter, since
                    // '&' is not ident_cont.
                }
            }
        }

        // 9/10/17. `$`: param, dollar-quote, or bare other-byte
        if b == b'$' {
            if self.cursor.peek2().is_ascii_digit() {
                return self.scan_param(start).map(Some);
            }
            if self.cursor.peek2() == b'$' || is_ident_start(self.cursor.peek2()) {
                return self.scan_dollar_quote(start).map(Some);
            }
            self.cursor.advance();
            return Ok(Some(Token::new(TokenKind::Other(b'$'), start)));
        }

        // 11. double-quoted identifier
        if b == b'"' {
            self.cursor.advance();
            return self.xd(start).map(Some);
        }

        // 14. typecast
        if b == b':' && self.cursor.peek2() == b':' {
            self.cursor.advance_n(2);
            return Ok(Some(Token::new(TokenKind::TypeCast, start)));
        }

        // 15. self bytes that never participate in a longer operator or
        // numeric run
        if matches!(b, b',' | b'(' | b')' | b'[' | b']' | b';') {
            self.cursor.advance();
            return Ok(Some(Token::new(TokenKind::Self_(b), start)));
        }
        if b == b':' {
            self.cursor.advance();
            return Ok(Some(Token::new(TokenKind::Self_(b':'), start)));
        }
        if b == b'.' {
            if self.cursor.peek2().is_ascii_digit() {
                return self.scan_number(start).map(Some);
            }
            self.cursor.advance();
            return Ok(Some(Token::new(TokenKind::Self_(b'.'), start)));
        }

        // 18-22. numbers
        if b.is_ascii_digit() {
            return self.scan_number(start).map(Some);
        }

        // 16. operator, with trimming
        if is_operator_char(b) {
            return self.scan_operator(start).map(Some);
        }

        // 23. identifier / keyword
        if is_ident_start(b) {
            return self.scan_identifier(start).map(Some);
        }

        // 24. other
        self.cursor.advance();
        Ok(Some(Token::new(TokenKind::Other(b), start)))
    }

    fn skip_comment(&mut self, start: u32) -> Result<(), LexError> {
        self.cursor.advance_n(2); // consume `/*`
        let mut depth: u32 = 1;
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnterminatedComment, start));
            }
            if self.cursor.current() == b'/' && self.cursor.peek2() == b'*' {
                self.cursor.advance_n(2);
                depth += 1;
            } else if self.cursor.current() == b'*' && self.cursor.peek2() == b'/' {
                self.cursor.advance_n(2);
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            } else {
                self.cursor.advance();
            }
        }
    }

    /// `xb`/`xh`: no doubling, no continuation — any single quote
    /// terminates unconditionally.
    fn bit_or_hex_literal(
        &mut self,
        start: u32,
        prefix: u8,
        unterminated: LexErrorKind,
    ) -> Result<Token, LexError> {
        self.literal.reset();
        self.literal.append_byte(prefix);
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(unterminated, start));
            }
            let b = self.cursor.current();
            if b == b'\'' {
                self.cursor.advance();
                break;
            }
            self.cursor.advance();
            self.literal.append_byte(b);
        }
        let body = self.literal.take();
        if prefix == b'b' {
            Ok(Token::new(TokenKind::BConst(body), start))
        } else {
            Ok(Token::new(TokenKind::XConst(body), start))
        }
    }

    /// The quote-termination micro-protocol's continuation check. Cursor is
    /// positioned right after a non-doubled closing quote. Returns `true`
    /// (and leaves the cursor past the continuation quote) only when the
    /// intervening whitespace contains a newline and is followed by
    /// another quote; otherwise resets the cursor to right after the first
    /// closing quote, regardless of what follows — which is what makes
    /// `quotefail` a non-issue here: there is nothing to disambiguate when
    /// push-back, not greedy regex matching, decides the boundary.
    fn scan_quote_continuation(&mut self) -> bool {
        let after_quote = self.cursor.pos();
        let mut saw_newline = false;
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | 0x0C => {
                    self.cursor.advance();
                }
                b'\r' | b'\n' => {
                    saw_newline = true;
                    self.cursor.advance();
                }
                b'\'' if saw_newline => {
                    self.cursor.advance();
                    return true;
                }
                _ => break,
            }
        }
        self.cursor.set_pos(after_quote);
        false
    }

    fn matches_uescape_keyword(&self) -> bool {
        const KW: &[u8] = b"UESCAPE";
        KW.iter()
            .enumerate()
            .all(|(i, &want)| self.cursor.peek_at(i as u32).to_ascii_uppercase() == want)
    }

    /// Attempts `{ws}*UESCAPE{ws}*'<c>'` right after a terminating quote.
    /// Falls back to the default escape character `\` on any shape
    /// mismatch, restoring the cursor exactly.
    fn try_scan_uescape_clause(&mut self) -> u8 {
        let fallback = self.cursor;
        self.cursor.eat_whitespace();
        if !self.matches_uescape_keyword() {
            self.cursor = fallback;
            return b'\\';
        }
        self.cursor.advance_n(7);
        self.cursor.eat_whitespace();
        if self.cursor.current() != b'\'' {
            self.cursor = fallback;
            return b'\\';
        }
        self.cursor.advance();
        let c = self.cursor.current();
        self.cursor.advance();
        if self.cursor.current() != b'\'' {
            self.cursor = fallback;
            return b'\\';
        }
        self.cursor.advance();
        c
    }

    fn xq(&mut self, start: u32) -> Result<Token, LexError> {
        self.literal.reset();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnterminatedQuotedString, start));
            }
            let b = self.cursor.current();
            if b == b'\'' {
                self.cursor.advance();
                if self.cursor.current() == b'\'' {
                    self.literal.append_byte(b'\'');
                    self.cursor.advance();
                    continue;
                }
                if self.scan_quote_continuation() {
                    continue;
                }
                break;
            }
            self.cursor.advance();
            self.literal.append_byte(b);
        }
        Ok(Token::new(TokenKind::SConst(self.literal.take()), start))
    }

    fn backslash_quote_allowed(&self) -> bool {
        match self.config.backslash_quote {
            BackslashQuote::On => true,
            BackslashQuote::Off => false,
            BackslashQuote::SafeEncoding => !self.encoding.client_is_client_only(),
        }
    }

    /// Issues the single "first escape in this literal" warning, if any,
    /// choosing its kind from the escaped character. Every further escape
    /// in the same literal is silent.
    fn note_escape_for_warning(&mut self, c: u8, warn_on_first_escape: &mut bool, pos: u32) {
        if *warn_on_first_escape {
            if self.config.escape_string_warning == EscapeStringWarning::On {
                let kind = match c {
                    b'\\' => LexWarningKind::NonstandardBackslashBackslash,
                    b'\'' => LexWarningKind::NonstandardBackslashQuote,
                    _ => LexWarningKind::NonstandardEscape,
                };
                self.warnings.push(LexWarning::new(kind, pos));
            }
            *warn_on_first_escape = false;
        }
    }

    fn xe(&mut self, start: u32, mut warn_on_first_escape: bool) -> Result<Token, LexError> {
        self.literal.reset();
        let mut saw_non_ascii = false;
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnterminatedQuotedString, start));
            }
            let b = self.cursor.current();
            if b == b'\'' {
                self.cursor.advance();
                if self.cursor.current() == b'\'' {
                    self.literal.append_byte(b'\'');
                    self.cursor.advance();
                    continue;
                }
                if self.scan_quote_continuation() {
                    continue;
                }
                break;
            }
            if b != b'\\' {
                self.cursor.advance();
                self.literal.append_byte(b);
                continue;
            }

            self.cursor.advance(); // consume backslash
            if self.cursor.is_eof() {
                // bare trailing backslash at EOF: keep it, the outer loop
                // will raise unterminated-quoted-string on the next spin.
                self.literal.append_byte(b'\\');
                continue;
            }
            let c = self.cursor.current();
            self.note_escape_for_warning(c, &mut warn_on_first_escape, self.cursor.pos());
            match c {
                b'b' | b'f' | b'n' | b'r' | b't' => {
                    if let Some(decoded) = escape::resolve_common_escape(c) {
                        self.cursor.advance();
                        self.literal.append_byte(decoded);
                    }
                }
                b'0'..=b'7' => {
                    let v = escape::decode_octal_escape(&mut self.cursor);
                    if v > 0x7F {
                        saw_non_ascii = true;
                    }
                    self.literal.append_byte(v);
                }
                b'x' => {
                    self.cursor.advance();
                    let v = escape::decode_hex_byte_escape(&mut self.cursor);
                    if v > 0x7F {
                        saw_non_ascii = true;
                    }
                    self.literal.append_byte(v);
                }
                b'u' | b'U' => {
                    let width = if c == b'u' { 4 } else { 8 };
                    self.cursor.advance();
                    let value = escape::decode_fixed_hex_escape(&mut self.cursor, width)
                        .map_err(|k| LexError::new(k, start))?;
                    self.decode_unicode_escape_in_xe(value, start, &mut saw_non_ascii)?;
                }
                b'\'' => {
                    if !self.backslash_quote_allowed() {
                        return Err(LexError::new(LexErrorKind::UnsafeBackslashQuote, start));
                    }
                    self.cursor.advance();
                    self.literal.append_byte(b'\'');
                }
                b'\\' => {
                    self.cursor.advance();
                    self.literal.append_byte(b'\\');
                }
                _ => {
                    if c == 0 || c >= 0x80 {
                        saw_non_ascii = true;
                    }
                    self.cursor.advance();
                    self.literal.append_byte(c);
                }
            }
        }
        if saw_non_ascii {
            self.validator.validate(self.literal.as_bytes(), start)?;
        }
        Ok(Token::new(TokenKind::SConst(self.literal.take()), start))
    }

    /// The surrogate-pairing protocol (`xe` → `xeu` → `xe`), inlined: since
    /// a whole `xe` literal is owned by a single call to [`Scanner::xe`],
    /// waiting for the paired low surrogate is a direct nested read rather
    /// than a separate state threaded across `next_token` calls.
    fn decode_unicode_escape_in_xe(
        &mut self,
        value: u32,
        start: u32,
        saw_non_ascii: &mut bool,
    ) -> Result<(), LexError> {
        if escape::is_high_surrogate(value) {
            let top = escape::surrogate_top(value);
            if self.cursor.current() != b'\\' || !matches!(self.cursor.peek2(), b'u' | b'U') {
                return Err(LexError::new(LexErrorKind::InvalidUnicodeSurrogatePair, start));
            }
            self.cursor.advance(); // backslash
            let width = if self.cursor.current() == b'u' { 4 } else { 8 };
            self.cursor.advance(); // u/U
            let low = escape::decode_fixed_hex_escape(&mut self.cursor, width)
                .map_err(|k| LexError::new(k, start))?;
            if !escape::is_low_surrogate(low) {
                return Err(LexError::new(LexErrorKind::InvalidUnicodeSurrogatePair, start));
            }
            let combined = escape::combine_surrogate_pair(top, low);
            self.push_unicode_codepoint(combined, start, saw_non_ascii)
        } else if escape::is_low_surrogate(value) {
            Err(LexError::new(LexErrorKind::InvalidUnicodeSurrogatePair, start))
        } else {
            self.push_unicode_codepoint(value, start, saw_non_ascii)
        }
    }

    fn push_unicode_codepoint(
        &mut self,
        value: u32,
        start: u32,
        saw_non_ascii: &mut bool,
    ) -> Result<(), LexError> {
        let server_is_utf8 = self.encoding.server_is_utf8();
        let (bytes, len, non_ascii) = escape::codepoint_to_utf8(value, server_is_utf8)
            .map_err(|k| LexError::new(k, start))?;
        self.literal.append(&bytes[..len]);
        if non_ascii {
            *saw_non_ascii = true;
        }
        Ok(())
    }

    fn xus(&mut self, start: u32) -> Result<Token, LexError> {
        self.literal.reset();
        let escape_char;
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnterminatedQuotedString, start));
            }
            let b = self.cursor.current();
            if b == b'\'' {
                self.cursor.advance();
                if self.cursor.current() == b'\'' {
                    self.literal.append_byte(b'\'');
                    self.cursor.advance();
                    continue;
                }
                if self.scan_quote_continuation() {
                    continue;
                }
                escape_char = self.try_scan_uescape_clause();
                break;
            }
            self.cursor.advance();
            self.literal.append_byte(b);
        }
        if !uescape::is_valid_escape_char(escape_char) {
            return Err(LexError::new(LexErrorKind::InvalidUnicodeEscapeChar, start));
        }
        let body = self.literal.take();
        let server_is_utf8 = self.encoding.server_is_utf8();
        let decoded = uescape::process(&body, escape_char, server_is_utf8, 3)
            .map_err(|(k, offset)| LexError::new(k, start + offset))?;
        self.validator.validate(&decoded, start)?;
        Ok(Token::new(TokenKind::SConst(decoded), start))
    }

    fn xd(&mut self, start: u32) -> Result<Token, LexError> {
        self.literal.reset();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnterminatedQuotedIdent, start));
            }
            let b = self.cursor.current();
            if b == b'"' {
                self.cursor.advance();
                if self.cursor.current() == b'"' {
                    self.literal.append_byte(b'"');
                    self.cursor.advance();
                    continue;
                }
                break;
            }
            self.cursor.advance();
            self.literal.append_byte(b);
        }
        if self.literal.is_empty() {
            return Err(LexError::new(LexErrorKind::ZeroLengthDelimitedIdent, start));
        }
        let mut ident = self.literal.take();
        if ident.len() >= NAMEDATALEN {
            self.ident_case.truncate(&mut ident);
        }
        Ok(Token::new(TokenKind::Ident(ident), start))
    }

    /// Like [`Scanner::xd`], but terminated with UESCAPE recognition
    /// instead of an unconditional close, and the body runs through C5
    /// before the emptiness/truncation checks. No continuation: that is a
    /// string-literal-only concept.
    fn xui(&mut self, start: u32) -> Result<Token, LexError> {
        self.literal.reset();
        let escape_char;
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnterminatedQuotedIdent, start));
            }
            let b = self.cursor.current();
            if b == b'"' {
                self.cursor.advance();
                if self.cursor.current() == b'"' {
                    self.literal.append_byte(b'"');
                    self.cursor.advance();
                    continue;
                }
                escape_char = self.try_scan_uescape_clause();
                break;
            }
            self.cursor.advance();
            self.literal.append_byte(b);
        }
        if !uescape::is_valid_escape_char(escape_char) {
            return Err(LexError::new(LexErrorKind::InvalidUnicodeEscapeChar, start));
        }
        let body = self.literal.take();
        if body.is_empty() {
            return Err(LexError::new(LexErrorKind::ZeroLengthDelimitedIdent, start));
        }
        let server_is_utf8 = self.encoding.server_is_utf8();
        let decoded = uescape::process(&body, escape_char, server_is_utf8, 3)
            .map_err(|(k, offset)| LexError::new(k, start + offset))?;
        self.validator.validate(&decoded, start)?;
        let mut ident = decoded;
        if ident.len() >= NAMEDATALEN {
            self.ident_case.truncate(&mut ident);
        }
        Ok(Token::new(TokenKind::Ident(ident), start))
    }

    fn scan_param(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.advance(); // `$`
        let digits_start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let text = self.cursor.slice(digits_start, self.cursor.pos());
        let value: i32 = std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(i32::MAX);
        Ok(Token::new(TokenKind::Param(value), start))
    }

    fn scan_dollar_quote(&mut self, start: u32) -> Result<Token, LexError> {
        let opener_start = self.cursor.pos();
        self.cursor.advance(); // leading `$`
        if self.cursor.current() == b'$' {
            self.cursor.advance();
        } else {
            // caller confirmed is_ident_start(peek2())
            self.cursor.advance();
            self.cursor.eat_while(is_dolq_cont);
            if self.cursor.current() != b'$' {
                // rule 10: failed dollar-quote
                self.cursor.set_pos(opener_start + 1);
                return Ok(Token::new(TokenKind::Other(b'$'), start));
            }
            self.cursor.advance();
        }
        let delim = self.cursor.slice(opener_start, self.cursor.pos()).to_vec();
        self.xdolq(start, delim)
    }

    fn xdolq(&mut self, start: u32, delim: Vec<u8>) -> Result<Token, LexError> {
        self.literal.reset();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::new(LexErrorKind::UnterminatedDollarString, start));
            }
            if self.cursor.current() != b'$' {
                let chunk_start = self.cursor.pos();
                self.cursor.eat_until(b'$');
                self.literal.append(self.cursor.slice(chunk_start, self.cursor.pos()));
                continue;
            }

            let attempt = self.cursor; // Copy snapshot
            let candidate_start = self.cursor.pos();
            self.cursor.advance(); // leading `$`
            let well_formed = if self.cursor.current() == b'$' {
                self.cursor.advance();
                true
            } else if is_ident_start(self.cursor.current()) {
                self.cursor.advance();
                self.cursor.eat_while(is_dolq_cont);
                if self.cursor.current() == b'$' {
                    self.cursor.advance();
                    true
                } else {
                    false
                }
            } else {
                false
            };

            if !well_formed {
                // the leading `$` was not part of any `$...$` run; it's
                // just a content byte (open question 1: dolqdelim's
                // minimum length is 2, which is why candidate.len() - 1
                // below is always >= 1 and forward progress is guaranteed
                // whenever `well_formed` does hold).
                self.cursor = attempt;
                self.literal.append_byte(b'$');
                self.cursor.advance();
                continue;
            }

            let candidate_end = self.cursor.pos();
            let candidate = attempt.slice(candidate_start, candidate_end);
            if candidate == delim.as_slice() {
                return Ok(Token::new(TokenKind::SConst(self.literal.take()), start));
            }
            self.literal.append(&candidate[..candidate.len() - 1]);
            self.cursor = attempt;
            self.cursor.advance_n(candidate.len() as u32 - 1);
        }
    }

    fn scan_number(&mut self, start: u32) -> Result<Token, LexError> {
        let num_start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let mut is_float = false;

        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
            is_float = true;
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            let mark = self.cursor.pos();
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            if self.cursor.current().is_ascii_digit() {
                self.cursor.eat_while(|b| b.is_ascii_digit());
                is_float = true;
            } else {
                // realfail1 / realfail2: push back `[Ee]` or `[Ee][+-]`
                self.cursor.set_pos(mark);
            }
        }

        let text = self.cursor.slice(num_start, self.cursor.pos());
        if !is_float {
            if let Ok(v) = std::str::from_utf8(text).unwrap_or_default().parse::<i32>() {
                return Ok(Token::new(TokenKind::IConst(v), start));
            }
        }
        Ok(Token::new(TokenKind::FConst(text.to_vec()), start))
    }

    fn scan_operator(&mut self, start: u32) -> Result<Token, LexError> {
        let run_start = self.cursor.pos();
        self.cursor.eat_while(is_operator_char);
        let mut op = self.cursor.slice(run_start, self.cursor.pos()).to_vec();

        if let Some(cut) = find_comment_start(&op) {
            let excess = (op.len() - cut) as u32;
            self.cursor.retreat(excess);
            op.truncate(cut);
        }

        while op.len() > 1 && matches!(op[op.len() - 1], b'+' | b'-') {
            let prev = op[op.len() - 2];
            if TRIM_BLOCK_CHARS.contains(&prev) {
                break;
            }
            op.pop();
            self.cursor.retreat(1);
        }

        if op.len() == 1 {
            let b = op[0];
            return Ok(if SELF_OPERATOR_BYTES.contains(&b) {
                Token::new(TokenKind::Self_(b), start)
            } else {
                Token::new(TokenKind::Op(op), start)
            });
        }

        if op.len() >= NAMEDATALEN {
            return Err(LexError::new(LexErrorKind::OperatorTooLong, start));
        }

        if op == b"!=" {
            return Ok(Token::new(TokenKind::Op(b"<>".to_vec()), start));
        }

        Ok(Token::new(TokenKind::Op(op), start))
    }

    fn scan_identifier(&mut self, start: u32) -> Result<Token, LexError> {
        let ident_start = self.cursor.pos();
        self.cursor.advance();
        self.cursor.eat_while(is_ident_cont);
        let raw = self.cursor.slice(ident_start, self.cursor.pos());
        let folded = self.ident_case.downcase_truncate(raw);
        if let Some((kind, canonical)) = self.keyword_resolver.lookup(&folded) {
            return Ok(Token::new(TokenKind::Keyword(kind, canonical), start));
        }
        Ok(Token::new(TokenKind::Ident(folded), start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &[u8]) -> Vec<TokenKind> {
        let buf = SourceBuffer::new(src);
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let mut out = Vec::new();
        loop {
            let tok = scanner.next_token().expect("scan should not fail");
            let eof = tok.kind.is_eof();
            out.push(tok.kind);
            if eof {
                break;
            }
        }
        out
    }

    #[test]
    fn s1_select_one_semicolon() {
        let buf = SourceBuffer::new(b"SELECT 1;");
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());

        let t1 = scanner.next_token().unwrap();
        assert_eq!(t1.kind, TokenKind::Keyword(KeywordKind::Select, "select"));
        assert_eq!(t1.pos, 0);

        let t2 = scanner.next_token().unwrap();
        assert_eq!(t2.kind, TokenKind::IConst(1));
        assert_eq!(t2.pos, 7);

        let t3 = scanner.next_token().unwrap();
        assert_eq!(t3.kind, TokenKind::Self_(b';'));
        assert_eq!(t3.pos, 8);

        assert!(scanner.next_token().unwrap().kind.is_eof());
    }

    #[test]
    fn s2_uescape_identifier_default_escape() {
        let toks = tokens(br#"U&"d\0061t\+000061""#);
        assert_eq!(toks[0], TokenKind::Ident(b"data".to_vec()));
        assert!(toks[1].is_eof());
    }

    #[test]
    fn s3_dollar_quote_opaque_body() {
        let toks = tokens(b"$tag$he said $inner$ ok$tag$");
        assert_eq!(toks[0], TokenKind::SConst(b"he said $inner$ ok".to_vec()));
        assert!(toks[1].is_eof());
    }

    #[test]
    fn s4_unterminated_extended_string_is_hard_error() {
        let buf = SourceBuffer::new(b"E'\\");
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedQuotedString);
    }

    #[test]
    fn s5_leading_dashdash_comment_then_plus() {
        let buf = SourceBuffer::new(b"--foo\n+");
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let t = scanner.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::Self_(b'+'));
        assert_eq!(t.pos, 6);
        assert!(scanner.next_token().unwrap().kind.is_eof());
    }

    #[test]
    fn s6_real_then_trailing_identifier() {
        let toks = tokens(b"1.5e+3xyz");
        assert_eq!(toks[0], TokenKind::FConst(b"1.5e+3".to_vec()));
        assert_eq!(toks[1], TokenKind::Ident(b"xyz".to_vec()));
    }

    #[test]
    fn s7_bit_string_accepted_verbatim() {
        let toks = tokens(b"B'10Z'");
        assert_eq!(toks[0], TokenKind::BConst(b"b10Z".to_vec()));
    }

    #[test]
    fn locations_are_monotonic_across_a_statement() {
        let buf = SourceBuffer::new(b"select a, b from t where a = 1");
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let mut last = None;
        loop {
            let tok = scanner.next_token().unwrap();
            if tok.kind.is_eof() {
                break;
            }
            if let Some(prev) = last {
                assert!(tok.pos > prev);
            }
            last = Some(tok.pos);
        }
    }

    #[test]
    fn double_quote_doubling_produces_embedded_quote() {
        let toks = tokens(br#""a""b""#);
        assert_eq!(toks[0], TokenKind::Ident(b"a\"b".to_vec()));
    }

    #[test]
    fn string_doubling_produces_embedded_quote() {
        let toks = tokens(b"'a''b'");
        assert_eq!(toks[0], TokenKind::SConst(b"a'b".to_vec()));
    }

    #[test]
    fn continuation_requires_a_newline_between_quoted_runs() {
        let space_only = tokens(b"'a' 'b'");
        assert_eq!(space_only[0], TokenKind::SConst(b"a".to_vec()));
        assert_eq!(space_only[1], TokenKind::SConst(b"b".to_vec()));

        let with_newline = tokens(b"'a'\n'b'");
        assert_eq!(with_newline[0], TokenKind::SConst(b"ab".to_vec()));
        assert!(with_newline[1].is_eof());
    }

    #[test]
    fn overflow_promotes_to_fconst_exact_text() {
        let toks = tokens(b"9999999999");
        assert_eq!(toks[0], TokenKind::FConst(b"9999999999".to_vec()));

        let toks = tokens(b"2147483647");
        assert_eq!(toks[0], TokenKind::IConst(2_147_483_647));
    }

    #[test]
    fn realfail_pushes_back_one_or_two_bytes() {
        let toks = tokens(b"1e");
        assert_eq!(toks[0], TokenKind::FConst(b"1".to_vec()));
        assert_eq!(toks[1], TokenKind::Ident(b"e".to_vec()));

        let toks = tokens(b"1e+");
        assert_eq!(toks[0], TokenKind::FConst(b"1".to_vec()));
        assert_eq!(toks[1], TokenKind::Self_(b'+'));
    }

    #[test]
    fn surrogate_pair_decodes_to_supplementary_plane_utf8() {
        let toks = tokens(b"E'\\uD834\\uDD1E'");
        assert_eq!(toks[0], TokenKind::SConst(vec![0xF0, 0x9D, 0x84, 0x9E]));
    }

    #[test]
    fn not_equal_is_an_alias_for_angle_brackets() {
        let toks = tokens(b"!=");
        assert_eq!(toks[0], TokenKind::Op(b"<>".to_vec()));
    }

    #[test]
    fn not_equal_minus_splits_into_alias_then_self_minus() {
        let toks = tokens(b"!=-");
        assert_eq!(toks[0], TokenKind::Op(b"<>".to_vec()));
        assert_eq!(toks[1], TokenKind::Self_(b'-'));
    }

    #[test]
    fn operator_comment_interaction_plus_then_comment_is_skipped() {
        let toks = tokens(b"+/*c*/");
        assert_eq!(toks[0], TokenKind::Self_(b'+'));
        assert!(toks[1].is_eof());
    }

    #[test]
    fn national_character_opener_emits_nchar_then_string() {
        let toks = tokens(b"n'x'");
        assert_eq!(toks[0], TokenKind::Keyword(KeywordKind::Nchar, "nchar"));
        assert_eq!(toks[1], TokenKind::SConst(b"x".to_vec()));
    }

    #[test]
    fn failed_u_ampersand_falls_back_to_plain_identifier() {
        let toks = tokens(b"u&x");
        assert_eq!(toks[0], TokenKind::Ident(b"u".to_vec()));
        assert_eq!(toks[1], TokenKind::Op(b"&".to_vec()));
        assert_eq!(toks[2], TokenKind::Ident(b"x".to_vec()));
    }

    #[test]
    fn failed_dollar_quote_falls_back_to_dollar_other_byte() {
        let toks = tokens(b"$abc 1");
        assert_eq!(toks[0], TokenKind::Other(b'$'));
        assert_eq!(toks[1], TokenKind::Ident(b"abc".to_vec()));
        assert_eq!(toks[2], TokenKind::IConst(1));
    }

    #[test]
    fn positional_parameter_reference() {
        let toks = tokens(b"$3");
        assert_eq!(toks[0], TokenKind::Param(3));
    }

    #[test]
    fn nested_comments_track_depth() {
        let toks = tokens(b"/* outer /* inner */ still-out */1");
        assert_eq!(toks[0], TokenKind::IConst(1));
    }

    #[test]
    fn unterminated_comment_is_a_hard_error() {
        let buf = SourceBuffer::new(b"/* never closes");
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
    }

    #[test]
    fn unsafe_backslash_quote_under_off_policy_is_an_error() {
        let mut config = ScannerConfig::new();
        config.backslash_quote = BackslashQuote::Off;
        let buf = SourceBuffer::new(b"E'\\''");
        let mut scanner = Scanner::new(&buf, config);
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnsafeBackslashQuote);
    }

    #[test]
    fn raw_high_bit_byte_in_extended_string_fails_multibyte_validation() {
        // the backslash is stripped and the raw 0xFF byte is kept
        // literally (it matches none of the named escapes), so it reaches
        // validation unmodified and is not valid UTF-8.
        let mut src = b"  E'\\".to_vec();
        src.push(0xFF);
        src.push(b'\'');
        let buf = SourceBuffer::new(&src);
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidMultibyteSequence);
        assert_eq!(err.pos, 2);
    }

    #[test]
    fn nonstandard_escape_warning_fires_once_per_literal() {
        let buf = SourceBuffer::new(b"E'\\n\\n'");
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        scanner.next_token().unwrap();
        assert_eq!(scanner.take_warnings().len(), 1);
    }

    #[test]
    fn unicode_string_rejected_when_standard_conforming_strings_is_off() {
        let mut config = ScannerConfig::new();
        config.standard_conforming_strings = StandardConformingStrings::Off;
        let buf = SourceBuffer::new(b"U&'x'");
        let mut scanner = Scanner::new(&buf, config);
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnsafeUnicodeEscapeStringConstant);
    }

    #[test]
    fn zero_length_delimited_identifier_is_an_error() {
        let buf = SourceBuffer::new(b"\"\"");
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::ZeroLengthDelimitedIdent);
    }

    #[test]
    fn error_position_counts_codepoints_not_bytes() {
        let buf = SourceBuffer::new("café x".as_bytes());
        let scanner = Scanner::new(&buf, ScannerConfig::new());
        // byte offset 5 is 'x' (c-a-f-\xc3-\xa9 = 5 bytes for "café").
        assert_eq!(scanner.error_position(5), 5);
    }
}
