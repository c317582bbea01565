//! Integration tests: the scanner observed only through its public API,
//! plus property tests for a handful of invariants that hold across any
//! input rather than just the scenarios spelled out in the scanner's own
//! unit tests.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sqlscan::{LexErrorKind, Scanner, ScannerConfig, SourceBuffer, TokenKind};

fn scan_all(src: &[u8]) -> Result<Vec<TokenKind>, LexErrorKind> {
    let buf = SourceBuffer::new(src);
    let mut scanner = Scanner::new(&buf, ScannerConfig::new());
    let mut out = Vec::new();
    loop {
        match scanner.next_token() {
            Ok(tok) => {
                let eof = tok.kind.is_eof();
                out.push(tok.kind);
                if eof {
                    return Ok(out);
                }
            }
            Err(err) => return Err(err.kind),
        }
    }
}

#[test]
fn a_full_select_statement_tokenizes_end_to_end() {
    let toks = scan_all(b"SELECT id, name FROM \"Users\" WHERE age >= 18;").unwrap();
    assert!(matches!(toks[0], TokenKind::Keyword(_, "select")));
    assert!(toks.last().unwrap().is_eof());
}

#[test]
fn mixed_literal_kinds_in_one_statement() {
    let toks = scan_all(b"INSERT INTO t VALUES (b'101', x'1A', $$plain$$, 3.14, $1);").unwrap();
    assert!(matches!(toks[0], TokenKind::Keyword(_, "insert")));
    assert!(toks.iter().any(|t| matches!(t, TokenKind::BConst(_))));
    assert!(toks.iter().any(|t| matches!(t, TokenKind::XConst(_))));
    assert!(toks.iter().any(|t| matches!(t, TokenKind::SConst(_))));
    assert!(toks.iter().any(|t| matches!(t, TokenKind::FConst(_))));
    assert!(toks.iter().any(|t| matches!(t, TokenKind::Param(1))));
}

#[test]
fn empty_input_is_immediate_eof() {
    let toks = scan_all(b"").unwrap();
    assert_eq!(toks, vec![TokenKind::Eof]);
}

#[test]
fn whitespace_only_input_is_immediate_eof() {
    let toks = scan_all(b"   \t\n\r  ").unwrap();
    assert_eq!(toks, vec![TokenKind::Eof]);
}

#[test]
fn uescape_clause_with_custom_escape_character() {
    let toks = scan_all(br#"U&"d!0061t!+000061" UESCAPE '!'"#).unwrap();
    assert_eq!(toks[0], TokenKind::Ident(b"data".to_vec()));
}

#[test]
fn dollar_quote_with_tagged_delimiter_survives_embedded_dollar_runs() {
    let toks = scan_all(b"$body$a $not$close$ b$body$").unwrap();
    assert_eq!(toks[0], TokenKind::SConst(b"a $not$close$ b".to_vec()));
}

#[test]
fn interior_nul_byte_is_not_mistaken_for_eof() {
    // a NUL inside an identifier's ident_cont run is not itself ident_cont,
    // so it simply terminates the identifier like any other non-ident byte.
    let mut src = b"abc".to_vec();
    src.push(0);
    src.extend_from_slice(b"def");
    let toks = scan_all(&src).unwrap();
    assert_eq!(toks[0], TokenKind::Ident(b"abc".to_vec()));
    assert_eq!(toks[1], TokenKind::Other(0));
    assert_eq!(toks[2], TokenKind::Ident(b"def".to_vec()));
}

proptest! {
    /// Property 1: coverage. For any finite input, scanning either
    /// terminates in a finite token stream ending in EOF or raises exactly
    /// one hard error; it never panics and never loops forever (bounded by
    /// running under proptest's own timeout).
    #[test]
    fn coverage_every_input_terminates_cleanly(src in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = scan_all(&src);
    }

    /// Property 2: locations are monotonic. Every non-EOF token's start
    /// offset strictly exceeds the previous one's.
    #[test]
    fn locations_are_strictly_increasing(src in "[ -~\n\t]{0,200}") {
        let buf = SourceBuffer::new(src.as_bytes());
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let mut last: Option<u32> = None;
        loop {
            let Ok(tok) = scanner.next_token() else { break };
            if tok.kind.is_eof() {
                break;
            }
            if let Some(prev) = last {
                prop_assert!(tok.pos > prev);
            }
            last = Some(tok.pos);
        }
    }

    /// Property 13 (no-backtrack), observed from outside: the number of
    /// `next_token` calls needed to drain an input never exceeds its byte
    /// length by more than a small constant factor. A scanner that
    /// backtracked over already-seen bytes could in principle re-split a
    /// suffix into unboundedly more tokens than input bytes; this bounds
    /// that from the public API without needing internal touch-counting.
    #[test]
    fn token_count_is_bounded_by_input_length(src in "[ -~\n\t]{0,200}") {
        let buf = SourceBuffer::new(src.as_bytes());
        let mut scanner = Scanner::new(&buf, ScannerConfig::new());
        let mut count = 0u32;
        loop {
            let Ok(tok) = scanner.next_token() else { break };
            count += 1;
            if tok.kind.is_eof() {
                break;
            }
            prop_assert!(count <= src.len() as u32 + 2);
        }
    }
}
