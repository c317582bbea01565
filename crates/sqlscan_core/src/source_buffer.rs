//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The scanner's input is an arbitrary client-encoded byte string, not
//! necessarily valid UTF-8 (high-bit bytes are legal inside identifiers
//! and string bodies under non-UTF-8 client encodings). The buffer
//! therefore owns raw bytes rather than a `&str`, and guarantees two
//! trailing `0x00` sentinel bytes so [`Cursor::peek`]/[`Cursor::peek2`]
//! never need a bounds check.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer for zero-bounds-check scanning.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from raw source bytes.
    ///
    /// Source buffers larger than `u32::MAX` bytes (~4 GiB) are accepted
    /// but `source_len` saturates at `u32::MAX`; the caller is expected to
    /// reject oversized inputs upstream.
    pub fn new(source: &[u8]) -> Self {
        let source_len = source.len();

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Allocate zero-filled buffer, then copy source bytes. The sentinel
        // (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        let source_len_u32 = u32::try_from(source_len).unwrap_or(u32::MAX);

        Self {
            buf,
            source_len: source_len_u32,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let buf = SourceBuffer::new(b"");
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(buf.as_bytes().is_empty());
    }

    #[test]
    fn ascii_source() {
        let buf = SourceBuffer::new(b"select 1");
        assert_eq!(buf.len(), 8);
        assert_eq!(buf.as_bytes(), b"select 1");
    }

    #[test]
    fn high_bit_bytes_are_preserved() {
        // Identifiers and string bodies may carry bytes from a non-UTF-8
        // client encoding; the buffer must not reject or mangle them.
        let source: &[u8] = &[b'a', 0xE9, b'b']; // e.g. Latin-1 'e-acute'
        let buf = SourceBuffer::new(source);
        assert_eq!(buf.as_bytes(), source);
    }

    #[test]
    fn buffer_aligned_to_cache_line() {
        for len in [0, 1, 10, 63, 64, 65, 127, 128, 1000] {
            let source = vec![b'x'; len];
            let buf = SourceBuffer::new(&source);
            assert_eq!(buf.buf.len() % CACHE_LINE, 0);
        }
    }

    #[test]
    fn sentinel_and_padding_are_zero() {
        let buf = SourceBuffer::new(b"abc");
        for &b in &buf.buf[3..] {
            assert_eq!(b, 0);
        }
    }

    #[test]
    fn cursor_on_empty_source_is_eof() {
        let buf = SourceBuffer::new(b"");
        let cursor = buf.cursor();
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn large_source() {
        let source = vec![b'x'; 100_000];
        let buf = SourceBuffer::new(&source);
        assert_eq!(buf.len(), 100_000);
        assert_eq!(buf.buf.len() % CACHE_LINE, 0);
    }
}
