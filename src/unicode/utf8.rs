//! Codepoint scanning over UTF-8 bytes.
//!
//! UTF-8 has no random access by codepoint. Every conversion from a codepoint
//! offset to a byte offset walks the buffer one codepoint at a time, using the
//! lead byte to learn how far to step. Nothing here divides a byte length by
//! an assumed width.
//!
//! The helpers take `&[u8]` but assume well-formed input: callers hold a
//! `&str` (or bytes already validated into one) and only start scans at
//! codepoint boundaries.

/// Encoded width in bytes of the codepoint whose lead byte is `lead`.
///
/// Continuation bytes and invalid lead bytes report 1 so a scan over
/// malformed input still terminates.
#[inline]
#[must_use]
pub const fn encoded_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Check whether `byte` is a UTF-8 continuation byte (`10xxxxxx`).
#[inline]
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Count codepoints in `bytes`.
#[must_use]
pub fn count(bytes: &[u8]) -> usize {
    let mut offset = 0;
    let mut n = 0;
    while offset < bytes.len() {
        offset += encoded_width(bytes[offset]);
        n += 1;
    }
    n
}

/// Byte offset reached by stepping `n` codepoints forward from `start`.
///
/// Returns `None` if fewer than `n` codepoints follow `start`. Stepping zero
/// codepoints from the end is valid and returns the end.
#[must_use]
pub fn advance(bytes: &[u8], start: usize, n: usize) -> Option<usize> {
    let mut offset = start;
    for _ in 0..n {
        let lead = *bytes.get(offset)?;
        offset += encoded_width(lead);
    }
    (offset <= bytes.len()).then_some(offset)
}

/// Like [`advance`], but stops at the end instead of failing.
///
/// Returns the byte offset reached and the number of codepoints stepped.
#[must_use]
pub fn advance_saturating(bytes: &[u8], start: usize, n: usize) -> (usize, usize) {
    let mut offset = start;
    let mut stepped = 0;
    while stepped < n && offset < bytes.len() {
        offset += encoded_width(bytes[offset]);
        stepped += 1;
    }
    (offset.min(bytes.len()), stepped)
}

/// Byte offset reached by stepping `n` codepoints backward from `end`.
///
/// Returns `None` if fewer than `n` codepoints precede `end`.
#[must_use]
pub fn retreat(bytes: &[u8], end: usize, n: usize) -> Option<usize> {
    let mut offset = end.min(bytes.len());
    for _ in 0..n {
        if offset == 0 {
            return None;
        }
        offset -= 1;
        while offset > 0 && is_continuation(bytes[offset]) {
            offset -= 1;
        }
    }
    Some(offset)
}

/// Byte range `(start, end)` covering `count` codepoints from codepoint `pos`.
///
/// `pos` must not exceed the codepoint count; `count` is clamped to the end.
#[must_use]
pub fn byte_range(bytes: &[u8], pos: usize, count: usize) -> Option<(usize, usize)> {
    let start = advance(bytes, 0, pos)?;
    let (end, _) = advance_saturating(bytes, start, count);
    Some((start, end))
}

/// Decode the codepoint starting at byte `offset` of a `str`.
#[inline]
#[must_use]
pub fn decode_at(text: &str, offset: usize) -> Option<char> {
    text.get(offset..)?.chars().next()
}
