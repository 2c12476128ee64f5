//! Owning, codepoint-indexed UTF-8 string.
//!
//! [`CodepointString`] stores text in its native variable-width encoding and
//! exposes a codepoint-count interface on top. There is no auxiliary index:
//! every positional operation first walks the bytes from the start to find the
//! byte offset of the requested codepoint, then splices bytes. That keeps
//! memory and interop cheap at the cost of O(n) indexing, which is fine for
//! editing that stays near a cursor.
//!
//! Positions out of range are errors ([`Error::IndexOutOfRange`]), never
//! silently clamped. Callers that want clamping (the text box) do it before
//! calling in.
//!
//! # Examples
//!
//! ```
//! use termline::CodepointString;
//!
//! let mut s = CodepointString::from("hllo");
//! s.insert(1, 'e').unwrap();
//! s.push('水');
//! assert_eq!(s, "hello水");
//! assert_eq!(s.len(), 6);
//! assert_eq!(s.byte_len(), 8);
//!
//! s.erase(0, 1).unwrap();
//! assert_eq!(s.at(0).unwrap(), 'e');
//! ```

use crate::error::{Error, Result};
use crate::text::CodepointView;
use crate::unicode::utf8;
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};

/// Owning UTF-8 string addressed by codepoint index.
///
/// The storage is always valid UTF-8: only `char`s, validated scalar values,
/// or validated byte buffers are ever written into it. Copies are deep.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodepointString {
    bytes: String,
}

impl CodepointString {
    /// Create an empty string.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: String::new(),
        }
    }

    /// Create an empty string with room for `bytes` bytes.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: String::with_capacity(bytes),
        }
    }

    /// `count` copies of one codepoint.
    #[must_use]
    pub fn repeat(count: usize, ch: char) -> Self {
        let mut s = Self::with_capacity(count * ch.len_utf8());
        s.append_repeated(count, ch);
        s
    }

    /// Build from raw scalar values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCodepoint`] for surrogates or values above
    /// U+10FFFF.
    pub fn from_codepoints(codepoints: &[u32]) -> Result<Self> {
        codepoints
            .iter()
            .map(|&cp| char::from_u32(cp).ok_or(Error::InvalidCodepoint(cp)))
            .collect()
    }

    /// Build from raw scalar values up to (not including) the first zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCodepoint`] if a value before the zero is a
    /// surrogate or above U+10FFFF.
    pub fn from_codepoints_until_nul(codepoints: &[u32]) -> Result<Self> {
        let end = codepoints
            .iter()
            .position(|&cp| cp == 0)
            .unwrap_or(codepoints.len());
        Self::from_codepoints(&codepoints[..end])
    }

    /// Copy `count` codepoints of `source` starting at codepoint `pos`.
    ///
    /// `count` is clamped to the end of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `pos > source.len()`.
    pub fn from_view_range(source: CodepointView<'_>, pos: usize, count: usize) -> Result<Self> {
        source.substr(pos, count).map(Self::from)
    }

    /// Take ownership of already-encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the bytes are not valid UTF-8.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self> {
        String::from_utf8(bytes)
            .map(|bytes| Self { bytes })
            .map_err(|e| Error::InvalidEncoding {
                valid_up_to: e.utf8_error().valid_up_to(),
            })
    }

    /// Number of codepoints. Linear in the byte length; not cached.
    #[must_use]
    pub fn len(&self) -> usize {
        utf8::count(self.bytes.as_bytes())
    }

    /// Number of encoded bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The text as a `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.bytes
    }

    /// The encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_bytes()
    }

    /// A view over the whole string.
    #[must_use]
    pub fn as_view(&self) -> CodepointView<'_> {
        CodepointView::new(&self.bytes)
    }

    /// Consume into a `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.bytes
    }

    /// Iterate over codepoints.
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.bytes.chars()
    }

    /// Codepoint at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<char> {
        self.as_view().at(index)
    }

    /// Codepoint at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.as_view().get(index)
    }

    /// First codepoint.
    #[must_use]
    pub fn front(&self) -> Option<char> {
        self.as_view().front()
    }

    /// Last codepoint.
    #[must_use]
    pub fn back(&self) -> Option<char> {
        self.as_view().back()
    }

    /// Insert one codepoint before codepoint `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > self.len()`.
    pub fn insert(&mut self, index: usize, ch: char) -> Result<()> {
        let offset = self.byte_offset(index)?;
        self.bytes.insert(offset, ch);
        Ok(())
    }

    /// Insert `count` copies of one codepoint before codepoint `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > self.len()`.
    pub fn insert_repeated(&mut self, index: usize, count: usize, ch: char) -> Result<()> {
        let offset = self.byte_offset(index)?;
        let run: String = std::iter::repeat_n(ch, count).collect();
        self.bytes.insert_str(offset, &run);
        Ok(())
    }

    /// Insert the text of `view` before codepoint `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > self.len()`.
    pub fn insert_view(&mut self, index: usize, view: CodepointView<'_>) -> Result<()> {
        let offset = self.byte_offset(index)?;
        self.bytes.insert_str(offset, view.as_str());
        Ok(())
    }

    /// Remove `count` codepoints starting at codepoint `index`.
    ///
    /// `count` is clamped to the end, so `erase(i, usize::MAX)` truncates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > self.len()`.
    pub fn erase(&mut self, index: usize, count: usize) -> Result<()> {
        let (start, end) = utf8::byte_range(self.bytes.as_bytes(), index, count)
            .ok_or_else(|| self.out_of_range(index))?;
        self.bytes.replace_range(start..end, "");
        Ok(())
    }

    /// Overwrite the codepoint at `index` with `ch`.
    ///
    /// The two codepoints may have different encoded widths; the bytes after
    /// `index` shift as needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn replace(&mut self, index: usize, ch: char) -> Result<()> {
        let bytes = self.bytes.as_bytes();
        let start = utf8::advance(bytes, 0, index).filter(|&start| start < bytes.len());
        let Some(start) = start else {
            return Err(self.out_of_range(index));
        };
        let end = start + utf8::encoded_width(bytes[start]);
        let mut buf = [0u8; 4];
        self.bytes.replace_range(start..end, ch.encode_utf8(&mut buf));
        Ok(())
    }

    /// Append one codepoint.
    pub fn push(&mut self, ch: char) {
        self.bytes.push(ch);
    }

    /// Append the text of `view`.
    pub fn append(&mut self, view: CodepointView<'_>) {
        self.bytes.push_str(view.as_str());
    }

    /// Append `count` copies of one codepoint.
    pub fn append_repeated(&mut self, count: usize, ch: char) {
        self.bytes.extend(std::iter::repeat_n(ch, count));
    }

    /// Replace the whole content with the text of `view`.
    pub fn assign(&mut self, view: CodepointView<'_>) {
        self.bytes.clear();
        self.bytes.push_str(view.as_str());
    }

    /// Replace the whole content with `count` copies of one codepoint.
    pub fn assign_repeated(&mut self, count: usize, ch: char) {
        self.bytes.clear();
        self.append_repeated(count, ch);
    }

    /// Remove all content, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Three-way comparison, consistent with codepoint order.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Write the raw encoded bytes to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.bytes.as_bytes())
    }

    fn byte_offset(&self, index: usize) -> Result<usize> {
        utf8::advance(self.bytes.as_bytes(), 0, index).ok_or_else(|| self.out_of_range(index))
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl From<CodepointView<'_>> for CodepointString {
    fn from(view: CodepointView<'_>) -> Self {
        Self {
            bytes: view.as_str().to_owned(),
        }
    }
}

impl From<&str> for CodepointString {
    fn from(s: &str) -> Self {
        Self {
            bytes: s.to_owned(),
        }
    }
}

impl From<String> for CodepointString {
    fn from(bytes: String) -> Self {
        Self { bytes }
    }
}

impl From<char> for CodepointString {
    fn from(ch: char) -> Self {
        Self {
            bytes: ch.to_string(),
        }
    }
}

impl FromIterator<char> for CodepointString {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            bytes: iter.into_iter().collect(),
        }
    }
}

impl Extend<char> for CodepointString {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.bytes.extend(iter);
    }
}

impl PartialEq<str> for CodepointString {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other
    }
}

impl PartialEq<&str> for CodepointString {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == *other
    }
}

impl PartialEq<CodepointView<'_>> for CodepointString {
    fn eq(&self, other: &CodepointView<'_>) -> bool {
        self.bytes == other.as_str()
    }
}

impl fmt::Display for CodepointString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat() {
        let s = CodepointString::repeat(3, '水');
        assert_eq!(s, "水水水");
        assert_eq!(s.len(), 3);
        assert_eq!(s.byte_len(), 9);
        assert!(CodepointString::repeat(0, 'x').is_empty());
    }

    #[test]
    fn test_from_codepoints() {
        let s = CodepointString::from_codepoints(&[0x48, 0xe9, 0x6c34, 0x1f34c]).unwrap();
        assert_eq!(s, "Hé水🍌");
        assert!(matches!(
            CodepointString::from_codepoints(&[0x41, 0xD800]),
            Err(Error::InvalidCodepoint(0xD800))
        ));
        assert!(CodepointString::from_codepoints(&[0x11_0000]).is_err());
    }

    #[test]
    fn test_from_codepoints_until_nul() {
        let s = CodepointString::from_codepoints_until_nul(&[0x61, 0x62, 0, 0x63]).unwrap();
        assert_eq!(s, "ab");
        // Only values before the zero are checked.
        assert!(CodepointString::from_codepoints_until_nul(&[0x61, 0, 0xD800]).is_ok());
        assert!(matches!(
            CodepointString::from_codepoints_until_nul(&[0xD800, 0]),
            Err(Error::InvalidCodepoint(0xD800))
        ));
    }

    #[test]
    fn test_from_view_range() {
        let source = CodepointString::from("αβγδε");
        let s = CodepointString::from_view_range(source.as_view(), 1, 3).unwrap();
        assert_eq!(s, "βγδ");
        let tail = CodepointString::from_view_range(source.as_view(), 3, usize::MAX).unwrap();
        assert_eq!(tail, "δε");
        assert!(CodepointString::from_view_range(source.as_view(), 6, 1).is_err());
    }

    #[test]
    fn test_from_utf8() {
        let s = CodepointString::from_utf8("水".as_bytes().to_vec()).unwrap();
        assert_eq!(s.len(), 1);
        assert!(matches!(
            CodepointString::from_utf8(vec![b'a', 0xe6, 0xb0]),
            Err(Error::InvalidEncoding { valid_up_to: 1 })
        ));
    }

    #[test]
    fn test_wide_codepoint_at_zero() {
        let mut s = CodepointString::new();
        s.insert(0, '水').unwrap();
        assert_eq!(s.at(0).unwrap(), '水');
        assert_eq!(s.len(), 1);
        assert_eq!(s.byte_len(), 3);
    }

    #[test]
    fn test_at_past_end() {
        let s = CodepointString::from("ab");
        assert!(matches!(
            s.at(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_insert_positions() {
        let mut s = CodepointString::from("水🍌");
        s.insert(1, 'é').unwrap();
        assert_eq!(s, "水é🍌");
        s.insert(3, '!').unwrap();
        assert_eq!(s, "水é🍌!");
        assert!(s.insert(5, 'x').is_err());
        assert_eq!(s, "水é🍌!");
    }

    #[test]
    fn test_insert_repeated_and_view() {
        let mut s = CodepointString::from("ad");
        s.insert_repeated(1, 2, 'ß').unwrap();
        assert_eq!(s, "aßßd");
        s.insert_view(3, CodepointView::new("水水")).unwrap();
        assert_eq!(s, "aßß水水d");

        assert!(matches!(
            s.insert_repeated(7, 1, 'x'),
            Err(Error::IndexOutOfRange { index: 7, len: 6 })
        ));
        assert!(s.insert_view(7, CodepointView::new("x")).is_err());
        assert_eq!(s, "aßß水水d");
    }

    #[test]
    fn test_erase() {
        let mut s = CodepointString::from("a水b🍌c");
        s.erase(1, 1).unwrap();
        assert_eq!(s, "ab🍌c");
        s.erase(2, usize::MAX).unwrap();
        assert_eq!(s, "ab");
        // Erasing at the end is a no-op; past it is an error.
        s.erase(2, 1).unwrap();
        assert_eq!(s, "ab");
        assert!(s.erase(3, 1).is_err());
    }

    #[test]
    fn test_replace_changes_width() {
        let mut s = CodepointString::from("abc");
        s.replace(1, '水').unwrap();
        assert_eq!(s, "a水c");
        s.replace(1, 'b').unwrap();
        assert_eq!(s, "abc");
        assert!(s.replace(3, 'x').is_err());
    }

    #[test]
    fn test_append_and_assign() {
        let mut s = CodepointString::from("x");
        s.append(CodepointView::new("yz"));
        s.append_repeated(2, '!');
        assert_eq!(s, "xyz!!");
        s.assign(CodepointView::new("new"));
        assert_eq!(s, "new");
        s.assign_repeated(2, '水');
        assert_eq!(s, "水水");
        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    fn test_front_back() {
        let s = CodepointString::from("ß…🍌");
        assert_eq!(s.front(), Some('ß'));
        assert_eq!(s.back(), Some('🍌'));
        assert_eq!(CodepointString::new().front(), None);
    }

    #[test]
    fn test_compare_matches_codepoint_order() {
        let a = CodepointString::from("é");
        let b = CodepointString::from("水");
        let c = CodepointString::from("🍌");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(c.compare(&b), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_write_to_emits_raw_bytes() {
        let s = CodepointString::from("a水");
        let mut out = Vec::new();
        s.write_to(&mut out).unwrap();
        assert_eq!(out, "a水".as_bytes());
        assert_eq!(s.to_string(), "a水");
    }

    #[test]
    fn test_copies_are_deep() {
        let a = CodepointString::from("abc");
        let mut b = a.clone();
        b.push('d');
        assert_eq!(a, "abc");
        assert_eq!(b, "abcd");
    }
}
