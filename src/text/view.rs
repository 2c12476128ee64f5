//! Borrowed, codepoint-indexed window over UTF-8 text.
//!
//! [`CodepointView`] is the non-owning half of the text pair. It is a
//! `(pointer, length)` handle over bytes owned by something else: a
//! [`CodepointString`], a string literal, or another view. The lifetime
//! parameter ties it to that owner, so the owner can be neither mutated nor
//! dropped while the view is alive.
//!
//! All positions are codepoint indices. Converting one to a byte offset scans
//! from the nearer end of the view, one codepoint at a time.
//!
//! # Examples
//!
//! ```
//! use termline::CodepointView;
//!
//! let mut view = CodepointView::new("¡Señor 水!");
//! assert_eq!(view.len(), 9);
//! assert_eq!(view.byte_len(), 13);
//!
//! view.remove_prefix(1).unwrap();
//! view.remove_suffix(3).unwrap();
//! assert_eq!(view.as_str(), "Señor");
//!
//! let sub = view.substr(2, 2).unwrap();
//! assert_eq!(sub.as_str(), "ño");
//! ```

use crate::error::{Error, Result};
use crate::text::CodepointString;
use crate::unicode::utf8;
use std::ffi::CStr;
use std::fmt;

/// Non-owning view over UTF-8 text, addressed by codepoint.
///
/// Ordering and equality compare the underlying bytes, which for UTF-8 is the
/// same as comparing codepoint by codepoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodepointView<'a> {
    text: &'a str,
}

impl<'a> CodepointView<'a> {
    /// View over a string slice.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// View over a byte buffer (pointer + length).
    ///
    /// The bytes are validated once here, so every later scan can trust them.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::InvalidEncoding {
            valid_up_to: e.valid_up_to(),
        })?;
        Ok(Self { text })
    }

    /// View over a C-style NUL-terminated byte string.
    ///
    /// The view ends before the first NUL; bytes after it are ignored.
    pub fn from_nul_terminated(bytes: &'a [u8]) -> Result<Self> {
        let c_str = CStr::from_bytes_until_nul(bytes).map_err(|_| Error::MissingNul)?;
        Self::from_bytes(c_str.to_bytes())
    }

    /// Number of codepoints. Linear in the byte length.
    #[must_use]
    pub fn len(&self) -> usize {
        utf8::count(self.text.as_bytes())
    }

    /// Number of bytes.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Check if the view is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The viewed text.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    /// The viewed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    /// Iterate over codepoints.
    pub fn chars(&self) -> std::str::Chars<'a> {
        self.text.chars()
    }

    /// Codepoint at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<char> {
        self.get(index).ok_or_else(|| Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Codepoint at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        let offset = utf8::advance(self.as_bytes(), 0, index)?;
        utf8::decode_at(self.text, offset)
    }

    /// First codepoint.
    #[must_use]
    pub fn front(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// Last codepoint.
    #[must_use]
    pub fn back(&self) -> Option<char> {
        let start = utf8::retreat(self.as_bytes(), self.text.len(), 1)?;
        utf8::decode_at(self.text, start)
    }

    /// Sub-view of `count` codepoints starting at codepoint `pos`.
    ///
    /// `count` is clamped to the end of the view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `pos > self.len()`.
    pub fn substr(&self, pos: usize, count: usize) -> Result<Self> {
        let (start, end) =
            utf8::byte_range(self.as_bytes(), pos, count).ok_or_else(|| self.out_of_range(pos))?;
        Ok(Self {
            text: &self.text[start..end],
        })
    }

    /// Shrink the view by `n` codepoints from the front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the view holds fewer than `n`
    /// codepoints; the view is left unchanged.
    pub fn remove_prefix(&mut self, n: usize) -> Result<()> {
        let start = utf8::advance(self.as_bytes(), 0, n).ok_or_else(|| self.out_of_range(n))?;
        self.text = &self.text[start..];
        Ok(())
    }

    /// Shrink the view by `n` codepoints from the back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the view holds fewer than `n`
    /// codepoints; the view is left unchanged.
    pub fn remove_suffix(&mut self, n: usize) -> Result<()> {
        let end = utf8::retreat(self.as_bytes(), self.text.len(), n)
            .ok_or_else(|| self.out_of_range(n))?;
        self.text = &self.text[..end];
        Ok(())
    }

    /// Copy the bytes of `count` codepoints starting at codepoint `pos` into
    /// `dest`, returning the number of bytes written.
    ///
    /// `count` is clamped to the end of the view. Only whole codepoints are
    /// copied: if `dest` is too small, copying stops at the last codepoint
    /// that fits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `pos > self.len()`.
    pub fn copy_to(&self, dest: &mut [u8], count: usize, pos: usize) -> Result<usize> {
        let bytes = self.as_bytes();
        let (start, mut end) =
            utf8::byte_range(bytes, pos, count).ok_or_else(|| self.out_of_range(pos))?;
        if end - start > dest.len() {
            end = start + dest.len();
            while end > start && !self.text.is_char_boundary(end) {
                end -= 1;
            }
        }
        let written = end - start;
        dest[..written].copy_from_slice(&bytes[start..end]);
        Ok(written)
    }

    /// Copy the viewed text into a new owning string.
    #[must_use]
    pub fn to_codepoint_string(&self) -> CodepointString {
        CodepointString::from(*self)
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl<'a> From<&'a str> for CodepointView<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl<'a> From<&'a CodepointString> for CodepointView<'a> {
    fn from(s: &'a CodepointString) -> Self {
        s.as_view()
    }
}

impl PartialEq<str> for CodepointView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for CodepointView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<CodepointString> for CodepointView<'_> {
    fn eq(&self, other: &CodepointString) -> bool {
        self.text == other.as_str()
    }
}

impl fmt::Display for CodepointView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{a1}Bumble bée¡. ¥ × 2 Señator. 最高 \u{df}\u{6c34}\u{1f34c}";

    #[test]
    fn test_len_counts_codepoints_not_bytes() {
        let view = CodepointView::new("a水🍌");
        assert_eq!(view.len(), 3);
        assert_eq!(view.byte_len(), 8);
        assert!(!view.is_empty());
        assert!(CodepointView::default().is_empty());
    }

    #[test]
    fn test_at_and_get() {
        let view = CodepointView::new("aé水");
        assert_eq!(view.at(0).unwrap(), 'a');
        assert_eq!(view.at(1).unwrap(), 'é');
        assert_eq!(view.at(2).unwrap(), '水');
        assert!(matches!(
            view.at(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(view.get(3), None);
    }

    #[test]
    fn test_front_back() {
        let view = CodepointView::new(SAMPLE);
        assert_eq!(view.front(), Some('¡'));
        assert_eq!(view.back(), Some('🍌'));
        assert_eq!(CodepointView::default().back(), None);
    }

    #[test]
    fn test_trim_both_ends() {
        let mut view = CodepointView::new(SAMPLE);
        let before = view.len();
        view.remove_prefix(3).unwrap();
        assert_eq!(view.front(), Some('m'));
        view.remove_suffix(5).unwrap();
        assert_eq!(view.back(), Some('最'));
        assert_eq!(view.len(), before - 8);
    }

    #[test]
    fn test_remove_past_end_is_rejected_and_view_unchanged() {
        let mut view = CodepointView::new("abc");
        assert!(view.remove_prefix(4).is_err());
        assert!(view.remove_suffix(4).is_err());
        assert_eq!(view.as_str(), "abc");
        view.remove_prefix(3).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_substr() {
        let view = CodepointView::new("最高 ß水🍌");
        assert_eq!(view.substr(0, 2).unwrap(), "最高");
        assert_eq!(view.substr(3, 100).unwrap(), "ß水🍌");
        assert_eq!(view.substr(6, 1).unwrap(), "");
        assert!(view.substr(7, 0).is_err());
    }

    #[test]
    fn test_copy_to() {
        let view = CodepointView::new("aé水z");
        let mut dest = [0u8; 16];
        let n = view.copy_to(&mut dest, 2, 1).unwrap();
        assert_eq!(&dest[..n], "é水".as_bytes());

        // Too small for 水: only é fits.
        let mut small = [0u8; 4];
        let n = view.copy_to(&mut small, 2, 1).unwrap();
        assert_eq!(&small[..n], "é".as_bytes());

        assert!(view.copy_to(&mut dest, 1, 5).is_err());
    }

    #[test]
    fn test_from_bytes_validates() {
        assert_eq!(CodepointView::from_bytes(b"plain").unwrap(), "plain");
        assert!(matches!(
            CodepointView::from_bytes(b"ab\xffcd"),
            Err(Error::InvalidEncoding { valid_up_to: 2 })
        ));
    }

    #[test]
    fn test_from_nul_terminated() {
        let view = CodepointView::from_nul_terminated(b"hi\xc3\xa9\0ignored").unwrap();
        assert_eq!(view, "hié");
        assert!(matches!(
            CodepointView::from_nul_terminated(b"no terminator"),
            Err(Error::MissingNul)
        ));
    }

    #[test]
    fn test_ordering_is_codepoint_order() {
        let a = CodepointView::new("aé");
        let b = CodepointView::new("a水");
        assert!(a < b);
        assert!(u32::from('é') < u32::from('水'));
    }

    #[test]
    fn test_display() {
        let view = CodepointView::new("Señor");
        assert_eq!(view.to_string(), "Señor");
    }
}
