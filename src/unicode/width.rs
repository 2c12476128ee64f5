//! Display width of codepoints in terminal columns.
//!
//! Cells hold one codepoint each; the ANSI writer uses these widths to know
//! where the terminal's own cursor ends up after printing a cell.

use std::sync::atomic::{AtomicU8, Ordering};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

const WIDTH_METHOD_WCWIDTH: u8 = 0;
const WIDTH_METHOD_UNICODE: u8 = 1;

static WIDTH_METHOD: AtomicU8 = AtomicU8::new(WIDTH_METHOD_WCWIDTH);

/// Set the global width method.
pub fn set_width_method(method: WidthMethod) {
    let value = match method {
        WidthMethod::WcWidth => WIDTH_METHOD_WCWIDTH,
        WidthMethod::Unicode => WIDTH_METHOD_UNICODE,
    };
    WIDTH_METHOD.store(value, Ordering::Relaxed);
}

/// Get the global width method.
#[must_use]
pub fn width_method() -> WidthMethod {
    match WIDTH_METHOD.load(Ordering::Relaxed) {
        WIDTH_METHOD_UNICODE => WidthMethod::Unicode,
        _ => WidthMethod::WcWidth,
    }
}

/// Display width of a string in terminal columns.
#[must_use]
pub fn display_width(s: &str) -> usize {
    match width_method() {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Display width of a codepoint in terminal columns.
///
/// ASCII printable characters take a fast path; control characters are 0.
#[inline]
#[must_use]
pub fn display_width_char(c: char) -> usize {
    if c.is_ascii() && (' '..='~').contains(&c) {
        return 1;
    }
    if c < ' ' {
        return 0;
    }
    display_width_char_with_method(c, width_method())
}

/// Display width of a codepoint using a specific method.
#[must_use]
pub fn display_width_char_with_method(c: char, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c).unwrap_or(0),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(display_width_char('a'), 1);
        assert_eq!(display_width_char(' '), 1);
        assert_eq!(display_width_char('\t'), 0);
    }

    #[test]
    fn test_cjk_is_wide() {
        assert_eq!(display_width_char('水'), 2);
        assert_eq!(display_width_char('最'), 2);
    }

    #[test]
    fn test_string_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("最高"), 4);
    }

    #[test]
    fn test_ambiguous_width_by_method() {
        // U+00A1 INVERTED EXCLAMATION MARK is East Asian Ambiguous.
        assert_eq!(display_width_char_with_method('¡', WidthMethod::WcWidth), 1);
        assert_eq!(display_width_char_with_method('¡', WidthMethod::Unicode), 2);
    }
}
