//! Terminal cell type representing a single character position.
//!
//! A display is a grid of cells. Each cell holds exactly one codepoint and two
//! native attribute words (see [`crate::style`]). Cells are `Copy` and compare
//! by value, which is what the terminal backend diffs frames on.
//!
//! # Examples
//!
//! ```
//! use termline::{Cell, CellStyle, Color};
//!
//! let cell = Cell::new('A', CellStyle::colors(Color::Green, Color::Unset));
//! assert_eq!(cell.ch, 'A');
//! assert_eq!(cell.fg, 3);
//! assert_eq!(cell.style().unwrap().foreground, Color::Green);
//!
//! assert!(Cell::BLANK.is_blank());
//! ```

use crate::error::Result;
use crate::style::CellStyle;
use crate::unicode::display_width_char;

/// A single cell: one codepoint plus native foreground/background words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Displayed codepoint.
    pub ch: char,
    /// Native foreground word (palette code | attribute bits).
    pub fg: u16,
    /// Native background word (palette code).
    pub bg: u16,
}

impl Cell {
    /// Space in the default style.
    pub const BLANK: Self = Self {
        ch: ' ',
        fg: 0,
        bg: 0,
    };

    /// Create a new cell with a single character.
    #[must_use]
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self {
            ch,
            fg: style.to_native_fg(),
            bg: style.to_native_bg(),
        }
    }

    /// Decode the native words back into a style.
    pub fn style(&self) -> Result<CellStyle> {
        CellStyle::from_native(self.fg, self.bg)
    }

    /// Replace the style, keeping the codepoint.
    pub fn set_style(&mut self, style: CellStyle) {
        self.fg = style.to_native_fg();
        self.bg = style.to_native_bg();
    }

    /// Check if this is a default-styled space.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }

    /// Columns the terminal advances when printing this cell.
    #[must_use]
    pub fn display_width(&self) -> usize {
        display_width_char(self.ch)
    }

    /// Write the cell's codepoint to a writer.
    ///
    /// Control characters are written as a space so they cannot move the
    /// terminal cursor.
    pub fn write_content<W: std::io::Write>(&self, w: &mut W) -> std::io::Result<()> {
        let ch = if self.ch.is_control() { ' ' } else { self.ch };
        let mut buf = [0u8; 4];
        w.write_all(ch.encode_utf8(&mut buf).as_bytes())
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
