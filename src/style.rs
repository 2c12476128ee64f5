//! Cell styling: colors, weight, decoration, and the native attribute word.
//!
//! This module provides types for styling text cells:
//!
//! - [`Color`]: the eight-color palette plus "unset" (terminal default)
//! - [`FontWeight`] and [`TextDecoration`]: one flag each
//! - [`TextAttributes`]: bitflags for the weight/decoration bits of a native word
//! - [`CellStyle`]: complete style of one cell
//!
//! Cells do not store a [`CellStyle`]. They store two 16-bit *native words*
//! (foreground and background): the low byte is a palette code and the high
//! byte carries [`TextAttributes`]. [`CellStyle::to_native_fg`] and
//! [`CellStyle::from_native`] convert between the two forms.
//!
//! # Examples
//!
//! ```
//! use termline::{CellStyle, Color, FontWeight};
//!
//! let title = CellStyle::from(FontWeight::Bold)
//!     .with_foreground(Color::White)
//!     .with_background(Color::Blue);
//!
//! assert_eq!(title.to_native_fg(), 0x0108);
//! assert_eq!(title.to_native_bg(), 0x0005);
//! ```

use crate::error::{Error, Result};
use bitflags::bitflags;

bitflags! {
    /// Weight and decoration bits of a native attribute word.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u16 {
        /// Bold/increased intensity.
        const BOLD      = 0x0100;
        /// Underlined text.
        const UNDERLINE = 0x0200;
    }
}

impl TextAttributes {
    /// Mask for the low byte holding the palette code.
    pub const COLOR_MASK: u16 = 0x00FF;
}

/// Palette color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Terminal default.
    #[default]
    Unset,
    White,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    /// Palette code stored in the low byte of a native word.
    ///
    /// 0 is the terminal default; 1..=8 follow the ANSI order black, red,
    /// green, yellow, blue, magenta, cyan, white.
    #[must_use]
    pub const fn palette_code(self) -> u16 {
        match self {
            Self::Unset => 0,
            Self::Black => 1,
            Self::Red => 2,
            Self::Green => 3,
            Self::Yellow => 4,
            Self::Blue => 5,
            Self::Magenta => 6,
            Self::Cyan => 7,
            Self::White => 8,
        }
    }

    /// Inverse of [`Color::palette_code`]. Only the low byte is inspected.
    pub fn from_palette_code(code: u16) -> Result<Self> {
        Ok(match code & TextAttributes::COLOR_MASK {
            0 => Self::Unset,
            1 => Self::Black,
            2 => Self::Red,
            3 => Self::Green,
            4 => Self::Yellow,
            5 => Self::Blue,
            6 => Self::Magenta,
            7 => Self::Cyan,
            8 => Self::White,
            other => return Err(Error::ColorNotSupported(other)),
        })
    }
}

/// Font weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Text decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextDecoration {
    #[default]
    Normal,
    Underline,
}

/// Complete style of one cell.
///
/// Styles are small and `Copy`. The default is unset colors, normal weight,
/// no decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    /// Foreground color.
    pub foreground: Color,
    /// Background color.
    pub background: Color,
    /// Font weight.
    pub weight: FontWeight,
    /// Text decoration.
    pub decoration: TextDecoration,
}

impl CellStyle {
    /// Default style.
    pub const NONE: Self = Self {
        foreground: Color::Unset,
        background: Color::Unset,
        weight: FontWeight::Normal,
        decoration: TextDecoration::Normal,
    };

    /// Create a style with only colors set.
    #[must_use]
    pub const fn colors(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            ..Self::NONE
        }
    }

    /// Return a new style with the specified foreground color.
    #[must_use]
    pub const fn with_foreground(self, foreground: Color) -> Self {
        Self { foreground, ..self }
    }

    /// Return a new style with the specified background color.
    #[must_use]
    pub const fn with_background(self, background: Color) -> Self {
        Self { background, ..self }
    }

    /// Return a new style with the specified weight.
    #[must_use]
    pub const fn with_weight(self, weight: FontWeight) -> Self {
        Self { weight, ..self }
    }

    /// Return a new style with the specified decoration.
    #[must_use]
    pub const fn with_decoration(self, decoration: TextDecoration) -> Self {
        Self { decoration, ..self }
    }

    /// Weight and decoration as attribute flags.
    #[must_use]
    pub fn attributes(&self) -> TextAttributes {
        let mut attrs = TextAttributes::empty();
        if self.weight == FontWeight::Bold {
            attrs |= TextAttributes::BOLD;
        }
        if self.decoration == TextDecoration::Underline {
            attrs |= TextAttributes::UNDERLINE;
        }
        attrs
    }

    /// Native foreground word: palette code plus weight/decoration bits.
    #[must_use]
    pub fn to_native_fg(&self) -> u16 {
        self.foreground.palette_code() | self.attributes().bits()
    }

    /// Native background word: palette code only.
    #[must_use]
    pub const fn to_native_bg(&self) -> u16 {
        self.background.palette_code()
    }

    /// Rebuild a style from the native words stored in a cell.
    ///
    /// Weight and decoration are read back from the foreground word.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColorNotSupported`] if either low byte is not a
    /// known palette code.
    pub fn from_native(fg: u16, bg: u16) -> Result<Self> {
        let attrs = TextAttributes::from_bits_truncate(fg);
        Ok(Self {
            foreground: Color::from_palette_code(fg)?,
            background: Color::from_palette_code(bg)?,
            weight: if attrs.contains(TextAttributes::BOLD) {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            },
            decoration: if attrs.contains(TextAttributes::UNDERLINE) {
                TextDecoration::Underline
            } else {
                TextDecoration::Normal
            },
        })
    }
}

impl From<FontWeight> for CellStyle {
    fn from(weight: FontWeight) -> Self {
        Self::NONE.with_weight(weight)
    }
}

impl From<TextDecoration> for CellStyle {
    fn from(decoration: TextDecoration) -> Self {
        Self::NONE.with_decoration(decoration)
    }
}
