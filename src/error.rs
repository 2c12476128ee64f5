//! Error types for termline.

use std::fmt;
use std::io;

/// Result type alias for termline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for termline operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal operations.
    Io(io::Error),
    /// Codepoint index past the end of a string or view.
    IndexOutOfRange { index: usize, len: usize },
    /// Byte input that is not well-formed UTF-8.
    InvalidEncoding { valid_up_to: usize },
    /// A `u32` that is not a Unicode scalar value.
    InvalidCodepoint(u32),
    /// C-style byte string without a NUL terminator.
    MissingNul,
    /// Zero-sized widget or surface region.
    InvalidDimensions { width: usize, height: usize },
    /// Position outside the surface.
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },
    /// Text would run past the edge of the surface.
    TextOverflow {
        x: u16,
        y: u16,
        len: usize,
        width: u16,
    },
    /// Native attribute word with an unknown palette code.
    ColorNotSupported(u16),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "codepoint index {index} out of range for length {len}")
            }
            Self::InvalidEncoding { valid_up_to } => {
                write!(f, "invalid UTF-8 after byte {valid_up_to}")
            }
            Self::InvalidCodepoint(cp) => write!(f, "invalid codepoint U+{cp:04X}"),
            Self::MissingNul => write!(f, "byte string has no NUL terminator"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "position ({x}, {y}) out of bounds for {width}x{height} surface"
                )
            }
            Self::TextOverflow { x, y, len, width } => {
                write!(
                    f,
                    "{len} codepoints at ({x}, {y}) overflow a surface {width} cells wide"
                )
            }
            Self::ColorNotSupported(native) => {
                write!(f, "color not supported: native attribute 0x{native:04x}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
