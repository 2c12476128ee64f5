//! Display surface abstraction.
//!
//! A [`Surface`] is anything a widget can draw on: an in-memory
//! [`CellBuffer`](crate::CellBuffer) or a live [`Terminal`](crate::Terminal).
//! Widgets only need to place styled text, move or hide the cursor, and ask
//! for pending output to be shown.

use crate::error::Result;
use crate::style::CellStyle;
use crate::text::CodepointView;

/// Something text can be written to, one row segment at a time.
pub trait Surface {
    /// Width in cells.
    fn width(&self) -> u16;

    /// Height in cells.
    fn height(&self) -> u16;

    /// Write `text` starting at `(x, y)`, one codepoint per cell.
    ///
    /// # Errors
    ///
    /// Implementations reject text that would run past the right edge
    /// ([`Error::TextOverflow`](crate::Error::TextOverflow)) and positions
    /// outside the surface ([`Error::OutOfBounds`](crate::Error::OutOfBounds)).
    fn write(&mut self, x: u16, y: u16, text: CodepointView<'_>, style: CellStyle) -> Result<()>;

    /// Show the cursor at `(x, y)`.
    fn set_cursor(&mut self, x: u16, y: u16);

    /// Hide the cursor.
    fn hide_cursor(&mut self);

    /// Make pending writes visible.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}
