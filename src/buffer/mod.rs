//! In-memory cell grid.
//!
//! [`CellBuffer`] is a 2D grid of [`Cell`]s with the cell, line and block
//! operations a simple form UI needs. It implements [`Surface`], so widgets
//! can draw on it directly in tests, and it is the back buffer of
//! [`Terminal`](crate::Terminal).
//!
//! # Examples
//!
//! ```
//! use termline::{CellBuffer, CellStyle, CodepointView, FontWeight};
//!
//! let mut buf = CellBuffer::new(12, 3);
//! buf.write_at(0, 0, CodepointView::new("Name:"), CellStyle::from(FontWeight::Bold))
//!     .unwrap();
//! buf.write_block_at(1, 1, CodepointView::new("a\nb")).unwrap();
//!
//! assert_eq!(buf.row_text(0), "Name:       ");
//! assert_eq!(buf.cell_text(1, 2).unwrap(), 'b');
//!
//! // Text longer than the rest of the row is rejected.
//! assert!(buf.write_at(10, 0, CodepointView::new("abc"), CellStyle::NONE).is_err());
//! ```

mod block;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::style::CellStyle;
use crate::surface::Surface;
use crate::text::CodepointView;

/// Default distance between tab stops for block writes.
pub const DEFAULT_TAB_STOP_WIDTH: u16 = 4;

/// Fixed-size grid of cells plus a cursor position.
///
/// # Coordinate System
///
/// Coordinates are (x, y) where (0, 0) is the top-left corner. X increases
/// to the right, Y increases downward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: Option<(u16, u16)>,
    /// Tab stop spacing used by [`CellBuffer::write_block_at`].
    pub tab_stop_width: u16,
}

impl CellBuffer {
    /// Create a blank buffer. Zero dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
            cursor: None,
            tab_stop_width: DEFAULT_TAB_STOP_WIDTH,
        }
    }

    /// Get buffer dimensions.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Get buffer width.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get buffer height.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to a default-styled space.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    #[inline]
    fn cell_index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    fn checked_index(&self, x: u16, y: u16) -> Result<usize> {
        self.cell_index(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    pub(crate) fn out_of_bounds(&self, x: u16, y: u16) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Get cell at position.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.cell_index(x, y).map(|idx| &self.cells[idx])
    }

    /// Set the codepoint and style of one cell.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = Cell::new(ch, style);
        Ok(())
    }

    /// Codepoint of one cell.
    pub fn cell_text(&self, x: u16, y: u16) -> Result<char> {
        Ok(self.cells[self.checked_index(x, y)?].ch)
    }

    /// Style of one cell, decoded from its native words.
    pub fn cell_style(&self, x: u16, y: u16) -> Result<CellStyle> {
        self.cells[self.checked_index(x, y)?].style()
    }

    /// Restyle one cell, keeping its codepoint.
    pub fn set_cell_style(&mut self, x: u16, y: u16, style: CellStyle) -> Result<()> {
        self.set_block_style(x, y, x, y, style)
    }

    /// Write `text` on row `y` from column `x`, replacing cell styles.
    ///
    /// # Errors
    ///
    /// [`Error::TextOverflow`] if the text has more codepoints than the row
    /// has cells from `x`; nothing is written in that case.
    pub fn write_at(&mut self, x: u16, y: u16, text: CodepointView<'_>, style: CellStyle) -> Result<()> {
        let start = self.line_start(x, y, text)?;
        let cell = Cell::new(' ', style);
        for (offset, ch) in text.chars().enumerate() {
            self.cells[start + offset] = Cell { ch, ..cell };
        }
        Ok(())
    }

    /// Write `text` on row `y` from column `x`, keeping each cell's style.
    pub fn write_at_unstyled(&mut self, x: u16, y: u16, text: CodepointView<'_>) -> Result<()> {
        let start = self.line_start(x, y, text)?;
        for (offset, ch) in text.chars().enumerate() {
            self.cells[start + offset].ch = ch;
        }
        Ok(())
    }

    /// Validate a single-row write and return the index of its first cell.
    fn line_start(&self, x: u16, y: u16, text: CodepointView<'_>) -> Result<usize> {
        if y >= self.height || x > self.width {
            return Err(self.out_of_bounds(x, y));
        }
        let len = text.len();
        if len > usize::from(self.width - x) {
            return Err(Error::TextOverflow {
                x,
                y,
                len,
                width: self.width,
            });
        }
        Ok(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Current cursor position, if shown.
    #[must_use]
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Codepoints of row `y` as a string. Empty past the last row.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.width);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .map(|cell| cell.ch)
            .collect()
    }
}

impl Default for CellBuffer {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Surface for CellBuffer {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn write(&mut self, x: u16, y: u16, text: CodepointView<'_>, style: CellStyle) -> Result<()> {
        self.write_at(x, y, text, style)
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Some((x, y));
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }
}
