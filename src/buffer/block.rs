//! Multi-row block operations.

use crate::buffer::CellBuffer;
use crate::error::{Error, Result};
use crate::style::CellStyle;
use crate::text::CodepointView;

impl CellBuffer {
    /// Write free-form text starting at `(x, y)`, keeping cell styles.
    ///
    /// `\n` moves to the next row at column `x`, `\r` returns to column `x`,
    /// and `\t` advances to the next multiple of
    /// [`tab_stop_width`](CellBuffer::tab_stop_width). Text that reaches the
    /// right edge wraps to column `x` of the next row.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `(x, y)` is outside the grid.
    /// [`Error::TextOverflow`] if the text runs past the last row; cells
    /// before that point have already been written.
    pub fn write_block_at(&mut self, x: u16, y: u16, text: CodepointView<'_>) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        let width = usize::from(self.width);
        let height = usize::from(self.height);
        let start_x = usize::from(x);
        let tab = usize::from(self.tab_stop_width.max(1));
        let (mut col, mut row) = (start_x, usize::from(y));

        for ch in text.chars() {
            match ch {
                '\n' => {
                    row += 1;
                    col = start_x;
                    continue;
                }
                '\r' => {
                    col = start_x;
                    continue;
                }
                '\t' => {
                    col = (col + tab) / tab * tab;
                    continue;
                }
                _ => {}
            }

            if col >= width {
                col = start_x;
                row += 1;
            }
            if row >= height {
                return Err(Error::TextOverflow {
                    x,
                    y,
                    len: text.len(),
                    width: self.width,
                });
            }

            self.cells[row * width + col].ch = ch;
            col += 1;
        }
        Ok(())
    }

    /// Restyle every cell in the inclusive rectangle
    /// `min_x..=max_x` by `min_y..=max_y`, keeping codepoints.
    ///
    /// An empty rectangle (`min > max` on either axis) is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if the far corner lies outside the grid.
    pub fn set_block_style(
        &mut self,
        min_x: u16,
        min_y: u16,
        max_x: u16,
        max_y: u16,
        style: CellStyle,
    ) -> Result<()> {
        if min_x > max_x || min_y > max_y {
            return Ok(());
        }
        if max_x >= self.width || max_y >= self.height {
            return Err(self.out_of_bounds(max_x, max_y));
        }
        let width = usize::from(self.width);
        for row in usize::from(min_y)..=usize::from(max_y) {
            let base = row * width;
            for cell in &mut self.cells[base + usize::from(min_x)..=base + usize::from(max_x)] {
                cell.set_style(style);
            }
        }
        Ok(())
    }
}
