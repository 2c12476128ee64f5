//! Buffered ANSI output writer with state tracking.

use crate::ansi::{self, attr, color};
use crate::cell::Cell;
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Buffered writer that tracks ANSI state to minimize escape sequences.
///
/// Nothing reaches the underlying writer until [`AnsiWriter::flush`].
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,

    // Current state for delta encoding; `None` means unknown.
    current_fg: Option<u16>,
    current_bg: Option<u16>,
    current_attrs: TextAttributes,

    // Cursor position, if known
    cursor: Option<(u32, u32)>,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a new ANSI writer wrapping the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            current_fg: None,
            current_bg: None,
            current_attrs: TextAttributes::empty(),
            cursor: None,
        }
    }

    /// Forget all tracked state, so the next writes are emitted in full.
    pub fn reset_state(&mut self) {
        self.current_fg = None;
        self.current_bg = None;
        self.current_attrs = TextAttributes::empty();
        self.cursor = None;
    }

    /// Write a raw string to the buffer.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to position, using relative moves if more efficient.
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        let Some((cur_row, cur_col)) = self.cursor else {
            let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
            self.cursor = Some((row, col));
            return;
        };
        if row == cur_row && col == cur_col {
            return;
        }

        let dy = row as i32 - cur_row as i32;
        let dx = col as i32 - cur_col as i32;

        // ESC[r;cH = 4 + digits, ESC[nX = 3 + digits per axis
        let abs_cost = 4 + digits(row + 1) + digits(col + 1);
        let rel_cost = if dy != 0 {
            3 + digits(dy.unsigned_abs())
        } else {
            0
        } + if dx != 0 {
            3 + digits(dx.unsigned_abs())
        } else {
            0
        };

        if rel_cost < abs_cost {
            let _ = ansi::write_cursor_move(&mut self.buffer, dx, dy);
        } else {
            let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
        }

        self.cursor = Some((row, col));
    }

    /// Set foreground palette code if different from current.
    pub fn set_fg(&mut self, palette_code: u16) {
        let palette_code = palette_code & TextAttributes::COLOR_MASK;
        if self.current_fg != Some(palette_code) {
            let _ = ansi::write_fg_color(&mut self.buffer, palette_code);
            self.current_fg = Some(palette_code);
        }
    }

    /// Set background palette code if different from current.
    pub fn set_bg(&mut self, palette_code: u16) {
        let palette_code = palette_code & TextAttributes::COLOR_MASK;
        if self.current_bg != Some(palette_code) {
            let _ = ansi::write_bg_color(&mut self.buffer, palette_code);
            self.current_bg = Some(palette_code);
        }
    }

    /// Set text attributes, only writing changes.
    pub fn set_attributes(&mut self, attrs: TextAttributes) {
        if self.current_attrs == attrs {
            return;
        }

        let removed = self.current_attrs - attrs;
        if removed.contains(TextAttributes::BOLD) {
            self.write_str(attr::RESET_INTENSITY);
        }
        if removed.contains(TextAttributes::UNDERLINE) {
            self.write_str(attr::RESET_UNDERLINE);
        }

        let added = attrs - self.current_attrs;
        let _ = ansi::write_attributes(&mut self.buffer, added);

        self.current_attrs = attrs;
    }

    /// Write a cell at the current cursor position.
    pub fn write_cell(&mut self, cell: &Cell) {
        self.set_attributes(TextAttributes::from_bits_truncate(cell.fg));
        self.set_fg(cell.fg);
        self.set_bg(cell.bg);

        let _ = cell.write_content(&mut self.buffer);

        // The terminal advances by display width, not by cell.
        if let Some((_, col)) = self.cursor.as_mut() {
            *col += cell.display_width() as u32;
        }
    }

    /// Write a cell at a specific position.
    pub fn write_cell_at(&mut self, row: u32, col: u32, cell: &Cell) {
        self.move_cursor(row, col);
        self.write_cell(cell);
    }

    /// Reset all ANSI attributes and colors to the terminal defaults.
    pub fn reset(&mut self) {
        self.write_str(ansi::RESET);
        self.current_fg = Some(0);
        self.current_bg = Some(0);
        self.current_attrs = TextAttributes::empty();
    }

    /// Return colors to the defaults without touching attributes.
    pub fn default_colors(&mut self) {
        self.write_str(color::FG_DEFAULT);
        self.write_str(color::BG_DEFAULT);
        self.current_fg = Some(0);
        self.current_bg = Some(0);
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get a reference to the buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer without flushing.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }
}

/// Count decimal digits in a number.
fn digits(n: u32) -> usize {
    if n == 0 { 1 } else { (n.ilog10() + 1) as usize }
}
