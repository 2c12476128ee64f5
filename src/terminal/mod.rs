//! Live terminal surface.
//!
//! [`Terminal`] keeps a back [`CellBuffer`] that widgets draw into and a
//! front copy of what the screen currently shows. [`Terminal::present`]
//! sends only the cells that differ between the two, followed by the cursor.

mod raw;

pub use raw::{RawModeGuard, enable_raw_mode, is_tty, terminal_size, terminal_size_of};

use crate::ansi::{AnsiWriter, sequences};
use crate::buffer::CellBuffer;
use crate::error::Result;
use crate::event::{LogLevel, emit_log, emit_log_with};
use crate::style::CellStyle;
use crate::surface::Surface;
use crate::text::CodepointView;
use std::io::{self, Write};

/// Size used when the output is not a terminal.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Options controlling terminal setup and teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalOptions {
    /// Switch to the alternate screen on setup.
    pub use_alt_screen: bool,
    /// Put standard input into raw mode on setup.
    pub raw_mode: bool,
    /// Leave the cursor hidden on restore.
    pub hide_cursor_on_exit: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            use_alt_screen: true,
            raw_mode: true,
            hide_cursor_on_exit: false,
        }
    }
}

/// Double-buffered terminal output.
pub struct Terminal<W: Write> {
    out: AnsiWriter<W>,
    back: CellBuffer,
    front: CellBuffer,
    options: TerminalOptions,
    full_repaint: bool,
    cursor_visible: bool,
    alt_screen: bool,
    active: bool,
    raw_mode_guard: Option<RawModeGuard>,
}

impl Terminal<io::Stdout> {
    /// Terminal on standard output, sized from the window.
    ///
    /// Falls back to 80x24 when standard output is not a terminal.
    #[must_use]
    pub fn stdout(options: TerminalOptions) -> Self {
        let (width, height) = terminal_size().unwrap_or_else(|err| {
            emit_log_with(LogLevel::Debug, || {
                format!("terminal size unavailable ({err}), using 80x24")
            });
            FALLBACK_SIZE
        });
        Self::new(io::stdout(), width, height, options)
    }
}

impl<W: Write> Terminal<W> {
    /// Create a terminal of the given size writing to `writer`.
    ///
    /// Nothing is written until [`Terminal::setup`] or [`Terminal::present`].
    pub fn new(writer: W, width: u16, height: u16, options: TerminalOptions) -> Self {
        let back = CellBuffer::new(width, height);
        Self {
            out: AnsiWriter::new(writer),
            front: back.clone(),
            back,
            options,
            full_repaint: true,
            cursor_visible: true,
            alt_screen: false,
            active: false,
            raw_mode_guard: None,
        }
    }

    /// Prepare the terminal: raw mode if requested, the alternate screen,
    /// a cleared screen and a hidden cursor.
    pub fn setup(&mut self) -> Result<()> {
        if self.options.raw_mode && self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(enable_raw_mode()?);
        }
        if self.options.use_alt_screen && !self.alt_screen {
            self.out.write_str(sequences::ALT_SCREEN_ON);
            self.alt_screen = true;
        }
        self.out.write_str(sequences::RESET);
        self.out.write_str(sequences::CLEAR_SCREEN);
        self.out.write_str(sequences::CURSOR_HOME);
        self.out.write_str(sequences::CURSOR_HIDE);
        self.out.flush()?;

        self.out.reset_state();
        self.cursor_visible = false;
        self.full_repaint = true;
        self.active = true;

        let (width, height) = self.size();
        emit_log_with(LogLevel::Info, || {
            format!(
                "terminal setup {width}x{height} (raw: {}, alt screen: {})",
                self.raw_mode_guard.is_some(),
                self.alt_screen
            )
        });
        Ok(())
    }

    /// Send the back buffer to the terminal.
    ///
    /// The first frame after setup (or [`Terminal::invalidate`]) repaints
    /// every cell; later frames write only cells that changed.
    pub fn present(&mut self) -> Result<()> {
        self.out.write_str(sequences::sync::BEGIN);
        // The terminal may have moved the cursor since the last frame.
        self.out.reset_state();

        let width = self.back.width();
        let mut changed = 0usize;
        for (index, (cell, shown)) in self.back.cells().iter().zip(self.front.cells()).enumerate() {
            if !self.full_repaint && cell == shown {
                continue;
            }
            let row = (index / usize::from(width)) as u32;
            let col = (index % usize::from(width)) as u32;
            self.out.write_cell_at(row, col, cell);
            changed += 1;
        }
        self.out.reset();

        match self.back.cursor() {
            Some((x, y)) => {
                self.out.move_cursor(u32::from(y), u32::from(x));
                if !self.cursor_visible {
                    self.out.write_str(sequences::CURSOR_SHOW);
                    self.cursor_visible = true;
                }
            }
            None => {
                if self.cursor_visible {
                    self.out.write_str(sequences::CURSOR_HIDE);
                    self.cursor_visible = false;
                }
            }
        }

        self.out.write_str(sequences::sync::END);
        self.out.flush()?;

        self.front.clone_from(&self.back);
        self.full_repaint = false;
        emit_log_with(LogLevel::Debug, || format!("presented {changed} cells"));
        Ok(())
    }

    /// Force the next [`Terminal::present`] to repaint every cell.
    pub fn invalidate(&mut self) {
        self.full_repaint = true;
    }

    /// Undo [`Terminal::setup`]: reset attributes, show the cursor, leave
    /// the alternate screen and restore the saved terminal mode.
    ///
    /// Does nothing if the terminal is not set up. Also runs on drop.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        self.out.reset();
        if !self.options.hide_cursor_on_exit {
            self.out.write_str(sequences::CURSOR_SHOW);
            self.cursor_visible = true;
        }
        if self.alt_screen {
            self.out.write_str(sequences::ALT_SCREEN_OFF);
            self.alt_screen = false;
        }
        self.out.flush()?;

        if let Some(guard) = self.raw_mode_guard.take() {
            guard.restore()?;
        }
        emit_log(LogLevel::Info, "terminal restored");
        Ok(())
    }

    /// Whether [`Terminal::setup`] has run without a matching restore.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Check if standard input is in raw mode.
    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_guard.is_some()
    }

    /// Terminal size as `(columns, rows)`.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        self.back.size()
    }

    /// The back buffer.
    #[must_use]
    pub fn buffer(&self) -> &CellBuffer {
        &self.back
    }

    /// The back buffer, for cell and block operations.
    pub fn buffer_mut(&mut self) -> &mut CellBuffer {
        &mut self.back
    }

    /// The underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        self.out.get_ref()
    }
}

impl<W: Write> Surface for Terminal<W> {
    fn width(&self) -> u16 {
        self.back.width()
    }

    fn height(&self) -> u16 {
        self.back.height()
    }

    fn write(&mut self, x: u16, y: u16, text: CodepointView<'_>, style: CellStyle) -> Result<()> {
        self.back.write_at(x, y, text, style)
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.back.set_cursor(x, y);
    }

    fn hide_cursor(&mut self) {
        self.back.hide_cursor();
    }

    fn present(&mut self) -> Result<()> {
        Terminal::present(self)
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
