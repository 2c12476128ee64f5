//! Single-line text entry with horizontal scrolling.

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log, emit_log_with};
use crate::input::{KeyCode, KeyEvent, KeySource};
use crate::style::CellStyle;
use crate::surface::Surface;
use crate::text::{CodepointString, CodepointView};
use std::time::Duration;

/// Name of the event emitted when the user accepts the content.
pub const ACCEPTED_EVENT: &str = "textbox_accepted";

/// What typing a character does to the codepoint under the cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Shift the rest of the content right.
    #[default]
    Insert,
    /// Replace the codepoint under the cursor.
    Overwrite,
}

impl EditMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Insert => Self::Overwrite,
            Self::Overwrite => Self::Insert,
        }
    }
}

/// How [`TextBox::run`] finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The user pressed Enter.
    Accepted,
    /// The cancel predicate matched a key.
    Cancelled,
}

/// Placement, size and styling of a [`TextBox`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextBoxOptions {
    /// Column of the first cell.
    pub x: u16,
    /// Row of the box.
    pub y: u16,
    /// Number of cells the box occupies.
    pub display_width: u16,
    /// Maximum content length in codepoints.
    pub max_codepoints: usize,
    /// Style of the cells past the end of the content.
    pub unfilled_style: CellStyle,
    /// Style of the cells showing content.
    pub filled_style: CellStyle,
}

impl Default for TextBoxOptions {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            display_width: 20,
            max_codepoints: 20,
            unfilled_style: CellStyle::NONE,
            filled_style: CellStyle::NONE,
        }
    }
}

impl TextBoxOptions {
    /// Default options with the box at `(x, y)`.
    #[must_use]
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_display_width(mut self, display_width: u16) -> Self {
        self.display_width = display_width;
        self
    }

    #[must_use]
    pub fn with_max_codepoints(mut self, max_codepoints: usize) -> Self {
        self.max_codepoints = max_codepoints;
        self
    }

    #[must_use]
    pub fn with_unfilled_style(mut self, style: CellStyle) -> Self {
        self.unfilled_style = style;
        self
    }

    #[must_use]
    pub fn with_filled_style(mut self, style: CellStyle) -> Self {
        self.filled_style = style;
        self
    }

    /// Use one style for filled and unfilled cells.
    #[must_use]
    pub fn with_style(self, style: CellStyle) -> Self {
        self.with_filled_style(style).with_unfilled_style(style)
    }
}

/// Editable single-line text field drawn on a [`Surface`].
///
/// The box owns its content and borrows the surface for its whole life.
/// Every edit redraws the visible window and presents the surface. Dropping
/// the box releases focus, hiding the cursor.
///
/// # Examples
///
/// ```
/// use termline::{CellBuffer, KeyCode, KeyEvent, TextBox, TextBoxOptions};
///
/// let mut screen = CellBuffer::new(10, 1);
/// {
///     let options = TextBoxOptions::new(0, 0).with_display_width(5).with_max_codepoints(8);
///     let mut input = TextBox::new(&mut screen, options).unwrap();
///     input.set_focus(true).unwrap();
///     for ch in "abcdef".chars() {
///         input.accept_key_event(&KeyEvent::char(ch)).unwrap();
///     }
///     assert_eq!(input.cursor_position(), 6);
///     assert_eq!(input.view_position(), 2);
///     input.accept_key_event(&KeyEvent::key(KeyCode::Enter)).unwrap();
///     assert!(input.is_accepted());
///     assert_eq!(input.content(), "abcdef");
/// }
/// // Without focus the box shows the start of the content.
/// assert_eq!(screen.row_text(0), "abcde     ");
/// ```
pub struct TextBox<'s, S: Surface> {
    surface: &'s mut S,
    options: TextBoxOptions,
    content: CodepointString,
    mode: EditMode,
    has_focus: bool,
    accepted: bool,
    view_position: usize,
    cursor_position: usize,
}

impl<'s, S: Surface> TextBox<'s, S> {
    /// Create an empty, unfocused box and draw it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the display width or the
    /// capacity is zero, and any error from drawing on the surface.
    pub fn new(surface: &'s mut S, options: TextBoxOptions) -> Result<Self> {
        if options.display_width == 0 || options.max_codepoints == 0 {
            return Err(Error::InvalidDimensions {
                width: usize::from(options.display_width),
                height: options.max_codepoints,
            });
        }
        let mut textbox = Self {
            surface,
            options,
            content: CodepointString::new(),
            mode: EditMode::default(),
            has_focus: false,
            accepted: false,
            view_position: 0,
            cursor_position: 0,
        };
        textbox.redraw()?;
        Ok(textbox)
    }

    /// Options the box was created with.
    #[must_use]
    pub fn options(&self) -> &TextBoxOptions {
        &self.options
    }

    /// Replace the content, keeping at most `max_codepoints` codepoints.
    pub fn set_content(&mut self, content: CodepointView<'_>) -> Result<()> {
        self.content = CodepointString::from_view_range(content, 0, self.options.max_codepoints)?;
        self.redraw()
    }

    /// Current content.
    #[must_use]
    pub fn content(&self) -> CodepointView<'_> {
        self.content.as_view()
    }

    /// Give or take focus. Setting the current value does nothing.
    ///
    /// Losing focus hides the cursor and shows the start of the content.
    pub fn set_focus(&mut self, focus: bool) -> Result<()> {
        if focus == self.has_focus {
            return Ok(());
        }
        self.has_focus = focus;
        if !focus {
            self.surface.hide_cursor();
        }
        self.redraw()
    }

    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Move the cursor without redrawing. The next redraw clamps it.
    pub fn set_cursor_position(&mut self, position: usize) {
        self.cursor_position = position;
    }

    #[must_use]
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Scroll without redrawing. The next redraw corrects the window.
    pub fn set_view_position(&mut self, position: usize) {
        self.view_position = position;
    }

    #[must_use]
    pub fn view_position(&self) -> usize {
        self.view_position
    }

    /// Whether Enter has been pressed.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &*self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut *self.surface
    }

    /// Clamp the cursor, scroll it into view and draw the visible window.
    ///
    /// When the content is shorter than the capacity one cell past its end
    /// stays reachable, so the cursor can sit after the last codepoint.
    pub fn redraw(&mut self) -> Result<()> {
        let len = self.content.len();
        let max = self.options.max_codepoints;
        let width = usize::from(self.options.display_width);

        self.cursor_position = self.cursor_position.min(len).min(max - 1);
        let cursor = self.cursor_position;

        let padded = len + usize::from(len < max);
        if padded < width {
            self.view_position = 0;
        } else if self.view_position > padded - width {
            self.view_position = padded - width;
        } else if self.view_position > cursor {
            self.view_position = cursor;
        } else if self.view_position + width - 1 < cursor {
            self.view_position = cursor + 1 - width;
        }

        let start = if self.has_focus { self.view_position } else { 0 };
        let visible = self.content.as_view().substr(start, width)?;
        let shown = visible.len();
        let (x, y) = (self.options.x, self.options.y);

        self.surface.write(x, y, visible, self.options.filled_style)?;
        if shown < width {
            let padding = CodepointString::repeat(width - shown, ' ');
            self.surface.write(
                x + shown as u16,
                y,
                padding.as_view(),
                self.options.unfilled_style,
            )?;
        }

        if self.has_focus {
            let column = cursor.saturating_sub(self.view_position) as u16;
            self.surface.set_cursor(x + column, y);
        }
        self.surface.present()
    }

    pub fn cursor_left(&mut self) -> Result<()> {
        self.cursor_position = self.cursor_position.saturating_sub(1);
        self.redraw()
    }

    pub fn cursor_right(&mut self) -> Result<()> {
        if self.cursor_position < self.content.len() {
            self.cursor_position += 1;
        }
        self.redraw()
    }

    pub fn cursor_home(&mut self) -> Result<()> {
        self.cursor_position = 0;
        self.redraw()
    }

    pub fn cursor_end(&mut self) -> Result<()> {
        self.cursor_position = self.content.len();
        self.redraw()
    }

    /// Apply one key press.
    ///
    /// Keys with Control held are ignored, as are keys the box has no use
    /// for. Edits that do not fit (typing into a full box, deleting past
    /// either end) leave the box unchanged.
    pub fn accept_key_event(&mut self, event: &KeyEvent) -> Result<()> {
        if event.ctrl() {
            return Ok(());
        }

        match event.code {
            KeyCode::Enter => {
                self.accepted = true;
                emit_event(ACCEPTED_EVENT, self.content.as_str());
                self.set_focus(false)
            }
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor_home(),
            KeyCode::End => self.cursor_end(),
            KeyCode::Delete => {
                if self.cursor_position >= self.content.len() {
                    emit_log(LogLevel::Debug, "delete at end of content ignored");
                    return Ok(());
                }
                self.content.erase(self.cursor_position, 1)?;
                self.redraw()
            }
            KeyCode::Backspace => {
                if self.cursor_position == 0 {
                    emit_log(LogLevel::Debug, "backspace at start of content ignored");
                    return Ok(());
                }
                self.content.erase(self.cursor_position - 1, 1)?;
                self.cursor_position -= 1;
                self.redraw()
            }
            KeyCode::Insert => {
                self.mode = self.mode.toggled();
                Ok(())
            }
            KeyCode::Char(_) => match event.printable() {
                Some(ch) => self.type_char(ch),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    fn type_char(&mut self, ch: char) -> Result<()> {
        let len = self.content.len();
        let max = self.options.max_codepoints;
        let cursor = self.cursor_position;

        if cursor >= max || (self.mode == EditMode::Insert && len >= max) {
            emit_log_with(LogLevel::Debug, || {
                format!("rejected {ch:?}: box holds {len} of {max} codepoints")
            });
            return Ok(());
        }

        if cursor >= len {
            self.content.push(ch);
        } else if self.mode == EditMode::Overwrite {
            self.content.replace(cursor, ch)?;
        } else {
            self.content.insert(cursor, ch)?;
        }
        self.cursor_position += 1;
        self.redraw()
    }

    /// Feed keys from `keys` until the user accepts or cancels.
    ///
    /// Each wait lasts at most `timeout`; timeouts are skipped. `is_cancel`
    /// sees every key before the box does, and a match ends the loop with
    /// [`Outcome::Cancelled`] without forwarding the key.
    pub fn run<K, F>(&mut self, keys: &mut K, timeout: Duration, mut is_cancel: F) -> Result<Outcome>
    where
        K: KeySource + ?Sized,
        F: FnMut(&KeyEvent) -> bool,
    {
        while !self.accepted {
            let Some(event) = keys.wait_for_key(timeout)? else {
                continue;
            };
            if is_cancel(&event) {
                return Ok(Outcome::Cancelled);
            }
            self.accept_key_event(&event)?;
        }
        Ok(Outcome::Accepted)
    }
}

impl<S: Surface> Drop for TextBox<'_, S> {
    fn drop(&mut self) {
        let _ = self.set_focus(false);
    }
}
