//! `termline` - codepoint-indexed text and a single-line terminal text box
//!
//! Text is stored as UTF-8 but addressed by codepoint ([`CodepointString`],
//! [`CodepointView`]). A [`TextBox`] edits one line of it with insert and
//! overwrite modes and horizontal scrolling, drawing on any [`Surface`]: an
//! in-memory [`CellBuffer`] or a live [`Terminal`] fed by a [`KeyReader`].
//!
//! # Examples
//!
//! ```
//! use termline::{CellBuffer, CodepointString, KeyEvent, TextBox, TextBoxOptions};
//!
//! let mut text = CodepointString::from("héllo");
//! text.insert(0, '水').unwrap();
//! assert_eq!(text.len(), 6);
//! assert_eq!(text.byte_len(), 9);
//!
//! let mut screen = CellBuffer::new(12, 1);
//! let mut input = TextBox::new(&mut screen, TextBoxOptions::new(0, 0).with_display_width(8))
//!     .unwrap();
//! input.set_content(text.as_view()).unwrap();
//! input.accept_key_event(&KeyEvent::char('!')).unwrap();
//! assert_eq!(input.content(), "!水héllo");
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional cursor delta conversions
#![allow(clippy::module_name_repetitions)] // Allow input::InputParser etc
#![allow(clippy::struct_excessive_bools)] // Terminal state needs multiple flags
#![allow(clippy::missing_errors_doc)] // Errors are documented on the Error enum
#![allow(clippy::missing_panics_doc)] // Panics only in tests
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::must_use_candidate)] // Accessors are obvious
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod error;
pub mod event;
pub mod input;
pub mod style;
pub mod surface;
pub mod terminal;
pub mod text;
pub mod unicode;
pub mod widget;

// Re-export core types at crate root
pub use cell::Cell;
pub use error::{Error, Result};
pub use event::{
    LogLevel, clear_log_callback, emit_event, emit_log, emit_log_with, set_event_callback,
    set_log_callback,
};
pub use style::{CellStyle, Color, FontWeight, TextAttributes, TextDecoration};
pub use text::{CodepointString, CodepointView};

// Re-export input types
pub use input::{InputParser, KeyCode, KeyEvent, KeyModifiers, KeyReader, KeySource};

// Re-export surfaces and widgets
pub use buffer::CellBuffer;
pub use surface::Surface;
pub use terminal::{RawModeGuard, Terminal, TerminalOptions, enable_raw_mode, is_tty, terminal_size};
pub use unicode::{WidthMethod, set_width_method};
pub use widget::{EditMode, Outcome, TextBox, TextBoxOptions};
