//! Keyboard input: key types, byte-sequence decoding and blocking key sources.
//!
//! Terminal input arrives as raw bytes. [`InputParser`] turns legacy VT and
//! xterm sequences into [`KeyEvent`]s, and [`KeyReader`] feeds it from a
//! pollable file descriptor behind the [`KeySource`] trait.

mod keyboard;
mod parser;
mod source;

pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError, ParseResult};
pub use source::{DEFAULT_ESC_DELAY, KeyReader, KeySource};
