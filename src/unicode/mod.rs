//! Unicode utilities: UTF-8 codepoint scanning and terminal display width.

pub mod utf8;
mod width;

pub use width::{
    WidthMethod, display_width, display_width_char, display_width_char_with_method,
    set_width_method, width_method,
};
