//! ANSI escape sequence generation.
//!
//! Colors come from the eight-color palette stored in cells' native words
//! (see [`crate::style`]), so every color is one SGR parameter: palette code
//! `n` maps to `30 + n - 1` (foreground) or `40 + n - 1` (background), and
//! code 0 maps to the terminal defaults 39/49.

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::style::{Color, TextAttributes};
use std::io::{self, Write};

/// SGR parameter for a foreground palette code.
///
/// Unknown codes fall back to the default color.
#[must_use]
pub const fn sgr_fg_code(palette_code: u16) -> u8 {
    match palette_code & TextAttributes::COLOR_MASK {
        code @ 1..=8 => 30 + code as u8 - 1,
        _ => 39,
    }
}

/// SGR parameter for a background palette code.
#[must_use]
pub const fn sgr_bg_code(palette_code: u16) -> u8 {
    sgr_fg_code(palette_code) + 10
}

/// Write a u8 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    // Fast paths for common small values (most cursor positions)
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    if n < 100 {
        return w.write_all(&[b'0' + (n / 10) as u8, b'0' + (n % 10) as u8]);
    }

    let mut buf = [0u8; 10]; // max u32 is 4294967295 (10 digits)
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

fn write_sgr(w: &mut impl Write, code: u8) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u8_decimal(w, code)?;
    w.write_all(b"m")
}

/// Write the SGR sequence selecting a foreground palette code.
pub fn write_fg_color(w: &mut impl Write, palette_code: u16) -> io::Result<()> {
    write_sgr(w, sgr_fg_code(palette_code))
}

/// Write the SGR sequence selecting a background palette code.
pub fn write_bg_color(w: &mut impl Write, palette_code: u16) -> io::Result<()> {
    write_sgr(w, sgr_bg_code(palette_code))
}

/// Generate the SGR sequence for a foreground color.
#[must_use]
pub fn fg_color(color: Color) -> String {
    format!("\x1b[{}m", sgr_fg_code(color.palette_code()))
}

/// Generate the SGR sequence for a background color.
#[must_use]
pub fn bg_color(color: Color) -> String {
    format!("\x1b[{}m", sgr_bg_code(color.palette_code()))
}

/// Write SGR sequence turning on text attributes.
pub fn write_attributes(w: &mut impl Write, attrs: TextAttributes) -> io::Result<()> {
    match (
        attrs.contains(TextAttributes::BOLD),
        attrs.contains(TextAttributes::UNDERLINE),
    ) {
        (true, true) => w.write_all(b"\x1b[1;4m"),
        (true, false) => w.write_all(b"\x1b[1m"),
        (false, true) => w.write_all(b"\x1b[4m"),
        (false, false) => Ok(()),
    }
}

/// Generate cursor position sequence (1-indexed).
#[must_use]
pub fn cursor_position(row: u32, col: u32) -> String {
    format!("\x1b[{};{}H", row + 1, col + 1)
}

/// Write cursor position sequence to a writer.
///
/// `row` and `col` are 0-indexed; the sequence is 1-indexed.
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row + 1)?;
    w.write_all(b";")?;
    write_u32_decimal(w, col + 1)?;
    w.write_all(b"H")
}

/// Write relative cursor movement to a writer.
pub fn write_cursor_move(w: &mut impl Write, dx: i32, dy: i32) -> io::Result<()> {
    if dy < 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(b"A")?;
    } else if dy > 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(b"B")?;
    }

    if dx > 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(b"C")?;
    } else if dx < 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(b"D")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readable(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).replace('\x1b', "ESC")
    }

    #[test]
    fn test_palette_to_sgr() {
        assert_eq!(sgr_fg_code(Color::Unset.palette_code()), 39);
        assert_eq!(sgr_fg_code(Color::Black.palette_code()), 30);
        assert_eq!(sgr_fg_code(Color::Red.palette_code()), 31);
        assert_eq!(sgr_fg_code(Color::White.palette_code()), 37);
        assert_eq!(sgr_bg_code(Color::Unset.palette_code()), 49);
        assert_eq!(sgr_bg_code(Color::Cyan.palette_code()), 46);
        // Attribute bits in the high byte are ignored.
        assert_eq!(sgr_fg_code(0x0302), 31);
        // Unknown codes fall back to the default.
        assert_eq!(sgr_fg_code(0x00FF), 39);
    }

    #[test]
    fn snapshot_color_sequences() {
        let all = [
            Color::Unset,
            Color::Black,
            Color::Red,
            Color::Green,
            Color::Yellow,
            Color::Blue,
            Color::Magenta,
            Color::Cyan,
            Color::White,
        ]
        .iter()
        .map(|&c| format!("{c:?}: {} {}", fg_color(c), bg_color(c)).replace('\x1b', "ESC"))
        .collect::<Vec<_>>()
        .join("\n");
        insta::assert_snapshot!(all, @r"
        Unset: ESC[39m ESC[49m
        Black: ESC[30m ESC[40m
        Red: ESC[31m ESC[41m
        Green: ESC[32m ESC[42m
        Yellow: ESC[33m ESC[43m
        Blue: ESC[34m ESC[44m
        Magenta: ESC[35m ESC[45m
        Cyan: ESC[36m ESC[46m
        White: ESC[37m ESC[47m
        ");
    }

    #[test]
    fn test_write_attributes() {
        let mut out = Vec::new();
        write_attributes(&mut out, TextAttributes::BOLD | TextAttributes::UNDERLINE).unwrap();
        assert_eq!(readable(&out), "ESC[1;4m");

        out.clear();
        write_attributes(&mut out, TextAttributes::empty()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_cursor_position_is_one_indexed() {
        assert_eq!(cursor_position(0, 0), "\x1b[1;1H");
        let mut out = Vec::new();
        write_cursor_position(&mut out, 23, 119).unwrap();
        assert_eq!(readable(&out), "ESC[24;120H");
    }

    #[test]
    fn test_write_cursor_move() {
        let mut out = Vec::new();
        write_cursor_move(&mut out, 3, -2).unwrap();
        assert_eq!(readable(&out), "ESC[2AESC[3C");

        out.clear();
        write_cursor_move(&mut out, -12, 0).unwrap();
        assert_eq!(readable(&out), "ESC[12D");

        out.clear();
        write_cursor_move(&mut out, 0, 0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_decimal_writers() {
        let mut out = Vec::new();
        for n in [0, 9, 10, 99, 100, 4_294_967_295] {
            write_u32_decimal(&mut out, n).unwrap();
            out.push(b' ');
        }
        assert_eq!(String::from_utf8(out).unwrap(), "0 9 10 99 100 4294967295 ");
    }
}
