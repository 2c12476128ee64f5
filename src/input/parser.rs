//! ANSI sequence parser for keyboard input.
//!
//! Parses raw bytes from the terminal into key events. Supports:
//! - C0 control bytes (Enter, Tab, Backspace, Ctrl+letter)
//! - CSI sequences with xterm modifier parameters
//! - SS3 sequences (application cursor keys, F1-F4)
//! - Tilde sequences (Insert, Delete, paging, F5-F12)
//! - Alt+key as ESC followed by a character
//! - Multi-byte UTF-8 characters

// Parser has many match arms for different terminal sequences
#![allow(clippy::match_same_arms)]
// Self is used for consistency with other methods even when not needed
#![allow(clippy::unused_self)]

use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

const ESC: u8 = 0x1b;

/// Error type for input parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// Incomplete escape sequence or character (need more bytes).
    Incomplete,
    /// Unrecognized escape sequence. Holds every byte of the sequence, so its
    /// length is the number of bytes to skip.
    UnrecognizedSequence(Vec<u8>),
    /// Invalid UTF-8 in input. Skip one byte.
    InvalidUtf8,
}

/// Result of parsing input: the key and the number of bytes consumed.
pub type ParseResult = Result<(KeyEvent, usize), ParseError>;

/// Stateless decoder from terminal bytes to key events.
#[derive(Clone, Debug, Default)]
pub struct InputParser;

impl InputParser {
    /// Create a new input parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse one key from the front of `input`.
    ///
    /// Returns the event and number of bytes consumed, or an error. Call
    /// repeatedly, advancing past consumed bytes, until
    /// `Err(ParseError::Empty)` or `Err(ParseError::Incomplete)` is returned.
    pub fn parse(&self, input: &[u8]) -> ParseResult {
        let Some(&first) = input.first() else {
            return Err(ParseError::Empty);
        };

        match first {
            ESC => self.parse_escape(input),
            b'\r' | b'\n' => Ok((KeyEvent::key(KeyCode::Enter), 1)),
            b'\t' => Ok((KeyEvent::key(KeyCode::Tab), 1)),
            0x08 | 0x7f => Ok((KeyEvent::key(KeyCode::Backspace), 1)),
            0x00 => Ok((KeyEvent::with_ctrl(KeyCode::Char(' ')), 1)),
            // Ctrl+A through Ctrl+Z
            0x01..=0x1a => Ok((KeyEvent::with_ctrl(KeyCode::Char(char::from(first - 1 + b'a'))), 1)),
            // Ctrl+\ Ctrl+] Ctrl+^ Ctrl+_
            0x1c..=0x1f => Ok((KeyEvent::with_ctrl(KeyCode::Char(char::from(first + 0x40))), 1)),
            0x20..=0x7e => Ok((KeyEvent::char(char::from(first)), 1)),
            0x80..=0xff => self.parse_utf8(input),
        }
    }

    /// Parse an escape sequence.
    fn parse_escape(&self, input: &[u8]) -> ParseResult {
        let Some(&second) = input.get(1) else {
            // Could be just Escape or start of sequence
            return Err(ParseError::Incomplete);
        };

        match second {
            // CSI sequence: ESC [
            b'[' => self.parse_csi(input),
            // SS3 sequence: ESC O
            b'O' => self.parse_ss3(input),
            // Alt+key: ESC <char>
            0x20..=0x7e => Ok((KeyEvent::with_alt(KeyCode::Char(char::from(second))), 2)),
            0x80..=0xff => {
                let (key, consumed) = self.parse_utf8(&input[1..])?;
                Ok((KeyEvent::new(key.code, KeyModifiers::ALT), consumed + 1))
            }
            // Double escape, or ESC before a control byte
            _ => Ok((KeyEvent::key(KeyCode::Esc), 1)),
        }
    }

    /// Parse a CSI sequence (ESC [ ...).
    fn parse_csi(&self, input: &[u8]) -> ParseResult {
        // Find the final byte (0x40-0x7e)
        let Some(end) = input
            .iter()
            .skip(2)
            .position(|b| (0x40..=0x7e).contains(b))
            .map(|i| i + 2)
        else {
            return Err(ParseError::Incomplete);
        };

        let params = &input[2..end];
        let consumed = end + 1;

        let code = match input[end] {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            // Shift+Tab
            b'Z' => return Ok((KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT), consumed)),
            b'~' => return self.parse_tilde_key(input, params, consumed),
            _ => return Err(ParseError::UnrecognizedSequence(input[..consumed].to_vec())),
        };

        Ok((KeyEvent::new(code, self.parse_modifiers(params)), consumed))
    }

    /// Parse modifiers from CSI parameter bytes.
    ///
    /// Format: `1;N` where N = 1 + (shift ? 1 : 0) + (alt ? 2 : 0) + (ctrl ? 4 : 0).
    fn parse_modifiers(&self, params: &[u8]) -> KeyModifiers {
        let n = params
            .split(|&b| b == b';')
            .nth(1)
            .and_then(|p| std::str::from_utf8(p).ok())
            .and_then(|p| p.parse::<u8>().ok())
            .map_or(0, |n| n.saturating_sub(1));

        let mut mods = KeyModifiers::empty();
        if n & 1 != 0 {
            mods |= KeyModifiers::SHIFT;
        }
        if n & 2 != 0 {
            mods |= KeyModifiers::ALT;
        }
        if n & 4 != 0 {
            mods |= KeyModifiers::CTRL;
        }
        mods
    }

    /// Parse tilde key sequences (Insert, Delete, Page Up/Down, F5+).
    fn parse_tilde_key(&self, input: &[u8], params: &[u8], consumed: usize) -> ParseResult {
        let num: u8 = params
            .split(|&b| b == b';')
            .next()
            .and_then(|p| std::str::from_utf8(p).ok())
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);

        let code = match num {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            11 => KeyCode::F(1),
            12 => KeyCode::F(2),
            13 => KeyCode::F(3),
            14 => KeyCode::F(4),
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            _ => return Err(ParseError::UnrecognizedSequence(input[..consumed].to_vec())),
        };

        Ok((KeyEvent::new(code, self.parse_modifiers(params)), consumed))
    }

    /// Parse SS3 sequences (ESC O ...).
    fn parse_ss3(&self, input: &[u8]) -> ParseResult {
        let Some(&final_byte) = input.get(2) else {
            return Err(ParseError::Incomplete);
        };

        let code = match final_byte {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'M' => KeyCode::Enter,
            _ => return Err(ParseError::UnrecognizedSequence(input[..3].to_vec())),
        };

        Ok((KeyEvent::key(code), 3))
    }

    /// Parse one multi-byte UTF-8 character.
    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let first = input[0];

        // Determine expected byte length
        let expected_len = if first & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            return Err(ParseError::InvalidUtf8);
        };

        if input.len() < expected_len {
            return Err(ParseError::Incomplete);
        }

        let s = std::str::from_utf8(&input[..expected_len]).map_err(|_| ParseError::InvalidUtf8)?;
        let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;

        Ok((KeyEvent::char(c), expected_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> ParseResult {
        InputParser::new().parse(input)
    }

    fn key(input: &[u8]) -> KeyEvent {
        parse(input).unwrap().0
    }

    #[test]
    fn test_parse_char() {
        let (event, consumed) = parse(b"a").unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(event, KeyEvent::char('a'));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(b""), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_enter_tab_backspace() {
        assert_eq!(key(b"\r").code, KeyCode::Enter);
        assert_eq!(key(b"\n").code, KeyCode::Enter);
        assert_eq!(key(b"\t").code, KeyCode::Tab);
        assert_eq!(key(b"\x7f").code, KeyCode::Backspace);
        assert_eq!(key(b"\x08").code, KeyCode::Backspace);
    }

    #[test]
    fn test_parse_ctrl_letters() {
        assert!(key(&[0x03]).is_ctrl_c());
        assert_eq!(key(&[0x01]), KeyEvent::with_ctrl(KeyCode::Char('a')));
        assert_eq!(key(&[0x1a]), KeyEvent::with_ctrl(KeyCode::Char('z')));
        assert_eq!(key(&[0x1f]), KeyEvent::with_ctrl(KeyCode::Char('_')));
        assert_eq!(key(&[0x00]), KeyEvent::with_ctrl(KeyCode::Char(' ')));
    }

    #[test]
    fn test_parse_escape_alone_is_incomplete() {
        assert_eq!(parse(b"\x1b"), Err(ParseError::Incomplete));
        assert_eq!(parse(b"\x1b[1;5"), Err(ParseError::Incomplete));
        assert_eq!(parse(b"\x1bO"), Err(ParseError::Incomplete));
    }

    #[test]
    fn test_parse_double_escape() {
        let (event, consumed) = parse(b"\x1b\x1b").unwrap();
        assert_eq!(event.code, KeyCode::Esc);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_parse_arrows() {
        assert_eq!(key(b"\x1b[A").code, KeyCode::Up);
        assert_eq!(key(b"\x1b[B").code, KeyCode::Down);
        assert_eq!(key(b"\x1b[C").code, KeyCode::Right);
        assert_eq!(key(b"\x1b[D").code, KeyCode::Left);
        assert_eq!(key(b"\x1bOD").code, KeyCode::Left);
    }

    #[test]
    fn test_parse_arrow_with_modifiers() {
        // Shift+Up: ESC [ 1 ; 2 A
        let (event, consumed) = parse(b"\x1b[1;2A").unwrap();
        assert_eq!(consumed, 6);
        assert_eq!(event.code, KeyCode::Up);
        assert!(event.shift());

        // Ctrl+Right: ESC [ 1 ; 5 C
        let event = key(b"\x1b[1;5C");
        assert_eq!(event.code, KeyCode::Right);
        assert!(event.ctrl());
        assert!(!event.shift());
    }

    #[test]
    fn test_parse_home_end_variants() {
        for seq in [&b"\x1b[H"[..], b"\x1bOH", b"\x1b[1~", b"\x1b[7~"] {
            assert_eq!(key(seq).code, KeyCode::Home, "{seq:?}");
        }
        for seq in [&b"\x1b[F"[..], b"\x1bOF", b"\x1b[4~", b"\x1b[8~"] {
            assert_eq!(key(seq).code, KeyCode::End, "{seq:?}");
        }
    }

    #[test]
    fn test_parse_tilde_keys() {
        assert_eq!(key(b"\x1b[2~").code, KeyCode::Insert);
        assert_eq!(key(b"\x1b[3~").code, KeyCode::Delete);
        assert_eq!(key(b"\x1b[5~").code, KeyCode::PageUp);
        assert_eq!(key(b"\x1b[6~").code, KeyCode::PageDown);
        let shifted_delete = key(b"\x1b[3;2~");
        assert_eq!(shifted_delete.code, KeyCode::Delete);
        assert!(shifted_delete.shift());
    }

    #[test]
    fn test_parse_function_keys_f1_f12() {
        let cases: [(&[u8], u8); 12] = [
            (b"\x1bOP", 1),
            (b"\x1bOQ", 2),
            (b"\x1bOR", 3),
            (b"\x1bOS", 4),
            (b"\x1b[15~", 5),
            (b"\x1b[17~", 6),
            (b"\x1b[18~", 7),
            (b"\x1b[19~", 8),
            (b"\x1b[20~", 9),
            (b"\x1b[21~", 10),
            (b"\x1b[23~", 11),
            (b"\x1b[24~", 12),
        ];
        for (seq, n) in cases {
            assert_eq!(key(seq).code, KeyCode::F(n), "{seq:?}");
        }
    }

    #[test]
    fn test_parse_back_tab() {
        assert_eq!(
            key(b"\x1b[Z"),
            KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_parse_alt_key() {
        let (event, consumed) = parse(b"\x1bx").unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(event, KeyEvent::with_alt(KeyCode::Char('x')));

        let (event, consumed) = parse("\x1bé".as_bytes()).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(event, KeyEvent::with_alt(KeyCode::Char('é')));
    }

    #[test]
    fn test_parse_utf8() {
        let (event, consumed) = parse("水x".as_bytes()).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(event, KeyEvent::char('水'));

        let (event, consumed) = parse("🍌".as_bytes()).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(event, KeyEvent::char('🍌'));
    }

    #[test]
    fn test_parse_truncated_utf8() {
        assert_eq!(parse(&"水".as_bytes()[..2]), Err(ParseError::Incomplete));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        assert_eq!(parse(&[0x80]), Err(ParseError::InvalidUtf8));
        assert_eq!(parse(&[0xe6, 0x41, 0x41]), Err(ParseError::InvalidUtf8));
    }

    #[test]
    fn test_unrecognized_sequence_reports_its_bytes() {
        assert_eq!(
            parse(b"\x1b[99~rest"),
            Err(ParseError::UnrecognizedSequence(b"\x1b[99~".to_vec()))
        );
        assert_eq!(
            parse(b"\x1b[<0;1;1M"),
            Err(ParseError::UnrecognizedSequence(b"\x1b[<0;1;1M".to_vec()))
        );
        assert_eq!(
            parse(b"\x1bOz"),
            Err(ParseError::UnrecognizedSequence(b"\x1bOz".to_vec()))
        );
    }

    #[test]
    fn test_sequence_of_keys() {
        let parser = InputParser::new();
        let mut input: &[u8] = b"h\x1b[D\x7f\r";
        let mut keys = Vec::new();
        while let Ok((key, consumed)) = parser.parse(input) {
            keys.push(key.code);
            input = &input[consumed..];
        }
        assert_eq!(
            keys,
            [
                KeyCode::Char('h'),
                KeyCode::Left,
                KeyCode::Backspace,
                KeyCode::Enter
            ]
        );
    }
}
