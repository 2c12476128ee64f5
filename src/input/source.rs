//! Blocking key sources.
//!
//! [`KeySource`] is what an editing loop pulls keys from. [`KeyReader`] is the
//! terminal implementation: it polls a file descriptor, buffers whatever bytes
//! arrive, and hands them to [`InputParser`] one key at a time.

#![allow(unsafe_code)]

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::input::keyboard::{KeyCode, KeyEvent};
use crate::input::parser::{InputParser, ParseError};
use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::{Duration, Instant};

/// How long to wait for the rest of an escape sequence before treating a
/// lone ESC byte as the Escape key.
pub const DEFAULT_ESC_DELAY: Duration = Duration::from_millis(25);

/// At least as large as std's stdin buffer, so reads through `Stdin` bypass
/// it and `poll` never misses bytes held in userspace.
const READ_CHUNK: usize = 8 * 1024;

/// Something that produces key events.
pub trait KeySource {
    /// Block for up to `timeout` waiting for the next key.
    ///
    /// Returns `Ok(None)` if the timeout elapsed without a key.
    fn wait_for_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

/// Key source reading terminal input from a file descriptor.
#[derive(Debug)]
pub struct KeyReader<R: Read + AsRawFd> {
    reader: R,
    parser: InputParser,
    pending: Vec<u8>,
    esc_delay: Duration,
    /// When the pending bytes last stalled on an incomplete sequence.
    stalled_since: Option<Instant>,
}

impl KeyReader<io::Stdin> {
    /// Read keys from standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read + AsRawFd> KeyReader<R> {
    /// Read keys from any pollable reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            parser: InputParser::new(),
            pending: Vec::new(),
            esc_delay: DEFAULT_ESC_DELAY,
            stalled_since: None,
        }
    }

    /// Return a reader with a different lone-ESC delay.
    #[must_use]
    pub fn with_esc_delay(mut self, esc_delay: Duration) -> Self {
        self.esc_delay = esc_delay;
        self
    }

    /// Bytes read but not yet decoded.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Decode one key from the pending bytes, dropping garbage as it goes.
    ///
    /// Returns `Err(Empty)` or `Err(Incomplete)` when more input is needed.
    fn decode_pending(&mut self) -> std::result::Result<KeyEvent, ParseError> {
        loop {
            match self.parser.parse(&self.pending) {
                Ok((key, consumed)) => {
                    self.pending.drain(..consumed);
                    return Ok(key);
                }
                Err(ParseError::UnrecognizedSequence(seq)) => {
                    emit_log_with(LogLevel::Warn, || {
                        format!("dropping unrecognized input sequence {seq:?}")
                    });
                    self.pending.drain(..seq.len().min(self.pending.len()));
                }
                Err(ParseError::InvalidUtf8) => {
                    emit_log_with(LogLevel::Warn, || {
                        format!("dropping invalid input byte 0x{:02x}", self.pending[0])
                    });
                    self.pending.drain(..1);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Resolve bytes that never completed: a leading ESC becomes the Escape
    /// key, anything else (a truncated character) is dropped.
    fn flush_incomplete(&mut self) -> Option<KeyEvent> {
        if self.pending.first() == Some(&0x1b) {
            self.pending.drain(..1);
            return Some(KeyEvent::key(KeyCode::Esc));
        }
        emit_log_with(LogLevel::Warn, || {
            format!("dropping truncated input {:?}", self.pending)
        });
        self.pending.clear();
        None
    }

    fn fill(&mut self) -> Result<()> {
        let mut buf = vec![0u8; READ_CHUNK];
        let n = loop {
            match self.reader.read(&mut buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        };
        if n == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "key input closed",
            )));
        }
        self.pending.extend_from_slice(&buf[..n]);
        Ok(())
    }
}

impl<R: Read + AsRawFd> KeySource for KeyReader<R> {
    fn wait_for_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let stalled = match self.decode_pending() {
                Ok(key) => {
                    self.stalled_since = None;
                    return Ok(Some(key));
                }
                Err(ParseError::Incomplete) => {
                    Some(*self.stalled_since.get_or_insert_with(Instant::now))
                }
                Err(_) => {
                    self.stalled_since = None;
                    None
                }
            };

            let remaining = deadline.map_or(timeout, |d| d.saturating_duration_since(Instant::now()));
            let esc_left = stalled.map(|since| self.esc_delay.saturating_sub(since.elapsed()));
            let wait = esc_left.map_or(remaining, |left| left.min(remaining));

            if poll_readable(self.reader.as_raw_fd(), wait)? {
                self.fill()?;
                self.stalled_since = None;
                continue;
            }

            match stalled {
                Some(since) if since.elapsed() >= self.esc_delay => {
                    self.stalled_since = None;
                    if let Some(key) = self.flush_incomplete() {
                        return Ok(Some(key));
                    }
                }
                Some(_) if esc_left.is_some_and(|left| left < remaining) => {}
                // The caller's timeout ran out first; the partial sequence
                // stays pending for the next call.
                _ => return Ok(None),
            }
        }
    }
}

/// Wait until `fd` is readable or `timeout` elapses.
///
/// A signal interrupting the wait counts as a timeout.
fn poll_readable(fd: RawFd, timeout: Duration) -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);

    // SAFETY: pfd is a valid pollfd and nfds is 1
    let result = unsafe { libc::poll(&mut pfd, 1, millis) };

    if result == -1 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    Ok(result > 0)
}
