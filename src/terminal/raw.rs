//! Raw mode and size queries for Unix terminals.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios and ioctl.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Saved terminal state, restored on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Put the terminal behind `fd` into raw mode.
    ///
    /// Reads return immediately with whatever bytes are available
    /// (`VMIN = 0`, `VTIME = 0`); callers wait with `poll` first.
    ///
    /// # Errors
    ///
    /// Fails if `fd` is not a terminal.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;
        // No break signal, no CR to NL, no parity check, no stripping, no XON/XOFF.
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        // No echo, no line editing, no ^C/^Z signals: every key reaches the reader.
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 0;

        set_termios(fd, &raw)?;
        Ok(Self { fd, original })
    }

    /// Restore the saved state now instead of on drop.
    pub fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Put standard input into raw mode.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Size of the terminal behind standard output as `(columns, rows)`.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    terminal_size_of(&io::stdout())
}

/// Size of the terminal behind `fd` as `(columns, rows)`.
///
/// A terminal reporting zero columns or rows is an error.
pub fn terminal_size_of<F: AsRawFd>(fd: &F) -> io::Result<(u16, u16)> {
    // SAFETY: winsize is plain old data
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ writes into a valid winsize struct
    let result = unsafe { libc::ioctl(fd.as_raw_fd(), libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    // SAFETY: termios is plain old data
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr writes into a valid termios struct
    if unsafe { libc::tcgetattr(fd, &mut termios) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr reads from a valid termios struct
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
