//! Shared fixtures for integration tests.

#![allow(dead_code)] // Each test binary uses a different subset
#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry

use std::collections::VecDeque;
use std::time::Duration;
use termline::{CellBuffer, KeyCode, KeyEvent, KeySource, LogLevel, Result, set_log_callback};

/// Key source that replays a fixed script. `None` entries are timeouts.
///
/// Once the script runs out every wait times out.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    script: VecDeque<Option<KeyEvent>>,
    pub waits: usize,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = Option<KeyEvent>>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
            waits: 0,
        }
    }

    /// One key press per character of `text`, then Enter.
    pub fn typing(text: &str) -> Self {
        Self::new(
            text.chars()
                .map(|ch| Some(KeyEvent::char(ch)))
                .chain([Some(KeyEvent::key(KeyCode::Enter))]),
        )
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl KeySource for ScriptedKeys {
    fn wait_for_key(&mut self, _timeout: Duration) -> Result<Option<KeyEvent>> {
        self.waits += 1;
        Ok(self.script.pop_front().flatten())
    }
}

/// Every row of the buffer as text.
pub fn rows(buffer: &CellBuffer) -> Vec<String> {
    (0..buffer.height()).map(|y| buffer.row_text(y)).collect()
}

/// Rows with trailing blanks removed, joined by newlines.
pub fn screen_text(buffer: &CellBuffer) -> String {
    rows(buffer)
        .iter()
        .map(|row| row.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Make escape sequences printable.
pub fn readable(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\x1b', "ESC")
}

/// Install a test tracing subscriber and route termline's log callback into it.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();

    set_log_callback(|level, message| match level {
        LogLevel::Debug => tracing::debug!(target: "termline", "{message}"),
        LogLevel::Info => tracing::info!(target: "termline", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "termline", "{message}"),
        LogLevel::Error => tracing::error!(target: "termline", "{message}"),
    });
}
