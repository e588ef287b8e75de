//! The controlling terminal as seen by the event loop.
//!
//! `Screen` is the seam between the loop and the real terminal: the loop
//! only needs the current size, single-key reads with a timeout, and a
//! writer for frames.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use super::layout::{TermSize, DEFAULT_SIZE};

/// What the event loop needs from a terminal.
pub trait Screen: Write {
    /// Current size in cells.  Implementations fall back to a default
    /// instead of failing.
    fn size(&self) -> TermSize;

    /// Wait up to `timeout` for one key press.
    ///
    /// `Ok(None)` means nothing usable arrived in time.
    fn read_key(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

/// Standard input/output of the process, used while a
/// `TerminalSession` has the terminal in raw mode.
pub struct Tty {
    out: io::Stdout,
}

impl Tty {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for Tty {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Screen for Tty {
    fn size(&self) -> TermSize {
        match terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => TermSize {
                rows: usize::from(rows),
                cols: usize::from(cols),
            },
            _ => DEFAULT_SIZE,
        }
    }

    fn read_key(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(key_byte(&key)),
            // Resizes are picked up by polling the size.
            _ => Ok(None),
        }
    }
}

/// The byte a key press stands for.  Releases, repeats, modified keys and
/// non-character keys yield `None`.
pub fn key_byte(key: &KeyEvent) -> Option<u8> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if c.is_ascii() => u8::try_from(c).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_characters_map_to_bytes() {
        assert_eq!(key_byte(&press(KeyCode::Char('q'), KeyModifiers::NONE)), Some(b'q'));
        assert_eq!(key_byte(&press(KeyCode::Char('I'), KeyModifiers::SHIFT)), Some(b'I'));
    }

    #[test]
    fn control_chords_are_not_commands() {
        assert_eq!(key_byte(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)), None);
        assert_eq!(key_byte(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn non_character_keys_are_ignored() {
        assert_eq!(key_byte(&press(KeyCode::Esc, KeyModifiers::NONE)), None);
        assert_eq!(key_byte(&press(KeyCode::Down, KeyModifiers::NONE)), None);
        assert_eq!(key_byte(&press(KeyCode::Char('é'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_byte(&key), None);
    }
}
