//! Raw-mode, alternate-screen terminal session.
//!
//! `TerminalSession` owns the transition `Closed -> Open -> Closed`.
//! Opening puts the terminal in raw mode (no echo, no line buffering, no
//! signal characters) and switches to the alternate screen.  Closing
//! undoes both.  Close runs on `Drop`, and an `atexit` hook restores the
//! terminal if the process exits while a session is still open.

use std::io::{self, IsTerminal};
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use tracing::debug;

/// `true` exactly while a session holds the terminal in raw mode.
static RAW_MODE_HELD: Mutex<bool> = Mutex::new(false);

static EXIT_HOOK: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
}

/// An owned handle on the terminal's raw mode.
#[derive(Debug)]
pub struct TerminalSession {
    state: SessionState,
}

impl TerminalSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Closed,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Enter raw mode and the alternate screen.  No-op if already open.
    ///
    /// Keys are read from stdin and frames written to stdout, so both must
    /// be a terminal.
    pub fn open(&mut self) -> io::Result<()> {
        if self.state == SessionState::Open {
            return Ok(());
        }

        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin and stdout must be a terminal",
            ));
        }

        let mut held = raw_mode_flag();
        if *held {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "terminal is already held by another session",
            ));
        }

        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, MoveTo(0, 0)) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        *held = true;
        drop(held);

        EXIT_HOOK.call_once(|| {
            // SAFETY: registering a plain `extern "C" fn()` with no captures.
            unsafe {
                libc::atexit(restore_at_exit);
            }
        });

        self.state = SessionState::Open;
        debug!("terminal session opened");
        Ok(())
    }

    /// Leave the alternate screen and restore the terminal mode.
    /// No-op if already closed.
    pub fn close(&mut self) -> io::Result<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.state = SessionState::Closed;
        debug!("terminal session closed");
        restore_terminal()
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn raw_mode_flag() -> MutexGuard<'static, bool> {
    RAW_MODE_HELD.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Undo whatever the open session did.  Both steps are attempted even if
/// the first one fails.
fn restore_terminal() -> io::Result<()> {
    let mut held = raw_mode_flag();
    if !*held {
        return Ok(());
    }
    *held = false;

    let screen = execute!(io::stdout(), LeaveAlternateScreen);
    let mode = disable_raw_mode();
    screen.and(mode)
}

extern "C" fn restore_at_exit() {
    let _ = restore_terminal();
}
