//! Full-screen, keyboard-driven display of vault records.
//!
//! - `layout` turns records into frames.
//! - `session` owns raw mode and the alternate screen.
//! - `tty` reads keys and sizes from the real terminal.
//! - `event_loop` ties them together.
//!
//! `display` is the entry point.  With a time limit the loop runs on a
//! worker thread that the caller cancels once the limit expires.

pub mod event_loop;
pub mod layout;
#[cfg(unix)]
pub mod session;
pub mod tty;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::errors::{CredVaultError, Result};
use crate::vault::Vault;

pub use event_loop::LoopExit;
pub use layout::{PagerContent, TermSize};
pub use tty::Screen;

/// Show `vault` in the pager until the user quits or `duration` elapses.
///
/// The terminal is always restored before this returns, including when
/// rendering fails.
#[cfg(unix)]
pub fn display(
    vault: &Vault,
    width: Option<usize>,
    duration: Option<Duration>,
    show_password: bool,
) -> Result<()> {
    let content = PagerContent::new(vault, show_password);

    let exit = match duration {
        None => run_session(&content, width, &AtomicBool::new(false))?,
        Some(limit) => run_with_deadline(limit, move |cancel| {
            run_session(&content, width, cancel)
        })?,
    };

    debug!(?exit, "pager finished");
    Ok(())
}

#[cfg(not(unix))]
pub fn display(
    _vault: &Vault,
    _width: Option<usize>,
    _duration: Option<Duration>,
    _show_password: bool,
) -> Result<()> {
    Err(CredVaultError::CommandFailed(
        "the pager needs a Unix terminal; use `show --output FILE` instead".into(),
    ))
}

/// Open a terminal session, run the loop, and close the session.
#[cfg(unix)]
fn run_session(
    content: &PagerContent,
    width: Option<usize>,
    cancel: &AtomicBool,
) -> Result<LoopExit> {
    let mut session = session::TerminalSession::new();
    session
        .open()
        .map_err(|e| CredVaultError::CommandFailed(format!("cannot open terminal: {e}")))?;

    let mut screen = tty::Tty::new();
    let outcome = event_loop::run(&mut screen, content, width, cancel);

    // Close explicitly so a restore failure is reported; Drop covers the
    // early-return paths above.
    session.close()?;
    Ok(outcome?)
}

/// Run `job` on a worker thread for at most `limit`.
///
/// The job gets a cancel flag that is raised once `limit` expires; the
/// caller then waits for the job to return, so any cleanup the job does
/// has completed by the time this function returns.
pub fn run_with_deadline<F>(limit: Duration, job: F) -> Result<LoopExit>
where
    F: FnOnce(&AtomicBool) -> Result<LoopExit> + Send + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let (done_tx, done_rx) = mpsc::channel();

    let worker_cancel = Arc::clone(&cancel);
    let handle = thread::Builder::new()
        .name("pager".into())
        .spawn(move || {
            let outcome = job(&worker_cancel);
            let _ = done_tx.send(());
            outcome
        })?;

    if done_rx.recv_timeout(limit).is_err() {
        debug!(?limit, "display time elapsed, cancelling pager");
        cancel.store(true, Ordering::SeqCst);
    }

    match handle.join() {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!("pager thread panicked");
            Err(CredVaultError::CommandFailed("pager thread panicked".into()))
        }
    }
}
