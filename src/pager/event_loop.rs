//! Keyboard-driven paging over a `Screen`.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::trace;

use super::layout::{advance, render_frame, retreat, PagerContent, TermSize};
use super::tty::Screen;

pub const KEY_NEXT: u8 = b'i';
pub const KEY_PREV: u8 = b'k';
pub const KEY_QUIT: u8 = b'q';

/// How long one input wait lasts.  Also bounds how late a resize or a
/// cancellation is noticed.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Why the loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The user pressed the quit key.
    Quit,
    /// The cancel flag was raised from outside.
    Cancelled,
}

/// Page through `content` until the user quits or `cancel` is set.
///
/// A frame is drawn on entry and then only when the cursor or the
/// terminal size changes.  Unrecognised keys are ignored.
pub fn run<S: Screen>(
    screen: &mut S,
    content: &PagerContent,
    width: Option<usize>,
    cancel: &AtomicBool,
) -> io::Result<LoopExit> {
    let count = content.len();
    let mut cursor = 0usize;
    let mut drawn: Option<(usize, TermSize)> = None;

    loop {
        if cancel.load(Ordering::SeqCst) {
            return Ok(LoopExit::Cancelled);
        }

        let size = screen.size();
        if drawn != Some((cursor, size)) {
            let frame = render_frame(content, size, width, cursor);
            screen.write_all(frame.as_bytes())?;
            screen.flush()?;
            trace!(cursor, rows = size.rows, cols = size.cols, "frame drawn");
            drawn = Some((cursor, size));
        }

        match screen.read_key(POLL_INTERVAL)? {
            Some(KEY_QUIT) => return Ok(LoopExit::Quit),
            Some(KEY_NEXT) => cursor = advance(cursor, count),
            Some(KEY_PREV) => cursor = retreat(cursor, count),
            Some(_) | None => {}
        }
    }
}
