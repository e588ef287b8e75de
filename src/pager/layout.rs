//! Viewport arithmetic and frame rendering for the pager.
//!
//! Nothing here touches the terminal: a frame is built as a string of
//! escape sequences and text which the event loop writes in one go.

use std::fmt::Write;

use zeroize::Zeroizing;

use crate::vault::table::{ColumnWidths, HEADERS};
use crate::vault::Vault;

/// Shown instead of the password unless plain display was requested.
pub const PASSWORD_MASK: &str = "********";

/// Used when the terminal size cannot be queried.
pub const DEFAULT_SIZE: TermSize = TermSize { rows: 24, cols: 80 };

const CLEAR_SCREEN: &str = "\x1b[2J";
const UPPER_LEFT: char = '┌';
const UPPER_RIGHT: char = '┐';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub rows: usize,
    pub cols: usize,
}

/// Number of record slots that fit under the title row.
///
/// Each slot takes two lines (data row + rule), so this is
/// `floor((rows - 1) / 2)`, never more than `count`.
pub fn visible_slots(rows: usize, count: usize) -> usize {
    (rows.saturating_sub(1) / 2).min(count)
}

/// Next cursor position, wrapping to 0 after the last record.
pub fn advance(cursor: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (cursor + 1) % count
    }
}

/// Previous cursor position, wrapping to the last record before 0.
pub fn retreat(cursor: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (cursor % count + count - 1) % count
    }
}

/// Record indices shown in the `slots` visible rows.
///
/// When everything fits the view starts at the first record; otherwise
/// it starts at `cursor` and wraps around the end.
pub fn window(cursor: usize, slots: usize, count: usize) -> impl Iterator<Item = usize> {
    let start = if count > slots { cursor } else { 0 };
    (0..slots).map(move |n| (start + n) % count)
}

/// Width actually drawn: the configured width capped by the terminal.
pub fn usable_width(configured: Option<usize>, cols: usize) -> usize {
    configured.map_or(cols, |w| w.min(cols))
}

/// Pre-formatted rows of a vault, ready to be drawn.
///
/// Owns its text so it can move onto the render thread; every row is
/// wiped from memory when the content is dropped.
pub struct PagerContent {
    header: String,
    rows: Vec<Zeroizing<String>>,
}

impl PagerContent {
    pub fn new(vault: &Vault, show_password: bool) -> Self {
        let cells: Vec<[&str; 4]> = vault
            .iter()
            .map(|record| {
                let mut cells = record.cells();
                if !show_password {
                    cells[3] = PASSWORD_MASK;
                }
                cells
            })
            .collect();

        let widths = ColumnWidths::measure(cells.iter().copied());
        let rows = cells
            .into_iter()
            .map(|c| Zeroizing::new(widths.format_row(c)))
            .collect();

        Self {
            header: widths.format_row(HEADERS),
            rows,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|r| r.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build one full frame: bordered title row, then a data row and a rule
/// for each visible slot.
pub fn render_frame(
    content: &PagerContent,
    size: TermSize,
    configured_width: Option<usize>,
    cursor: usize,
) -> Zeroizing<String> {
    let width = usable_width(configured_width, size.cols).max(2);
    let inner = width - 2;

    let mut frame = Zeroizing::new(String::new());
    frame.push_str(CLEAR_SCREEN);

    // Title row: corners around the header, padded with horizontal bars.
    move_to(&mut frame, 1);
    frame.push(UPPER_LEFT);
    let title: String = content.header().chars().take(inner).collect();
    let fill = inner - title.chars().count();
    frame.push_str(&title);
    frame.extend(std::iter::repeat(HORIZONTAL).take(fill));
    frame.push(UPPER_RIGHT);

    let slots = visible_slots(size.rows, content.len());
    let mut line = 2;
    for index in window(cursor, slots, content.len()) {
        move_to(&mut frame, line);
        if let Some(row) = content.row(index) {
            frame.extend(row.chars().take(width));
        }

        move_to(&mut frame, line + 1);
        frame.push(VERTICAL);
        frame.extend(std::iter::repeat(HORIZONTAL).take(inner));
        frame.push(VERTICAL);

        line += 2;
    }

    frame
}

/// Position the cursor at column 1 of a 1-based terminal line.
fn move_to(frame: &mut String, line: usize) {
    let _ = write!(frame, "\x1b[{line};1H");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::CredentialRecord;

    fn vault(n: usize) -> Vault {
        Vault::from_records(
            (0..n)
                .map(|i| CredentialRecord::new(format!("site{i}.io"), None, None, "secret"))
                .collect(),
        )
    }

    #[test]
    fn slots_follow_terminal_height() {
        assert_eq!(visible_slots(24, 100), 11);
        assert_eq!(visible_slots(25, 100), 12);
        assert_eq!(visible_slots(3, 100), 1);
        assert_eq!(visible_slots(2, 100), 0);
        assert_eq!(visible_slots(0, 100), 0);
    }

    #[test]
    fn slots_clamped_to_record_count() {
        assert_eq!(visible_slots(24, 3), 3);
        assert_eq!(visible_slots(24, 0), 0);
    }

    #[test]
    fn cursor_wraps_both_ways() {
        assert_eq!(advance(2, 3), 0);
        assert_eq!(advance(0, 3), 1);
        assert_eq!(retreat(0, 3), 2);
        assert_eq!(retreat(2, 3), 1);
        assert_eq!(advance(0, 0), 0);
        assert_eq!(retreat(0, 0), 0);
    }

    #[test]
    fn window_scrolls_and_wraps_when_overflowing() {
        let shown: Vec<_> = window(3, 3, 5).collect();
        assert_eq!(shown, vec![3, 4, 0]);
    }

    #[test]
    fn window_starts_at_zero_when_everything_fits() {
        let shown: Vec<_> = window(2, 4, 4).collect();
        assert_eq!(shown, vec![0, 1, 2, 3]);
    }

    #[test]
    fn usable_width_is_capped_by_terminal() {
        assert_eq!(usable_width(Some(200), 80), 80);
        assert_eq!(usable_width(Some(40), 80), 40);
        assert_eq!(usable_width(None, 80), 80);
    }

    #[test]
    fn passwords_are_masked_by_default() {
        let content = PagerContent::new(&vault(1), false);
        let row = content.row(0).unwrap();
        assert!(row.contains(PASSWORD_MASK));
        assert!(!row.contains("secret"));
    }

    #[test]
    fn passwords_shown_on_request() {
        let content = PagerContent::new(&vault(1), true);
        assert!(content.row(0).unwrap().contains("secret"));
    }

    #[test]
    fn frame_draws_two_lines_per_visible_slot() {
        let content = PagerContent::new(&vault(10), false);
        let frame = render_frame(&content, TermSize { rows: 7, cols: 60 }, None, 0);

        // Title at line 1, then three slots (lines 2..=7).
        assert!(frame.contains("\x1b[7;1H"));
        assert!(!frame.contains("\x1b[8;1H"));
        assert_eq!(frame.matches(".io").count(), 3);
    }

    #[test]
    fn frame_lines_never_exceed_usable_width() {
        let content = PagerContent::new(&vault(2), true);
        let frame = render_frame(&content, TermSize { rows: 10, cols: 12 }, None, 0);

        for line in frame.split("\x1b[").skip(1) {
            let text = line.split_once('H').map_or("", |(_, t)| t);
            assert!(text.chars().count() <= 12, "line too wide: {text:?}");
        }
    }

    #[test]
    fn title_row_is_exactly_usable_width() {
        let content = PagerContent::new(&vault(0), false);
        let frame = render_frame(&content, TermSize { rows: 10, cols: 80 }, Some(50), 0);
        let title = frame.split("\x1b[1;1H").nth(1).unwrap();
        assert_eq!(title.chars().count(), 50);
        assert!(title.starts_with(UPPER_LEFT));
        assert!(title.ends_with(UPPER_RIGHT));
    }
}
