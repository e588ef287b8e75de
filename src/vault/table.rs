//! Human-editable plaintext table used for import and export.
//!
//! ```text
//! website |username|mail     |password|
//! -------------------------------------
//! a.io    |u       |         |p       |
//! -------------------------------------
//! ```
//!
//! Every cell is padded to its column width, every row ends with `|`,
//! and a rule line of `-` follows the header and each data row.

use std::fmt::Write;

use super::record::CredentialRecord;
use super::store::Vault;

/// Column titles, in column order.
pub const HEADERS: [&str; 4] = ["website", "username", "mail", "password"];

/// Fixed widths (in chars) of the four columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths(pub [usize; 4]);

impl ColumnWidths {
    /// Width of each column = max(longest cell, header length).
    pub fn measure<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = [&'a str; 4]>,
    {
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        Self(widths)
    }

    /// Widths for the records of `vault`.
    pub fn for_vault(vault: &Vault) -> Self {
        Self::measure(vault.iter().map(CredentialRecord::cells))
    }

    /// Length of a formatted row: all cells plus one `|` per column.
    pub fn row_len(&self) -> usize {
        self.0.iter().sum::<usize>() + self.0.len()
    }

    /// Pad each cell to its column width and terminate it with `|`.
    pub fn format_row(&self, cells: [&str; 4]) -> String {
        let mut line = String::with_capacity(self.row_len());
        for (cell, width) in cells.iter().zip(self.0) {
            let _ = write!(line, "{cell:<width$}|");
        }
        line
    }
}

/// Render `vault` as a plaintext table.
pub fn render_table(vault: &Vault) -> String {
    let widths = ColumnWidths::for_vault(vault);
    let rule = "-".repeat(widths.row_len());

    let mut out = String::new();
    let _ = writeln!(out, "{}", widths.format_row(HEADERS));
    let _ = writeln!(out, "{rule}");
    for record in vault {
        let _ = writeln!(out, "{}", widths.format_row(record.cells()));
        let _ = writeln!(out, "{rule}");
    }
    out
}

/// Parse a plaintext table back into a vault.
///
/// Lenient by design: the header, every rule line, and any row that does
/// not split into exactly four fields are skipped without error.
pub fn parse_table(text: &str) -> Vault {
    let records = text
        .lines()
        .filter(|line| !line.is_empty())
        .enumerate()
        .filter(|(index, _)| *index != 0 && index % 2 == 0)
        .filter_map(|(_, line)| parse_row(line))
        .collect();

    Vault::from_records(records)
}

/// Parse one data row.  Returns `None` unless it has exactly four fields.
fn parse_row(line: &str) -> Option<CredentialRecord> {
    let fields: Vec<&str> = line
        .trim_end_matches('\r')
        .split('|')
        .filter(|field| !field.is_empty())
        .collect();

    let [website, username, mail, password] = fields.as_slice() else {
        return None;
    };

    Some(CredentialRecord::new(
        unpad(website),
        optional(username),
        optional(mail),
        unpad(password),
    ))
}

/// Strip the space padding added on export.
fn unpad(field: &str) -> String {
    field.trim_end_matches(' ').to_string()
}

/// A field made only of whitespace stands for an absent value.
fn optional(field: &str) -> Option<String> {
    if field.chars().all(char::is_whitespace) {
        None
    } else {
        Some(unpad(field))
    }
}
