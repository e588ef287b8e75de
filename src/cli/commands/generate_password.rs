//! `credvault generate-password` — print a random password.

use crate::cli::generator::{self, PasswordPolicy};
use crate::cli::output;
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `generate-password` command.
///
/// Needs no vault, so it also works before `init`.
pub fn execute(settings: &Settings, length: Option<usize>, numbers: bool, special: bool) -> Result<()> {
    let policy = PasswordPolicy {
        length: length.unwrap_or(settings.generated_length),
        digits: numbers,
        specials: special,
    };

    let password = generator::generate(&policy);
    output::plain(&password);
    Ok(())
}
