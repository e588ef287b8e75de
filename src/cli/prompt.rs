//! Yes/no confirmation.
//!
//! The prompt is a small state machine: it stays in `Prompting` until it
//! sees `y` or `n`, and gives up as `Rejected` after `max_attempts`
//! unrecognised answers or at end of input.  On a terminal the answer
//! comes from `dialoguer::Confirm`; piped input is read line by line.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Confirm;

use crate::errors::{CredVaultError, Result};

/// Answers accepted before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// Waiting for an answer; `attempts` unrecognised answers so far.
    Prompting { attempts: usize },
    Accepted,
    Rejected,
}

impl PromptState {
    /// Feed one line of input (`None` = end of input).
    pub fn next(self, line: Option<&str>, max_attempts: usize) -> Self {
        let Self::Prompting { attempts } = self else {
            return self;
        };

        match line.map(str::trim) {
            None => Self::Rejected,
            Some("y" | "Y") => Self::Accepted,
            Some("n" | "N") => Self::Rejected,
            Some(_) if attempts + 1 >= max_attempts => Self::Rejected,
            Some(_) => Self::Prompting {
                attempts: attempts + 1,
            },
        }
    }
}

/// A yes/no question.
#[derive(Debug, Clone)]
pub struct Confirmation {
    question: String,
    max_attempts: usize,
}

impl Confirmation {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Ask the user.  Uses an interactive prompt when stdin and stderr are
    /// a terminal, otherwise reads answers from stdin.
    pub fn interact(&self) -> Result<bool> {
        if io::stdin().is_terminal() && io::stderr().is_terminal() {
            self.ask_terminal()
        } else {
            self.ask(io::stdin().lock(), io::stderr())
        }
    }

    /// `Confirm` only returns on `y` or `n`; `Esc` or `q` ends the input.
    fn ask_terminal(&self) -> Result<bool> {
        let mut state = PromptState::Prompting { attempts: 0 };

        while let PromptState::Prompting { .. } = state {
            let answer = Confirm::new()
                .with_prompt(self.question.as_str())
                .interact_opt()
                .map_err(|e| CredVaultError::CommandFailed(format!("confirm prompt: {e}")))?;
            state = state.next(answer.map(answer_text), self.max_attempts);
        }

        Ok(state == PromptState::Accepted)
    }

    /// Ask on `output`, reading answers line by line from `input`.
    pub fn ask<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<bool> {
        let mut state = PromptState::Prompting { attempts: 0 };
        let mut line = String::new();

        while let PromptState::Prompting { attempts } = state {
            if attempts > 0 {
                writeln!(output, "Please answer 'y' or 'n'.")?;
            }
            write!(output, "{} [y/n] ", self.question)?;
            output.flush()?;

            line.clear();
            let answer = match input.read_line(&mut line)? {
                0 => None,
                _ => Some(line.as_str()),
            };
            state = state.next(answer, self.max_attempts);
        }

        Ok(state == PromptState::Accepted)
    }
}

fn answer_text(yes: bool) -> &'static str {
    if yes {
        "y"
    } else {
        "n"
    }
}
