//! Operator prompt for the previous key/IV.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Password;

use crate::core::key::KeyPrompt;
use crate::error::Result;

/// Asks on the terminal with hidden input, or reads one line per value from
/// stdin when it isn't a terminal.
pub struct TerminalPrompt;

impl KeyPrompt for TerminalPrompt {
    fn ask(&self, label: &str) -> Result<String> {
        if io::stdin().is_terminal() {
            return Ok(Password::new().with_prompt(label).interact()?);
        }

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
