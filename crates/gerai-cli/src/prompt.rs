//! Interactive prompts
//!
//! Both prompts refuse to block when stdin is not a terminal.

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Prompt for yes/no confirmation
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

/// Ask for the settings PIN
///
/// Returns `None` when stdin is not a terminal or nothing was entered.
/// The PIN is echoed; there is no terminal-control dependency to hide it.
pub fn read_pin(prompt: &str) -> Result<Option<String>> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    eprint!("{}: ", prompt);
    io::stderr().flush()?;

    read_trimmed(io::stdin().lock())
}

fn read_trimmed(mut reader: impl BufRead) -> Result<Option<String>> {
    let mut input = String::new();
    reader.read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}
