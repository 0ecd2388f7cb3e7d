use serde_json::Value;
use std::io::{self, BufRead, Read, Write};

/// Attempt to read JSON from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive).
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed)?;
    Ok(Some(value))
}

/// Ask a yes/no question on stderr. Only an interactive terminal can answer;
/// piped stdin is treated as "no answer" and returns an error.
pub fn confirm(prompt: &str) -> Result<bool, Box<dyn std::error::Error>> {
    if !atty::is(atty::Stream::Stdin) {
        return Err("confirmation required: pass --yes when stdin is not a terminal".into());
    }

    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
