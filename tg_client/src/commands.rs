//! Command parsing for the plain (non-TUI) lobby client.

use std::fmt;

/// A lobby command entered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyCommand {
    /// Reload and print the tournament list.
    List,
    /// Open the Nth tournament of the last printed list (1-indexed).
    Open(usize),
    /// Join the currently open tournament.
    Join,
    /// Return to the list view.
    Back,
    /// Re-fetch whatever view is active.
    Refresh,
    /// Print the command summary.
    Help,
    /// Exit the client.
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Open command missing its list number.
    OpenMissingNumber,
    /// Invalid list number (not a positive integer).
    InvalidSelection(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenMissingNumber => {
                write!(f, "Open requires a list number (e.g., 'open 2')")
            }
            Self::InvalidSelection(value) => write!(
                f,
                "Invalid selection '{}'. Must be a positive list number (e.g., 'open 2')",
                value
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a prompt line into a [`LobbyCommand`].
///
/// # Examples
///
/// ```
/// use tg_client::commands::{parse_command, LobbyCommand};
///
/// assert!(matches!(parse_command("list"), Ok(LobbyCommand::List)));
/// assert!(matches!(parse_command("open 2"), Ok(LobbyCommand::Open(2))));
/// assert!(matches!(parse_command("join"), Ok(LobbyCommand::Join)));
/// ```
pub fn parse_command(input: &str) -> Result<LobbyCommand, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "list" | "ls" => return Ok(LobbyCommand::List),
        "join" => return Ok(LobbyCommand::Join),
        "back" | "b" => return Ok(LobbyCommand::Back),
        "refresh" | "r" => return Ok(LobbyCommand::Refresh),
        "help" | "h" => return Ok(LobbyCommand::Help),
        "quit" | "exit" | "q" => return Ok(LobbyCommand::Quit),
        _ => {}
    }

    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"open") => parse_open_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse an open command: "open N"
fn parse_open_command(parts: &[&str]) -> Result<LobbyCommand, ParseError> {
    match parts.get(1) {
        Some(value) => {
            let number = value
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidSelection(value.to_string()))?;
            if number == 0 {
                return Err(ParseError::InvalidSelection(value.to_string()));
            }
            Ok(LobbyCommand::Open(number))
        }
        None => Err(ParseError::OpenMissingNumber),
    }
}
