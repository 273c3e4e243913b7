//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on.

use crate::board::Action;

/// A parsed presentation-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game from the current options.
    NewGame,

    /// Replace the live board with one given in board notation.
    Position { notation: String },

    /// Select the node at (`x`, `y`) on `level`.
    Select { x: u32, y: u32, level: u8 },

    /// Apply an action to the selection (or undo).
    Action(Action),

    /// Let the current automated player move.
    Go,

    /// Print the flattened board and its notation.
    Board,

    /// Print the status line, turn counter, and player scores.
    Status,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "go" => Some(Command::Go),
        "board" => Some(Command::Board),
        "status" => Some(Command::Status),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "select" => parse_select(&tokens),
        "action" => parse_action(&tokens),

        other => {
            log::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        log::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                log::warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <notation>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        log::warn!("malformed position: expected 'position <notation>'");
        return None;
    }
    Some(Command::Position {
        notation: tokens[1].to_string(),
    })
}

/// Parses `select <x> <y> <level>`.
fn parse_select(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        log::warn!("malformed select: expected 'select <x> <y> <level>'");
        return None;
    }
    match (tokens[1].parse(), tokens[2].parse(), tokens[3].parse()) {
        (Ok(x), Ok(y), Ok(level)) => Some(Command::Select { x, y, level }),
        _ => {
            log::warn!("invalid select arguments: '{}'", tokens[1..].join(" "));
            None
        }
    }
}

/// Parses `action <name>`.
fn parse_action(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        log::warn!("malformed action: expected 'action <name>'");
        return None;
    }
    match tokens[1].parse::<Action>() {
        Ok(action) => Some(Command::Action(action)),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("go"), Some(Command::Go));
        assert_eq!(parse_command("board"), Some(Command::Board));
        assert_eq!(parse_command("status"), Some(Command::Status));
        assert_eq!(parse_command("  quit  "), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name MaxDepth value 4"),
            Some(Command::SetOption {
                name: "MaxDepth".to_string(),
                value: Some("4".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        assert_eq!(
            parse_command("setoption name Seed"),
            Some(Command::SetOption {
                name: "Seed".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption foo"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_position_notation() {
        assert_eq!(
            parse_command("position (rp(prod)d)"),
            Some(Command::Position {
                notation: "(rp(prod)d)".to_string(),
            })
        );
        assert_eq!(parse_command("position"), None);
    }

    #[test]
    fn parse_select_coordinates() {
        assert_eq!(
            parse_command("select 100 250 2"),
            Some(Command::Select {
                x: 100,
                y: 250,
                level: 2,
            })
        );
        assert_eq!(parse_command("select 1 2"), None);
        assert_eq!(parse_command("select a 2 1"), None);
        assert_eq!(parse_command("select -1 2 1"), None);
    }

    #[test]
    fn parse_action_names() {
        for action in Action::ALL {
            let line = format!("action {}", action);
            assert_eq!(parse_command(&line), Some(Command::Action(action)));
        }
        assert_eq!(parse_command("action fly"), None);
        assert_eq!(parse_command("action"), None);
    }
}
