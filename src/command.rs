use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual commands accepted by `execute`, `screenshot` and test scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    NavigateUp,
    NavigateDown,
    Expand,
    Collapse,
    Toggle,
    /// Activate the row at this visible index, as a double click would
    Activate(usize),
    Load,
    Clear,

    // Multi-step commands for testing
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, String> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "navigate_up" | "up" => return Ok(Command::NavigateUp),
            "navigate_down" | "down" => return Ok(Command::NavigateDown),
            "expand" | "right" => return Ok(Command::Expand),
            "collapse" | "left" => return Ok(Command::Collapse),
            "toggle" | "enter" => return Ok(Command::Toggle),
            "load" => return Ok(Command::Load),
            "clear" => return Ok(Command::Clear),
            _ => {}
        }

        if let Some(index) = s.strip_prefix("activate:") {
            return index
                .trim()
                .parse()
                .map(Command::Activate)
                .map_err(|_| format!("Invalid row index in '{}'", s));
        }

        if let Some(inner) = s
            .strip_prefix("sequence:[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            // Parse sequence: sequence:[cmd1,cmd2,cmd3]
            if inner.trim().is_empty() {
                return Ok(Command::Sequence(vec![]));
            }

            let mut commands = Vec::new();
            for cmd_str in inner.split(',') {
                match Command::from_string(cmd_str) {
                    Ok(cmd) => commands.push(cmd),
                    Err(e) => {
                        return Err(format!("Invalid command in sequence '{}': {}", cmd_str.trim(), e))
                    }
                }
            }
            return Ok(Command::Sequence(commands));
        }

        Err(format!("Unknown command: {}", s))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NavigateUp => write!(f, "navigate_up"),
            Command::NavigateDown => write!(f, "navigate_down"),
            Command::Expand => write!(f, "expand"),
            Command::Collapse => write!(f, "collapse"),
            Command::Toggle => write!(f, "toggle"),
            Command::Activate(index) => write!(f, "activate:{}", index),
            Command::Load => write!(f, "load"),
            Command::Clear => write!(f, "clear"),
            Command::Sequence(commands) => {
                let inner = commands
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "sequence:[{}]", inner)
            }
        }
    }
}
