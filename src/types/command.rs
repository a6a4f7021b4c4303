//! User commands accepted by a session

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Pause,
    Reset,
    /// Grounding only
    Advance,
    /// Grounding only
    Retreat,
    #[serde(rename = "sound")]
    ToggleSound,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Reset => "reset",
            Command::Advance => "advance",
            Command::Retreat => "retreat",
            Command::ToggleSound => "sound",
        }
    }
}

impl FromStr for Command {
    type Err = String;

    /// Accepts the API path names plus the terminal shorthands
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "resume" | "s" => Ok(Command::Start),
            "pause" | "p" => Ok(Command::Pause),
            "reset" | "restart" | "r" => Ok(Command::Reset),
            "advance" | "next" | "n" => Ok(Command::Advance),
            "retreat" | "prev" | "previous" | "b" => Ok(Command::Retreat),
            "sound" | "toggle_sound" | "mute" => Ok(Command::ToggleSound),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
