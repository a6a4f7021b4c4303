//! Session state definitions

use serde::{Deserialize, Serialize};

/// The four states of a practice session
///
/// `Idle --start--> Running --pause--> Paused --start--> Running`,
/// `Running --[total elapsed]--> Completed`, and `reset` from anywhere back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// Fresh or reset, timer at zero
    Idle,
    /// Timer advancing
    Running,
    /// Timer stopped, elapsed time preserved
    Paused,
    /// Terminal until reset, timer frozen
    Completed,
}

impl SessionState {
    /// Whether the timer is advancing
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Running)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionState::Completed)
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            SessionState::Idle => "\x1b[90m",      // Gray
            SessionState::Running => "\x1b[36m",   // Cyan
            SessionState::Paused => "\x1b[33m",    // Yellow
            SessionState::Completed => "\x1b[32m", // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SessionState::Idle => "⏸",
            SessionState::Running => "▶",
            SessionState::Paused => "⏯",
            SessionState::Completed => "✅",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Idle => "IDLE",
            SessionState::Running => "RUNNING",
            SessionState::Paused => "PAUSED",
            SessionState::Completed => "COMPLETED",
        };
        write!(f, "{}", name)
    }
}
