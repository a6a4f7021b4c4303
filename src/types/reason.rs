//! Reason codes for commands and ticks
//!
//! Nothing in the session engine fails. Commands that cannot apply are
//! absorbed as no-ops and reported with a code instead.

use serde::{Deserialize, Serialize};

/// Outcome of every command or tick handled by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Lifecycle
    // =========================================================================
    /// Session created, nothing happened yet
    R001_SESSION_OPENED,
    /// Timer started (or resumed)
    R001_STARTED,
    /// Start while already running
    R001_START_IGNORED_RUNNING,
    /// Start after completion, only reset leaves COMPLETED
    R001_START_IGNORED_COMPLETED,

    // =========================================================================
    // R002: Pause / reset
    // =========================================================================
    /// Timer paused, elapsed time kept
    R002_PAUSED,
    /// Pause while not running
    R002_PAUSE_IGNORED,
    /// Back to IDLE with timer at zero
    R002_RESET,

    // =========================================================================
    // R003: Ticks
    // =========================================================================
    /// Elapsed time advanced by one second
    R003_TICK_APPLIED,
    /// Tick arrived while the timer was stopped
    R003_TICK_DISCARDED_INACTIVE,
    /// Tick arrived after completion
    R003_TICK_DISCARDED_COMPLETED,
    /// Tick scheduled under an earlier run
    R003_TICK_DISCARDED_STALE,

    // =========================================================================
    // R004: Completion
    // =========================================================================
    /// Completion latched
    R004_COMPLETED,

    // =========================================================================
    // R005: Grounding steps
    // =========================================================================
    /// Moved to the next step
    R005_STEP_ADVANCED,
    /// Moved to the previous step
    R005_STEP_RETREATED,
    /// Retreat at the first step
    R005_STEP_AT_FIRST,
    /// Advance/retreat on a completed session
    R005_STEP_IGNORED_COMPLETED,
    /// Advance/retreat on a timer-driven practice
    R005_STEP_NOT_USER_PACED,

    // =========================================================================
    // R006: Settings
    // =========================================================================
    /// Sound toggle flipped
    R006_SOUND_TOGGLED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_SESSION_OPENED => "R001_SESSION_OPENED",
            Self::R001_STARTED => "R001_STARTED",
            Self::R001_START_IGNORED_RUNNING => "R001_START_IGNORED_RUNNING",
            Self::R001_START_IGNORED_COMPLETED => "R001_START_IGNORED_COMPLETED",
            Self::R002_PAUSED => "R002_PAUSED",
            Self::R002_PAUSE_IGNORED => "R002_PAUSE_IGNORED",
            Self::R002_RESET => "R002_RESET",
            Self::R003_TICK_APPLIED => "R003_TICK_APPLIED",
            Self::R003_TICK_DISCARDED_INACTIVE => "R003_TICK_DISCARDED_INACTIVE",
            Self::R003_TICK_DISCARDED_COMPLETED => "R003_TICK_DISCARDED_COMPLETED",
            Self::R003_TICK_DISCARDED_STALE => "R003_TICK_DISCARDED_STALE",
            Self::R004_COMPLETED => "R004_COMPLETED",
            Self::R005_STEP_ADVANCED => "R005_STEP_ADVANCED",
            Self::R005_STEP_RETREATED => "R005_STEP_RETREATED",
            Self::R005_STEP_AT_FIRST => "R005_STEP_AT_FIRST",
            Self::R005_STEP_IGNORED_COMPLETED => "R005_STEP_IGNORED_COMPLETED",
            Self::R005_STEP_NOT_USER_PACED => "R005_STEP_NOT_USER_PACED",
            Self::R006_SOUND_TOGGLED => "R006_SOUND_TOGGLED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_SESSION_OPENED => "Session opened",
            Self::R001_STARTED => "Timer running",
            Self::R001_START_IGNORED_RUNNING => "Already running",
            Self::R001_START_IGNORED_COMPLETED => "Practice complete - reset to start again",
            Self::R002_PAUSED => "Paused",
            Self::R002_PAUSE_IGNORED => "Not running",
            Self::R002_RESET => "Reset",
            Self::R003_TICK_APPLIED => "One second elapsed",
            Self::R003_TICK_DISCARDED_INACTIVE => "Tick ignored while stopped",
            Self::R003_TICK_DISCARDED_COMPLETED => "Tick ignored after completion",
            Self::R003_TICK_DISCARDED_STALE => "Tick from an earlier run ignored",
            Self::R004_COMPLETED => "Practice complete",
            Self::R005_STEP_ADVANCED => "Next step",
            Self::R005_STEP_RETREATED => "Previous step",
            Self::R005_STEP_AT_FIRST => "Already at the first step",
            Self::R005_STEP_IGNORED_COMPLETED => "Practice complete - reset to start again",
            Self::R005_STEP_NOT_USER_PACED => "Steps follow the timer for this practice",
            Self::R006_SOUND_TOGGLED => "Sound toggled",
        }
    }

    /// Whether the event changed the session
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            Self::R001_STARTED
                | Self::R002_PAUSED
                | Self::R002_RESET
                | Self::R003_TICK_APPLIED
                | Self::R004_COMPLETED
                | Self::R005_STEP_ADVANCED
                | Self::R005_STEP_RETREATED
                | Self::R006_SOUND_TOGGLED
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
