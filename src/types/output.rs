//! Display snapshot: everything the caller needs to draw a session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{format_time_spent, PracticeType, ProgramView, ReasonCode, SessionState};

/// Derived display state, recomputed after every tick or command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub timestamp: DateTime<Utc>,
    pub practice: PracticeType,
    pub heading: String,
    pub state: SessionState,
    pub elapsed_seconds: u32,
    /// Current phase / clock / step
    pub label: String,
    /// "Cycle 2 of 4", "Group 4 of 9", "Step 1 of 5"
    pub position: String,
    pub instruction: String,
    /// `None` for user-paced practices
    pub time_remaining: Option<String>,
    /// 0-100
    pub overall_progress: f64,
    pub completed: bool,
    /// "Xm Ys"
    pub time_spent: String,
    pub sound_enabled: bool,
    /// Label of the primary timer control
    pub primary_action: String,
    /// What the last tick or command did
    pub reason: ReasonCode,
    pub view: ProgramView,
}

impl DisplaySnapshot {
    pub fn new(
        practice: PracticeType,
        state: SessionState,
        elapsed_seconds: u32,
        sound_enabled: bool,
        reason: ReasonCode,
        view: ProgramView,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            practice,
            heading: practice.heading().to_string(),
            state,
            elapsed_seconds,
            label: view.label(),
            position: view.position(),
            instruction: view.instruction(),
            time_remaining: view.time_remaining(),
            overall_progress: view.overall_progress(),
            completed: state.is_completed(),
            time_spent: format_time_spent(elapsed_seconds),
            sound_enabled,
            primary_action: primary_action(state, elapsed_seconds).to_string(),
            reason,
            view,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = SessionState::color_reset();
        let emoji = self.state.emoji();

        if self.completed {
            return format!(
                "{}{} Practice Complete! {} | Time spent: {}{}",
                color, emoji, self.heading, self.time_spent, reset
            );
        }

        format!(
            "{}{} {} | {} | {} | {:.0}% | {}{}",
            color,
            emoji,
            self.position,
            self.label,
            self.time_remaining.as_deref().unwrap_or("your pace"),
            self.overall_progress,
            self.instruction,
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "practice={} | state={} | elapsed={}s | label={} | remaining={} | progress={:.1} | reason={}",
            self.practice,
            self.state,
            self.elapsed_seconds,
            self.label,
            self.time_remaining.as_deref().unwrap_or("-"),
            self.overall_progress,
            self.reason.code()
        )
    }
}

/// "Pause" while running, "Resume" once time has passed, otherwise "Start"
pub fn primary_action(state: SessionState, elapsed_seconds: u32) -> &'static str {
    match state {
        SessionState::Running => "Pause",
        SessionState::Completed => "Practice Again",
        SessionState::Idle | SessionState::Paused if elapsed_seconds > 0 => "Resume",
        SessionState::Idle | SessionState::Paused => "Start",
    }
}
