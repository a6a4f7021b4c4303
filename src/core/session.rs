//! Practice session controller
//!
//! State transitions:
//! - IDLE → RUNNING: start
//! - RUNNING → PAUSED: pause (elapsed kept)
//! - PAUSED → RUNNING: start (continues from the kept elapsed time)
//! - RUNNING → COMPLETED: elapsed reaches the program's total (timed programs)
//! - any → COMPLETED: advance on the last grounding step
//! - any → IDLE: reset
//!
//! The session is the only owner of elapsed time, state, and step index.
//! Programs only read them. Ticks are checked against the current state and
//! run epoch when they are handled, so a tick queued before a pause or reset
//! is dropped.

use chrono::Utc;

use crate::core::{grounding, program};
use crate::types::{
    Command, CompletionRecord, DisplaySnapshot, PracticeType, ProgramView, ReasonCode,
    SessionState,
};

/// One guided practice, from modal open to modal close
#[derive(Debug)]
pub struct PracticeSession {
    /// Fixed for the session's lifetime
    practice: PracticeType,
    state: SessionState,
    elapsed_seconds: u32,
    /// Grounding only
    current_step_index: usize,
    /// Bumped on every transition into RUNNING and on reset
    run_epoch: u64,
    sound_enabled: bool,
    snapshot: DisplaySnapshot,
    /// Set by the completion latch, drained by the caller
    pending_completion: Option<CompletionRecord>,
    update_count: u64,
}

impl PracticeSession {
    /// Create new session in IDLE
    pub fn new(practice: PracticeType) -> Self {
        Self::with_sound(practice, true)
    }

    pub fn with_sound(practice: PracticeType, sound_enabled: bool) -> Self {
        let view = program::view_at(practice, 0, 0);
        Self {
            practice,
            state: SessionState::Idle,
            elapsed_seconds: 0,
            current_step_index: 0,
            run_epoch: 0,
            sound_enabled,
            snapshot: DisplaySnapshot::new(
                practice,
                SessionState::Idle,
                0,
                sound_enabled,
                ReasonCode::R001_SESSION_OPENED,
                view,
            ),
            pending_completion: None,
            update_count: 0,
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Dispatch a user command
    pub fn apply(&mut self, command: Command) -> ReasonCode {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
            Command::Advance => self.advance(),
            Command::Retreat => self.retreat(),
            Command::ToggleSound => self.toggle_sound(),
        }
    }

    /// Start or resume the timer. Ignored when running or completed.
    pub fn start(&mut self) -> ReasonCode {
        let reason = match self.state {
            SessionState::Completed => ReasonCode::R001_START_IGNORED_COMPLETED,
            SessionState::Running => ReasonCode::R001_START_IGNORED_RUNNING,
            SessionState::Idle | SessionState::Paused => {
                self.state = SessionState::Running;
                self.run_epoch += 1;
                ReasonCode::R001_STARTED
            }
        };
        self.refresh(reason)
    }

    /// Stop the timer, keeping elapsed time
    pub fn pause(&mut self) -> ReasonCode {
        let reason = if self.state == SessionState::Running {
            self.state = SessionState::Paused;
            ReasonCode::R002_PAUSED
        } else {
            ReasonCode::R002_PAUSE_IGNORED
        };
        self.refresh(reason)
    }

    /// Back to IDLE: timer zeroed, completion cleared, step rewound
    pub fn reset(&mut self) -> ReasonCode {
        self.state = SessionState::Idle;
        self.elapsed_seconds = 0;
        self.current_step_index = 0;
        self.run_epoch += 1;
        self.pending_completion = None;
        self.refresh(ReasonCode::R002_RESET)
    }

    /// Next grounding step; completes the practice on the last one
    pub fn advance(&mut self) -> ReasonCode {
        if let Some(reason) = self.reject_step_command() {
            return self.refresh(reason);
        }
        let reason = if grounding::is_last_step(self.current_step_index) {
            self.latch_completion()
        } else {
            self.current_step_index += 1;
            ReasonCode::R005_STEP_ADVANCED
        };
        self.refresh(reason)
    }

    /// Previous grounding step; no-op on the first one
    pub fn retreat(&mut self) -> ReasonCode {
        if let Some(reason) = self.reject_step_command() {
            return self.refresh(reason);
        }
        let reason = if self.current_step_index > 0 {
            self.current_step_index -= 1;
            ReasonCode::R005_STEP_RETREATED
        } else {
            ReasonCode::R005_STEP_AT_FIRST
        };
        self.refresh(reason)
    }

    pub fn toggle_sound(&mut self) -> ReasonCode {
        self.sound_enabled = !self.sound_enabled;
        self.refresh(ReasonCode::R006_SOUND_TOGGLED)
    }

    // =========================================================================
    // Ticks
    // =========================================================================

    /// Advance elapsed time by one second.
    ///
    /// `epoch` is the run epoch the tick was scheduled under; ticks from an
    /// earlier run, or arriving while stopped or completed, are discarded.
    pub fn tick(&mut self, epoch: u64) -> ReasonCode {
        let reason = if self.state == SessionState::Completed {
            ReasonCode::R003_TICK_DISCARDED_COMPLETED
        } else if self.state != SessionState::Running {
            ReasonCode::R003_TICK_DISCARDED_INACTIVE
        } else if epoch != self.run_epoch {
            ReasonCode::R003_TICK_DISCARDED_STALE
        } else {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
            if program::is_complete_at(self.practice, self.elapsed_seconds) {
                self.latch_completion()
            } else {
                ReasonCode::R003_TICK_APPLIED
            }
        };

        if !reason.is_applied() {
            tracing::debug!(
                practice = %self.practice,
                epoch,
                current_epoch = self.run_epoch,
                reason = reason.code(),
                "tick discarded"
            );
            return reason;
        }
        self.refresh(reason)
    }

    /// One-way COMPLETED latch. Re-latching is a no-op.
    fn latch_completion(&mut self) -> ReasonCode {
        if self.state == SessionState::Completed {
            return ReasonCode::R003_TICK_DISCARDED_COMPLETED;
        }
        self.state = SessionState::Completed;
        self.pending_completion = Some(CompletionRecord {
            practice: self.practice,
            elapsed_seconds: self.elapsed_seconds,
            completed_at: Utc::now(),
        });
        tracing::info!(
            practice = %self.practice,
            elapsed_seconds = self.elapsed_seconds,
            "practice completed"
        );
        ReasonCode::R004_COMPLETED
    }

    fn reject_step_command(&self) -> Option<ReasonCode> {
        if self.practice.is_timer_driven() {
            Some(ReasonCode::R005_STEP_NOT_USER_PACED)
        } else if self.state == SessionState::Completed {
            Some(ReasonCode::R005_STEP_IGNORED_COMPLETED)
        } else {
            None
        }
    }

    /// Recompute the display snapshot for the current state
    fn refresh(&mut self, reason: ReasonCode) -> ReasonCode {
        if reason.is_applied() {
            self.update_count += 1;
        }
        self.snapshot = DisplaySnapshot::new(
            self.practice,
            self.state,
            self.elapsed_seconds,
            self.sound_enabled,
            reason,
            self.view(),
        );
        reason
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn practice(&self) -> PracticeType {
        self.practice
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    /// Whether the timer is advancing
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Epoch that ticks must carry to be applied
    pub fn run_epoch(&self) -> u64 {
        self.run_epoch
    }

    /// Number of ticks and commands that changed the session
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Snapshot computed by the last tick or command
    pub fn snapshot(&self) -> &DisplaySnapshot {
        &self.snapshot
    }

    /// Program view for the current state, computed fresh
    pub fn view(&self) -> ProgramView {
        program::view_at(self.practice, self.elapsed_seconds, self.current_step_index)
    }

    /// Take the completion record, if completion was latched since the last call
    pub fn take_completion(&mut self) -> Option<CompletionRecord> {
        self.pending_completion.take()
    }
}

// =============================================================================
// TESTS
// =============================================================================
