//! Practice engine: timer-driven guided practice sessions
//!
//! Four phase programs (4-7-8 breathing, 5-minute meditation, progressive
//! muscle relaxation, 5-4-3-2-1 grounding) map elapsed seconds to a display
//! state. A session controller owns the timer, dispatches ticks and latches
//! completion exactly once per run.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{Error, Result};

// =============================================================================
// BREATHING (4-7-8)
// =============================================================================

/// Inhale phase length (seconds)
pub const BREATH_INHALE_SECS: u32 = 4;

/// Hold phase length (seconds)
pub const BREATH_HOLD_SECS: u32 = 7;

/// Exhale phase length (seconds)
pub const BREATH_EXHALE_SECS: u32 = 8;

/// Rest phase length (seconds)
pub const BREATH_REST_SECS: u32 = 2;

/// One full inhale/hold/exhale/rest cycle (seconds)
pub const BREATH_CYCLE_SECS: u32 =
    BREATH_INHALE_SECS + BREATH_HOLD_SECS + BREATH_EXHALE_SECS + BREATH_REST_SECS;

/// Cycles per breathing session
pub const BREATH_TOTAL_CYCLES: u32 = 4;

/// Breathing session length: 84 seconds
pub const BREATH_TOTAL_SECS: u32 = BREATH_CYCLE_SECS * BREATH_TOTAL_CYCLES;

// =============================================================================
// MEDITATION
// =============================================================================

/// Meditation session length: 5 minutes
pub const MEDITATION_TOTAL_SECS: u32 = 300;

/// How long each meditation tip stays on screen
pub const MEDITATION_TIP_SECS: u32 = 60;

// =============================================================================
// PROGRESSIVE MUSCLE RELAXATION
// =============================================================================

/// Time spent on each muscle group
pub const MUSCLE_STEP_SECS: u32 = 15;

/// Tense / Hold / Release each take a third of the step
pub const MUSCLE_SUBPHASE_SECS: u32 = 5;

/// Number of muscle groups, feet to face
pub const MUSCLE_GROUP_COUNT: u32 = 9;

/// Muscle relaxation session length: 135 seconds
pub const MUSCLE_TOTAL_SECS: u32 = MUSCLE_STEP_SECS * MUSCLE_GROUP_COUNT;

// =============================================================================
// GROUNDING (5-4-3-2-1)
// =============================================================================

/// Grounding steps (See, Touch, Hear, Smell, Taste)
pub const GROUNDING_STEP_COUNT: usize = 5;

// =============================================================================
// RUNTIME
// =============================================================================

/// Default tick period (milliseconds)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Default capacity of each session's event channel
pub const DEFAULT_EVENT_BUFFER: usize = 100;

pub const VERSION: &str = "1.0.0";
