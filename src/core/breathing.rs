//! Breathing program: 4-7-8 technique, four cycles
//!
//! Phase windows are half-open `[start, start + duration)` within the
//! 21-second cycle:
//! - Inhale  [0, 4)
//! - Hold    [4, 11)
//! - Exhale  [11, 19)
//! - Rest    [19, 21)

use crate::types::{BreathPhase, BreathingView};
use crate::{BREATH_CYCLE_SECS, BREATH_TOTAL_CYCLES, BREATH_TOTAL_SECS};

/// Derive the breathing display state at `elapsed` seconds
pub fn compute(elapsed: u32) -> BreathingView {
    let cycle_index = elapsed / BREATH_CYCLE_SECS + 1;
    let time_in_cycle = elapsed % BREATH_CYCLE_SECS;
    let (phase, phase_start) = phase_at(time_in_cycle);
    let duration = phase.duration_secs();
    let into_phase = time_in_cycle - phase_start;

    let phase_progress = (into_phase as f64 / duration as f64 * 100.0).clamp(0.0, 100.0);

    BreathingView {
        cycle_index,
        total_cycles: BREATH_TOTAL_CYCLES,
        phase,
        time_in_cycle,
        phase_start,
        phase_progress,
        phase_seconds_remaining: duration - into_phase,
        overall_progress: overall_progress(elapsed),
    }
}

/// Walk the phase list until `time_in_cycle` falls inside a window.
/// Returns the phase and its start offset.
pub fn phase_at(time_in_cycle: u32) -> (BreathPhase, u32) {
    let time_in_cycle = time_in_cycle % BREATH_CYCLE_SECS;
    let mut start = 0;
    for phase in BreathPhase::SEQUENCE {
        if time_in_cycle < start + phase.duration_secs() {
            return (phase, start);
        }
        start += phase.duration_secs();
    }
    // unreachable for time_in_cycle < BREATH_CYCLE_SECS
    (BreathPhase::Inhale, 0)
}

/// 0-100, reaches exactly 100 at the end of the fourth cycle
pub fn overall_progress(elapsed: u32) -> f64 {
    (elapsed as f64 / BREATH_TOTAL_SECS as f64 * 100.0).min(100.0)
}

pub fn is_complete(elapsed: u32) -> bool {
    elapsed >= BREATH_TOTAL_SECS
}

// =============================================================================
// TESTS
// =============================================================================
