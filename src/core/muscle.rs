//! Progressive muscle relaxation: nine groups, feet to face, 15 seconds each.
//! Every step splits into Tense [0,5), Hold [5,10), Release [10,15).

use crate::types::{MuscleRelaxationView, MuscleSubPhase};
use crate::{MUSCLE_GROUP_COUNT, MUSCLE_STEP_SECS, MUSCLE_SUBPHASE_SECS, MUSCLE_TOTAL_SECS};

/// (name, instruction), in order
pub const MUSCLE_GROUPS: [(&str, &str); MUSCLE_GROUP_COUNT as usize] = [
    ("Feet & Toes", "Curl your toes tightly, hold for 5 seconds, then release"),
    ("Calves", "Point your toes upward, tense your calves, hold, then relax"),
    ("Thighs", "Squeeze your thighs together, hold the tension, then release"),
    ("Abdomen", "Pull your belly button toward your spine, hold, then relax"),
    ("Hands", "Make tight fists, hold for 5 seconds, then open and relax"),
    ("Arms", "Tense your entire arms, hold, then let them go limp"),
    ("Shoulders", "Raise shoulders to ears, hold the tension, then drop them"),
    ("Neck", "Gently tilt your head back, hold, then return to center"),
    ("Face", "Scrunch your face tight, hold, then relax all facial muscles"),
];

pub fn compute(elapsed: u32) -> MuscleRelaxationView {
    let group_index = step_index(elapsed).min(MUSCLE_GROUPS.len() - 1);
    let time_in_step = elapsed % MUSCLE_STEP_SECS;
    let (name, instruction) = MUSCLE_GROUPS[group_index];

    MuscleRelaxationView {
        group_index,
        total_groups: MUSCLE_GROUPS.len(),
        group_name: name.to_string(),
        instruction: instruction.to_string(),
        sub_phase: sub_phase_at(time_in_step),
        time_in_step,
        step_seconds_remaining: MUSCLE_STEP_SECS - time_in_step,
        overall_progress: (elapsed as f64 / MUSCLE_TOTAL_SECS as f64 * 100.0).min(100.0),
    }
}

/// Unclamped `floor(elapsed / 15)`
pub fn step_index(elapsed: u32) -> usize {
    (elapsed / MUSCLE_STEP_SECS) as usize
}

pub fn sub_phase_at(time_in_step: u32) -> MuscleSubPhase {
    match time_in_step % MUSCLE_STEP_SECS / MUSCLE_SUBPHASE_SECS {
        0 => MuscleSubPhase::Tense,
        1 => MuscleSubPhase::Hold,
        _ => MuscleSubPhase::Release,
    }
}

/// Complete once time has moved past the last group's window
pub fn is_complete(elapsed: u32) -> bool {
    step_index(elapsed) >= MUSCLE_GROUPS.len()
}
