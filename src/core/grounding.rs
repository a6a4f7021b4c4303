//! Grounding program: 5-4-3-2-1, advanced by the user rather than the timer

use crate::types::GroundingView;
use crate::GROUNDING_STEP_COUNT;

/// (count, sense, instruction)
pub const GROUNDING_STEPS: [(u32, &str, &str); GROUNDING_STEP_COUNT] = [
    (5, "See", "Name 5 things you can see around you"),
    (4, "Touch", "Name 4 things you can touch"),
    (3, "Hear", "Name 3 things you can hear"),
    (2, "Smell", "Name 2 things you can smell"),
    (1, "Taste", "Name 1 thing you can taste"),
];

pub fn compute(step_index: usize) -> GroundingView {
    let step_index = clamp_step(step_index);
    let (count, sense, instruction) = GROUNDING_STEPS[step_index];
    let advance_label = if is_last_step(step_index) { "Complete" } else { "Next" };

    GroundingView {
        step_index,
        total_steps: GROUNDING_STEPS.len(),
        count,
        sense: sense.to_string(),
        instruction: instruction.to_string(),
        overall_progress: step_index as f64 / GROUNDING_STEPS.len() as f64 * 100.0,
        can_retreat: step_index > 0,
        advance_label: advance_label.to_string(),
    }
}

/// Bound an index to `[0, steps - 1]`
pub fn clamp_step(step_index: usize) -> usize {
    step_index.min(GROUNDING_STEPS.len() - 1)
}

pub fn is_last_step(step_index: usize) -> bool {
    step_index >= GROUNDING_STEPS.len() - 1
}
