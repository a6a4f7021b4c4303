//! Dispatch from a practice type to its phase program
//!
//! Every program is a pure function of elapsed seconds (grounding: of the
//! step index). The controller owns all state and calls in here once per
//! tick or command.

use crate::core::{breathing, grounding, meditation, muscle};
use crate::types::{PracticeType, ProgramView};

/// Display view for `practice` at the given elapsed time and step
pub fn view_at(practice: PracticeType, elapsed: u32, step_index: usize) -> ProgramView {
    match practice {
        PracticeType::Breathing => ProgramView::Breathing(breathing::compute(elapsed)),
        PracticeType::Meditation => ProgramView::Meditation(meditation::compute(elapsed)),
        PracticeType::MuscleRelaxation => ProgramView::MuscleRelaxation(muscle::compute(elapsed)),
        PracticeType::Grounding => ProgramView::Grounding(grounding::compute(step_index)),
    }
}

/// Whether elapsed time alone completes the practice (never for grounding)
pub fn is_complete_at(practice: PracticeType, elapsed: u32) -> bool {
    match practice {
        PracticeType::Breathing => breathing::is_complete(elapsed),
        PracticeType::Meditation => meditation::is_complete(elapsed),
        PracticeType::MuscleRelaxation => muscle::is_complete(elapsed),
        PracticeType::Grounding => false,
    }
}
