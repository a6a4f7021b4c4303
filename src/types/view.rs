//! Per-program display views
//!
//! Each phase program turns elapsed time (or, for grounding, the step index)
//! into one of these. They carry no state of their own.

use serde::{Deserialize, Serialize};

use crate::{BREATH_EXHALE_SECS, BREATH_HOLD_SECS, BREATH_INHALE_SECS, BREATH_REST_SECS};

/// One segment of the 4-7-8 cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
    Rest,
}

impl BreathPhase {
    /// Cycle order
    pub const SEQUENCE: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::Hold,
        BreathPhase::Exhale,
        BreathPhase::Rest,
    ];

    pub fn duration_secs(&self) -> u32 {
        match self {
            BreathPhase::Inhale => BREATH_INHALE_SECS,
            BreathPhase::Hold => BREATH_HOLD_SECS,
            BreathPhase::Exhale => BREATH_EXHALE_SECS,
            BreathPhase::Rest => BREATH_REST_SECS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
            BreathPhase::Rest => "Rest",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in slowly through your nose",
            BreathPhase::Hold => "Hold your breath gently",
            BreathPhase::Exhale => "Breathe out slowly through your mouth",
            BreathPhase::Rest => "Rest and prepare for the next cycle",
        }
    }
}

impl std::fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tense / Hold / Release within one muscle group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MuscleSubPhase {
    Tense,
    Hold,
    Release,
}

impl MuscleSubPhase {
    pub fn name(&self) -> &'static str {
        match self {
            MuscleSubPhase::Tense => "Tense",
            MuscleSubPhase::Hold => "Hold",
            MuscleSubPhase::Release => "Release",
        }
    }
}

impl std::fmt::Display for MuscleSubPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingView {
    /// 1-based cycle, `floor(elapsed / cycle) + 1` (may exceed the total once complete)
    pub cycle_index: u32,
    pub total_cycles: u32,
    pub phase: BreathPhase,
    /// Seconds into the current cycle
    pub time_in_cycle: u32,
    /// Offset of the current phase within the cycle
    pub phase_start: u32,
    /// 0-100
    pub phase_progress: f64,
    pub phase_seconds_remaining: u32,
    /// 0-100
    pub overall_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeditationView {
    pub remaining_secs: u32,
    pub tip_index: usize,
    pub tip: String,
    /// 0-100
    pub overall_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleRelaxationView {
    /// 0-based, clamped to the last group
    pub group_index: usize,
    pub total_groups: usize,
    pub group_name: String,
    pub instruction: String,
    pub sub_phase: MuscleSubPhase,
    pub time_in_step: u32,
    pub step_seconds_remaining: u32,
    /// 0-100
    pub overall_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingView {
    pub step_index: usize,
    pub total_steps: usize,
    /// How many things to notice
    pub count: u32,
    pub sense: String,
    pub instruction: String,
    /// 0-100, `step_index / total_steps`
    pub overall_progress: f64,
    pub can_retreat: bool,
    /// "Complete" on the last step, "Next" otherwise
    pub advance_label: String,
}

/// Program-specific part of a display snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "program", rename_all = "kebab-case")]
pub enum ProgramView {
    Breathing(BreathingView),
    Meditation(MeditationView),
    MuscleRelaxation(MuscleRelaxationView),
    Grounding(GroundingView),
}

impl ProgramView {
    /// 0-100
    pub fn overall_progress(&self) -> f64 {
        match self {
            ProgramView::Breathing(v) => v.overall_progress,
            ProgramView::Meditation(v) => v.overall_progress,
            ProgramView::MuscleRelaxation(v) => v.overall_progress,
            ProgramView::Grounding(v) => v.overall_progress,
        }
    }

    /// Main label: phase, clock or step
    pub fn label(&self) -> String {
        match self {
            ProgramView::Breathing(v) => v.phase.name().to_string(),
            ProgramView::Meditation(v) => format_clock(v.remaining_secs),
            ProgramView::MuscleRelaxation(v) => format!("{} - {}", v.group_name, v.sub_phase),
            ProgramView::Grounding(v) => format!("{} Things You Can {}", v.count, v.sense),
        }
    }

    /// Secondary line: counter such as "Cycle 2 of 4"
    pub fn position(&self) -> String {
        match self {
            ProgramView::Breathing(v) => {
                format!("Cycle {} of {}", v.cycle_index.min(v.total_cycles), v.total_cycles)
            }
            ProgramView::Meditation(_) => "5-Minute Meditation".to_string(),
            ProgramView::MuscleRelaxation(v) => {
                format!("Group {} of {}", v.group_index + 1, v.total_groups)
            }
            ProgramView::Grounding(v) => format!("Step {} of {}", v.step_index + 1, v.total_steps),
        }
    }

    pub fn instruction(&self) -> String {
        match self {
            ProgramView::Breathing(v) => v.phase.instruction().to_string(),
            ProgramView::Meditation(v) => v.tip.clone(),
            ProgramView::MuscleRelaxation(v) => v.instruction.clone(),
            ProgramView::Grounding(v) => v.instruction.clone(),
        }
    }

    /// Human-readable time left; `None` when the user sets the pace
    pub fn time_remaining(&self) -> Option<String> {
        match self {
            ProgramView::Breathing(v) => Some(format!("{}s remaining", v.phase_seconds_remaining)),
            ProgramView::Meditation(v) => Some(format_clock(v.remaining_secs)),
            ProgramView::MuscleRelaxation(v) => Some(format!("{}s", v.step_seconds_remaining)),
            ProgramView::Grounding(_) => None,
        }
    }
}

/// `m:ss`
pub fn format_clock(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// `Xm Ys`
pub fn format_time_spent(total_secs: u32) -> String {
    format!("{}m {}s", total_secs / 60, total_secs % 60)
}
