//! Meditation program: five-minute countdown with a tip that rotates every minute

use crate::types::MeditationView;
use crate::{MEDITATION_TIP_SECS, MEDITATION_TOTAL_SECS};

/// Tips in display order
pub const TIPS: [&str; 5] = [
    "Focus on your breath flowing in and out",
    "Notice any thoughts without judgment",
    "Gently return your attention to breathing",
    "Feel the present moment with kindness",
    "Let go of tension with each exhale",
];

pub fn compute(elapsed: u32) -> MeditationView {
    let tip_index = tip_index(elapsed);
    MeditationView {
        remaining_secs: MEDITATION_TOTAL_SECS.saturating_sub(elapsed),
        tip_index,
        tip: TIPS[tip_index].to_string(),
        overall_progress: (elapsed as f64 / MEDITATION_TOTAL_SECS as f64 * 100.0).min(100.0),
    }
}

/// `floor(elapsed / 60) mod tips`
pub fn tip_index(elapsed: u32) -> usize {
    (elapsed / MEDITATION_TIP_SECS) as usize % TIPS.len()
}

pub fn is_complete(elapsed: u32) -> bool {
    elapsed >= MEDITATION_TOTAL_SECS
}
