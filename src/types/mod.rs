//! Core types for the practice engine

mod command;
mod event;
mod output;
mod practice;
mod reason;
mod state;
mod view;

pub use command::Command;
pub use event::{CompletionRecord, SessionEvent};
pub use output::{primary_action, DisplaySnapshot};
pub use practice::{CatalogEntry, PracticeType};
pub use reason::ReasonCode;
pub use state::SessionState;
pub use view::{
    format_clock, format_time_spent, BreathPhase, BreathingView, GroundingView, MeditationView,
    MuscleRelaxationView, MuscleSubPhase, ProgramView,
};
