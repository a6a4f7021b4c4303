//! Core modules: phase programs, session controller, tick source, API

pub mod breathing;
pub mod grounding;
pub mod meditation;
pub mod muscle;
pub mod program;
pub mod session;
pub mod ticker;
pub mod runner;
pub mod api;

pub use program::{is_complete_at, view_at};
pub use session::PracticeSession;
pub use ticker::Ticker;
pub use runner::SessionRunner;
pub use api::{create_router, create_router_with_state, run_server, AppState, SharedRunner};
