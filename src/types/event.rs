//! Events published by a running session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DisplaySnapshot, PracticeType};

/// Emitted once each time a session latches completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub practice: PracticeType,
    pub elapsed_seconds: u32,
    pub completed_at: DateTime<Utc>,
}

/// Live update for subscribers (terminal, WebSocket)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Display state after a tick or command
    Snapshot { snapshot: DisplaySnapshot },
    /// Completion latched
    Completed { record: CompletionRecord },
}
