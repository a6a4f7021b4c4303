//! Async session runner: couples a `PracticeSession` with its tick source
//!
//! The runner holds the ticker only while the session is RUNNING. Every
//! change is published on a broadcast channel as a `SessionEvent`; a
//! completion is published exactly once per latch.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};

use crate::core::{PracticeSession, Ticker};
use crate::types::{
    Command, CompletionRecord, DisplaySnapshot, PracticeType, ReasonCode, SessionEvent,
};
use crate::{DEFAULT_EVENT_BUFFER, DEFAULT_TICK_INTERVAL_MS};

#[derive(Debug)]
pub struct SessionRunner {
    id: String,
    session: Arc<Mutex<PracticeSession>>,
    /// Present only while RUNNING
    ticker: Option<Ticker>,
    events: broadcast::Sender<SessionEvent>,
    tick_interval: Duration,
}

impl SessionRunner {
    pub fn new(id: impl Into<String>, practice: PracticeType) -> Self {
        Self::with_options(
            id,
            PracticeSession::new(practice),
            Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            DEFAULT_EVENT_BUFFER,
        )
    }

    pub fn with_options(
        id: impl Into<String>,
        session: PracticeSession,
        tick_interval: Duration,
        event_buffer: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(event_buffer.max(1));
        let id = id.into();
        tracing::debug!(session_id = %id, practice = %session.practice(), "session opened");
        Self {
            id,
            session: Arc::new(Mutex::new(session)),
            ticker: None,
            events,
            tick_interval,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Live events: a snapshot after every change, plus completion
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> DisplaySnapshot {
        self.session.lock().await.snapshot().clone()
    }

    pub async fn practice(&self) -> PracticeType {
        self.session.lock().await.practice()
    }

    /// Shared handle to the controlled session
    pub fn session(&self) -> Arc<Mutex<PracticeSession>> {
        Arc::clone(&self.session)
    }

    /// Whether a tick task is currently alive
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub async fn start(&mut self) -> (ReasonCode, DisplaySnapshot) {
        self.command(Command::Start).await
    }

    pub async fn pause(&mut self) -> (ReasonCode, DisplaySnapshot) {
        self.command(Command::Pause).await
    }

    pub async fn reset(&mut self) -> (ReasonCode, DisplaySnapshot) {
        self.command(Command::Reset).await
    }

    pub async fn advance(&mut self) -> (ReasonCode, DisplaySnapshot) {
        self.command(Command::Advance).await
    }

    pub async fn retreat(&mut self) -> (ReasonCode, DisplaySnapshot) {
        self.command(Command::Retreat).await
    }

    /// Apply a command, then acquire or release the ticker to match the new state
    pub async fn command(&mut self, command: Command) -> (ReasonCode, DisplaySnapshot) {
        let (reason, snapshot, completion, running, epoch) = {
            let mut session = self.session.lock().await;
            let reason = session.apply(command);
            (
                reason,
                session.snapshot().clone(),
                session.take_completion(),
                session.is_active(),
                session.run_epoch(),
            )
        };

        if reason == ReasonCode::R001_STARTED {
            // replaces (and aborts) any ticker left from an earlier run
            self.ticker = Some(self.spawn_ticker(epoch));
        } else if !running {
            self.ticker = None;
        }

        tracing::debug!(
            session_id = %self.id,
            command = %command,
            reason = reason.code(),
            elapsed_seconds = snapshot.elapsed_seconds,
            "command handled"
        );

        publish(&self.events, snapshot.clone(), completion);
        (reason, snapshot)
    }

    fn spawn_ticker(&self, epoch: u64) -> Ticker {
        let session = Arc::clone(&self.session);
        let events = self.events.clone();
        let id = self.id.clone();

        Ticker::spawn(self.tick_interval, move || {
            let session = Arc::clone(&session);
            let events = events.clone();
            let id = id.clone();
            async move {
                let mut session = session.lock().await;
                let reason = session.tick(epoch);
                if !reason.is_applied() {
                    tracing::debug!(session_id = %id, reason = reason.code(), "ticker stopping");
                    return ControlFlow::Break(());
                }
                let snapshot = session.snapshot().clone();
                let completion = session.take_completion();
                drop(session);

                let done = completion.is_some();
                publish(&events, snapshot, completion);
                if done {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        })
    }

    /// Tear down (modal closed). The ticker is aborted before returning;
    /// subscribers see the stream end once the runner is dropped.
    pub fn close(&mut self) {
        self.ticker = None;
        tracing::debug!(session_id = %self.id, "session closed");
    }
}

fn publish(
    events: &broadcast::Sender<SessionEvent>,
    snapshot: DisplaySnapshot,
    completion: Option<CompletionRecord>,
) {
    // no subscribers is fine
    let _ = events.send(SessionEvent::Snapshot { snapshot });
    if let Some(record) = completion {
        let _ = events.send(SessionEvent::Completed { record });
    }
}

// =============================================================================
// TESTS
// =============================================================================
