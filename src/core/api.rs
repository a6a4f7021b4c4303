//! HTTP + WebSocket API for practice sessions
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /practices - Practice catalog
//! - POST /session/new - Open a session (IDLE)
//! - GET /session/:id - Current display snapshot
//! - POST /session/:id/:command - start | pause | reset | advance | retreat | sound
//! - DELETE /session/:id - Close a session, stopping its timer
//! - WS /ws/:id - Live updates

use axum::{
    extract::{
        ws::Message,
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

use crate::config::PracticeConfig;
use crate::core::{PracticeSession, SessionRunner};
use crate::types::{CatalogEntry, Command, DisplaySnapshot, PracticeType, ReasonCode, SessionEvent};
use crate::Error;

/// One session's runner, locked independently of the session map
pub type SharedRunner = Arc<Mutex<SessionRunner>>;

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, SharedRunner>>,
    pub config: PracticeConfig,
    next_id: AtomicU64,
}

impl AppState {
    pub fn new(config: PracticeConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            next_id: AtomicU64::new(1),
        }
    }

    fn generate_session_id(&self) -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let seq = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("session_{:x}_{}", nanos, seq)
    }

    /// Clone the runner handle out; the map lock is released on return
    pub async fn runner(&self, id: &str) -> Result<SharedRunner, Error> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }
}

/// Create new session request
#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    /// breathing | meditation | muscle-relaxation | grounding
    pub practice_type: String,
    pub sound_enabled: Option<bool>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub snapshot: DisplaySnapshot,
}

/// Command response
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub session_id: String,
    pub command: Command,
    pub reason: ReasonCode,
    pub applied: bool,
    pub snapshot: DisplaySnapshot,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Error::UnknownPractice(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router
pub fn create_router(config: PracticeConfig) -> Router {
    create_router_with_state(Arc::new(AppState::new(config)))
}

pub fn create_router_with_state(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/practices", get(list_practices))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(close_session))
        .route("/session/:id/:command", post(session_command))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

async fn list_practices() -> Json<Vec<CatalogEntry>> {
    Json(PracticeType::catalog())
}

/// Open a session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, Error> {
    let practice: PracticeType = req.practice_type.parse()?;
    let sound_enabled = req.sound_enabled.unwrap_or(state.config.sound_enabled);
    let session_id = state.generate_session_id();

    let runner = SessionRunner::with_options(
        session_id.clone(),
        PracticeSession::with_sound(practice, sound_enabled),
        state.config.tick_interval(),
        state.config.event_buffer,
    );
    let snapshot = runner.snapshot().await;

    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), Arc::new(Mutex::new(runner)));
    tracing::info!(session_id = %session_id, practice = %practice, "session created");

    Ok(Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
        snapshot,
    }))
}

/// Get current snapshot
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DisplaySnapshot>, Error> {
    let runner = state.runner(&id).await?;
    let snapshot = runner.lock().await.snapshot().await;
    Ok(Json(snapshot))
}

/// Apply a command to a session
async fn session_command(
    State(state): State<Arc<AppState>>,
    Path((id, command)): Path<(String, String)>,
) -> Result<Json<CommandResponse>, Response> {
    let command: Command = command.parse().map_err(|message: String| {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
    })?;

    let runner = state.runner(&id).await.map_err(IntoResponse::into_response)?;
    let (reason, snapshot) = runner.lock().await.command(command).await;

    Ok(Json(CommandResponse {
        session_id: id,
        command,
        reason,
        applied: reason.is_applied(),
        snapshot,
    }))
}

/// Close a session (modal closed)
async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    let runner = state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or(Error::SessionNotFound(id.clone()))?;
    runner.lock().await.close();
    tracing::info!(session_id = %id, "session removed");
    Ok(StatusCode::NO_CONTENT)
}

/// WebSocket handler for live updates
///
/// The session is looked up before the upgrade is checked, so an unknown id
/// is a 404 whether or not the request could be upgraded.
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: Option<WebSocketUpgrade>,
) -> Response {
    let runner = match state.runner(&id).await {
        Ok(runner) => runner,
        Err(e) => return e.into_response(),
    };
    let Some(ws) = ws else {
        let body = ErrorResponse {
            error: "websocket upgrade required".to_string(),
        };
        return (StatusCode::UPGRADE_REQUIRED, Json(body)).into_response();
    };

    let (rx, initial) = {
        let runner = runner.lock().await;
        (runner.subscribe(), runner.snapshot().await)
    };

    ws.on_upgrade(move |socket| async move {
        let (mut sender, mut receiver) = socket.split();
        forward_events(&mut sender, &mut receiver, initial, rx).await;
    })
}

/// Send the initial snapshot, then forward session events until the client
/// leaves or the session closes
async fn forward_events<S, R>(
    sender: &mut S,
    receiver: &mut R,
    initial: DisplaySnapshot,
    mut rx: broadcast::Receiver<SessionEvent>,
) where
    S: Sink<Message, Error = axum::Error> + Unpin,
    R: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    let first = SessionEvent::Snapshot { snapshot: initial };
    if send_event(sender, &first).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    if send_event(sender, &event).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "websocket subscriber lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }
}

async fn send_event<S>(sender: &mut S, event: &SessionEvent) -> Result<(), axum::Error>
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(event).unwrap_or_default();
    sender.send(Message::Text(json)).await
}

/// Run the API server
pub async fn run_server(config: PracticeConfig) -> crate::Result<()> {
    let addr = config.addr.clone();
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    tracing::info!(%addr, "practice API listening");
    println!("Practice API running on {}", addr);
    println!("  GET    /health                 - Health check");
    println!("  GET    /practices              - Practice catalog");
    println!("  POST   /session/new            - Open session");
    println!("  GET    /session/:id            - Current snapshot");
    println!("  POST   /session/:id/:command   - start|pause|reset|advance|retreat|sound");
    println!("  DELETE /session/:id            - Close session");
    println!("  WS     /ws/:id                 - Live updates");
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::sink::SinkMapErr;
    use futures_util::stream;
    use std::convert::Infallible;

    type Collected = SinkMapErr<Vec<Message>, fn(Infallible) -> axum::Error>;

    fn never(e: Infallible) -> axum::Error {
        match e {}
    }

    fn collecting_sink() -> Collected {
        Vec::new().sink_map_err(never as fn(Infallible) -> axum::Error)
    }

    fn sent_events(sink: &Collected) -> Vec<SessionEvent> {
        sink.get_ref()
            .iter()
            .map(|message| match message {
                Message::Text(text) => serde_json::from_str(text).unwrap(),
                other => panic!("expected text frame, got {:?}", other),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_forwards_initial_snapshot_then_events_until_closed() {
        let mut runner = SessionRunner::new("ws", PracticeType::Grounding);
        let rx = runner.subscribe();
        let initial = runner.snapshot().await;
        runner.advance().await;
        runner.command(Command::ToggleSound).await;
        // last sender gone: buffered events drain, then the stream ends
        drop(runner);

        let mut sink = collecting_sink();
        let mut incoming = stream::pending::<Result<Message, axum::Error>>();
        forward_events(&mut sink, &mut incoming, initial, rx).await;

        let events = sent_events(&sink);
        assert_eq!(events.len(), 3);
        let SessionEvent::Snapshot { snapshot } = &events[0] else {
            panic!("expected initial snapshot");
        };
        assert_eq!(snapshot.reason, ReasonCode::R001_SESSION_OPENED);
        let SessionEvent::Snapshot { snapshot } = &events[1] else {
            panic!("expected snapshot after advance");
        };
        assert_eq!(snapshot.position, "Step 2 of 5");
        let SessionEvent::Snapshot { snapshot } = &events[2] else {
            panic!("expected snapshot after sound toggle");
        };
        assert!(!snapshot.sound_enabled);
    }

    #[tokio::test]
    async fn test_client_close_stops_forwarding() {
        let runner = SessionRunner::new("ws", PracticeType::Meditation);
        let rx = runner.subscribe();
        let initial = runner.snapshot().await;

        let mut sink = collecting_sink();
        let mut incoming = stream::iter(vec![Ok(Message::Close(None))]);
        forward_events(&mut sink, &mut incoming, initial, rx).await;

        assert_eq!(sent_events(&sink).len(), 1);
        // runner still alive; only the client left
        assert!(!runner.is_ticking());
    }
}
