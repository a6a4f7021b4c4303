//! Integration tests for the async runner
//!
//! All timing runs on tokio's paused clock, so sleeps are instant and exact.

use practice_engine::core::{PracticeSession, SessionRunner};
use practice_engine::types::{PracticeType, ReasonCode, SessionEvent, SessionState};
use std::time::Duration;

fn fast_runner(practice: PracticeType) -> SessionRunner {
    SessionRunner::with_options(
        "fast",
        PracticeSession::new(practice),
        Duration::from_millis(100),
        1024,
    )
}

#[tokio::test(start_paused = true)]
async fn test_tick_period_is_configurable() {
    let mut runner = fast_runner(PracticeType::Meditation);
    runner.start().await;
    tokio::time::sleep(Duration::from_millis(1050)).await;
    assert_eq!(runner.snapshot().await.elapsed_seconds, 10);
}

#[tokio::test(start_paused = true)]
async fn test_meditation_runs_to_completion() {
    let mut runner = fast_runner(PracticeType::Meditation);
    let mut rx = runner.subscribe();
    runner.start().await;
    tokio::time::sleep(Duration::from_secs(40)).await;

    let snapshot = runner.snapshot().await;
    assert_eq!(snapshot.state, SessionState::Completed);
    assert_eq!(snapshot.elapsed_seconds, 300);
    assert_eq!(snapshot.time_spent, "5m 0s");
    assert!(!runner.is_ticking());

    let mut snapshots = 0;
    let mut completions = Vec::new();
    while let Ok(event) = rx.try_recv() {
        match event {
            SessionEvent::Snapshot { .. } => snapshots += 1,
            SessionEvent::Completed { record } => completions.push(record),
        }
    }
    // one for start plus one per tick
    assert_eq!(snapshots, 301);
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].practice, PracticeType::Meditation);
    assert_eq!(completions[0].elapsed_seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn test_pause_then_resume_continues_from_kept_time() {
    let mut runner = fast_runner(PracticeType::MuscleRelaxation);
    runner.start().await;
    tokio::time::sleep(Duration::from_millis(450)).await;
    runner.pause().await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(runner.snapshot().await.elapsed_seconds, 4);

    let (reason, _) = runner.start().await;
    assert_eq!(reason, ReasonCode::R001_STARTED);
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(runner.snapshot().await.elapsed_seconds, 7);
}

#[tokio::test(start_paused = true)]
async fn test_reset_while_running_stops_ticks() {
    let mut runner = fast_runner(PracticeType::Breathing);
    runner.start().await;
    tokio::time::sleep(Duration::from_millis(550)).await;

    let (reason, snapshot) = runner.reset().await;
    assert_eq!(reason, ReasonCode::R002_RESET);
    assert_eq!(snapshot.elapsed_seconds, 0);
    assert!(!runner.is_ticking());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(runner.snapshot().await.elapsed_seconds, 0);
}

#[tokio::test(start_paused = true)]
async fn test_practice_again_after_completion() {
    let mut runner = fast_runner(PracticeType::Breathing);
    runner.start().await;
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(runner.snapshot().await.state, SessionState::Completed);

    let (reason, _) = runner.start().await;
    assert_eq!(reason, ReasonCode::R001_START_IGNORED_COMPLETED);
    assert!(!runner.is_ticking());

    runner.reset().await;
    runner.start().await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    let snapshot = runner.snapshot().await;
    assert_eq!(snapshot.state, SessionState::Running);
    assert_eq!(snapshot.elapsed_seconds, 2);
}
