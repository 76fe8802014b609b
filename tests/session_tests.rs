// Integration tests for timer-driven meeting sessions
//
// These tests run on tokio's paused clock, so the countdown and stopwatch
// intervals advance deterministically without real waiting.

use anyhow::Result;
use chrono::{TimeZone, Utc};
use standup_timer::{
    AllocationPolicy, Category, FixedClock, Lineup, MeetingSession, Phase, PhaseSequence,
    RosterEdit, SessionConfig, SpeakerRoster, Transition,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// One tick of slack for interval timing
const TOLERANCE: f64 = 0.1 + 1e-9;

fn session_config() -> SessionConfig {
    SessionConfig {
        meeting_id: "test-meeting".to_string(),
        shuffle_seed: Some(7),
        ..SessionConfig::default()
    }
}

fn clock() -> Arc<FixedClock> {
    // 08:30 UTC is 09:30 in Berlin (CET)
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap()))
}

fn team_session(durations: &[u32]) -> Result<MeetingSession> {
    let mut phases = vec![Phase::initial("Welcome")];
    for (i, &secs) in durations.iter().enumerate() {
        phases.push(Phase::new(format!("Team {}", i + 1), secs, Category::Team));
    }
    let lineup = Lineup::Fixed(PhaseSequence::new(phases)?);
    Ok(MeetingSession::new(session_config(), lineup, clock()))
}

fn speaker_session() -> Result<MeetingSession> {
    let entries = vec![
        Phase::initial("Welcome"),
        Phase::new("Alex", 0, Category::Individual),
        Phase::new("Sam", 0, Category::Individual),
        Phase::new("Robin", 0, Category::Individual),
        Phase::new("Blockers", 0, Category::Blocker),
        Phase::new("Reflection", 0, Category::Reflection),
    ];
    let roster = SpeakerRoster::new(entries, AllocationPolicy::default())?;
    Ok(MeetingSession::new(
        session_config(),
        Lineup::Speakers(roster),
        clock(),
    ))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "expected {} within one tick of {}",
        actual,
        expected
    );
}

#[tokio::test(start_paused = true)]
async fn test_countdown_ticks_while_running() -> Result<()> {
    let session = team_session(&[60, 30])?;

    session.toggle().await;
    sleep(Duration::from_secs(10)).await;

    let snapshot = session.snapshot().await;
    assert!(snapshot.running);
    assert_eq!(snapshot.phase_name, "Team 1");
    assert_close(snapshot.remaining_secs, 50.0);
    assert_close(snapshot.elapsed_secs, 10.0);
    assert_eq!(snapshot.started_at_local.as_deref(), Some("09:30"));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pause_holds_countdown_but_not_stopwatch() -> Result<()> {
    let session = team_session(&[60, 30])?;

    session.toggle().await;
    sleep(Duration::from_secs(5)).await;

    match session.toggle().await {
        Transition::Stopped { record, next_index } => {
            assert_eq!(next_index, 2);
            assert_close(record.map(|r| r.actual_duration_secs).unwrap_or_default(), 5.0);
        }
        other => panic!("Expected Stopped, got {:?}", other),
    }

    sleep(Duration::from_secs(3)).await;

    let snapshot = session.snapshot().await;
    assert!(!snapshot.running);
    assert_eq!(snapshot.remaining_secs, 30.0);
    assert_eq!(snapshot.countdown, "0:30");
    assert_close(snapshot.elapsed_secs, 8.0);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_overtime_and_meeting_end() -> Result<()> {
    let session = team_session(&[5])?;

    session.toggle().await;
    sleep(Duration::from_secs(7)).await;

    let snapshot = session.snapshot().await;
    assert!(snapshot.overtime);
    assert_eq!(snapshot.theme, "theme-overtime");
    assert_eq!(snapshot.progress_percent, 0.0);
    assert!(snapshot.countdown.starts_with('-'));
    assert_close(snapshot.remaining_secs, -2.0);

    match session.toggle().await {
        Transition::Ended { record } => {
            assert_close(record.map(|r| r.actual_duration_secs).unwrap_or_default(), 7.0);
        }
        other => panic!("Expected Ended, got {:?}", other),
    }

    // Both tickers are gone once the meeting ended
    let ended = session.snapshot().await;
    sleep(Duration::from_secs(5)).await;
    let later = session.snapshot().await;

    assert!(later.ended);
    assert_eq!(later.elapsed_secs, ended.elapsed_secs);
    assert_eq!(later.remaining_secs, ended.remaining_secs);

    assert_eq!(session.toggle().await, Transition::Ignored);
    assert_eq!(session.completed_phases().await.len(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_recorded_durations_track_elapsed_time() -> Result<()> {
    let session = team_session(&[30, 30, 30])?;

    for secs in [4, 9, 2] {
        session.toggle().await;
        sleep(Duration::from_secs(secs)).await;
        session.toggle().await;
    }

    let snapshot = session.snapshot().await;
    assert!(snapshot.ended);

    let recorded: Vec<f64> = snapshot
        .completed
        .iter()
        .map(|p| p.actual_duration_secs)
        .collect();
    assert_eq!(recorded.len(), 3);
    assert_close(recorded[0], 4.0);
    assert_close(recorded[1], 9.0);
    assert_close(recorded[2], 2.0);

    let total: f64 = recorded.iter().sum();
    assert!((total - snapshot.elapsed_secs).abs() <= 3.0 * TOLERANCE);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_tickers() -> Result<()> {
    let session = team_session(&[60])?;

    session.toggle().await;
    sleep(Duration::from_secs(1)).await;
    session.shutdown();

    let before = session.snapshot().await;
    sleep(Duration::from_secs(5)).await;
    let after = session.snapshot().await;

    assert_eq!(before.elapsed_secs, after.elapsed_secs);
    assert_eq!(before.remaining_secs, after.remaining_secs);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_roster_edits_update_lobby_countdown() -> Result<()> {
    let session = speaker_session()?;

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.phase_name, "Welcome");
    assert_eq!(snapshot.remaining_secs, 176.0);
    assert_eq!(snapshot.countdown, "2:56");

    assert_eq!(session.add_speaker("Kim").await, RosterEdit::Applied);
    assert_eq!(session.add_speaker("  ").await, RosterEdit::Ignored);
    assert_eq!(session.snapshot().await.remaining_secs, 145.0);

    assert_eq!(session.remove_speaker(10).await, RosterEdit::NotFound);
    assert_eq!(session.remove_speaker(0).await, RosterEdit::Applied);
    assert_eq!(session.shuffle_speakers().await, RosterEdit::Applied);

    let roster = session.roster().await.expect("speaker view has a roster");
    assert_eq!(roster.speakers.len(), 3);
    let pinned: Vec<&str> = roster.pinned.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(pinned, vec!["Blockers", "Reflection"]);
    assert_eq!(roster.per_speaker_secs, 176);
    assert!(roster.editable);

    assert_eq!(session.clear_speakers().await, RosterEdit::Applied);
    assert_eq!(session.snapshot().await.remaining_secs, 447.0);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_roster_locked_once_started() -> Result<()> {
    let session = speaker_session()?;

    session.toggle().await;
    sleep(Duration::from_secs(1)).await;

    assert_eq!(session.add_speaker("Kim").await, RosterEdit::Locked);
    assert_eq!(session.remove_speaker(0).await, RosterEdit::Locked);
    assert_eq!(session.clear_speakers().await, RosterEdit::Locked);
    assert_eq!(session.shuffle_speakers().await, RosterEdit::Locked);

    let roster = session.roster().await.expect("speaker view has a roster");
    assert!(!roster.editable);
    assert_eq!(roster.speakers.len(), 3);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_team_session_has_no_roster() -> Result<()> {
    let session = team_session(&[60])?;

    assert!(session.roster().await.is_none());
    assert_eq!(session.add_speaker("Kim").await, RosterEdit::Locked);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_toggle_snapshot_matches_transition() -> Result<()> {
    let session = Arc::new(team_session(&[30, 30])?);

    // Two toggles racing: each reply reflects its own transition
    let (first, second) = tokio::join!(
        {
            let session = Arc::clone(&session);
            async move { session.toggle_with_snapshot().await }
        },
        {
            let session = Arc::clone(&session);
            async move { session.toggle_with_snapshot().await }
        }
    );

    let mut started = 0;
    let mut stopped = 0;
    for (transition, snapshot) in [first, second] {
        match transition {
            Transition::Started { index, .. } => {
                started += 1;
                assert!(snapshot.running);
                assert_eq!(snapshot.phase_index, index);
                assert!(snapshot.completed.is_empty());
            }
            Transition::Stopped { next_index, .. } => {
                stopped += 1;
                assert!(!snapshot.running);
                assert_eq!(snapshot.phase_index, next_index);
                assert_eq!(snapshot.completed.len(), 1);
            }
            other => panic!("Unexpected transition {:?}", other),
        }
    }
    assert_eq!((started, stopped), (1, 1));

    let (transition, snapshot) = session.toggle_with_snapshot().await;
    assert!(matches!(transition, Transition::Started { index: 2, .. }));
    assert!(snapshot.running);
    assert_eq!(snapshot.phase_name, "Team 2");
    assert_eq!(snapshot.remaining_secs, 30.0);

    Ok(())
}
