mod common;

use beatjudge::api::{self, JudgeState};
use beatjudge::chart::Song;
use beatjudge::config::JudgeConfig;
use beatjudge::error::{BeatJudgeError, PreconditionViolation};
use beatjudge::judge::{rank, AttemptEvent, Rank, Rating};
use beatjudge::session::driver::{self, SessionInput};
use beatjudge::session::{self, Session};
use common::three_note_song;
use std::sync::Arc;
use std::time::Duration;

fn perfect_attempts() -> Vec<AttemptEvent> {
    vec![
        AttemptEvent::new("hello", 2.0),
        AttemptEvent::new("world", 3.0),
        AttemptEvent::new("seashells", 4.0),
    ]
}

#[test]
fn test_flawless_session() {
    let summary =
        session::replay(three_note_song(), JudgeConfig::default(), perfect_attempts()).unwrap();

    // 156 + 364 + 624
    assert_eq!(summary.total_score, 1144);
    assert_eq!(summary.max_combo, 3);
    assert_eq!(summary.rank, Rank::S);
    assert_eq!(summary.counts.perfect, 3);
    assert_eq!(summary.hit_rate, 100.0);
    let ids: Vec<&str> = summary.verdicts.iter().map(|v| v.note_id.as_str()).collect();
    assert_eq!(ids, vec!["test_song-01", "test_song-02", "test_song-03"]);
}

#[test]
fn test_silent_session_misses_every_note() {
    let summary = session::replay(three_note_song(), JudgeConfig::default(), vec![]).unwrap();

    assert_eq!(summary.verdicts.len(), 3);
    assert!(summary
        .verdicts
        .iter()
        .all(|v| v.rating == Rating::Miss && v.pronunciation_accuracy == 0.0));
    assert_eq!(summary.total_score, 0);
    assert_eq!(summary.max_combo, 0);
    assert_eq!(summary.rank, Rank::D);
}

#[test]
fn test_unanswered_note_auto_expires_on_clock() {
    let mut s = Session::new(three_note_song(), JudgeConfig::default());
    let verdicts = s.advance_clock(2.4).unwrap();

    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].rating, Rating::Miss);
    assert_eq!(verdicts[0].pronunciation_accuracy, 0.0);
    assert_eq!(verdicts[0].timing_diff_ms, 300.0);
}

#[test]
fn test_attempts_on_timing_bounds() {
    let song = Arc::new(
        Song::builder("edges", "Edges")
            .note("she", "", 1.0, 1)
            .note("sells", "", 3.0, 1)
            .build()
            .unwrap(),
    );
    let attempts = vec![
        AttemptEvent::new("she", 1.05),
        AttemptEvent::new("sells", 2.7),
    ];
    let summary = session::replay(song, JudgeConfig::default(), attempts).unwrap();

    assert_eq!(summary.verdicts[0].rating, Rating::Perfect);
    assert_eq!(summary.verdicts[0].timing_diff_ms, 50.0);
    assert_eq!(summary.verdicts[1].rating, Rating::Good);
    assert_eq!(summary.verdicts[1].timing_diff_ms, 300.0);
}

#[test]
fn test_cancel_still_yields_one_verdict_per_note() {
    let mut s = Session::new(three_note_song(), JudgeConfig::default());
    s.submit(AttemptEvent::new("hello", 2.02)).unwrap();
    let summary = s.cancel().unwrap();

    assert_eq!(summary.verdicts.len(), 3);
    assert_eq!(summary.counts.perfect, 1);
    assert_eq!(summary.counts.miss, 2);
    assert_eq!(summary.max_combo, 1);
}

#[test]
fn test_finalized_session_rejects_input() {
    let mut s = Session::new(three_note_song(), JudgeConfig::default());
    s.finish().unwrap();

    assert_eq!(
        s.submit(AttemptEvent::new("hello", 5.0)).unwrap_err(),
        PreconditionViolation::SessionFinalized
    );
    assert!(s.advance_clock(6.0).is_err());
    assert!(s.finish().is_err());
}

#[test]
fn test_out_of_order_attempts_are_reported() {
    let mut s = Session::new(three_note_song(), JudgeConfig::default());
    s.submit(AttemptEvent::new("hello", 2.0)).unwrap();
    let err = s.submit(AttemptEvent::new("world", 1.0)).unwrap_err();
    assert!(matches!(err, PreconditionViolation::OutOfOrder { .. }));
}

#[test]
fn test_garbled_attempt_is_a_miss_not_an_error() {
    let mut s = Session::new(three_note_song(), JudgeConfig::default());
    let verdicts = s.submit(AttemptEvent::new("", 2.0)).unwrap();
    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].rating, Rating::Miss);
    assert_eq!(verdicts[0].spoken_text.as_deref(), Some(""));
}

#[test]
fn test_snapshot_reflects_last_verdict() {
    let mut s = Session::new(three_note_song(), JudgeConfig::default());
    s.submit(AttemptEvent::new("hello", 2.0)).unwrap();
    let snap = s.snapshot();

    assert_eq!(snap.combo, 1);
    assert_eq!(snap.total_score, 156);
    assert_eq!(snap.judged, 1);
    assert_eq!(snap.total_notes, 3);
    assert_eq!(snap.last_verdict.unwrap().word, "hello");
}

#[test]
fn test_rank_thresholds() {
    assert_eq!(rank(92.0), Rank::A);
    assert_eq!(rank(95.0), Rank::S);
    assert_eq!(rank(80.0), Rank::B);
    assert_eq!(rank(79.99), Rank::C);
    assert_eq!(rank(69.9), Rank::D);
}

#[test]
fn test_miss_counts_zero_towards_average() {
    let attempts = vec![
        AttemptEvent::new("hello", 2.0),
        AttemptEvent::new("world", 3.0),
        // Close enough in spelling, but far too late.
        AttemptEvent::new("seashells", 4.29),
    ];
    let summary = session::replay(three_note_song(), JudgeConfig::default(), attempts).unwrap();

    assert_eq!(summary.counts.good, 1);
    assert!((summary.average_accuracy - 100.0).abs() < 1e-9);

    let attempts = vec![
        AttemptEvent::new("hello", 2.0),
        AttemptEvent::new("world", 3.0),
        AttemptEvent::new("sea", 4.0),
    ];
    let summary = session::replay(three_note_song(), JudgeConfig::default(), attempts).unwrap();
    assert_eq!(summary.counts.miss, 1);
    assert!((summary.average_accuracy - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.rank, Rank::D);
}

// --- CHANNEL DRIVER ---

#[test]
fn test_driver_streams_verdicts_in_chart_order() {
    let handle =
        driver::spawn(Session::new(three_note_song(), JudgeConfig::default())).unwrap();

    handle.attempt("hello", 2.0).unwrap();
    handle.tick(3.5).unwrap();
    handle.attempt("seashells", 4.1).unwrap();

    let mut words = Vec::new();
    for _ in 0..3 {
        let v = handle
            .verdicts()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        words.push((v.word, v.rating));
    }
    assert_eq!(
        words,
        vec![
            ("hello".to_string(), Rating::Perfect),
            ("world".to_string(), Rating::Miss),
            ("seashells".to_string(), Rating::Great),
        ]
    );

    let summary = handle.finish().unwrap();
    assert_eq!(summary.verdicts.len(), 3);
    assert_eq!(summary.max_combo, 1);
}

#[test]
fn test_driver_cancel_expires_pending_notes() {
    let handle =
        driver::spawn(Session::new(three_note_song(), JudgeConfig::default())).unwrap();
    handle
        .send(SessionInput::Attempt(AttemptEvent::new("hello", 2.0)))
        .unwrap();

    let summary = handle.cancel().unwrap();
    assert_eq!(summary.verdicts.len(), 3);
    assert_eq!(summary.counts.miss, 2);
}

#[test]
fn test_driver_survives_rejected_input() {
    let handle =
        driver::spawn(Session::new(three_note_song(), JudgeConfig::default())).unwrap();
    handle.attempt("hello", 2.0).unwrap();
    handle.tick(2.5).unwrap();
    handle.attempt("hello", 2.4).unwrap();

    let rejected = handle
        .rejections()
        .recv_timeout(Duration::from_secs(5))
        .unwrap();
    assert_eq!(
        rejected,
        PreconditionViolation::OutOfOrder {
            timestamp: 2.4,
            clock: 2.5
        }
    );

    // Still accepting input after the rejection.
    handle.attempt("world", 3.0).unwrap();
    let summary = handle.finish().unwrap();

    assert_eq!(summary.verdicts.len(), 3);
    assert_eq!(summary.verdicts[0].rating, Rating::Perfect);
    assert_eq!(summary.verdicts[1].rating, Rating::Perfect);
    assert_eq!(summary.verdicts[2].rating, Rating::Miss);
    assert_eq!(summary.max_combo, 2);
}

// --- SESSION REGISTRY ---

#[test]
fn test_api_runs_independent_sessions() {
    let state = JudgeState::default();
    api::start_session(&state, "a", three_note_song(), None).unwrap();
    api::start_session(&state, "b", three_note_song(), None).unwrap();

    let v = api::submit_attempt(&state, "a", AttemptEvent::new("hello", 2.0)).unwrap();
    assert_eq!(v.len(), 1);

    assert_eq!(api::session_snapshot(&state, "a").unwrap().combo, 1);
    assert_eq!(api::session_snapshot(&state, "b").unwrap().combo, 0);

    let a = api::finish_session(&state, "a").unwrap();
    let b = api::finish_session(&state, "b").unwrap();
    assert_eq!(a.total_score, 156);
    assert_eq!(b.total_score, 0);
    assert_eq!(a.verdicts.len(), 3);
}

#[test]
fn test_api_unknown_session() {
    let state = JudgeState::default();
    let err = api::advance_clock(&state, "ghost", 1.0).unwrap_err();
    assert!(matches!(err, BeatJudgeError::UnknownSession(_)));
    assert!(api::finish_session(&state, "ghost").is_err());
}

#[test]
fn test_api_library_session() {
    let state = JudgeState::default();
    api::start_library_session(&state, "p1", "happy_vibes", None).unwrap();
    // happy_vibes: 'happy' at beat 8, 120 BPM -> 4.0s
    let v = api::submit_attempt(&state, "p1", AttemptEvent::new("happy", 4.0)).unwrap();
    assert_eq!(v[0].rating, Rating::Perfect);

    let err = api::start_library_session(&state, "p2", "no_such_song", None).unwrap_err();
    assert!(matches!(err, BeatJudgeError::UnknownSong(_)));
}
