mod common;

use beatjudge::config::{JudgeConfig, ScoringRules};
use beatjudge::judge::{Judge, Rating, ScoreAggregator, SessionState};
use common::note;

// --- END-TO-END SCENARIOS ---

#[test]
fn test_perfect_hello_fresh_session() {
    let judge = Judge::default();
    let (verdict, state) = judge.judge_attempt(&note("hello", 1), "hello", 10.0, SessionState::new());

    assert_eq!(verdict.pronunciation_accuracy, 100.0);
    assert_eq!(verdict.rating, Rating::Perfect);
    assert_eq!(verdict.timing_accuracy, 100.0);
    // floor((100 + 30) * 1.2 * 1)
    assert_eq!(verdict.score, 156);
    assert_eq!(state.combo, 1);
    assert_eq!(state.max_combo, 1);
    assert_eq!(state.total_score, 156);
    assert_eq!(state.history.len(), 1);
}

#[test]
fn test_perfect_hello_with_streak_of_nine() {
    let judge = Judge::default();
    let (verdict, state) =
        judge.judge_attempt(&note("hello", 1), "hello", 10.0, SessionState::with_combo(9));

    // floor(130 * 1.2 * 10)
    assert_eq!(verdict.score, 1560);
    assert_eq!(state.combo, 10);
    assert_eq!(state.max_combo, 10);
}

#[test]
fn test_late_seashells_is_miss_and_breaks_combo() {
    let judge = Judge::default();
    let (verdict, state) = judge.judge_attempt(
        &note("seashells", 3),
        "seashels",
        400.0,
        SessionState::with_combo(4),
    );

    assert!((verdict.pronunciation_accuracy - 88.9).abs() < 0.1);
    assert_eq!(verdict.rating, Rating::Miss);
    assert_eq!(verdict.timing_accuracy, 0.0);
    assert_eq!(verdict.score, 0);
    assert_eq!(state.combo, 0);
    assert_eq!(state.max_combo, 4);
}

#[test]
fn test_expired_note_is_zero_accuracy_miss() {
    let judge = Judge::default();
    let judgement = judge.expire(&note("hello", 2));
    let (verdict, state) = judge.score(judgement, SessionState::with_combo(3));

    assert_eq!(verdict.rating, Rating::Miss);
    assert_eq!(verdict.pronunciation_accuracy, 0.0);
    assert_eq!(verdict.timing_diff_ms, 300.0);
    assert_eq!(verdict.spoken_text, None);
    assert_eq!(verdict.score, 0);
    assert_eq!(state.combo, 0);
}

// --- FORMULA PIECES ---

#[test]
fn test_base_scores() {
    let agg = ScoreAggregator::default();
    assert_eq!(agg.base_score(Rating::Perfect), 100);
    assert_eq!(agg.base_score(Rating::Great), 80);
    assert_eq!(agg.base_score(Rating::Good), 60);
    assert_eq!(agg.base_score(Rating::Miss), 0);
}

#[test]
fn test_pronunciation_bonus_floors() {
    let agg = ScoreAggregator::default();
    assert_eq!(agg.pronunciation_bonus(100.0), 30);
    assert_eq!(agg.pronunciation_bonus(800.0 / 9.0), 26);
    assert_eq!(agg.pronunciation_bonus(0.0), 0);
    assert_eq!(agg.pronunciation_bonus(f64::NAN), 0);
}

#[test]
fn test_great_tier_two_mid_streak() {
    let agg = ScoreAggregator::default();
    // (80 + 27) * 1.4 * 5 = 749
    assert_eq!(agg.final_score(Rating::Great, 90.0, 2, 5), 749);
}

#[test]
fn test_good_tier_three_capped_streak() {
    let agg = ScoreAggregator::default();
    // (60 + 22) * 1.6 * 10 = 1312
    assert_eq!(agg.final_score(Rating::Good, 75.0, 3, 40), 1312);
}

#[test]
fn test_combo_sequence_resets_only_on_miss() {
    let judge = Judge::default();
    let hello = note("hello", 1);
    let mut state = SessionState::new();
    let plan = [
        ("hello", 0.0, 1),
        ("hello", 100.0, 2),
        ("hello", 250.0, 3),
        ("xxxxx", 0.0, 0),
        ("hello", 0.0, 1),
    ];

    for (spoken, diff, expected_combo) in plan {
        let (_, next) = judge.judge_attempt(&hello, spoken, diff, state);
        assert_eq!(next.combo, expected_combo, "after '{}' at {}ms", spoken, diff);
        state = next;
    }
    assert_eq!(state.max_combo, 3);
    assert_eq!(state.history.len(), 5);
}

#[test]
fn test_total_score_accumulates() {
    let judge = Judge::default();
    let hello = note("hello", 1);
    let (a, s1) = judge.judge_attempt(&hello, "hello", 0.0, SessionState::new());
    let (b, s2) = judge.judge_attempt(&hello, "hello", 0.0, s1);
    assert_eq!(a.score, 156);
    assert_eq!(b.score, 312);
    assert_eq!(s2.total_score, 468);
}

#[test]
fn test_custom_rules_change_weights() {
    let config = JudgeConfig {
        scoring: ScoringRules {
            pronunciation_bonus_percent: 0,
            difficulty_step_percent: 0,
            combo_cap: 1,
            ..Default::default()
        },
        ..Default::default()
    };
    let judge = Judge::new(config);
    let (v, _) = judge.judge_attempt(&note("hello", 3), "hello", 0.0, SessionState::with_combo(8));
    assert_eq!(v.score, 100);
}
