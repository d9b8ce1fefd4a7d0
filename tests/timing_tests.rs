use beatjudge::config::{JudgeConfig, TimingWindows};
use beatjudge::judge::timing::{classify, timing_diff_ms, TimingTier};
use beatjudge::judge::{decide_rating, Rating};
use rstest::rstest;

#[rstest]
#[case(0.0, TimingTier::Perfect, 100.0)]
#[case(50.0, TimingTier::Perfect, 100.0)]
#[case(50.1, TimingTier::Great, 80.0)]
#[case(150.0, TimingTier::Great, 80.0)]
#[case(150.1, TimingTier::Good, 60.0)]
#[case(300.0, TimingTier::Good, 60.0)]
#[case(300.1, TimingTier::Miss, 0.0)]
#[case(5000.0, TimingTier::Miss, 0.0)]
fn test_timing_boundaries(#[case] diff: f64, #[case] tier: TimingTier, #[case] acc: f64) {
    assert_eq!(classify(diff), (tier, acc));
}

#[test]
fn test_garbage_timing_is_miss() {
    assert_eq!(classify(f64::NAN).0, TimingTier::Miss);
    assert_eq!(classify(-1.0).0, TimingTier::Miss);
    assert_eq!(classify(f64::INFINITY).0, TimingTier::Miss);
}

#[test]
fn test_timing_diff_is_absolute_millis() {
    assert!((timing_diff_ms(2.01, 2.0) - 10.0).abs() < 1e-6);
    assert!((timing_diff_ms(1.99, 2.0) - 10.0).abs() < 1e-6);
}

#[rstest]
#[case(1.05, 1.0, 50.0, TimingTier::Perfect)]
#[case(0.95, 1.0, 50.0, TimingTier::Perfect)]
#[case(1.15, 1.0, 150.0, TimingTier::Great)]
#[case(1.3, 1.0, 300.0, TimingTier::Good)]
#[case(1.7, 2.0, 300.0, TimingTier::Good)]
#[case(2.3, 2.0, 300.0, TimingTier::Good)]
fn test_offsets_on_a_bound_stay_inside(
    #[case] attempt: f64,
    #[case] target: f64,
    #[case] expected_ms: f64,
    #[case] tier: TimingTier,
) {
    let diff = timing_diff_ms(attempt, target);
    assert_eq!(diff, expected_ms);
    assert_eq!(classify(diff).0, tier);
}

#[test]
fn test_accuracy_gate_beats_perfect_timing() {
    assert_eq!(decide_rating(0.0, 69.9), Rating::Miss);
    assert_eq!(decide_rating(0.0, 70.0), Rating::Perfect);
}

#[rstest]
#[case(10.0, 100.0, Rating::Perfect)]
#[case(100.0, 95.0, Rating::Great)]
#[case(250.0, 80.0, Rating::Good)]
#[case(400.0, 100.0, Rating::Miss)]
fn test_rating_follows_timing_above_gate(
    #[case] diff: f64,
    #[case] acc: f64,
    #[case] expected: Rating,
) {
    assert_eq!(decide_rating(diff, acc), expected);
}

#[test]
fn test_custom_windows() {
    let config = JudgeConfig {
        windows: TimingWindows {
            perfect_window_ms: 20.0,
            great_window_ms: 40.0,
            good_window_ms: 80.0,
        },
        ..Default::default()
    };
    assert_eq!(config.decide_rating(30.0, 100.0), Rating::Great);
    assert_eq!(config.decide_rating(90.0, 100.0), Rating::Miss);
    assert_eq!(config.windows.active_window_ms(), 80.0);
}
