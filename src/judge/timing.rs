use crate::config::TimingWindows;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

pub const PERFECT_TIMING_ACCURACY: f64 = 100.0;
pub const GREAT_TIMING_ACCURACY: f64 = 80.0;
pub const GOOD_TIMING_ACCURACY: f64 = 60.0;
pub const MISS_TIMING_ACCURACY: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TimingTier {
    Perfect,
    Great,
    Good,
    Miss,
}

impl TimingTier {
    pub fn timing_accuracy(&self) -> f64 {
        match self {
            Self::Perfect => PERFECT_TIMING_ACCURACY,
            Self::Great => GREAT_TIMING_ACCURACY,
            Self::Good => GOOD_TIMING_ACCURACY,
            Self::Miss => MISS_TIMING_ACCURACY,
        }
    }
}

impl TimingWindows {
    /// Upper bounds are inclusive: exactly 50.0 ms is still PERFECT.
    pub fn classify(&self, timing_diff_ms: f64) -> (TimingTier, f64) {
        let tier = if !timing_diff_ms.is_finite() || timing_diff_ms < 0.0 {
            TimingTier::Miss
        } else if timing_diff_ms <= self.perfect_window_ms {
            TimingTier::Perfect
        } else if timing_diff_ms <= self.great_window_ms {
            TimingTier::Great
        } else if timing_diff_ms <= self.good_window_ms {
            TimingTier::Good
        } else {
            TimingTier::Miss
        };
        (tier, tier.timing_accuracy())
    }

    /// Half-width of the window in which a note accepts attempts.
    pub fn active_window_ms(&self) -> f64 {
        self.good_window_ms
    }
}

/// Classification against the default windows (50 / 150 / 300 ms).
pub fn classify(timing_diff_ms: f64) -> (TimingTier, f64) {
    TimingWindows::default().classify(timing_diff_ms)
}

/// `|attempt - target|` in milliseconds, quantized to whole microseconds so
/// that an offset of exactly 50 or 300 ms lands on the bound, not past it.
pub fn timing_diff_ms(attempt_seconds: f64, target_seconds: f64) -> f64 {
    ((attempt_seconds - target_seconds).abs() * 1_000_000.0).round() / 1000.0
}
