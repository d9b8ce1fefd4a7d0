use super::timing::TimingTier;
use crate::config::JudgeConfig;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    Perfect,
    Great,
    Good,
    Miss,
}

impl Rating {
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }
}

impl From<TimingTier> for Rating {
    fn from(tier: TimingTier) -> Self {
        match tier {
            TimingTier::Perfect => Self::Perfect,
            TimingTier::Great => Self::Great,
            TimingTier::Good => Self::Good,
            TimingTier::Miss => Self::Miss,
        }
    }
}

impl JudgeConfig {
    /// The accuracy gate wins over timing: a badly mispronounced word is a MISS
    /// however well it was timed.
    pub fn decide_rating(&self, timing_diff_ms: f64, pronunciation_accuracy: f64) -> Rating {
        if pronunciation_accuracy.is_nan() || pronunciation_accuracy < self.scoring.accuracy_gate
        {
            return Rating::Miss;
        }
        let (tier, _) = self.windows.classify(timing_diff_ms);
        Rating::from(tier)
    }
}

/// Rating under the default configuration (gate 70, windows 50 / 150 / 300 ms).
pub fn decide_rating(timing_diff_ms: f64, pronunciation_accuracy: f64) -> Rating {
    JudgeConfig::default().decide_rating(timing_diff_ms, pronunciation_accuracy)
}
