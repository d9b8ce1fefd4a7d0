use super::rating::Rating;
use super::score::{SessionState, Verdict};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub const RANK_S_THRESHOLD: f64 = 95.0;
pub const RANK_A_THRESHOLD: f64 = 90.0;
pub const RANK_B_THRESHOLD: f64 = 80.0;
pub const RANK_C_THRESHOLD: f64 = 70.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Rank {
    S,
    A,
    B,
    C,
    D,
}

pub fn rank(average_accuracy: f64) -> Rank {
    if average_accuracy >= RANK_S_THRESHOLD {
        Rank::S
    } else if average_accuracy >= RANK_A_THRESHOLD {
        Rank::A
    } else if average_accuracy >= RANK_B_THRESHOLD {
        Rank::B
    } else if average_accuracy >= RANK_C_THRESHOLD {
        Rank::C
    } else {
        Rank::D
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingCounts {
    pub perfect: usize,
    pub great: usize,
    pub good: usize,
    pub miss: usize,
}

impl RatingCounts {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let mut counts = Self::default();
        for v in verdicts {
            match v.rating {
                Rating::Perfect => counts.perfect += 1,
                Rating::Great => counts.great += 1,
                Rating::Good => counts.good += 1,
                Rating::Miss => counts.miss += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.perfect + self.great + self.good + self.miss
    }

    pub fn hits(&self) -> usize {
        self.perfect + self.great + self.good
    }
}

/// Mean pronunciation accuracy over all verdicts; a MISS counts as 0.
pub fn average_accuracy(verdicts: &[Verdict]) -> f64 {
    if verdicts.is_empty() {
        return 0.0;
    }
    let sum: f64 = verdicts
        .iter()
        .map(|v| {
            if v.rating.is_miss() {
                0.0
            } else {
                v.pronunciation_accuracy
            }
        })
        .sum();
    sum / verdicts.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub song_id: String,
    pub total_score: u64,
    pub max_combo: u32,
    pub rank: Rank,
    pub average_accuracy: f64,
    pub counts: RatingCounts,
    pub hit_rate: f64, // % of notes not missed
    pub verdicts: Vec<Verdict>,
}

impl SessionSummary {
    pub fn from_state(song_id: &str, state: SessionState) -> Self {
        let average = average_accuracy(&state.history);
        let counts = RatingCounts::from_verdicts(&state.history);
        let hit_rate = if counts.total() > 0 {
            counts.hits() as f64 * 100.0 / counts.total() as f64
        } else {
            0.0
        };

        Self {
            song_id: song_id.to_string(),
            total_score: state.total_score,
            max_combo: state.max_combo,
            rank: rank(average),
            average_accuracy: average,
            counts,
            hit_rate,
            verdicts: state.history,
        }
    }
}
