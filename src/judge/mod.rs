pub mod rating;
pub mod resolver;
pub mod score;
pub mod similarity;
pub mod summary;
pub mod timing;

pub use self::rating::{decide_rating, Rating};
pub use self::resolver::{AttemptEvent, NoteResolver, NoteState, Resolution};
pub use self::score::{Judgement, ScoreAggregator, SessionState, Verdict};
pub use self::similarity::accuracy;
pub use self::summary::{rank, Rank, RatingCounts, SessionSummary};
pub use self::timing::{classify, TimingTier};

use crate::chart::Note;
use crate::config::JudgeConfig;

/// Grades and scores single notes under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Judge {
    pub config: JudgeConfig,
    aggregator: ScoreAggregator,
}

impl Judge {
    pub fn new(config: JudgeConfig) -> Self {
        let aggregator = ScoreAggregator::new(config.scoring.clone());
        Self { config, aggregator }
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }

    /// Grades an attempt that was matched to `note`.
    pub fn evaluate(&self, note: &Note, spoken: &str, timing_diff_ms: f64) -> Judgement {
        let pronunciation_accuracy = accuracy(&note.word, spoken);
        let (_, timing_accuracy) = self.config.windows.classify(timing_diff_ms);
        let rating = self
            .config
            .decide_rating(timing_diff_ms, pronunciation_accuracy);

        Judgement {
            note_id: note.id.clone(),
            word: note.word.clone(),
            spoken_text: Some(spoken.to_string()),
            rating,
            pronunciation_accuracy,
            timing_accuracy,
            timing_diff_ms,
            difficulty_tier: note.difficulty_tier,
        }
    }

    /// Grades a note whose window passed without a usable attempt.
    pub fn expire(&self, note: &Note) -> Judgement {
        Judgement {
            note_id: note.id.clone(),
            word: note.word.clone(),
            spoken_text: None,
            rating: Rating::Miss,
            pronunciation_accuracy: 0.0,
            timing_accuracy: 0.0,
            timing_diff_ms: self.config.windows.active_window_ms(),
            difficulty_tier: note.difficulty_tier,
        }
    }

    pub fn score(&self, judgement: Judgement, state: SessionState) -> (Verdict, SessionState) {
        self.aggregator.score(judgement, state)
    }

    /// `evaluate` followed by `score`.
    pub fn judge_attempt(
        &self,
        note: &Note,
        spoken: &str,
        timing_diff_ms: f64,
        state: SessionState,
    ) -> (Verdict, SessionState) {
        let judgement = self.evaluate(note, spoken, timing_diff_ms);
        self.score(judgement, state)
    }
}
