use super::rating::Rating;
use crate::config::ScoringRules;
use serde::{Deserialize, Serialize};

/// Final, scored outcome of one note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub note_id: String,
    pub word: String,
    pub spoken_text: Option<String>, // None when the note expired unanswered
    pub rating: Rating,
    pub score: u32,
    pub pronunciation_accuracy: f64,
    pub timing_accuracy: f64,
    pub timing_diff_ms: f64,
}

/// A graded but not yet scored note.
#[derive(Debug, Clone, PartialEq)]
pub struct Judgement {
    pub note_id: String,
    pub word: String,
    pub spoken_text: Option<String>,
    pub rating: Rating,
    pub pronunciation_accuracy: f64,
    pub timing_accuracy: f64,
    pub timing_diff_ms: f64,
    pub difficulty_tier: u8,
}

/// Running totals of one session. Owned by the caller and replaced by the
/// value returned from [`ScoreAggregator::score`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub combo: u32,
    pub max_combo: u32,
    pub total_score: u64,
    pub history: Vec<Verdict>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State entering a note with an existing streak.
    pub fn with_combo(combo: u32) -> Self {
        Self {
            combo,
            max_combo: combo,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    rules: ScoringRules,
}

impl ScoreAggregator {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn base_score(&self, rating: Rating) -> u32 {
        match rating {
            Rating::Perfect => self.rules.perfect_base,
            Rating::Great => self.rules.great_base,
            Rating::Good => self.rules.good_base,
            Rating::Miss => 0,
        }
    }

    /// `floor(accuracy * 0.3)` with the default rules.
    pub fn pronunciation_bonus(&self, pronunciation_accuracy: f64) -> u32 {
        let acc = sanitize_accuracy(pronunciation_accuracy);
        (acc * self.rules.pronunciation_bonus_percent as f64 / 100.0).floor() as u32
    }

    /// `1.0 + 0.2 * tier` with the default rules, as a percentage.
    pub fn difficulty_percent(&self, difficulty_tier: u8) -> u64 {
        100 + self.rules.difficulty_step_percent as u64 * difficulty_tier as u64
    }

    pub fn difficulty_multiplier(&self, difficulty_tier: u8) -> f64 {
        self.difficulty_percent(difficulty_tier) as f64 / 100.0
    }

    /// Capped streak; a streak of zero counts as one so it never zeroes a score.
    pub fn combo_multiplier(&self, combo: u32) -> u32 {
        combo.min(self.rules.combo_cap).max(1)
    }

    /// `floor((base + bonus) * difficulty * combo)`, where `combo` is the streak
    /// including the note being scored. A MISS is always worth 0.
    pub fn final_score(
        &self,
        rating: Rating,
        pronunciation_accuracy: f64,
        difficulty_tier: u8,
        combo: u32,
    ) -> u32 {
        if rating.is_miss() {
            return 0;
        }
        let points = (self.base_score(rating) + self.pronunciation_bonus(pronunciation_accuracy))
            as u64;
        let scaled = points
            * self.difficulty_percent(difficulty_tier)
            * self.combo_multiplier(combo) as u64
            / 100;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }

    pub fn score(&self, judgement: Judgement, state: SessionState) -> (Verdict, SessionState) {
        let mut state = state;

        let combo = if judgement.rating.is_miss() {
            0
        } else {
            state.combo.saturating_add(1)
        };

        let points = self.final_score(
            judgement.rating,
            judgement.pronunciation_accuracy,
            judgement.difficulty_tier,
            combo,
        );

        state.combo = combo;
        state.max_combo = state.max_combo.max(combo);
        state.total_score = state.total_score.saturating_add(points as u64);

        let verdict = Verdict {
            note_id: judgement.note_id,
            word: judgement.word,
            spoken_text: judgement.spoken_text,
            rating: judgement.rating,
            score: points,
            pronunciation_accuracy: sanitize_accuracy(judgement.pronunciation_accuracy),
            timing_accuracy: sanitize_accuracy(judgement.timing_accuracy),
            timing_diff_ms: judgement.timing_diff_ms.max(0.0),
        };
        state.history.push(verdict.clone());

        (verdict, state)
    }
}

fn sanitize_accuracy(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
