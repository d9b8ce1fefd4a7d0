//! Seeded synthetic learner, for demos and load checks without a microphone.

use crate::chart::Song;
use crate::judge::AttemptEvent;

const MIN_JITTER_MS: f64 = 20.0;
const MAX_EXTRA_JITTER_MS: f64 = 450.0;
const MAX_SILENCE_CHANCE: f64 = 0.3;

pub struct SimulatedLearner {
    skill: f64, // 0.0 = hopeless, 1.0 = near perfect
    rng: fastrand::Rng,
}

impl SimulatedLearner {
    pub fn new(skill: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self {
            skill: skill.clamp(0.0, 1.0),
            rng,
        }
    }

    /// One attempt per note at most, in non-decreasing time order.
    pub fn attempts_for(&mut self, song: &Song) -> Vec<AttemptEvent> {
        let clumsiness = 1.0 - self.skill;
        let spread_ms = MIN_JITTER_MS + clumsiness * MAX_EXTRA_JITTER_MS;

        let mut attempts = Vec::with_capacity(song.total_words());
        let mut last_ts = 0.0f64;

        for note in song.notes() {
            if self.rng.f64() < clumsiness * MAX_SILENCE_CHANCE {
                continue;
            }

            // Sum of two uniforms: triangular, centred on the target.
            let offset_ms = (self.rng.f64() + self.rng.f64() - 1.0) * spread_ms;
            let ts = (note.target_time_seconds + offset_ms / 1000.0).max(last_ts);
            last_ts = ts;

            let spoken = if self.rng.f64() < clumsiness {
                self.garble(&note.word)
            } else {
                note.word.clone()
            };

            attempts.push(AttemptEvent {
                spoken_text: spoken,
                timestamp_seconds: ts,
            });
        }

        attempts
    }

    fn garble(&mut self, word: &str) -> String {
        let mut chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        let i = self.rng.usize(..chars.len());
        match self.rng.u8(0..3) {
            0 => {
                chars.remove(i);
            }
            1 => {
                let j = (i + 1).min(chars.len() - 1);
                chars.swap(i, j);
            }
            _ => chars[i] = self.rng.lowercase(),
        }
        chars.into_iter().collect()
    }
}
