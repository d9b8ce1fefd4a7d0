//! Note matching state machine.
//!
//! Every note starts `Pending` and ends either `Resolved` (first attempt inside
//! its window) or `Expired` (clock moved past the window). Notes are consumed
//! strictly in chart order, so an attempt can never skip an earlier note.

use super::timing::timing_diff_ms;
use crate::chart::Song;
use crate::error::PreconditionViolation;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One utterance reported by the recognition pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptEvent {
    pub spoken_text: String,
    pub timestamp_seconds: f64,
}

impl AttemptEvent {
    pub fn new(spoken_text: &str, timestamp_seconds: f64) -> Self {
        Self {
            spoken_text: spoken_text.to_string(),
            timestamp_seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteState {
    Pending,
    Resolved,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Matched {
        note_index: usize,
        spoken_text: String,
        timing_diff_ms: f64,
    },
    Expired {
        note_index: usize,
    },
}

impl Resolution {
    pub fn note_index(&self) -> usize {
        match self {
            Self::Matched { note_index, .. } | Self::Expired { note_index } => *note_index,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NoteResolver {
    targets: Vec<f64>,
    states: Vec<NoteState>,
    cursor: usize, // earliest pending note
    clock: f64,
    window_ms: f64,
}

impl NoteResolver {
    pub fn new(song: &Song, window_ms: f64) -> Self {
        let targets: Vec<f64> = song.notes().iter().map(|n| n.target_time_seconds).collect();
        let states = vec![NoteState::Pending; targets.len()];
        Self {
            targets,
            states,
            cursor: 0,
            clock: 0.0,
            window_ms,
        }
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    pub fn state(&self, note_index: usize) -> Option<NoteState> {
        self.states.get(note_index).copied()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.targets.len()
    }

    pub fn pending_count(&self) -> usize {
        self.targets.len() - self.cursor
    }

    /// The note currently accepting attempts: the earliest pending note, if the
    /// clock lies inside its window.
    pub fn open_note(&self) -> Option<usize> {
        let target = *self.targets.get(self.cursor)?;
        if timing_diff_ms(self.clock, target) <= self.window_ms {
            Some(self.cursor)
        } else {
            None
        }
    }

    /// Moves the clock forward, expiring every pending note whose window has
    /// fully passed.
    pub fn advance_to(&mut self, now: f64) -> Result<Vec<Resolution>, PreconditionViolation> {
        self.observe(now)?;
        Ok(self.expire_passed())
    }

    /// Offers an attempt to the open note. The first attempt inside the window
    /// wins; anything else is dropped. Notes that expired before the attempt's
    /// timestamp are reported first.
    pub fn submit(
        &mut self,
        attempt: &AttemptEvent,
    ) -> Result<Vec<Resolution>, PreconditionViolation> {
        let ts = attempt.timestamp_seconds;
        self.observe(ts)?;
        let mut out = self.expire_passed();

        match self.targets.get(self.cursor) {
            Some(&target) => {
                let diff = timing_diff_ms(ts, target);
                if diff <= self.window_ms {
                    self.states[self.cursor] = NoteState::Resolved;
                    out.push(Resolution::Matched {
                        note_index: self.cursor,
                        spoken_text: attempt.spoken_text.clone(),
                        timing_diff_ms: diff,
                    });
                    self.cursor += 1;
                } else {
                    debug!(
                        "Discarded attempt '{}' at {:.3}s: next note at {:.3}s is not open",
                        attempt.spoken_text, ts, target
                    );
                }
            }
            None => debug!(
                "Discarded attempt '{}' at {:.3}s: chart exhausted",
                attempt.spoken_text, ts
            ),
        }

        Ok(out)
    }

    /// Expires every remaining pending note regardless of the clock.
    pub fn finalize(&mut self) -> Vec<Resolution> {
        let mut out = Vec::with_capacity(self.pending_count());
        while self.cursor < self.targets.len() {
            out.push(self.expire_cursor());
        }
        out
    }

    fn observe(&mut self, now: f64) -> Result<(), PreconditionViolation> {
        // Also rejects NaN.
        if !(now >= self.clock) {
            return Err(PreconditionViolation::OutOfOrder {
                timestamp: now,
                clock: self.clock,
            });
        }
        self.clock = now;
        Ok(())
    }

    fn expire_passed(&mut self) -> Vec<Resolution> {
        let mut out = Vec::new();
        while let Some(&target) = self.targets.get(self.cursor) {
            if self.clock > target && timing_diff_ms(self.clock, target) > self.window_ms {
                out.push(self.expire_cursor());
            } else {
                break;
            }
        }
        out
    }

    fn expire_cursor(&mut self) -> Resolution {
        let note_index = self.cursor;
        self.states[note_index] = NoteState::Expired;
        self.cursor += 1;
        Resolution::Expired { note_index }
    }
}
