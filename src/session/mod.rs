pub mod driver;

use crate::chart::Song;
use crate::config::JudgeConfig;
use crate::error::{BjResult, PreconditionViolation};
use crate::judge::{
    AttemptEvent, Judge, NoteResolver, Resolution, SessionState, SessionSummary, Verdict,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Read-only copy of the live totals, taken after each verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub combo: u32,
    pub max_combo: u32,
    pub total_score: u64,
    pub judged: usize,
    pub total_notes: usize,
    pub last_verdict: Option<Verdict>,
}

/// One play-through of a song. Single writer: every mutation goes through
/// `&mut self`, and the scoring state is replaced wholesale after each note.
pub struct Session {
    song: Arc<Song>,
    judge: Judge,
    resolver: NoteResolver,
    state: SessionState,
    finalized: bool,
}

impl Session {
    pub fn new(song: Arc<Song>, config: JudgeConfig) -> Self {
        let judge = Judge::new(config);
        let resolver = NoteResolver::new(&song, judge.config.windows.active_window_ms());
        info!(
            "▶️  Session started: '{}' ({} notes)",
            song.id(),
            song.total_words()
        );
        Self {
            song,
            judge,
            resolver,
            state: SessionState::new(),
            finalized: false,
        }
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn clock(&self) -> f64 {
        self.resolver.clock()
    }

    /// All notes have a verdict.
    pub fn is_complete(&self) -> bool {
        self.resolver.is_exhausted()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            combo: self.state.combo,
            max_combo: self.state.max_combo,
            total_score: self.state.total_score,
            judged: self.state.history.len(),
            total_notes: self.song.total_words(),
            last_verdict: self.state.history.last().cloned(),
        }
    }

    pub fn advance_clock(&mut self, now: f64) -> Result<Vec<Verdict>, PreconditionViolation> {
        self.ensure_open()?;
        let resolutions = self.resolver.advance_to(now)?;
        Ok(self.apply(resolutions))
    }

    pub fn submit(&mut self, attempt: AttemptEvent) -> Result<Vec<Verdict>, PreconditionViolation> {
        self.ensure_open()?;
        let resolutions = self.resolver.submit(&attempt)?;
        Ok(self.apply(resolutions))
    }

    /// Expires whatever is still pending and seals the session.
    pub fn finish(&mut self) -> Result<SessionSummary, PreconditionViolation> {
        self.ensure_open()?;
        let remaining = self.resolver.finalize();
        if !remaining.is_empty() {
            debug!("Expiring {} unanswered notes at finish", remaining.len());
        }
        self.apply(remaining);
        self.finalized = true;

        let state = std::mem::take(&mut self.state);
        let summary = SessionSummary::from_state(self.song.id(), state);
        info!(
            "🏁 Session finished: '{}' score={} max_combo={} rank={}",
            summary.song_id, summary.total_score, summary.max_combo, summary.rank
        );
        Ok(summary)
    }

    /// Stops early. Identical to [`Session::finish`]: one verdict per note either way.
    pub fn cancel(&mut self) -> Result<SessionSummary, PreconditionViolation> {
        info!(
            "⏹️  Session cancelled at {:.3}s with {} notes pending",
            self.resolver.clock(),
            self.resolver.pending_count()
        );
        self.finish()
    }

    fn ensure_open(&self) -> Result<(), PreconditionViolation> {
        if self.finalized {
            Err(PreconditionViolation::SessionFinalized)
        } else {
            Ok(())
        }
    }

    fn apply(&mut self, resolutions: Vec<Resolution>) -> Vec<Verdict> {
        let mut verdicts = Vec::with_capacity(resolutions.len());
        for resolution in resolutions {
            let note = &self.song.notes()[resolution.note_index()];
            let judgement = match &resolution {
                Resolution::Matched {
                    spoken_text,
                    timing_diff_ms,
                    ..
                } => self.judge.evaluate(note, spoken_text, *timing_diff_ms),
                Resolution::Expired { .. } => self.judge.expire(note),
            };

            let state = std::mem::take(&mut self.state);
            let (verdict, state) = self.judge.score(judgement, state);
            self.state = state;

            debug!(
                "{} '{}' -> {} (+{}, combo {})",
                verdict.note_id, verdict.word, verdict.rating, verdict.score, self.state.combo
            );
            verdicts.push(verdict);
        }
        verdicts
    }
}

/// Plays a complete recorded attempt stream against `song`: attempts in order,
/// then the clock runs to the end of the song and the session is finished.
pub fn replay<I>(song: Arc<Song>, config: JudgeConfig, attempts: I) -> BjResult<SessionSummary>
where
    I: IntoIterator<Item = AttemptEvent>,
{
    let mut session = Session::new(song, config);
    for attempt in attempts {
        session.submit(attempt)?;
    }
    let end = session.song().end_time_seconds().max(session.clock());
    session.advance_clock(end)?;
    Ok(session.finish()?)
}
