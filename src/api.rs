use crate::chart::Song;
use crate::config::JudgeConfig;
use crate::error::{BeatJudgeError, BjResult};
use crate::judge::{AttemptEvent, SessionSummary, Verdict};
use crate::library;
use crate::session::{Session, SessionSnapshot};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Registry of independent live sessions, keyed by caller-chosen ids.
pub struct JudgeState {
    pub sessions: RwLock<HashMap<String, Session>>,
}

impl Default for JudgeState {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> BeatJudgeError {
    BeatJudgeError::Worker(format!("session registry lock poisoned: {}", e))
}

/// Service: start a session on a chart. Replaces any session with the same id.
pub fn start_session(
    state: &JudgeState,
    session_id: &str,
    song: Arc<Song>,
    config: Option<JudgeConfig>,
) -> BjResult<String> {
    let config = config.unwrap_or_default();
    config.validate()?;

    let session = Session::new(song, config);
    let mut sessions = state.sessions.write().map_err(poisoned)?;
    if sessions.insert(session_id.to_string(), session).is_some() {
        warn!("API: Session '{}' replaced before it finished", session_id);
    }

    Ok(format!("Session '{}' Started Successfully", session_id))
}

/// Service: start a session on a built-in library song.
pub fn start_library_session(
    state: &JudgeState,
    session_id: &str,
    song_id: &str,
    config: Option<JudgeConfig>,
) -> BjResult<String> {
    let song = library::get_song_by_id(song_id)?;
    info!("API: Starting '{}' from the library", song_id);
    start_session(state, session_id, Arc::new(song), config)
}

pub fn advance_clock(state: &JudgeState, session_id: &str, now: f64) -> BjResult<Vec<Verdict>> {
    with_session(state, session_id, |s| Ok(s.advance_clock(now)?))
}

pub fn submit_attempt(
    state: &JudgeState,
    session_id: &str,
    attempt: AttemptEvent,
) -> BjResult<Vec<Verdict>> {
    with_session(state, session_id, |s| Ok(s.submit(attempt)?))
}

pub fn session_snapshot(state: &JudgeState, session_id: &str) -> BjResult<SessionSnapshot> {
    let sessions = state.sessions.read().map_err(poisoned)?;
    sessions
        .get(session_id)
        .map(Session::snapshot)
        .ok_or_else(|| BeatJudgeError::UnknownSession(session_id.to_string()))
}

/// Service: finalize (or cancel) a session and drop it from the registry.
pub fn finish_session(state: &JudgeState, session_id: &str) -> BjResult<SessionSummary> {
    let mut session = {
        let mut sessions = state.sessions.write().map_err(poisoned)?;
        sessions
            .remove(session_id)
            .ok_or_else(|| BeatJudgeError::UnknownSession(session_id.to_string()))?
    };

    let summary = if session.is_complete() {
        session.finish()?
    } else {
        session.cancel()?
    };
    Ok(summary)
}

fn with_session<T>(
    state: &JudgeState,
    session_id: &str,
    f: impl FnOnce(&mut Session) -> BjResult<T>,
) -> BjResult<T> {
    let mut sessions = state.sessions.write().map_err(poisoned)?;
    let session = sessions
        .get_mut(session_id)
        .ok_or_else(|| BeatJudgeError::UnknownSession(session_id.to_string()))?;
    f(session)
}
