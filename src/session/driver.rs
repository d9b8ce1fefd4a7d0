//! Runs a session on its own thread, fed through a channel.
//!
//! The recognition pipeline and the playback clock push [`SessionInput`]s;
//! verdicts come back on a second channel in chart order. A rejected input is
//! reported on a third channel and the session keeps running. Dropping every
//! sender (or sending `Cancel`) ends the session and expires what is left.

use super::{Session, SessionSnapshot};
use crate::error::{BeatJudgeError, BjResult, PreconditionViolation};
use crate::judge::{AttemptEvent, SessionSummary, Verdict};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    Tick(f64),
    Attempt(AttemptEvent),
    Cancel,
}

pub struct SessionHandle {
    tx: Sender<SessionInput>,
    verdicts: Receiver<Verdict>,
    rejections: Receiver<PreconditionViolation>,
    snapshot: Arc<RwLock<SessionSnapshot>>,
    worker: JoinHandle<Result<SessionSummary, PreconditionViolation>>,
}

pub fn spawn(session: Session) -> BjResult<SessionHandle> {
    let (tx, rx) = mpsc::channel::<SessionInput>();
    let (verdict_tx, verdict_rx) = mpsc::channel::<Verdict>();
    let (reject_tx, reject_rx) = mpsc::channel::<PreconditionViolation>();
    let snapshot = Arc::new(RwLock::new(session.snapshot()));
    let shared = Arc::clone(&snapshot);
    let name = format!("session-{}", session.song().id());

    let worker = thread::Builder::new()
        .name(name)
        .spawn(move || run(session, rx, verdict_tx, reject_tx, shared))?;

    Ok(SessionHandle {
        tx,
        verdicts: verdict_rx,
        rejections: reject_rx,
        snapshot,
        worker,
    })
}

fn run(
    mut session: Session,
    rx: Receiver<SessionInput>,
    verdict_tx: Sender<Verdict>,
    reject_tx: Sender<PreconditionViolation>,
    snapshot: Arc<RwLock<SessionSnapshot>>,
) -> Result<SessionSummary, PreconditionViolation> {
    while let Ok(input) = rx.recv() {
        let result = match input {
            SessionInput::Tick(now) => session.advance_clock(now),
            SessionInput::Attempt(attempt) => session.submit(attempt),
            SessionInput::Cancel => return finish(session, true, &verdict_tx),
        };

        // The input is dropped; the session and its clock are left as they were.
        let verdicts = match result {
            Ok(verdicts) => verdicts,
            Err(e) => {
                warn!("Session input rejected: {}", e);
                let _ = reject_tx.send(e);
                continue;
            }
        };

        if verdicts.is_empty() {
            continue;
        }
        if let Ok(mut snap) = snapshot.write() {
            *snap = session.snapshot();
        }
        for v in verdicts {
            // The consumer may have stopped listening; judging continues regardless.
            let _ = verdict_tx.send(v);
        }
    }

    finish(session, false, &verdict_tx)
}

fn finish(
    mut session: Session,
    cancelled: bool,
    verdict_tx: &Sender<Verdict>,
) -> Result<SessionSummary, PreconditionViolation> {
    let already = session.state().history.len();
    let summary = if cancelled {
        session.cancel()?
    } else {
        session.finish()?
    };
    for v in summary.verdicts.iter().skip(already) {
        let _ = verdict_tx.send(v.clone());
    }
    Ok(summary)
}

impl SessionHandle {
    pub fn sender(&self) -> Sender<SessionInput> {
        self.tx.clone()
    }

    pub fn send(&self, input: SessionInput) -> Result<(), PreconditionViolation> {
        self.tx
            .send(input)
            .map_err(|_| PreconditionViolation::SessionFinalized)
    }

    pub fn tick(&self, now: f64) -> Result<(), PreconditionViolation> {
        self.send(SessionInput::Tick(now))
    }

    pub fn attempt(&self, spoken_text: &str, timestamp_seconds: f64) -> Result<(), PreconditionViolation> {
        self.send(SessionInput::Attempt(AttemptEvent::new(
            spoken_text,
            timestamp_seconds,
        )))
    }

    pub fn verdicts(&self) -> &Receiver<Verdict> {
        &self.verdicts
    }

    /// Inputs the session refused, in the order they arrived.
    pub fn rejections(&self) -> &Receiver<PreconditionViolation> {
        &self.rejections
    }

    /// Latest snapshot published by the worker.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Closes the input side and waits for the summary. Clones handed out by
    /// [`SessionHandle::sender`] must be dropped first or this blocks.
    pub fn finish(self) -> BjResult<SessionSummary> {
        let SessionHandle { tx, worker, .. } = self;
        drop(tx);
        let result = worker
            .join()
            .map_err(|_| BeatJudgeError::Worker("session thread panicked".to_string()))?;
        Ok(result?)
    }

    /// Sends `Cancel` and waits for the summary.
    pub fn cancel(self) -> BjResult<SessionSummary> {
        let _ = self.tx.send(SessionInput::Cancel);
        self.finish()
    }
}
