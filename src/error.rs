use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeatJudgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chart Validation Error: {0}")]
    Chart(#[from] ChartValidationError),

    #[error("Precondition Violation: {0}")]
    Precondition(#[from] PreconditionViolation),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Unknown song '{0}'")]
    UnknownSong(String),

    #[error("Session '{0}' not found. Start it first.")]
    UnknownSession(String),

    #[error("Session worker failed: {0}")]
    Worker(String),
}

/// Reasons a chart is rejected at load time. No partially-loaded chart is ever usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartValidationError {
    #[error("song '{song_id}' has no notes")]
    NoNotes { song_id: String },

    #[error(
        "note {index} ('{note_id}') at {current}s is not after the previous note at {previous}s"
    )]
    NotStrictlyIncreasing {
        index: usize,
        note_id: String,
        previous: f64,
        current: f64,
    },

    #[error("duplicate note id '{0}'")]
    DuplicateNoteId(String),

    #[error("note '{note_id}' has difficulty tier {tier}, expected 1..=3")]
    TierOutOfRange { note_id: String, tier: u8 },

    #[error("song '{song_id}' has difficulty level {level}, expected 1..=5")]
    LevelOutOfRange { song_id: String, level: u8 },

    #[error("note '{note_id}' has invalid target time {time}")]
    InvalidTargetTime { note_id: String, time: f64 },

    #[error("note '{note_id}' needs either targetTimeSeconds or beat")]
    MissingTargetTime { note_id: String },

    #[error("song '{song_id}' has bpm 0 but positions notes by beat")]
    InvalidBpm { song_id: String },
}

/// Caller-contract violations. These are reported, never silently absorbed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreconditionViolation {
    #[error("time went backwards: observed {timestamp}s after clock reached {clock}s")]
    OutOfOrder { timestamp: f64, clock: f64 },

    #[error("session is already finalized")]
    SessionFinalized,
}

pub type BjResult<T> = Result<T, BeatJudgeError>;
