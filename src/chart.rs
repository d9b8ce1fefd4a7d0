use crate::error::{BjResult, ChartValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const MIN_TIER: u8 = 1;
pub const MAX_TIER: u8 = 3;
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// One scheduled target word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub word: String,
    pub phonetic: String,
    pub target_time_seconds: f64,
    pub difficulty_tier: u8, // 1=easy, 2=medium, 3=hard word
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A validated chart. Only reachable through [`ChartFile::into_song`] (directly,
/// via [`SongBuilder`] or via the loaders), so the note invariants always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    id: String,
    title: String,
    category: String,
    difficulty_level: u8,
    bpm: u32,
    duration_seconds: u32,
    notes: Vec<Note>,
    unlocked: bool,
}

impl Song {
    pub fn builder(id: &str, title: &str) -> SongBuilder {
        SongBuilder::new(id, title)
    }

    pub fn from_json(content: &str) -> BjResult<Self> {
        let chart: ChartFile = serde_json::from_str(content)?;
        Ok(chart.into_song()?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BjResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let song = Self::from_json(&content)?;
        info!(
            "🎵 Loaded chart '{}' from {:?} ({} notes)",
            song.id,
            path,
            song.total_words()
        );
        Ok(song)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty_level(&self) -> u8 {
        self.difficulty_level
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn total_words(&self) -> usize {
        self.notes.len()
    }

    /// Notes whose target time lies in `[start, end]` seconds.
    pub fn notes_in_range(&self, start_seconds: f64, end_seconds: f64) -> &[Note] {
        let lo = self
            .notes
            .partition_point(|n| n.target_time_seconds < start_seconds);
        let hi = self
            .notes
            .partition_point(|n| n.target_time_seconds <= end_seconds);
        if lo >= hi {
            &[]
        } else {
            &self.notes[lo..hi]
        }
    }

    /// Time of the last note, or the declared duration if that is later.
    pub fn end_time_seconds(&self) -> f64 {
        let last = self
            .notes
            .last()
            .map(|n| n.target_time_seconds)
            .unwrap_or(0.0);
        last.max(self.duration_seconds as f64)
    }

    pub fn beat_to_seconds(&self, beat: f64) -> f64 {
        beat_to_seconds(self.bpm, beat)
    }
}

pub fn beat_to_seconds(bpm: u32, beat: f64) -> f64 {
    beat * 60.0 / bpm as f64
}

// === CHART FILE FORMAT ===

fn default_level() -> u8 {
    MIN_LEVEL
}

fn default_tier() -> u8 {
    MIN_TIER
}

fn default_unlocked() -> bool {
    true
}

/// Unvalidated chart as supplied by a content library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFile {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_level")]
    pub difficulty_level: u8,
    #[serde(default)]
    pub bpm: u32,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default = "default_unlocked")]
    pub unlocked: bool,
    pub notes: Vec<ChartNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartNote {
    #[serde(default)]
    pub id: Option<String>,
    pub word: String,
    #[serde(default)]
    pub phonetic: String,
    // Exactly one of these positions the note; an explicit time wins.
    #[serde(default)]
    pub target_time_seconds: Option<f64>,
    #[serde(default)]
    pub beat: Option<f64>,
    #[serde(default = "default_tier")]
    pub difficulty_tier: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ChartFile {
    pub fn into_song(self) -> Result<Song, ChartValidationError> {
        if self.notes.is_empty() {
            return Err(ChartValidationError::NoNotes { song_id: self.id });
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.difficulty_level) {
            return Err(ChartValidationError::LevelOutOfRange {
                song_id: self.id,
                level: self.difficulty_level,
            });
        }

        let mut notes = Vec::with_capacity(self.notes.len());
        let mut seen = HashSet::new();

        for (i, raw) in self.notes.into_iter().enumerate() {
            let id = raw
                .id
                .unwrap_or_else(|| format!("{}-{:02}", self.id, i + 1));

            let time = match (raw.target_time_seconds, raw.beat) {
                (Some(t), _) => t,
                (None, Some(beat)) => {
                    if self.bpm == 0 {
                        return Err(ChartValidationError::InvalidBpm { song_id: self.id });
                    }
                    beat_to_seconds(self.bpm, beat)
                }
                (None, None) => {
                    return Err(ChartValidationError::MissingTargetTime { note_id: id });
                }
            };

            if !time.is_finite() || time < 0.0 {
                return Err(ChartValidationError::InvalidTargetTime { note_id: id, time });
            }
            if !(MIN_TIER..=MAX_TIER).contains(&raw.difficulty_tier) {
                return Err(ChartValidationError::TierOutOfRange {
                    note_id: id,
                    tier: raw.difficulty_tier,
                });
            }
            if !seen.insert(id.clone()) {
                return Err(ChartValidationError::DuplicateNoteId(id));
            }
            if let Some(prev) = notes.last().map(|n: &Note| n.target_time_seconds) {
                if time <= prev {
                    return Err(ChartValidationError::NotStrictlyIncreasing {
                        index: i,
                        note_id: id,
                        previous: prev,
                        current: time,
                    });
                }
            }

            notes.push(Note {
                id,
                word: raw.word,
                phonetic: raw.phonetic,
                target_time_seconds: time,
                difficulty_tier: raw.difficulty_tier,
                definition: raw.definition,
                hint: raw.hint,
            });
        }

        debug!("Chart '{}' validated with {} notes", self.id, notes.len());

        Ok(Song {
            id: self.id,
            title: self.title,
            category: self.category,
            difficulty_level: self.difficulty_level,
            bpm: self.bpm,
            duration_seconds: self.duration_seconds,
            notes,
            unlocked: self.unlocked,
        })
    }
}

// === BUILDER ===

pub struct SongBuilder {
    chart: ChartFile,
}

impl SongBuilder {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            chart: ChartFile {
                id: id.to_string(),
                title: title.to_string(),
                category: String::new(),
                difficulty_level: MIN_LEVEL,
                bpm: 0,
                duration_seconds: 0,
                unlocked: true,
                notes: Vec::new(),
            },
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.chart.category = category.to_string();
        self
    }

    pub fn difficulty_level(mut self, level: u8) -> Self {
        self.chart.difficulty_level = level;
        self
    }

    pub fn bpm(mut self, bpm: u32) -> Self {
        self.chart.bpm = bpm;
        self
    }

    pub fn duration_seconds(mut self, seconds: u32) -> Self {
        self.chart.duration_seconds = seconds;
        self
    }

    pub fn locked(mut self) -> Self {
        self.chart.unlocked = false;
        self
    }

    /// Adds a note at an absolute time in seconds.
    pub fn note(mut self, word: &str, phonetic: &str, seconds: f64, tier: u8) -> Self {
        self.chart.notes.push(ChartNote {
            id: None,
            word: word.to_string(),
            phonetic: phonetic.to_string(),
            target_time_seconds: Some(seconds),
            beat: None,
            difficulty_tier: tier,
            definition: None,
            hint: None,
        });
        self
    }

    /// Adds a note positioned by beat; converted with the song's BPM at build time.
    pub fn note_at_beat(mut self, word: &str, phonetic: &str, beat: f64, tier: u8) -> Self {
        self.chart.notes.push(ChartNote {
            id: None,
            word: word.to_string(),
            phonetic: phonetic.to_string(),
            target_time_seconds: None,
            beat: Some(beat),
            difficulty_tier: tier,
            definition: None,
            hint: None,
        });
        self
    }

    pub fn note_with_id(
        mut self,
        id: &str,
        word: &str,
        seconds: f64,
        tier: u8,
    ) -> Self {
        self.chart.notes.push(ChartNote {
            id: Some(id.to_string()),
            word: word.to_string(),
            phonetic: String::new(),
            target_time_seconds: Some(seconds),
            beat: None,
            difficulty_tier: tier,
            definition: None,
            hint: None,
        });
        self
    }

    pub fn build(self) -> Result<Song, ChartValidationError> {
        self.chart.into_song()
    }
}
