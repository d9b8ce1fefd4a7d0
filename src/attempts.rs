//! Recorded attempt logs: CSV with a `timestamp_seconds,spoken_text` header.

use crate::error::BjResult;
use crate::judge::AttemptEvent;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct AttemptRecord {
    timestamp_seconds: f64,
    #[serde(default)]
    spoken_text: String,
}

pub fn load_attempt_log<R: Read>(reader: R) -> BjResult<Vec<AttemptEvent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut attempts = Vec::new();
    let mut skipped_count = 0;

    for (row_idx, result) in rdr.deserialize::<AttemptRecord>().enumerate() {
        match result {
            Ok(rec) => attempts.push(AttemptEvent {
                spoken_text: rec.spoken_text,
                timestamp_seconds: rec.timestamp_seconds,
            }),
            Err(e) => {
                skipped_count += 1;
                debug!("   [Row {}] Attempt log parse error: {}", row_idx + 1, e);
            }
        }
    }

    if skipped_count > 0 {
        warn!("⚠️  Skipped {} invalid rows in attempt log.", skipped_count);
    }

    Ok(attempts)
}

pub fn load_attempt_log_file<P: AsRef<Path>>(path: P) -> BjResult<Vec<AttemptEvent>> {
    let file = File::open(path)?;
    load_attempt_log(file)
}

pub fn write_attempt_log<W: Write>(writer: W, attempts: &[AttemptEvent]) -> BjResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["timestamp_seconds", "spoken_text"])?;
    for a in attempts {
        // Shortest round-trip form, so a replay sees the exact same timestamps.
        wtr.write_record([a.timestamp_seconds.to_string(), a.spoken_text.clone()])?;
    }
    wtr.flush()?;
    Ok(())
}
