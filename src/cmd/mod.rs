pub mod replay;
pub mod score;
pub mod simulate;
pub mod songs;

use beatjudge::chart::Song;
use beatjudge::error::{BeatJudgeError, BjResult};
use beatjudge::library;
use clap::Args;
use std::sync::Arc;
use tracing::info;

/// Where the chart comes from: the built-in library or a JSON file.
#[derive(Args, Debug, Clone)]
pub struct SongSource {
    #[arg(short, long, conflicts_with = "chart")]
    pub song: Option<String>,

    #[arg(long)]
    pub chart: Option<String>,
}

impl SongSource {
    pub fn resolve(&self) -> BjResult<Arc<Song>> {
        let song = match (&self.song, &self.chart) {
            (_, Some(path)) => Song::load_from_file(path)?,
            (Some(id), None) => {
                info!("🎵 Using library song '{}'", id);
                library::get_song_by_id(id)?
            }
            (None, None) => {
                return Err(BeatJudgeError::Config(
                    "pass --song <id> or --chart <file>".to_string(),
                ))
            }
        };
        Ok(Arc::new(song))
    }
}
