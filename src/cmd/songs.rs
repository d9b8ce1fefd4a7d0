use crate::reports;
use beatjudge::error::BjResult;
use beatjudge::library::get_all_songs;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct SongsArgs {
    /// Hide locked songs.
    #[arg(long, default_value_t = false)]
    pub unlocked_only: bool,
}

pub fn run(args: SongsArgs) -> BjResult<()> {
    let songs: Vec<_> = get_all_songs()?
        .into_iter()
        .filter(|s| !args.unlocked_only || s.is_unlocked())
        .collect();

    println!("\n🎶 === SONG LIBRARY === 🎶");
    reports::print_song_table(&songs);
    Ok(())
}
