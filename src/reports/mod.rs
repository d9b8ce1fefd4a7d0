use beatjudge::chart::Song;
use beatjudge::judge::{Rank, Rating, SessionSummary, Verdict};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Perfect => Color::Yellow,
        Rating::Great => Color::Green,
        Rating::Good => Color::DarkYellow,
        Rating::Miss => Color::Red,
    }
}

fn rank_color(rank: Rank) -> Color {
    match rank {
        Rank::S => Color::Yellow,
        Rank::A => Color::Green,
        Rank::B => Color::Cyan,
        Rank::C => Color::White,
        Rank::D => Color::Red,
    }
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_song_table(songs: &[Song]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id").add_attribute(Attribute::Bold),
            Cell::new("Title"),
            Cell::new("Category"),
            Cell::new("Level"),
            Cell::new("BPM"),
            Cell::new("Length"),
            Cell::new("Words"),
            Cell::new("Unlocked"),
        ]);

    for song in songs {
        let unlocked = if song.is_unlocked() {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("locked").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(song.id()).add_attribute(Attribute::Bold),
            Cell::new(song.title()),
            Cell::new(song.category()),
            Cell::new("★".repeat(song.difficulty_level() as usize)),
            Cell::new(song.bpm()),
            Cell::new(format!(
                "{}:{:02}",
                song.duration_seconds() / 60,
                song.duration_seconds() % 60
            )),
            Cell::new(song.total_words()),
            unlocked,
        ]);
    }
    align_right(&mut table, 4..=6);
    println!("\n{}", table);
}

pub fn print_verdict_table(title: &str, verdicts: &[Verdict]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Note").add_attribute(Attribute::Bold),
            Cell::new("Word"),
            Cell::new("Heard"),
            Cell::new("Rating"),
            Cell::new("Pron %"),
            Cell::new("Timing %"),
            Cell::new("Δ ms"),
            Cell::new("Score").add_attribute(Attribute::Bold),
        ]);

    for v in verdicts {
        table.add_row(vec![
            Cell::new(&v.note_id),
            Cell::new(&v.word),
            Cell::new(v.spoken_text.as_deref().unwrap_or("-")),
            Cell::new(v.rating).fg(rating_color(v.rating)),
            Cell::new(format!("{:.1}", v.pronunciation_accuracy)),
            Cell::new(format!("{:.0}", v.timing_accuracy)),
            Cell::new(format!("{:.0}", v.timing_diff_ms)),
            Cell::new(v.score).add_attribute(Attribute::Bold),
        ]);
    }
    align_right(&mut table, 4..=7);

    println!("\n=== {} ===", title);
    println!("{}", table);
}

pub fn print_summary_table(results: &[(String, SessionSummary)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Run").add_attribute(Attribute::Bold),
            Cell::new("Song"),
            Cell::new("Score").fg(Color::Cyan),
            Cell::new("Max Combo"),
            Cell::new("Accuracy"),
            Cell::new("Hit %"),
            Cell::new("P/G/G/M"),
            Cell::new("Rank").add_attribute(Attribute::Bold),
        ]);

    for (name, s) in results {
        let c = &s.counts;
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(&s.song_id),
            Cell::new(s.total_score).fg(Color::Cyan),
            Cell::new(s.max_combo),
            Cell::new(format!("{:.1}", s.average_accuracy)),
            Cell::new(format!("{:.1}", s.hit_rate)),
            Cell::new(format!("{}/{}/{}/{}", c.perfect, c.great, c.good, c.miss)),
            Cell::new(s.rank)
                .fg(rank_color(s.rank))
                .add_attribute(Attribute::Bold),
        ]);
    }
    align_right(&mut table, 2..=5);
    println!("\n{}", table);
}
