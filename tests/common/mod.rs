#![allow(dead_code)]

use beatjudge::chart::{Note, Song};
use std::sync::Arc;

/// Three notes, 1 s apart starting at 2 s, so windows never overlap.
pub fn three_note_song() -> Arc<Song> {
    Arc::new(
        Song::builder("test_song", "Test Song")
            .category("Test")
            .bpm(60)
            .duration_seconds(10)
            .note("hello", "/həˈloʊ/", 2.0, 1)
            .note("world", "/wɜːrld/", 3.0, 2)
            .note("seashells", "/ˈsiːʃelz/", 4.0, 3)
            .build()
            .unwrap(),
    )
}

pub fn note(word: &str, tier: u8) -> Note {
    Note {
        id: format!("n-{}", word),
        word: word.to_string(),
        phonetic: String::new(),
        target_time_seconds: 0.0,
        difficulty_tier: tier,
        definition: None,
        hint: None,
    }
}
