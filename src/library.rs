use crate::chart::Song;
use crate::error::{BeatJudgeError, BjResult, ChartValidationError};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownSong {
    HappyVibes,
    DailyRoutine,
    TongueTwister,
    BusinessEnglish,
}

impl KnownSong {
    // Notes are placed by beat; the builder converts with the song's BPM.
    pub fn build(&self) -> Result<Song, ChartValidationError> {
        let id = self.to_string();
        match self {
            Self::HappyVibes => Song::builder(&id, "Happy Vibes")
                .category("Emotions")
                .difficulty_level(1)
                .bpm(120)
                .duration_seconds(150)
                .note_at_beat("happy", "/ˈhæpi/", 8.0, 1)
                .note_at_beat("smile", "/smaɪl/", 12.0, 1)
                .note_at_beat("joy", "/dʒɔɪ/", 16.0, 1)
                .note_at_beat("laugh", "/læf/", 20.0, 1)
                .note_at_beat("friend", "/frend/", 24.0, 1)
                .note_at_beat("love", "/lʌv/", 28.0, 1)
                .note_at_beat("peace", "/piːs/", 32.0, 1)
                .note_at_beat("kind", "/kaɪnd/", 36.0, 1)
                .note_at_beat("bright", "/braɪt/", 40.0, 1)
                .note_at_beat("cheerful", "/ˈtʃɪrfəl/", 44.0, 2)
                .note_at_beat("wonderful", "/ˈwʌndərfəl/", 48.0, 2)
                .note_at_beat("amazing", "/əˈmeɪzɪŋ/", 52.0, 2)
                .note_at_beat("fantastic", "/fænˈtæstɪk/", 56.0, 2)
                .note_at_beat("delightful", "/dɪˈlaɪtfəl/", 60.0, 2)
                .note_at_beat("joyful", "/ˈdʒɔɪfəl/", 64.0, 2)
                .build(),

            Self::DailyRoutine => Song::builder(&id, "Daily Routine")
                .category("Daily Life")
                .difficulty_level(2)
                .bpm(100)
                .duration_seconds(180)
                .note_at_beat("wake", "/weɪk/", 8.0, 1)
                .note_at_beat("breakfast", "/ˈbrekfəst/", 12.0, 2)
                .note_at_beat("shower", "/ˈʃaʊər/", 16.0, 1)
                .note_at_beat("dress", "/dres/", 20.0, 1)
                .note_at_beat("commute", "/kəˈmjuːt/", 24.0, 2)
                .note_at_beat("work", "/wɜːrk/", 28.0, 1)
                .note_at_beat("lunch", "/lʌntʃ/", 32.0, 1)
                .note_at_beat("meeting", "/ˈmiːtɪŋ/", 36.0, 1)
                .note_at_beat("exercise", "/ˈeksərsaɪz/", 40.0, 2)
                .note_at_beat("dinner", "/ˈdɪnər/", 44.0, 1)
                .note_at_beat("relax", "/rɪˈlæks/", 48.0, 1)
                .note_at_beat("sleep", "/sliːp/", 52.0, 1)
                .build(),

            // Fast and locked until unlocked by progression.
            Self::TongueTwister => Song::builder(&id, "Tongue Twister Challenge")
                .category("Challenge")
                .difficulty_level(5)
                .bpm(180)
                .duration_seconds(120)
                .locked()
                .note_at_beat("she", "/ʃiː/", 10.0, 1)
                .note_at_beat("sells", "/selz/", 11.0, 2)
                .note_at_beat("seashells", "/ˈsiːʃelz/", 12.0, 3)
                .note_at_beat("seashore", "/ˈsiːʃɔːr/", 14.0, 3)
                .note_at_beat("peter", "/ˈpiːtər/", 18.0, 1)
                .note_at_beat("piper", "/ˈpaɪpər/", 19.0, 2)
                .note_at_beat("picked", "/pɪkt/", 20.0, 2)
                .note_at_beat("peppers", "/ˈpepərz/", 21.0, 2)
                .note_at_beat("woodchuck", "/ˈwʊdtʃʌk/", 24.0, 3)
                .note_at_beat("chuck", "/tʃʌk/", 25.0, 2)
                .note_at_beat("wood", "/wʊd/", 26.0, 1)
                .build(),

            Self::BusinessEnglish => Song::builder(&id, "Business English")
                .category("Professional")
                .difficulty_level(3)
                .bpm(110)
                .duration_seconds(200)
                .note_at_beat("meeting", "/ˈmiːtɪŋ/", 8.0, 1)
                .note_at_beat("presentation", "/ˌprezənˈteɪʃən/", 12.0, 3)
                .note_at_beat("deadline", "/ˈdedlaɪn/", 16.0, 2)
                .note_at_beat("project", "/ˈprɑːdʒekt/", 20.0, 2)
                .note_at_beat("budget", "/ˈbʌdʒɪt/", 24.0, 2)
                .note_at_beat("strategy", "/ˈstrætədʒi/", 28.0, 2)
                .note_at_beat("revenue", "/ˈrevənuː/", 32.0, 2)
                .note_at_beat("profit", "/ˈprɑːfɪt/", 36.0, 2)
                .note_at_beat("investment", "/ɪnˈvestmənt/", 40.0, 3)
                .note_at_beat("stakeholder", "/ˈsteɪkhoʊldər/", 44.0, 3)
                .note_at_beat("collaboration", "/kəˌlæbəˈreɪʃən/", 48.0, 3)
                .note_at_beat("productivity", "/ˌproʊdʌkˈtɪvəti/", 52.0, 3)
                .build(),
        }
    }
}

pub fn get_all_songs() -> BjResult<Vec<Song>> {
    KnownSong::iter()
        .map(|s| s.build().map_err(BeatJudgeError::from))
        .collect()
}

pub fn get_song_by_id(id: &str) -> BjResult<Song> {
    let known =
        KnownSong::from_str(id).map_err(|_| BeatJudgeError::UnknownSong(id.to_string()))?;
    Ok(known.build()?)
}
