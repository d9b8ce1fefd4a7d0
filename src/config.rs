use crate::error::{BeatJudgeError, BjResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JudgeConfig {
    #[command(flatten)]
    pub windows: TimingWindows,
    #[command(flatten)]
    pub scoring: ScoringRules,
}

/// Inclusive upper bounds of each timing tier, in milliseconds.
/// The GOOD bound doubles as the active matching window of a note.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingWindows {
    #[arg(long, default_value_t = 50.0)]
    pub perfect_window_ms: f64,
    #[arg(long, default_value_t = 150.0)]
    pub great_window_ms: f64,
    #[arg(long, default_value_t = 300.0)]
    pub good_window_ms: f64,
}

impl Default for TimingWindows {
    fn default() -> Self {
        Self {
            perfect_window_ms: 50.0,
            great_window_ms: 150.0,
            good_window_ms: 300.0,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    // === GATE ===
    // Below this pronunciation accuracy every attempt is a MISS.
    #[arg(long, default_value_t = 70.0)]
    pub accuracy_gate: f64,

    // === BASE ===
    #[arg(long, default_value_t = 100)]
    pub perfect_base: u32,
    #[arg(long, default_value_t = 80)]
    pub great_base: u32,
    #[arg(long, default_value_t = 60)]
    pub good_base: u32,

    // === MULTIPLIERS ===
    // Percentages keep the floor exact: 30 -> accuracy * 0.3, 20 -> 1.0 + 0.2 * tier.
    #[arg(long, default_value_t = 30)]
    pub pronunciation_bonus_percent: u32,
    #[arg(long, default_value_t = 20)]
    pub difficulty_step_percent: u32,
    #[arg(long, default_value_t = 10)]
    pub combo_cap: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            accuracy_gate: 70.0,
            perfect_base: 100,
            great_base: 80,
            good_base: 60,
            pronunciation_bonus_percent: 30,
            difficulty_step_percent: 20,
            combo_cap: 10,
        }
    }
}

impl JudgeConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BjResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BjResult<()> {
        let w = &self.windows;
        let ordered = w.perfect_window_ms > 0.0
            && w.perfect_window_ms < w.great_window_ms
            && w.great_window_ms < w.good_window_ms
            && w.good_window_ms.is_finite();
        if !ordered {
            return Err(BeatJudgeError::Config(format!(
                "timing windows must be positive and strictly increasing, got {} / {} / {}",
                w.perfect_window_ms, w.great_window_ms, w.good_window_ms
            )));
        }

        if !(0.0..=100.0).contains(&self.scoring.accuracy_gate) {
            return Err(BeatJudgeError::Config(format!(
                "accuracy gate {} is outside 0..=100",
                self.scoring.accuracy_gate
            )));
        }

        if self.scoring.combo_cap == 0 {
            return Err(BeatJudgeError::Config(
                "combo cap must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Overlays only the values the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &JudgeConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(windows.perfect_window_ms, "perfect_window_ms");
        update_if_present!(windows.great_window_ms, "great_window_ms");
        update_if_present!(windows.good_window_ms, "good_window_ms");

        update_if_present!(scoring.accuracy_gate, "accuracy_gate");
        update_if_present!(scoring.perfect_base, "perfect_base");
        update_if_present!(scoring.great_base, "great_base");
        update_if_present!(scoring.good_base, "good_base");
        update_if_present!(
            scoring.pronunciation_bonus_percent,
            "pronunciation_bonus_percent"
        );
        update_if_present!(scoring.difficulty_step_percent, "difficulty_step_percent");
        update_if_present!(scoring.combo_cap, "combo_cap");
    }
}
