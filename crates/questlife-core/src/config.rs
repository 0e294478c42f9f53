//! TOML-based engine configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the standard reward tables and policies. Conventionally stored at
//! `~/.config/questlife/config.toml`.

use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::companion::NudgeSettings;
use crate::error::ConfigError;
use crate::progression::{LevelUpPolicy, PetSettings, StatGains, StreakPolicy};
use crate::quest::RewardTable;
use crate::timer::TimerSettings;

/// Longest accepted nudge cooldown: one year.
pub const MAX_NUDGE_COOLDOWN_SECS: i64 = 366 * 24 * 60 * 60;

/// Largest accepted timer bonus.
pub const MAX_TIMER_BONUS_XP: u32 = 10_000;

/// Leveling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// `xp_to_next = level * xp_per_level`
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u32,
    #[serde(default)]
    pub level_up: LevelUpPolicy,
}

fn default_xp_per_level() -> u32 {
    100
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_per_level: default_xp_per_level(),
            level_up: LevelUpPolicy::default(),
        }
    }
}

/// Streak configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(default)]
    pub policy: StreakPolicy,
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for message selection. Unset means a random seed per session.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Offset used to decide what "today" is. Unset means the system's
    /// local offset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    #[serde(default)]
    pub rewards: RewardTable,
    #[serde(default)]
    pub life_stats: StatGains,
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub pet: PetSettings,
    #[serde(default)]
    pub nudge: NudgeSettings,
    #[serde(default)]
    pub timer: TimerSettings,
}

impl EngineConfig {
    /// Conventional config location: `~/.config/questlife/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("questlife")
            .join("config.toml")
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            toml::from_str(s).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, otherwise the conventional location if it
    /// exists, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let p = Self::default_path();
                if p.exists() {
                    Self::load(&p)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.xp_per_level == 0 {
            return Err(invalid("progression.xp_per_level", "must be greater than zero"));
        }
        if self.timer.default_minutes == 0 {
            return Err(invalid("timer.default_minutes", "must be greater than zero"));
        }
        if !(0..=MAX_NUDGE_COOLDOWN_SECS).contains(&self.nudge.cooldown_secs) {
            return Err(invalid(
                "nudge.cooldown_secs",
                "must be between 0 and 31622400 (one year)",
            ));
        }
        if self.timer.max_bonus_xp > MAX_TIMER_BONUS_XP {
            return Err(invalid("timer.max_bonus_xp", "must be at most 10000"));
        }
        if self.pet.initial_happiness > 100 {
            return Err(invalid("pet.initial_happiness", "must be at most 100"));
        }
        if let Some(minutes) = self.utc_offset_minutes {
            if FixedOffset::east_opt(minutes.saturating_mul(60)).is_none() {
                return Err(invalid(
                    "utc_offset_minutes",
                    "must be strictly between -1440 and 1440",
                ));
            }
        }
        Ok(())
    }

    /// Offset used to compute day boundaries.
    pub fn day_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(|m| FixedOffset::east_opt(m.saturating_mul(60)))
            .unwrap_or_else(|| Local::now().offset().fix())
    }

    /// Look up a value by dotted key, e.g. `rewards.hard.xp`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let root = serde_json::to_value(self).ok()?;
        get_json_value_by_path(&root, key).cloned()
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}
