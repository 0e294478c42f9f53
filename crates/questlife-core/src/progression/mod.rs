//! Reward and progression state: levels, gold, life stats, streak, pet and
//! achievements. Every transition here is a pure function of the previous
//! value and returns the next one.

mod achievements;
mod leveling;
mod life_stats;
mod pet;
mod streak;

pub use achievements::{default_achievements, evaluate, Achievement, AchievementId, Progress};
pub use leveling::{GameState, LevelUp, LevelUpPolicy};
pub use life_stats::{LifeStats, StatAxis, StatGains, MAX_STAT};
pub use pet::{PetMood, PetSettings, PetState};
pub use streak::{StreakChange, StreakPolicy, StreakState};
