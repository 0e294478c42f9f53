//! Achievement definitions and unlock checks.
//!
//! The achievement set is fixed when a session starts. Only `unlocked` and
//! `unlocked_at` ever change, and only from locked to unlocked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstSteps,
    QuestMaster,
    LevelUp,
    GoldCollector,
}

impl AchievementId {
    pub const ALL: [AchievementId; 4] = [
        AchievementId::FirstSteps,
        AchievementId::QuestMaster,
        AchievementId::LevelUp,
        AchievementId::GoldCollector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSteps => "first_steps",
            Self::QuestMaster => "quest_master",
            Self::LevelUp => "level_up",
            Self::GoldCollector => "gold_collector",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FirstSteps => "First Steps",
            Self::QuestMaster => "Quest Master",
            Self::LevelUp => "Level Up!",
            Self::GoldCollector => "Gold Collector",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstSteps => "Complete your first quest",
            Self::QuestMaster => "Complete 10 quests",
            Self::LevelUp => "Reach level 2",
            Self::GoldCollector => "Earn 100 gold",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::FirstSteps => "trophy",
            Self::QuestMaster => "medal",
            Self::LevelUp => "crown",
            Self::GoldCollector => "trophy",
        }
    }

    /// Unlock rule, checked against post-completion progress.
    pub fn is_earned(&self, progress: &Progress) -> bool {
        match self {
            Self::FirstSteps => progress.completed_quests >= 1,
            Self::QuestMaster => progress.completed_quests >= 10,
            Self::LevelUp => progress.level >= 2,
            Self::GoldCollector => progress.gold >= 100,
        }
    }
}

/// Counters the unlock rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed_quests: usize,
    pub gold: u32,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    pub fn locked(id: AchievementId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            description: id.description().to_string(),
            icon: id.icon().to_string(),
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// The fixed achievement set, all locked.
pub fn default_achievements() -> Vec<Achievement> {
    AchievementId::ALL.into_iter().map(Achievement::locked).collect()
}

/// Unlock every locked achievement whose rule now holds.
///
/// Returns the updated set and the ids unlocked by this call.
pub fn evaluate(
    achievements: &[Achievement],
    progress: &Progress,
    now: DateTime<Utc>,
) -> (Vec<Achievement>, Vec<AchievementId>) {
    let mut newly_unlocked = Vec::new();

    let updated = achievements
        .iter()
        .map(|achievement| {
            if achievement.unlocked || !achievement.id.is_earned(progress) {
                return achievement.clone();
            }
            newly_unlocked.push(achievement.id);
            Achievement {
                unlocked: true,
                unlocked_at: Some(now),
                ..achievement.clone()
            }
        })
        .collect();

    (updated, newly_unlocked)
}
