use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::companion::Companion;
use crate::mood::Mood;
use crate::progression::{AchievementId, StatAxis, StreakChange};
use crate::quest::{Difficulty, QuestId};

/// Every state change in the system produces an Event.
/// The display layer renders from snapshots and uses events for feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    QuestAdded {
        quest_id: QuestId,
        title: String,
        difficulty: Difficulty,
        xp_reward: u32,
        gold_reward: u32,
        at: DateTime<Utc>,
    },
    QuestCompleted {
        quest_id: QuestId,
        /// Quest XP plus bonus.
        xp_gained: u32,
        bonus_xp: u32,
        gold_gained: u32,
        at: DateTime<Utc>,
    },
    LevelUp {
        from: u32,
        to: u32,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        current_streak: u32,
        longest_streak: u32,
        change: StreakChange,
        at: DateTime<Utc>,
    },
    LifeStatRaised {
        axis: StatAxis,
        value: u8,
        at: DateTime<Utc>,
    },
    PetFed {
        happiness: u8,
        level: u32,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        achievement: AchievementId,
        title: String,
        at: DateTime<Utc>,
    },
    MoodSelected {
        mood: Mood,
        suggestions: Vec<String>,
        at: DateTime<Utc>,
    },
    CompanionSelected {
        companion: Companion,
        at: DateTime<Utc>,
    },
    NudgeDismissed {
        until: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    TimerStarted {
        quest_id: QuestId,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        quest_id: QuestId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        quest_id: QuestId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        quest_id: QuestId,
        at: DateTime<Utc>,
    },
    TimerExpired {
        quest_id: QuestId,
        at: DateTime<Utc>,
    },
    /// Timer dropped because its quest was completed.
    TimerCancelled {
        quest_id: QuestId,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short machine-friendly name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::QuestAdded { .. } => "quest_added",
            Event::QuestCompleted { .. } => "quest_completed",
            Event::LevelUp { .. } => "level_up",
            Event::StreakUpdated { .. } => "streak_updated",
            Event::LifeStatRaised { .. } => "life_stat_raised",
            Event::PetFed { .. } => "pet_fed",
            Event::AchievementUnlocked { .. } => "achievement_unlocked",
            Event::MoodSelected { .. } => "mood_selected",
            Event::CompanionSelected { .. } => "companion_selected",
            Event::NudgeDismissed { .. } => "nudge_dismissed",
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerResumed { .. } => "timer_resumed",
            Event::TimerReset { .. } => "timer_reset",
            Event::TimerExpired { .. } => "timer_expired",
            Event::TimerCancelled { .. } => "timer_cancelled",
        }
    }
}
