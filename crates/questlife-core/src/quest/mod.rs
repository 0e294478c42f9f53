//! Quest types and the in-memory quest repository.
//!
//! A quest is created with rewards fixed by its difficulty and transitions
//! to completed exactly once. Quests are never deleted.

mod book;
mod rewards;

pub use book::QuestBook;
pub use rewards::{Reward, RewardTable};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Opaque quest identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(String);

impl QuestId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QuestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Quest difficulty. Determines rewards and life-stat gains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ValidationError::invalid(
                "difficulty",
                format!("unknown difficulty '{other}' (expected easy, medium or hard)"),
            )),
        }
    }
}

/// Life area a quest belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Personal,
    Work,
    Health,
    Learning,
    Social,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Health,
        Category::Learning,
        Category::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Health => "Health",
            Category::Learning => "Learning",
            Category::Social => "Social",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Personal
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "category",
                    format!(
                        "unknown category '{wanted}' (expected Personal, Work, Health, Learning or Social)"
                    ),
                )
            })
    }
}

/// User input for a new quest, before rewards and id are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: Category,
    /// Fixed reward. Unset means priced from the reward table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<Reward>,
}

impl QuestDraft {
    pub fn new(title: impl Into<String>, difficulty: Difficulty, category: Category) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            difficulty,
            category,
            reward: None,
        }
    }

    pub fn with_reward(mut self, xp: u32, gold: u32) -> Self {
        self.reward = Some(Reward { xp, gold });
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A user-defined task with a fixed reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub xp_reward: u32,
    pub gold_reward: u32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    /// Build a quest from a draft, pricing it with `rewards` unless the
    /// draft carries its own reward.
    ///
    /// The title is trimmed; an empty title is rejected.
    pub fn from_draft(
        draft: QuestDraft,
        rewards: &RewardTable,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let reward = draft
            .reward
            .unwrap_or_else(|| rewards.for_difficulty(draft.difficulty));
        Ok(Self {
            id: QuestId::generate(),
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            category: draft.category,
            difficulty: draft.difficulty,
            xp_reward: reward.xp,
            gold_reward: reward.gold,
            completed: false,
            created_at: now,
            completed_at: None,
        })
    }

    /// True if the quest was completed on `day` in the given offset.
    pub fn completed_on(&self, day: NaiveDate, offset: &chrono::FixedOffset) -> bool {
        self.completed_at
            .map(|at| at.with_timezone(offset).date_naive() == day)
            .unwrap_or(false)
    }
}

/// The four quests a fresh board starts with.
pub fn starter_quests() -> Vec<QuestDraft> {
    vec![
        QuestDraft::new("Complete Morning Workout", Difficulty::Medium, Category::Health)
            .with_description("Do 30 minutes of exercise to start the day right"),
        QuestDraft::new("Read for 20 Minutes", Difficulty::Easy, Category::Learning)
            .with_description("Read a book or educational article")
            .with_reward(15, 5),
        QuestDraft::new("Complete Project Milestone", Difficulty::Hard, Category::Work)
            .with_description("Finish the next major feature for your current project"),
        QuestDraft::new("Drink 8 Glasses of Water", Difficulty::Easy, Category::Health)
            .with_description("Stay hydrated throughout the day"),
    ]
}
