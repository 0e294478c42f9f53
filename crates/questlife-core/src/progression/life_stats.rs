//! Mind / body / spirit stats grown by quest completions.

use serde::{Deserialize, Serialize};

use crate::quest::{Category, Difficulty};

/// Upper bound of every life stat.
pub const MAX_STAT: u8 = 100;

/// Stat axis a category feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatAxis {
    Mind,
    Body,
    Spirit,
}

impl StatAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatAxis::Mind => "mind",
            StatAxis::Body => "body",
            StatAxis::Spirit => "spirit",
        }
    }
}

impl From<Category> for StatAxis {
    fn from(category: Category) -> Self {
        match category {
            Category::Learning | Category::Work => StatAxis::Mind,
            Category::Health => StatAxis::Body,
            Category::Personal | Category::Social => StatAxis::Spirit,
        }
    }
}

/// Per-difficulty stat gain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatGains {
    #[serde(default = "default_easy_gain")]
    pub easy: u8,
    #[serde(default = "default_medium_gain")]
    pub medium: u8,
    #[serde(default = "default_hard_gain")]
    pub hard: u8,
}

fn default_easy_gain() -> u8 {
    2
}
fn default_medium_gain() -> u8 {
    3
}
fn default_hard_gain() -> u8 {
    5
}

impl StatGains {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> u8 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for StatGains {
    fn default() -> Self {
        Self {
            easy: default_easy_gain(),
            medium: default_medium_gain(),
            hard: default_hard_gain(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeStats {
    pub mind: u8,
    pub body: u8,
    pub spirit: u8,
}

impl LifeStats {
    pub fn get(&self, axis: StatAxis) -> u8 {
        match axis {
            StatAxis::Mind => self.mind,
            StatAxis::Body => self.body,
            StatAxis::Spirit => self.spirit,
        }
    }

    /// Grow the stat mapped from `category`, clamped at [`MAX_STAT`].
    pub fn apply_completion(
        &self,
        category: Category,
        difficulty: Difficulty,
        gains: &StatGains,
    ) -> LifeStats {
        let mut next = *self;
        let delta = gains.for_difficulty(difficulty);
        let slot = match StatAxis::from(category) {
            StatAxis::Mind => &mut next.mind,
            StatAxis::Body => &mut next.body,
            StatAxis::Spirit => &mut next.spirit,
        };
        *slot = slot.saturating_add(delta).min(MAX_STAT);
        next
    }
}
