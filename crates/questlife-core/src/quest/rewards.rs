use serde::{Deserialize, Serialize};

use super::Difficulty;

/// XP and gold granted for completing a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub gold: u32,
}

/// Difficulty → reward table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    #[serde(default = "default_easy")]
    pub easy: Reward,
    #[serde(default = "default_medium")]
    pub medium: Reward,
    #[serde(default = "default_hard")]
    pub hard: Reward,
}

fn default_easy() -> Reward {
    Reward { xp: 10, gold: 3 }
}
fn default_medium() -> Reward {
    Reward { xp: 25, gold: 10 }
}
fn default_hard() -> Reward {
    Reward { xp: 50, gold: 25 }
}

impl RewardTable {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> Reward {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            easy: default_easy(),
            medium: default_medium(),
            hard: default_hard(),
        }
    }
}
