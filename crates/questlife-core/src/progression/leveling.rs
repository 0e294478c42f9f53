//! Experience, level and gold transition.
//!
//! ```text
//! new_xp = xp + quest_xp + bonus
//! new_xp >= xp_to_next  ->  level + 1, xp_to_next = level * xp_per_level,
//!                           xp = new_xp - old xp_to_next
//! ```
//!
//! By default at most one level is gained per completion. `Carry` keeps
//! levelling while the residual still meets the new threshold.

use serde::{Deserialize, Serialize};

/// How an XP gain that spans several level boundaries is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelUpPolicy {
    /// One level per completion; the residual is not re-checked.
    SingleStep,
    /// Repeat the level-up while the residual reaches the threshold.
    Carry,
}

impl Default for LevelUpPolicy {
    fn default() -> Self {
        LevelUpPolicy::SingleStep
    }
}

/// Level change produced by a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

/// Player progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub gold: u32,
}

impl GameState {
    pub fn new(xp_per_level: u32) -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: xp_per_level,
            gold: 0,
        }
    }

    /// 0.0 .. 100.0 progress towards the next level.
    pub fn progress_pct(&self) -> f64 {
        if self.xp_to_next == 0 {
            return 0.0;
        }
        (self.xp as f64 / self.xp_to_next as f64 * 100.0).min(100.0)
    }

    /// Apply a quest reward and return the settled state.
    pub fn apply_reward(
        &self,
        xp: u32,
        gold: u32,
        policy: LevelUpPolicy,
        xp_per_level: u32,
    ) -> (GameState, Option<LevelUp>) {
        let mut next = *self;
        next.gold = self.gold.saturating_add(gold);
        next.xp = self.xp.saturating_add(xp);

        while next.xp_to_next > 0 && next.xp >= next.xp_to_next {
            next.xp -= next.xp_to_next;
            next.level += 1;
            next.xp_to_next = next.level.saturating_mul(xp_per_level);
            if policy == LevelUpPolicy::SingleStep {
                break;
            }
        }

        let level_up = (next.level != self.level).then_some(LevelUp {
            from: self.level,
            to: next.level,
        });
        (next, level_up)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(100)
    }
}
