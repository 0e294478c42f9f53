//! Per-quest countdown timer.
//!
//! The timer has no internal thread. The caller drives it with `tick()`,
//! once per elapsed second. Finishing a quest early earns bonus XP
//! proportional to the time left on the clock.
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!         Expired
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::quest::QuestId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    /// Bonus XP for finishing with the full duration left.
    #[serde(default = "default_max_bonus_xp")]
    pub max_bonus_xp: u32,
}

fn default_minutes() -> u32 {
    25
}
fn default_max_bonus_xp() -> u32 {
    10
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            max_bonus_xp: default_max_bonus_xp(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Ran down to zero. No bonus is left.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestTimer {
    quest_id: QuestId,
    total_secs: u64,
    remaining_secs: u64,
    state: TimerState,
}

impl QuestTimer {
    pub fn new(quest_id: QuestId, minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::invalid("minutes", "timer duration must be positive"));
        }
        let total_secs = u64::from(minutes) * 60;
        Ok(Self {
            quest_id,
            total_secs,
            remaining_secs: total_secs,
            state: TimerState::Idle,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn quest_id(&self) -> &QuestId {
        &self.quest_id
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// Bonus earned if the quest were completed right now.
    pub fn bonus_xp(&self, max_bonus_xp: u32) -> u32 {
        if self.total_secs == 0 {
            return 0;
        }
        let bonus = u128::from(self.remaining_secs) * u128::from(max_bonus_xp)
            / u128::from(self.total_secs);
        u32::try_from(bonus).unwrap_or(max_bonus_xp)
    }

    /// `MM:SS` display of the remaining time.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start when idle, pause when running, resume when paused.
    pub fn toggle(&mut self) -> Option<TimerState> {
        self.state = match self.state {
            TimerState::Idle | TimerState::Paused => TimerState::Running,
            TimerState::Running => TimerState::Paused,
            TimerState::Expired => return None,
        };
        Some(self.state)
    }

    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                true
            }
            TimerState::Running | TimerState::Expired => false,
        }
    }

    /// Restore the full duration and stop.
    pub fn reset(&mut self) {
        self.remaining_secs = self.total_secs;
        self.state = TimerState::Idle;
    }

    /// Advance one second. Returns true on the tick that runs it out.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return false;
        }
        self.state = TimerState::Expired;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(minutes: u32) -> QuestTimer {
        QuestTimer::new(QuestId::from("q1"), minutes).unwrap()
    }

    #[test]
    fn zero_minutes_rejected() {
        assert!(QuestTimer::new(QuestId::from("q1"), 0).is_err());
    }

    #[test]
    fn idle_timer_does_not_tick() {
        let mut t = timer(1);
        assert!(!t.tick());
        assert_eq!(t.remaining_secs(), 60);
    }

    #[test]
    fn toggle_cycles_running_and_paused() {
        let mut t = timer(1);
        assert_eq!(t.toggle(), Some(TimerState::Running));
        t.tick();
        assert_eq!(t.toggle(), Some(TimerState::Paused));
        t.tick();
        assert_eq!(t.remaining_secs(), 59);
        assert_eq!(t.toggle(), Some(TimerState::Running));
    }

    #[test]
    fn runs_down_and_expires() {
        let mut t = timer(1);
        t.start();
        let expirations = (0..60).filter(|_| t.tick()).count();
        assert_eq!(expirations, 1);
        assert_eq!(t.state(), TimerState::Expired);
        assert_eq!(t.remaining_secs(), 0);
        assert!(!t.tick());
        assert_eq!(t.toggle(), None);
        assert_eq!(t.bonus_xp(10), 0);
    }

    #[test]
    fn bonus_is_proportional_to_time_left() {
        let mut t = timer(25);
        assert_eq!(t.bonus_xp(10), 10);

        t.start();
        for _ in 0..(25 * 60 / 2) {
            t.tick();
        }
        assert_eq!(t.bonus_xp(10), 5);

        // One second past the halfway mark floors to 4.
        t.tick();
        assert_eq!(t.bonus_xp(10), 4);
    }

    #[test]
    fn bonus_with_huge_maximum_does_not_overflow() {
        let mut t = timer(u32::MAX);
        assert_eq!(t.bonus_xp(u32::MAX), u32::MAX);

        t.start();
        t.tick();
        assert!(t.bonus_xp(u32::MAX) < u32::MAX);
    }

    #[test]
    fn reset_restores_duration() {
        let mut t = timer(2);
        t.start();
        t.tick();
        t.reset();
        assert_eq!(t.remaining_secs(), 120);
        assert_eq!(t.state(), TimerState::Idle);
    }

    #[test]
    fn display_format() {
        let mut t = timer(25);
        assert_eq!(t.display(), "25:00");
        t.start();
        t.tick();
        assert_eq!(t.display(), "24:59");
    }
}
