//! Daily completion streak.
//!
//! A streak counts distinct days with at least one completed quest. Several
//! completions on the same day never inflate it.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// What happens to the streak when one or more days were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Any new day extends the streak, however long the gap.
    Lenient,
    /// A gap of more than one day restarts the streak at 1.
    ResetOnGap,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        StreakPolicy::Lenient
    }
}

/// Outcome of recording a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// Already counted today
    Unchanged,
    /// A new day was added
    Extended,
    /// The previous streak lapsed and a new one began
    Restarted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(default)]
    pub last_completion_date: Option<NaiveDate>,
}

impl StreakState {
    pub fn record_completion(&self, today: NaiveDate, policy: StreakPolicy) -> (StreakState, StreakChange) {
        let mut next = *self;

        let change = match self.last_completion_date {
            Some(last) if last == today => StreakChange::Unchanged,
            Some(last) if policy == StreakPolicy::ResetOnGap && last < today - Duration::days(1) => {
                next.current_streak = 1;
                StreakChange::Restarted
            }
            _ => {
                next.current_streak = self.current_streak.saturating_add(1);
                StreakChange::Extended
            }
        };

        next.longest_streak = next.longest_streak.max(next.current_streak);
        next.last_completion_date = Some(today);
        (next, change)
    }

    /// Completed something today or yesterday.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        match self.last_completion_date {
            Some(last) => last == today || last == today - Duration::days(1),
            None => false,
        }
    }

    /// A running streak that needs a completion today to stay alive.
    pub fn at_risk(&self, today: NaiveDate) -> bool {
        self.current_streak > 0 && !self.is_active(today)
    }
}
