//! Accountability companion personas.
//!
//! The persona only changes how reminders are phrased; no progression logic
//! depends on it.

mod messages;
mod nudge;

pub use messages::{pick_compliment, pick_message, templates};
pub use nudge::{Nudge, NudgePolicy, NudgeSettings};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Companion {
    Coach,
    Wizard,
    Cat,
    Robot,
    Teacher,
}

impl Companion {
    pub const ALL: [Companion; 5] = [
        Companion::Coach,
        Companion::Wizard,
        Companion::Cat,
        Companion::Robot,
        Companion::Teacher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Companion::Coach => "coach",
            Companion::Wizard => "wizard",
            Companion::Cat => "cat",
            Companion::Robot => "robot",
            Companion::Teacher => "teacher",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Companion::Coach => "Coach Rocky",
            Companion::Wizard => "Grumpus the Wise",
            Companion::Cat => "Whiskers",
            Companion::Robot => "PROD-1",
            Companion::Teacher => "Ms. Henderson",
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            Companion::Coach => "Tough & Motivational",
            Companion::Wizard => "Mystical & Stern",
            Companion::Cat => "Sassy & Judgmental",
            Companion::Robot => "Logical & Ruthless",
            Companion::Teacher => "Educational & Firm",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Companion::Coach => "Motivational but stern, pushes you to be your best",
            Companion::Wizard => "Mystical and wise, but easily annoyed by procrastination",
            Companion::Cat => "Judgmental and sarcastic, masters of guilt trips",
            Companion::Robot => "Logical and efficient, no patience for excuses",
            Companion::Teacher => "Educational approach with disappointed parent energy",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Companion::Coach => "💪",
            Companion::Wizard => "🧙",
            Companion::Cat => "🐱",
            Companion::Robot => "🤖",
            Companion::Teacher => "👩‍🏫",
        }
    }
}

impl Default for Companion {
    fn default() -> Self {
        Companion::Coach
    }
}

impl fmt::Display for Companion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Companion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Companion::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "companion",
                    format!("unknown companion '{wanted}' (expected coach, wizard, cat, robot or teacher)"),
                )
            })
    }
}
