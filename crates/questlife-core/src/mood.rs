//! Mood journal: a fixed mood → suggested quests lookup.
//!
//! Selecting a mood is advisory only. It never touches the quest list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Energetic,
    Calm,
    Motivated,
    Down,
    Stressed,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Energetic,
        Mood::Calm,
        Mood::Motivated,
        Mood::Down,
        Mood::Stressed,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Energetic => "Energetic",
            Mood::Calm => "Calm",
            Mood::Motivated => "Motivated",
            Mood::Down => "Down",
            Mood::Stressed => "Stressed",
            Mood::Neutral => "Neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Energetic => "😊",
            Mood::Calm => "😌",
            Mood::Motivated => "😤",
            Mood::Down => "😔",
            Mood::Stressed => "😰",
            Mood::Neutral => "🤔",
        }
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Mood::Energetic => &[
                "Complete 3 challenging quests",
                "Try a new skill",
                "Organize your workspace",
            ],
            Mood::Calm => &[
                "Read for 30 minutes",
                "Practice meditation",
                "Write in a journal",
            ],
            Mood::Motivated => &[
                "Tackle your biggest task",
                "Set new goals",
                "Clean and organize",
            ],
            Mood::Down => &[
                "Do something creative",
                "Take a walk outside",
                "Call a friend",
            ],
            Mood::Stressed => &[
                "Break tasks into smaller steps",
                "Take deep breaths",
                "Listen to music",
            ],
            Mood::Neutral => &[
                "Review your goals",
                "Plan tomorrow",
                "Learn something new",
            ],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::invalid("mood", format!("unknown mood '{wanted}'")))
    }
}
