//! Overdue-quest nudges and their dismissal cooldown.
//!
//! Nudging is read-only with respect to the session: it looks at the overdue
//! count and the selected persona, and only tracks when it was last dismissed.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{messages, Companion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NudgeSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds a dismissal keeps the companion quiet.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: i64,
    /// Name substituted into the message templates.
    #[serde(default = "default_user_name")]
    pub user_name: String,
}

fn default_true() -> bool {
    true
}
fn default_cooldown_secs() -> i64 {
    60 * 60
}
fn default_user_name() -> String {
    "Champion".into()
}

impl Default for NudgeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_secs: default_cooldown_secs(),
            user_name: default_user_name(),
        }
    }
}

/// A reminder ready to be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nudge {
    pub companion: Companion,
    pub companion_name: String,
    pub message: String,
    pub overdue_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NudgePolicy {
    dismissed_at: Option<DateTime<Utc>>,
}

impl NudgePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dismiss(&mut self, now: DateTime<Utc>) {
        self.dismissed_at = Some(now);
    }

    /// End of the quiet window opened by the last dismissal. A window that
    /// reaches past the representable range never ends.
    pub fn quiet_until(&self, settings: &NudgeSettings) -> Option<DateTime<Utc>> {
        self.dismissed_at.map(|at| {
            Duration::try_seconds(settings.cooldown_secs)
                .and_then(|cooldown| at.checked_add_signed(cooldown))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
    }

    /// Still inside the cooldown window of the last dismissal.
    pub fn is_suppressed(&self, now: DateTime<Utc>, settings: &NudgeSettings) -> bool {
        self.quiet_until(settings).map_or(false, |until| now < until)
    }

    /// Build a nudge if there is anything overdue and the companion is not
    /// cooling down.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        overdue_count: usize,
        companion: Companion,
        now: DateTime<Utc>,
        settings: &NudgeSettings,
        rng: &mut R,
    ) -> Option<Nudge> {
        if !settings.enabled || overdue_count == 0 || self.is_suppressed(now, settings) {
            return None;
        }
        Some(Nudge {
            companion,
            companion_name: companion.display_name().to_string(),
            message: messages::pick_message(companion, &settings.user_name, rng),
            overdue_count,
        })
    }
}
