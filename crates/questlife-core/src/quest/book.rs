use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Quest, QuestDraft, QuestId, RewardTable};
use crate::error::{QuestError, ValidationError};

/// Ordered, append-only quest collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestBook {
    quests: Vec<Quest>,
}

impl QuestBook {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn get(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| &q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    pub fn as_slice(&self) -> &[Quest] {
        &self.quests
    }

    pub fn active(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|q| !q.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|q| q.completed)
    }

    pub fn total_count(&self) -> usize {
        self.quests.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed().count()
    }

    /// Incomplete quests. Not time based: every open quest counts.
    pub fn overdue_count(&self) -> usize {
        self.active().count()
    }

    pub fn completed_on(&self, day: NaiveDate, offset: &FixedOffset) -> usize {
        self.completed()
            .filter(|q| q.completed_on(day, offset))
            .count()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Price and append a new quest. Nothing is appended on error.
    pub fn add(
        &mut self,
        draft: QuestDraft,
        rewards: &RewardTable,
        now: DateTime<Utc>,
    ) -> Result<Quest, ValidationError> {
        let quest = Quest::from_draft(draft, rewards, now)?;
        self.quests.push(quest.clone());
        Ok(quest)
    }

    /// Flip a quest to completed and return it.
    ///
    /// Unknown ids and already completed quests are rejected without side
    /// effects.
    pub fn complete(&mut self, id: &QuestId, now: DateTime<Utc>) -> Result<Quest, QuestError> {
        let quest = self
            .quests
            .iter_mut()
            .find(|q| &q.id == id)
            .ok_or_else(|| QuestError::NotFound(id.clone()))?;

        if quest.completed {
            return Err(QuestError::AlreadyCompleted(id.clone()));
        }

        quest.completed = true;
        quest.completed_at = Some(now);
        Ok(quest.clone())
    }
}
