//! Session state and the pure reducer that advances it.
//!
//! `reduce` never mutates its input. It returns the next snapshot together
//! with the events describing the change, or an error and nothing else.
//!
//! ## Quest completion order
//!
//! ```text
//! flip quest -> XP / gold / level -> life stat -> streak -> pet -> achievements
//! ```
//!
//! Achievements are checked against the settled post-completion values.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::companion::Companion;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::events::Event;
use crate::mood::Mood;
use crate::progression::{
    self, default_achievements, Achievement, AchievementId, GameState, LevelUp, LifeStats,
    PetState, Progress, StatAxis, StreakChange, StreakState,
};
use crate::quest::{self, Quest, QuestBook, QuestDraft, QuestId};

/// A user intent that changes the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    AddQuest(QuestDraft),
    CompleteQuest {
        id: QuestId,
        #[serde(default)]
        bonus_xp: u32,
    },
    SelectMood {
        mood: Mood,
    },
    SelectCompanion {
        companion: Companion,
    },
}

/// Clock and configuration a transition runs under.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
    pub config: &'a EngineConfig,
}

impl<'a> TransitionContext<'a> {
    pub fn new(now: DateTime<Utc>, config: &'a EngineConfig) -> Self {
        Self {
            now,
            offset: config.day_offset(),
            config,
        }
    }

    /// Calendar day of `now` in the configured offset.
    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.offset).date_naive()
    }
}

/// Rewards and side effects of one quest completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub quest: Quest,
    pub base_xp: u32,
    pub bonus_xp: u32,
    pub gold: u32,
    pub level_up: Option<LevelUp>,
    pub stat_axis: StatAxis,
    pub streak: StreakState,
    pub streak_change: StreakChange,
    pub unlocked: Vec<AchievementId>,
}

impl Completion {
    pub fn total_xp(&self) -> u32 {
        self.base_xp.saturating_add(self.bonus_xp)
    }
}

/// What an action produced, for callers that need more than events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    QuestAdded(Quest),
    QuestCompleted(Completion),
    MoodSelected(Mood),
    CompanionSelected(Companion),
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct Transition {
    pub session: Session,
    pub events: Vec<Event>,
    pub outcome: Outcome,
}

/// All gamification state of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    quests: QuestBook,
    game: GameState,
    achievements: Vec<Achievement>,
    life_stats: LifeStats,
    pet: PetState,
    streak: StreakState,
    companion: Companion,
    mood: Option<Mood>,
    suggestions: Vec<String>,
}

impl Session {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            quests: QuestBook::new(),
            game: GameState::new(config.progression.xp_per_level),
            achievements: default_achievements(),
            life_stats: LifeStats::default(),
            pet: PetState::new(&config.pet),
            streak: StreakState::default(),
            companion: Companion::default(),
            mood: None,
            suggestions: Vec::new(),
        }
    }

    /// A fresh session seeded with the starter quests.
    pub fn with_starter_quests(config: &EngineConfig, now: DateTime<Utc>) -> Result<Self> {
        let mut session = Self::new(config);
        for draft in quest::starter_quests() {
            session.quests.add(draft, &config.rewards, now)?;
        }
        Ok(session)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn quests(&self) -> &QuestBook {
        &self.quests
    }

    pub fn quest(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.get(id)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn total_quests(&self) -> usize {
        self.quests.total_count()
    }

    pub fn completed_quests(&self) -> usize {
        self.quests.completed_count()
    }

    pub fn overdue_count(&self) -> usize {
        self.quests.overdue_count()
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn life_stats(&self) -> &LifeStats {
        &self.life_stats
    }

    pub fn pet(&self) -> &PetState {
        &self.pet
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn companion(&self) -> Companion {
        self.companion
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

/// Apply `action` to `session`.
pub fn reduce(session: &Session, action: Action, ctx: &TransitionContext<'_>) -> Result<Transition> {
    debug!(?action, "applying action");
    match action {
        Action::AddQuest(draft) => add_quest(session, draft, ctx),
        Action::CompleteQuest { id, bonus_xp } => complete_quest(session, &id, bonus_xp, ctx),
        Action::SelectMood { mood } => Ok(select_mood(session, mood, ctx)),
        Action::SelectCompanion { companion } => Ok(select_companion(session, companion, ctx)),
    }
}

fn add_quest(session: &Session, draft: QuestDraft, ctx: &TransitionContext<'_>) -> Result<Transition> {
    let mut next = session.clone();
    let quest = next.quests.add(draft, &ctx.config.rewards, ctx.now)?;

    let events = vec![Event::QuestAdded {
        quest_id: quest.id.clone(),
        title: quest.title.clone(),
        difficulty: quest.difficulty,
        xp_reward: quest.xp_reward,
        gold_reward: quest.gold_reward,
        at: ctx.now,
    }];

    Ok(Transition {
        session: next,
        events,
        outcome: Outcome::QuestAdded(quest),
    })
}

fn complete_quest(
    session: &Session,
    id: &QuestId,
    bonus_xp: u32,
    ctx: &TransitionContext<'_>,
) -> Result<Transition> {
    let config = ctx.config;
    let mut next = session.clone();
    let quest = next.quests.complete(id, ctx.now)?;
    let mut events = Vec::new();

    let total_xp = quest.xp_reward.saturating_add(bonus_xp);
    let (game, level_up) = session.game.apply_reward(
        total_xp,
        quest.gold_reward,
        config.progression.level_up,
        config.progression.xp_per_level,
    );
    next.game = game;
    events.push(Event::QuestCompleted {
        quest_id: quest.id.clone(),
        xp_gained: total_xp,
        bonus_xp,
        gold_gained: quest.gold_reward,
        at: ctx.now,
    });
    if let Some(up) = level_up {
        info!(from = up.from, to = up.to, "level up");
        events.push(Event::LevelUp {
            from: up.from,
            to: up.to,
            at: ctx.now,
        });
    }

    let stat_axis = StatAxis::from(quest.category);
    next.life_stats = session
        .life_stats
        .apply_completion(quest.category, quest.difficulty, &config.life_stats);
    events.push(Event::LifeStatRaised {
        axis: stat_axis,
        value: next.life_stats.get(stat_axis),
        at: ctx.now,
    });

    let (streak, streak_change) = session
        .streak
        .record_completion(ctx.today(), config.streak.policy);
    next.streak = streak;
    if streak_change != StreakChange::Unchanged {
        events.push(Event::StreakUpdated {
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            change: streak_change,
            at: ctx.now,
        });
    }

    next.pet = session.pet.feed(ctx.now, next.game.level, &config.pet);
    events.push(Event::PetFed {
        happiness: next.pet.happiness,
        level: next.pet.level,
        at: ctx.now,
    });

    let progress = Progress {
        completed_quests: next.quests.completed_count(),
        gold: next.game.gold,
        level: next.game.level,
    };
    let (achievements, unlocked) = progression::evaluate(&session.achievements, &progress, ctx.now);
    next.achievements = achievements;
    for id in &unlocked {
        info!(achievement = id.as_str(), "achievement unlocked");
        events.push(Event::AchievementUnlocked {
            achievement: *id,
            title: id.title().to_string(),
            at: ctx.now,
        });
    }

    debug!(
        quest = %quest.id,
        xp = next.game.xp,
        level = next.game.level,
        gold = next.game.gold,
        "quest completed"
    );

    let completion = Completion {
        base_xp: quest.xp_reward,
        bonus_xp,
        gold: quest.gold_reward,
        level_up,
        stat_axis,
        streak,
        streak_change,
        unlocked,
        quest,
    };

    Ok(Transition {
        session: next,
        events,
        outcome: Outcome::QuestCompleted(completion),
    })
}

fn select_mood(session: &Session, mood: Mood, ctx: &TransitionContext<'_>) -> Transition {
    let mut next = session.clone();
    let suggestions: Vec<String> = mood.suggestions().iter().map(|s| s.to_string()).collect();
    next.mood = Some(mood);
    next.suggestions = suggestions.clone();

    Transition {
        session: next,
        events: vec![Event::MoodSelected {
            mood,
            suggestions,
            at: ctx.now,
        }],
        outcome: Outcome::MoodSelected(mood),
    }
}

fn select_companion(session: &Session, companion: Companion, ctx: &TransitionContext<'_>) -> Transition {
    let mut next = session.clone();
    next.companion = companion;

    Transition {
        session: next,
        events: vec![Event::CompanionSelected {
            companion,
            at: ctx.now,
        }],
        outcome: Outcome::CompanionSelected(companion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, QuestError, ValidationError};
    use crate::quest::{Category, Difficulty};

    fn utc_config() -> EngineConfig {
        EngineConfig {
            utc_offset_minutes: Some(0),
            ..Default::default()
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn add(session: &Session, draft: QuestDraft, ctx: &TransitionContext<'_>) -> (Session, Quest) {
        let t = reduce(session, Action::AddQuest(draft), ctx).unwrap();
        match t.outcome {
            Outcome::QuestAdded(q) => (t.session, q),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    fn complete(session: &Session, id: &QuestId, ctx: &TransitionContext<'_>) -> Transition {
        reduce(
            session,
            Action::CompleteQuest {
                id: id.clone(),
                bonus_xp: 0,
            },
            ctx,
        )
        .unwrap()
    }

    #[test]
    fn add_easy_quest_into_empty_session() {
        let config = utc_config();
        let ctx = TransitionContext::new(Utc::now(), &config);
        let session = Session::new(&config);

        let draft = QuestDraft::new("Test", Difficulty::Easy, Category::Personal);
        let (next, quest) = add(&session, draft, &ctx);

        assert_eq!(quest.xp_reward, 10);
        assert_eq!(quest.gold_reward, 3);
        assert!(!quest.completed);
        assert_eq!(next.total_quests(), 1);
        assert_eq!(session.total_quests(), 0, "input snapshot is untouched");
    }

    #[test]
    fn empty_title_creates_nothing() {
        let config = utc_config();
        let ctx = TransitionContext::new(Utc::now(), &config);
        let session = Session::new(&config);

        let err = reduce(
            &session,
            Action::AddQuest(QuestDraft::new(" ", Difficulty::Easy, Category::Personal)),
            &ctx,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyTitle)));
    }

    #[test]
    fn completion_applies_every_reward() {
        let config = utc_config();
        let ctx = TransitionContext::new(at("2026-06-01T12:00:00Z"), &config);
        let session = Session::new(&config);
        let (session, quest) = add(
            &session,
            QuestDraft::new("Run", Difficulty::Medium, Category::Health),
            &ctx,
        );

        let t = complete(&session, &quest.id, &ctx);
        let next = &t.session;

        assert_eq!(next.game().xp, 25);
        assert_eq!(next.game().gold, 10);
        assert_eq!(next.completed_quests(), 1);
        assert_eq!(next.life_stats().body, 3);
        assert_eq!(next.streak().current_streak, 1);
        assert_eq!(next.pet().happiness, 60);
        assert!(next.achievements()[0].unlocked);

        let kinds: Vec<_> = t.events.iter().map(Event::kind).collect();
        assert_eq!(
            kinds,
            [
                "quest_completed",
                "life_stat_raised",
                "streak_updated",
                "pet_fed",
                "achievement_unlocked"
            ]
        );
    }

    #[test]
    fn second_completion_is_rejected_without_change() {
        let config = utc_config();
        let ctx = TransitionContext::new(Utc::now(), &config);
        let session = Session::new(&config);
        let (session, quest) = add(
            &session,
            QuestDraft::new("Once", Difficulty::Easy, Category::Social),
            &ctx,
        );
        let session = complete(&session, &quest.id, &ctx).session;

        let err = reduce(
            &session,
            Action::CompleteQuest {
                id: quest.id.clone(),
                bonus_xp: 5,
            },
            &ctx,
        )
        .unwrap_err();
        assert!(err.is_noop());
        assert!(matches!(err, CoreError::Quest(QuestError::AlreadyCompleted(_))));
    }

    #[test]
    fn bonus_xp_is_added_to_quest_xp() {
        let config = utc_config();
        let ctx = TransitionContext::new(Utc::now(), &config);
        let (session, quest) = add(
            &Session::new(&config),
            QuestDraft::new("Focus", Difficulty::Easy, Category::Work),
            &ctx,
        );

        let t = reduce(
            &session,
            Action::CompleteQuest {
                id: quest.id,
                bonus_xp: 7,
            },
            &ctx,
        )
        .unwrap();
        assert_eq!(t.session.game().xp, 17);
        match t.outcome {
            Outcome::QuestCompleted(c) => {
                assert_eq!(c.total_xp(), 17);
                assert_eq!(c.bonus_xp, 7);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn level_up_achievement_uses_post_transition_level() {
        let config = utc_config();
        let ctx = TransitionContext::new(Utc::now(), &config);
        let mut session = Session::new(&config);
        session.game.xp = 90;

        let (session, quest) = add(
            &session,
            QuestDraft::new("Ship it", Difficulty::Hard, Category::Work),
            &ctx,
        );
        let t = complete(&session, &quest.id, &ctx);

        assert_eq!(t.session.game().level, 2);
        assert_eq!(t.session.game().xp, 40);
        assert_eq!(t.session.game().xp_to_next, 200);
        assert!(t
            .events
            .iter()
            .any(|e| matches!(e, Event::AchievementUnlocked { achievement: AchievementId::LevelUp, .. })));
    }

    #[test]
    fn gold_collector_unlocks_on_projected_gold() {
        let config = utc_config();
        let ctx = TransitionContext::new(Utc::now(), &config);
        let mut session = Session::new(&config);
        session.game.gold = 95;

        let (session, quest) = add(
            &session,
            QuestDraft::new("Client call", Difficulty::Medium, Category::Work),
            &ctx,
        );
        let t = complete(&session, &quest.id, &ctx);

        assert_eq!(t.session.game().gold, 105);
        match t.outcome {
            Outcome::QuestCompleted(c) => {
                assert!(c.unlocked.contains(&AchievementId::GoldCollector))
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn same_day_completions_share_one_streak_day() {
        let config = utc_config();
        let ctx = TransitionContext::new(at("2026-06-01T08:00:00Z"), &config);
        let mut session = Session::new(&config);
        let mut ids = Vec::new();
        for title in ["a", "b"] {
            let (s, q) = add(&session, QuestDraft::new(title, Difficulty::Easy, Category::Personal), &ctx);
            session = s;
            ids.push(q.id);
        }

        session = complete(&session, &ids[0], &ctx).session;
        let later = TransitionContext::new(at("2026-06-01T20:00:00Z"), &config);
        let t = complete(&session, &ids[1], &later);

        assert_eq!(t.session.streak().current_streak, 1);
        assert!(!t.events.iter().any(|e| e.kind() == "streak_updated"));
    }

    #[test]
    fn mood_publishes_suggestions_only() {
        let config = utc_config();
        let ctx = TransitionContext::new(Utc::now(), &config);
        let session = Session::with_starter_quests(&config, ctx.now).unwrap();

        let t = reduce(&session, Action::SelectMood { mood: Mood::Calm }, &ctx).unwrap();
        assert_eq!(t.session.mood(), Some(Mood::Calm));
        assert_eq!(t.session.suggestions().len(), 3);
        assert_eq!(t.session.quests(), session.quests());
    }

    #[test]
    fn select_companion() {
        let config = utc_config();
        let ctx = TransitionContext::new(Utc::now(), &config);
        let t = reduce(&Session::new(&config), Action::SelectCompanion { companion: Companion::Cat }, &ctx).unwrap();
        assert_eq!(t.session.companion(), Companion::Cat);
    }

    #[test]
    fn starter_session_has_four_open_quests() {
        let config = utc_config();
        let session = Session::with_starter_quests(&config, Utc::now()).unwrap();
        assert_eq!(session.total_quests(), 4);
        assert_eq!(session.overdue_count(), 4);
        assert_eq!(session.completed_quests(), 0);
    }

    #[test]
    fn today_follows_offset() {
        let config = EngineConfig {
            utc_offset_minutes: Some(-300),
            ..Default::default()
        };
        let ctx = TransitionContext::new(at("2026-06-02T03:00:00Z"), &config);
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
    }

    #[test]
    fn action_serialization() {
        let action = Action::CompleteQuest {
            id: QuestId::from("q-1"),
            bonus_xp: 3,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "complete_quest");
        assert_eq!(json["id"], "q-1");
    }
}
