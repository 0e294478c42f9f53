//! Progression engine.
//!
//! Owns the current [`Session`] snapshot and everything around it that is
//! not part of the data model: quest timers, the nudge cooldown, the seeded
//! random source and the clock. All mutations go through [`reduce`]; a
//! rejected action leaves the snapshot as it was.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = ProgressionEngine::new(EngineConfig::default());
//! let quest = engine.add_quest(QuestDraft::new("Stretch", Difficulty::Easy, Category::Health))?;
//! engine.start_timer(&quest.id, None)?;
//! engine.tick(); // once per second
//! let report = engine.complete_with_timer(&quest.id)?;
//! ```

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::companion::{pick_compliment, Companion, Nudge, NudgePolicy};
use crate::config::EngineConfig;
use crate::error::{QuestError, Result, TimerError};
use crate::events::Event;
use crate::mood::Mood;
use crate::progression::{Achievement, LifeStats, PetMood, PetState, StreakState};
use crate::quest::{Quest, QuestDraft, QuestId};
use crate::session::{reduce, Action, Completion, Outcome, Session, TransitionContext};
use crate::timer::{QuestTimer, TimerState};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Completion details plus the celebration line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    #[serde(flatten)]
    pub completion: Completion,
    pub compliment: String,
}

/// Player numbers with the derived quest totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub gold: u32,
    pub total_quests: usize,
    pub completed_quests: usize,
    pub progress_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub quest_id: QuestId,
    pub state: TimerState,
    pub total_secs: u64,
    pub remaining_secs: u64,
    pub display: String,
}

/// Everything the display layer reads, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub game: GameView,
    pub quests: Vec<Quest>,
    pub achievements: Vec<Achievement>,
    pub life_stats: LifeStats,
    pub pet: PetState,
    pub pet_mood: PetMood,
    pub streak: StreakState,
    pub streak_active: bool,
    pub streak_at_risk: bool,
    pub companion: Companion,
    pub mood: Option<Mood>,
    pub suggestions: Vec<String>,
    pub overdue_count: usize,
    /// Set while a dismissal keeps the companion quiet.
    pub nudge_quiet_until: Option<DateTime<Utc>>,
    pub timers: Vec<TimerView>,
    pub at: DateTime<Utc>,
}

pub struct ProgressionEngine {
    config: EngineConfig,
    session: Session,
    timers: BTreeMap<QuestId, QuestTimer>,
    nudge: NudgePolicy,
    rng: Mcg128Xsl64,
    clock: Box<dyn Clock>,
    events: Vec<Event>,
}

impl ProgressionEngine {
    /// Create an engine with an empty quest board.
    pub fn new(config: EngineConfig) -> Self {
        let session = Session::new(&config);
        Self::with_session(config, session)
    }

    /// Create an engine with the starter quests on the board.
    pub fn with_starter_quests(config: EngineConfig) -> Result<Self> {
        let session = Session::with_starter_quests(&config, Utc::now())?;
        Ok(Self::with_session(config, session))
    }

    pub fn with_session(config: EngineConfig, session: Session) -> Self {
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self {
            config,
            session,
            timers: BTreeMap::new(),
            nudge: NudgePolicy::new(),
            rng,
            clock: Box::new(SystemClock),
            events: Vec::new(),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn timer(&self, id: &QuestId) -> Option<&QuestTimer> {
        self.timers.get(id)
    }

    pub fn timers(&self) -> impl Iterator<Item = &QuestTimer> {
        self.timers.values()
    }

    /// Events produced since the last drain.
    ///
    /// The log is unbounded: long-running callers should consume it with
    /// [`ProgressionEngine::drain_events`].
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn quests_completed_today(&self) -> usize {
        let ctx = self.context();
        self.session
            .quests()
            .completed_on(ctx.today(), &ctx.offset)
    }

    pub fn snapshot(&self) -> Snapshot {
        let ctx = self.context();
        let today = ctx.today();
        let session = &self.session;
        let game = session.game();

        Snapshot {
            game: GameView {
                level: game.level,
                xp: game.xp,
                xp_to_next: game.xp_to_next,
                gold: game.gold,
                total_quests: session.total_quests(),
                completed_quests: session.completed_quests(),
                progress_pct: game.progress_pct(),
            },
            quests: session.quests().as_slice().to_vec(),
            achievements: session.achievements().to_vec(),
            life_stats: *session.life_stats(),
            pet: *session.pet(),
            pet_mood: session.pet().mood(self.quests_completed_today()),
            streak: *session.streak(),
            streak_active: session.streak().is_active(today),
            streak_at_risk: session.streak().at_risk(today),
            companion: session.companion(),
            mood: session.mood(),
            suggestions: session.suggestions().to_vec(),
            overdue_count: session.overdue_count(),
            nudge_quiet_until: self
                .nudge
                .quiet_until(&self.config.nudge)
                .filter(|until| ctx.now < *until),
            timers: self
                .timers
                .values()
                .map(|t| TimerView {
                    quest_id: t.quest_id().clone(),
                    state: t.state(),
                    total_secs: t.total_secs(),
                    remaining_secs: t.remaining_secs(),
                    display: t.display(),
                })
                .collect(),
            at: ctx.now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply an action and record its events.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        let now = self.clock.now();
        let ctx = TransitionContext::new(now, &self.config);

        let transition = match reduce(&self.session, action, &ctx) {
            Ok(t) => t,
            Err(e) => {
                if e.is_noop() {
                    debug!(error = %e, "action ignored");
                } else {
                    warn!(error = %e, "action rejected");
                }
                return Err(e);
            }
        };

        self.session = transition.session;
        self.events.extend(transition.events);

        if let Outcome::QuestCompleted(completion) = &transition.outcome {
            if self.timers.remove(&completion.quest.id).is_some() {
                self.events.push(Event::TimerCancelled {
                    quest_id: completion.quest.id.clone(),
                    at: now,
                });
            }
        }

        Ok(transition.outcome)
    }

    pub fn add_quest(&mut self, draft: QuestDraft) -> Result<Quest> {
        match self.dispatch(Action::AddQuest(draft))? {
            Outcome::QuestAdded(quest) => Ok(quest),
            other => unreachable!("add_quest produced {other:?}"),
        }
    }

    pub fn complete_quest(&mut self, id: &QuestId, bonus_xp: u32) -> Result<CompletionReport> {
        let outcome = self.dispatch(Action::CompleteQuest {
            id: id.clone(),
            bonus_xp,
        })?;
        match outcome {
            Outcome::QuestCompleted(completion) => Ok(CompletionReport {
                completion,
                compliment: pick_compliment(&mut self.rng).to_string(),
            }),
            other => unreachable!("complete_quest produced {other:?}"),
        }
    }

    /// Complete a quest, taking the bonus XP from its timer if one exists.
    pub fn complete_with_timer(&mut self, id: &QuestId) -> Result<CompletionReport> {
        let bonus = self
            .timers
            .get(id)
            .map(|t| t.bonus_xp(self.config.timer.max_bonus_xp))
            .unwrap_or(0);
        self.complete_quest(id, bonus)
    }

    pub fn select_mood(&mut self, mood: Mood) -> Result<Vec<String>> {
        self.dispatch(Action::SelectMood { mood })?;
        Ok(self.session.suggestions().to_vec())
    }

    pub fn select_companion(&mut self, companion: Companion) -> Result<()> {
        self.dispatch(Action::SelectCompanion { companion })?;
        Ok(())
    }

    /// Current reminder, if anything is overdue and the companion is not
    /// cooling down.
    pub fn nudge(&mut self) -> Option<Nudge> {
        let now = self.clock.now();
        self.nudge.evaluate(
            self.session.overdue_count(),
            self.session.companion(),
            now,
            &self.config.nudge,
            &mut self.rng,
        )
    }

    /// Silence nudges for the configured cooldown.
    pub fn dismiss_nudge(&mut self) -> Event {
        let now = self.clock.now();
        self.nudge.dismiss(now);
        let event = Event::NudgeDismissed {
            until: self.nudge.quiet_until(&self.config.nudge).unwrap_or(now),
            at: now,
        };
        self.events.push(event.clone());
        event
    }

    /// Start (or resume) the countdown for an open quest.
    ///
    /// `minutes` defaults to the configured duration and only applies when
    /// the timer is created.
    pub fn start_timer(&mut self, id: &QuestId, minutes: Option<u32>) -> Result<Event> {
        let quest = self
            .session
            .quest(id)
            .ok_or_else(|| QuestError::NotFound(id.clone()))?;
        if quest.completed {
            return Err(TimerError::QuestCompleted(id.clone()).into());
        }

        let now = self.clock.now();
        let minutes = minutes.unwrap_or(self.config.timer.default_minutes);
        if !self.timers.contains_key(id) {
            let timer = QuestTimer::new(id.clone(), minutes)?;
            self.timers.insert(id.clone(), timer);
        }
        let timer = self
            .timers
            .get_mut(id)
            .ok_or_else(|| TimerError::NotFound(id.clone()))?;
        timer.start();

        let event = Event::TimerStarted {
            quest_id: id.clone(),
            duration_secs: timer.remaining_secs(),
            at: now,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Pause a running timer or resume a paused one.
    pub fn toggle_timer(&mut self, id: &QuestId) -> Result<Option<Event>> {
        let now = self.clock.now();
        let timer = self
            .timers
            .get_mut(id)
            .ok_or_else(|| TimerError::NotFound(id.clone()))?;

        let event = match timer.toggle() {
            Some(TimerState::Running) => Event::TimerResumed {
                quest_id: id.clone(),
                remaining_secs: timer.remaining_secs(),
                at: now,
            },
            Some(_) => Event::TimerPaused {
                quest_id: id.clone(),
                remaining_secs: timer.remaining_secs(),
                at: now,
            },
            None => return Ok(None),
        };
        self.events.push(event.clone());
        Ok(Some(event))
    }

    pub fn reset_timer(&mut self, id: &QuestId) -> Result<Event> {
        let now = self.clock.now();
        let timer = self
            .timers
            .get_mut(id)
            .ok_or_else(|| TimerError::NotFound(id.clone()))?;
        timer.reset();

        let event = Event::TimerReset {
            quest_id: id.clone(),
            at: now,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Advance every running timer by one second.
    pub fn tick(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let expired: Vec<Event> = self
            .timers
            .values_mut()
            .filter_map(|timer| {
                timer.tick().then(|| Event::TimerExpired {
                    quest_id: timer.quest_id().clone(),
                    at: now,
                })
            })
            .collect();
        if !expired.is_empty() {
            debug!(count = expired.len(), "timers expired");
        }
        self.events.extend(expired.iter().cloned());
        expired
    }

    fn context(&self) -> TransitionContext<'_> {
        TransitionContext::new(self.clock.now(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::quest::{Category, Difficulty};

    fn engine() -> (ProgressionEngine, ManualClock) {
        let clock = ManualClock::new("2026-07-01T09:00:00Z".parse().unwrap());
        let config = EngineConfig {
            seed: Some(11),
            utc_offset_minutes: Some(0),
            ..Default::default()
        };
        (ProgressionEngine::new(config).with_clock(clock.clone()), clock)
    }

    fn draft(title: &str, difficulty: Difficulty) -> QuestDraft {
        QuestDraft::new(title, difficulty, Category::Personal)
    }

    #[test]
    fn rejected_action_keeps_snapshot() {
        let (mut engine, _) = engine();
        engine.add_quest(draft("a", Difficulty::Easy)).unwrap();
        let before = engine.session().clone();

        let err = engine.complete_quest(&QuestId::from("missing"), 0).unwrap_err();
        assert!(matches!(err, CoreError::Quest(QuestError::NotFound(_))));
        assert_eq!(engine.session(), &before);
    }

    #[test]
    fn timer_bonus_flows_into_completion() {
        let (mut engine, _) = engine();
        let quest = engine.add_quest(draft("Deep work", Difficulty::Medium)).unwrap();

        engine.start_timer(&quest.id, Some(10)).unwrap();
        for _ in 0..150 {
            engine.tick();
        }
        // 450 of 600 seconds left -> floor(0.75 * 10)
        let report = engine.complete_with_timer(&quest.id).unwrap();
        assert_eq!(report.completion.bonus_xp, 7);
        assert_eq!(engine.session().game().xp, 32);
        assert!(engine.timer(&quest.id).is_none());
        assert!(engine
            .events()
            .iter()
            .any(|e| matches!(e, Event::TimerCancelled { .. })));
    }

    #[test]
    fn completing_without_timer_has_no_bonus() {
        let (mut engine, _) = engine();
        let quest = engine.add_quest(draft("Plain", Difficulty::Easy)).unwrap();
        let report = engine.complete_with_timer(&quest.id).unwrap();
        assert_eq!(report.completion.bonus_xp, 0);
        assert!(!report.compliment.is_empty());
    }

    #[test]
    fn timer_rules() {
        let (mut engine, _) = engine();
        let quest = engine.add_quest(draft("Timed", Difficulty::Easy)).unwrap();

        assert!(matches!(
            engine.start_timer(&QuestId::from("nope"), None),
            Err(CoreError::Quest(QuestError::NotFound(_)))
        ));
        assert!(matches!(
            engine.toggle_timer(&quest.id),
            Err(CoreError::Timer(TimerError::NotFound(_)))
        ));

        engine.start_timer(&quest.id, None).unwrap();
        assert_eq!(engine.timer(&quest.id).unwrap().remaining_secs(), 25 * 60);

        let paused = engine.toggle_timer(&quest.id).unwrap();
        assert!(matches!(paused, Some(Event::TimerPaused { .. })));
        engine.tick();
        assert_eq!(engine.timer(&quest.id).unwrap().remaining_secs(), 25 * 60);

        engine.toggle_timer(&quest.id).unwrap();
        engine.tick();
        engine.reset_timer(&quest.id).unwrap();
        assert_eq!(engine.timer(&quest.id).unwrap().state(), TimerState::Idle);
        assert_eq!(engine.timer(&quest.id).unwrap().remaining_secs(), 25 * 60);

        engine.complete_quest(&quest.id, 0).unwrap();
        assert!(matches!(
            engine.start_timer(&quest.id, None),
            Err(CoreError::Timer(TimerError::QuestCompleted(_)))
        ));
    }

    #[test]
    fn nudge_cooldown_and_reevaluation() {
        let (mut engine, clock) = engine();
        assert!(engine.nudge().is_none(), "nothing overdue");

        let quest = engine.add_quest(draft("Taxes", Difficulty::Hard)).unwrap();
        let nudge = engine.nudge().unwrap();
        assert_eq!(nudge.overdue_count, 1);
        assert_eq!(nudge.companion, Companion::Coach);

        engine.dismiss_nudge();
        clock.advance(Duration::minutes(59));
        assert!(engine.nudge().is_none());

        clock.advance(Duration::minutes(1));
        assert!(engine.nudge().is_some());

        engine.complete_quest(&quest.id, 0).unwrap();
        assert!(engine.nudge().is_none(), "re-evaluated against overdue count");
    }

    #[test]
    fn dismiss_with_out_of_range_cooldown_does_not_panic() {
        let clock = ManualClock::new("2026-07-01T09:00:00Z".parse().unwrap());
        let mut config = EngineConfig {
            seed: Some(5),
            ..Default::default()
        };
        config.nudge.cooldown_secs = 10_000_000_000_000;
        let mut engine = ProgressionEngine::new(config).with_clock(clock.clone());
        engine.add_quest(draft("Dishes", Difficulty::Easy)).unwrap();

        let event = engine.dismiss_nudge();
        assert!(matches!(event, Event::NudgeDismissed { until, .. } if until == DateTime::<Utc>::MAX_UTC));

        clock.advance(Duration::days(365 * 100));
        assert!(engine.nudge().is_none());
        assert_eq!(engine.snapshot().nudge_quiet_until, Some(DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn snapshot_reports_nudge_window() {
        let (mut engine, clock) = engine();
        assert_eq!(engine.snapshot().nudge_quiet_until, None);

        engine.dismiss_nudge();
        let until = engine.snapshot().nudge_quiet_until.unwrap();
        assert_eq!(until, engine.now() + Duration::hours(1));

        clock.advance(Duration::hours(1));
        assert_eq!(engine.snapshot().nudge_quiet_until, None);
    }

    #[test]
    fn nudge_uses_selected_companion() {
        let (mut engine, _) = engine();
        engine.add_quest(draft("Laundry", Difficulty::Easy)).unwrap();
        engine.select_companion(Companion::Robot).unwrap();
        let nudge = engine.nudge().unwrap();
        assert_eq!(nudge.companion, Companion::Robot);
        assert_eq!(nudge.companion_name, "PROD-1");
    }

    #[test]
    fn seeded_engines_agree() {
        let run = || {
            let (mut engine, _) = engine();
            engine.add_quest(draft("x", Difficulty::Easy)).unwrap();
            (0..5)
                .map(|_| engine.nudge().map(|n| n.message).unwrap_or_default())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn snapshot_reflects_state() {
        let (mut engine, _) = engine();
        let quest = engine.add_quest(draft("Journal", Difficulty::Easy)).unwrap();
        engine.add_quest(draft("Call mom", Difficulty::Easy)).unwrap();
        engine.complete_quest(&quest.id, 0).unwrap();
        engine.select_mood(Mood::Energetic).unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.game.total_quests, 2);
        assert_eq!(snapshot.game.completed_quests, 1);
        assert_eq!(snapshot.overdue_count, 1);
        assert_eq!(snapshot.pet_mood, PetMood::Excited);
        assert!(snapshot.streak_active);
        assert!(!snapshot.streak_at_risk);
        assert_eq!(snapshot.mood, Some(Mood::Energetic));
        assert_eq!(snapshot.suggestions.len(), 3);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["game"]["xp"], 10);
    }

    #[test]
    fn streak_goes_at_risk_after_a_missed_day() {
        let (mut engine, clock) = engine();
        let quest = engine.add_quest(draft("Walk", Difficulty::Easy)).unwrap();
        engine.complete_quest(&quest.id, 0).unwrap();

        clock.advance(Duration::days(2));
        let snapshot = engine.snapshot();
        assert!(snapshot.streak_at_risk);
        assert_eq!(snapshot.streak.current_streak, 1);
    }

    #[test]
    fn drain_empties_log() {
        let (mut engine, _) = engine();
        engine.add_quest(draft("a", Difficulty::Easy)).unwrap();
        assert_eq!(engine.drain_events().len(), 1);
        assert!(engine.events().is_empty());
    }
}
