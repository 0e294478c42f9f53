//! End-to-end progression scenarios driven through the engine.

use chrono::Duration;
use indoc::indoc;
use questlife_core::companion::Companion;
use questlife_core::progression::{AchievementId, StreakChange};
use questlife_core::{
    Category, CoreError, Difficulty, EngineConfig, Event, ManualClock, Mood, ProgressionEngine,
    QuestDraft, QuestError, StatAxis,
};

fn engine_with(config: EngineConfig) -> (ProgressionEngine, ManualClock) {
    let clock = ManualClock::new("2026-03-02T08:00:00Z".parse().unwrap());
    (ProgressionEngine::new(config).with_clock(clock.clone()), clock)
}

fn engine() -> (ProgressionEngine, ManualClock) {
    engine_with(EngineConfig {
        seed: Some(42),
        utc_offset_minutes: Some(0),
        ..Default::default()
    })
}

#[test]
fn test_first_quest_unlocks_first_steps() {
    let (mut engine, _) = engine();
    let quest = engine
        .add_quest(QuestDraft::new("Drink water", Difficulty::Easy, Category::Health))
        .unwrap();
    assert_eq!(quest.xp_reward, 10);
    assert_eq!(quest.gold_reward, 3);

    let report = engine.complete_quest(&quest.id, 0).unwrap();
    assert_eq!(report.completion.unlocked, vec![AchievementId::FirstSteps]);
    assert_eq!(report.completion.streak.current_streak, 1);
    assert_eq!(report.completion.streak_change, StreakChange::Extended);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.game.xp, 10);
    assert_eq!(snapshot.game.gold, 3);
    assert_eq!(snapshot.life_stats.body, 2);
    assert_eq!(snapshot.pet.happiness, 60);
    assert!(snapshot
        .achievements
        .iter()
        .any(|a| a.id == AchievementId::FirstSteps && a.unlocked));
}

#[test]
fn test_level_up_and_achievement_in_one_completion() {
    let (mut engine, _) = engine();
    // 9 easy quests: 90 XP, level 1.
    for i in 0..9 {
        let q = engine
            .add_quest(QuestDraft::new(format!("chore {i}"), Difficulty::Easy, Category::Work))
            .unwrap();
        engine.complete_quest(&q.id, 0).unwrap();
    }
    assert_eq!(engine.session().game().xp, 90);
    assert_eq!(engine.session().game().level, 1);

    let hard = engine
        .add_quest(QuestDraft::new("Ship release", Difficulty::Hard, Category::Work))
        .unwrap();
    let report = engine.complete_quest(&hard.id, 0).unwrap();

    let game = engine.session().game();
    assert_eq!((game.level, game.xp, game.xp_to_next), (2, 40, 200));
    assert!(report.completion.level_up.is_some());
    // Tenth completion and level 2 arrive together.
    assert!(report.completion.unlocked.contains(&AchievementId::QuestMaster));
    assert!(report.completion.unlocked.contains(&AchievementId::LevelUp));
    assert_eq!(engine.session().pet().level, 2);
}

#[test]
fn test_double_completion_is_noop() {
    let (mut engine, _) = engine();
    let q = engine
        .add_quest(QuestDraft::new("Read", Difficulty::Medium, Category::Learning))
        .unwrap();
    engine.complete_quest(&q.id, 0).unwrap();
    let before = engine.snapshot();
    let events_before = engine.events().len();

    let err = engine.complete_quest(&q.id, 0).unwrap_err();
    assert!(matches!(err, CoreError::Quest(QuestError::AlreadyCompleted(_))));
    assert!(err.is_noop());
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.events().len(), events_before);
}

#[test]
fn test_streak_over_consecutive_days() {
    let (mut engine, clock) = engine();
    for day in 0..3 {
        let q = engine
            .add_quest(QuestDraft::new(format!("day {day}"), Difficulty::Easy, Category::Social))
            .unwrap();
        engine.complete_quest(&q.id, 0).unwrap();
        clock.advance(Duration::days(1));
    }
    assert_eq!(engine.session().streak().current_streak, 3);
    assert_eq!(engine.session().streak().longest_streak, 3);
}

#[test]
fn test_reset_on_gap_policy_from_config() {
    let config = EngineConfig::from_toml_str(indoc! {r#"
        utc_offset_minutes = 0

        [streak]
        policy = "reset_on_gap"
    "#})
    .unwrap();
    let (mut engine, clock) = engine_with(config);

    for _ in 0..2 {
        let q = engine
            .add_quest(QuestDraft::new("walk", Difficulty::Easy, Category::Health))
            .unwrap();
        engine.complete_quest(&q.id, 0).unwrap();
        clock.advance(Duration::days(1));
    }
    clock.advance(Duration::days(2));
    let q = engine
        .add_quest(QuestDraft::new("walk again", Difficulty::Easy, Category::Health))
        .unwrap();
    let report = engine.complete_quest(&q.id, 0).unwrap();

    assert_eq!(report.completion.streak_change, StreakChange::Restarted);
    assert_eq!(engine.session().streak().current_streak, 1);
    assert_eq!(engine.session().streak().longest_streak, 2);
}

#[test]
fn test_timer_bonus_and_expiry() {
    let (mut engine, _) = engine();
    let fast = engine
        .add_quest(QuestDraft::new("Inbox zero", Difficulty::Easy, Category::Work))
        .unwrap();
    let slow = engine
        .add_quest(QuestDraft::new("Essay", Difficulty::Hard, Category::Learning))
        .unwrap();

    engine.start_timer(&fast.id, Some(1)).unwrap();
    engine.start_timer(&slow.id, Some(2)).unwrap();

    let mut expired = Vec::new();
    for _ in 0..60 {
        expired.extend(engine.tick());
    }
    assert_eq!(expired.len(), 1);
    assert!(matches!(&expired[0], Event::TimerExpired { quest_id, .. } if *quest_id == fast.id));

    let late = engine.complete_with_timer(&fast.id).unwrap();
    assert_eq!(late.completion.bonus_xp, 0);

    let early = engine.complete_with_timer(&slow.id).unwrap();
    assert_eq!(early.completion.bonus_xp, 5);
    assert_eq!(early.completion.total_xp(), 55);
    assert_eq!(engine.timers().count(), 0);
}

#[test]
fn test_mood_and_companion_selection() {
    let (mut engine, _) = engine();
    let suggestions = engine.select_mood(Mood::Stressed).unwrap();
    assert_eq!(suggestions.len(), 3);
    engine.select_companion(Companion::Wizard).unwrap();

    let kinds: Vec<_> = engine.drain_events().iter().map(Event::kind).collect();
    assert_eq!(kinds, vec!["mood_selected", "companion_selected"]);

    engine
        .add_quest(QuestDraft::new("Meditate", Difficulty::Easy, Category::Personal))
        .unwrap();
    let nudge = engine.nudge().unwrap();
    assert_eq!(nudge.companion_name, "Grumpus the Wise");
}

#[test]
fn test_spirit_stat_from_personal_and_social() {
    let (mut engine, _) = engine();
    for category in [Category::Personal, Category::Social] {
        let q = engine
            .add_quest(QuestDraft::new("x", Difficulty::Hard, category))
            .unwrap();
        let report = engine.complete_quest(&q.id, 0).unwrap();
        assert_eq!(report.completion.stat_axis, StatAxis::Spirit);
    }
    assert_eq!(engine.session().life_stats().spirit, 10);
}

#[test]
fn test_starter_board() {
    let engine = ProgressionEngine::with_starter_quests(EngineConfig::default()).unwrap();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.game.total_quests, 4);
    assert_eq!(snapshot.game.completed_quests, 0);
    assert_eq!(snapshot.overdue_count, 4);
}
