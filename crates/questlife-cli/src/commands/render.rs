//! Plain-text rendering of snapshots and events.

use questlife_core::progression::Achievement;
use questlife_core::{CompletionReport, Event, Nudge, Quest, QuestId, Snapshot};

/// First eight characters of an id, enough to tell quests apart.
pub fn short_id(id: &QuestId) -> &str {
    let s = id.as_str();
    s.get(..8).unwrap_or(s)
}

pub fn event_line(event: &Event) -> String {
    match event {
        Event::QuestAdded {
            quest_id,
            title,
            difficulty,
            xp_reward,
            gold_reward,
            ..
        } => format!(
            "+ quest {} \"{title}\" [{difficulty}] {xp_reward} XP / {gold_reward} gold",
            short_id(quest_id)
        ),
        Event::QuestCompleted {
            quest_id,
            xp_gained,
            bonus_xp,
            gold_gained,
            ..
        } => {
            let bonus = if *bonus_xp > 0 {
                format!(" (incl. {bonus_xp} bonus)")
            } else {
                String::new()
            };
            format!(
                "✓ completed {}: +{xp_gained} XP{bonus}, +{gold_gained} gold",
                short_id(quest_id)
            )
        }
        Event::LevelUp { from, to, .. } => format!("★ LEVEL UP! {from} -> {to}"),
        Event::StreakUpdated {
            current_streak,
            longest_streak,
            ..
        } => format!("🔥 streak {current_streak} day(s), best {longest_streak}"),
        Event::LifeStatRaised { axis, value, .. } => {
            format!("{} is now {value}/100", axis.as_str())
        }
        Event::PetFed { happiness, level, .. } => {
            format!("pet happiness {happiness}%, level {level}")
        }
        Event::AchievementUnlocked { title, .. } => format!("🏆 achievement unlocked: {title}"),
        Event::MoodSelected {
            mood, suggestions, ..
        } => {
            let mut line = format!("{} feeling {mood}", mood.emoji());
            for s in suggestions {
                line.push_str("\n  - ");
                line.push_str(s);
            }
            line
        }
        Event::CompanionSelected { companion, .. } => {
            format!("{} {} is your companion", companion.emoji(), companion.display_name())
        }
        Event::NudgeDismissed { until, .. } => {
            format!("nudges paused until {}", until.format("%H:%M UTC"))
        }
        Event::TimerStarted {
            quest_id,
            duration_secs,
            ..
        } => format!(
            "⏱ timer running for {} ({}:{:02} left)",
            short_id(quest_id),
            duration_secs / 60,
            duration_secs % 60
        ),
        Event::TimerPaused {
            quest_id,
            remaining_secs,
            ..
        } => format!("timer paused for {} ({remaining_secs}s left)", short_id(quest_id)),
        Event::TimerResumed {
            quest_id,
            remaining_secs,
            ..
        } => format!("timer resumed for {} ({remaining_secs}s left)", short_id(quest_id)),
        Event::TimerReset { quest_id, .. } => format!("timer reset for {}", short_id(quest_id)),
        Event::TimerExpired { quest_id, .. } => {
            format!("⏰ time's up for {}", short_id(quest_id))
        }
        Event::TimerCancelled { quest_id, .. } => {
            format!("timer stopped for {}", short_id(quest_id))
        }
    }
}

pub fn print_events(events: &[Event], json: bool) -> Result<(), serde_json::Error> {
    for event in events {
        if json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{}", event_line(event));
        }
    }
    Ok(())
}

pub fn print_report(report: &CompletionReport) {
    println!("🎉 Quest Complete! {}", report.compliment);
}

pub fn print_nudge(nudge: &Nudge) {
    println!(
        "{} {}: {} ({} quest(s) waiting)",
        nudge.companion.emoji(),
        nudge.companion_name,
        nudge.message,
        nudge.overdue_count
    );
}

pub fn print_quests(quests: &[Quest]) {
    if quests.is_empty() {
        println!("no quests yet");
        return;
    }
    for (i, quest) in quests.iter().enumerate() {
        let mark = if quest.completed { "x" } else { " " };
        println!(
            "#{:<2} [{mark}] {} {:<6} {:<8} {} ({} XP, {} gold)",
            i + 1,
            short_id(&quest.id),
            quest.difficulty,
            quest.category,
            quest.title,
            quest.xp_reward,
            quest.gold_reward
        );
    }
}

pub fn print_achievements(achievements: &[Achievement]) {
    for a in achievements {
        let state = match a.unlocked_at {
            Some(at) if a.unlocked => format!("unlocked {}", at.format("%Y-%m-%d")),
            _ => "locked".to_string(),
        };
        println!("{} {:<15} {:<40} {state}", a.icon, a.title, a.description);
    }
}

pub fn print_status(snapshot: &Snapshot) {
    let game = &snapshot.game;
    println!(
        "Level {} | XP {}/{} ({:.0}%) | Gold {}",
        game.level, game.xp, game.xp_to_next, game.progress_pct, game.gold
    );
    println!(
        "Quests {}/{} done, {} waiting",
        game.completed_quests, game.total_quests, snapshot.overdue_count
    );
    println!(
        "Mind {} | Body {} | Spirit {}",
        snapshot.life_stats.mind, snapshot.life_stats.body, snapshot.life_stats.spirit
    );
    println!(
        "Pet {} happiness {}% level {}: {}",
        snapshot.pet.emoji(),
        snapshot.pet.happiness,
        snapshot.pet.level,
        snapshot.pet_mood.message()
    );

    let streak = &snapshot.streak;
    let note = if snapshot.streak_at_risk {
        " (at risk)"
    } else if snapshot.streak_active {
        ""
    } else {
        " (inactive)"
    };
    println!(
        "Streak {} day(s), best {}{note}",
        streak.current_streak, streak.longest_streak
    );

    println!(
        "Companion {} {}",
        snapshot.companion.emoji(),
        snapshot.companion.display_name()
    );
    if let Some(mood) = snapshot.mood {
        println!("Mood {} {mood}", mood.emoji());
    }
    if let Some(until) = snapshot.nudge_quiet_until {
        println!("Nudges paused until {}", until.format("%Y-%m-%d %H:%M UTC"));
    }
    for timer in &snapshot.timers {
        println!(
            "Timer {} {} of {}:00 {:?}",
            short_id(&timer.quest_id),
            timer.display,
            timer.total_secs / 60,
            timer.state
        );
    }
}
