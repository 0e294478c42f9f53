//! # QuestLife Core Library
//!
//! Gamification engine for a personal task list: quests earn XP and gold,
//! feed a virtual pet, grow life stats, extend a daily streak and unlock
//! achievements. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Session**: an immutable snapshot of all gamification state, advanced
//!   by the pure [`reduce`] function one [`Action`] at a time
//! - **Engine**: [`ProgressionEngine`] wraps the session with the pieces
//!   that depend on time or randomness (quest timers, nudges, compliments)
//! - **Configuration**: TOML-based reward tables and policy switches
//!
//! ## Key Components
//!
//! - [`ProgressionEngine`]: Command/query facade used by front ends
//! - [`Session`]: Quest board, player level, pet, streak and achievements
//! - [`EngineConfig`]: Tunable rewards and policies
//! - [`Event`]: Feedback emitted by every state change

pub mod companion;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod mood;
pub mod progression;
pub mod quest;
pub mod session;
pub mod timer;

pub use companion::{Companion, Nudge};
pub use config::EngineConfig;
pub use engine::{Clock, CompletionReport, ManualClock, ProgressionEngine, Snapshot, SystemClock};
pub use error::{ConfigError, CoreError, QuestError, TimerError, ValidationError};
pub use events::Event;
pub use mood::Mood;
pub use progression::{AchievementId, GameState, LevelUpPolicy, PetMood, StatAxis, StreakPolicy};
pub use quest::{Category, Difficulty, Quest, QuestDraft, QuestId};
pub use session::{reduce, Action, Completion, Outcome, Session, TransitionContext};
pub use timer::{QuestTimer, TimerState};
