use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::Args;
use questlife_core::{
    Category, Companion, Difficulty, Mood, ProgressionEngine, QuestDraft, QuestError, QuestId,
};

use super::render;

const HELP: &str = "\
commands:
  add <difficulty> <category> <title> [-- description]
  complete <id|#n> [bonus]
  mood <energetic|calm|motivated|down|stressed|neutral>
  companion <coach|wizard|cat|robot|teacher>
  dismiss
  nudge
  timer start <id|#n> [minutes]
  timer toggle <id|#n>
  timer reset <id|#n>
  tick [seconds]
  status | quests | achievements | help | quit";

#[derive(Args)]
pub struct PlayArgs {
    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,
    /// Seed for companion messages and compliments
    #[arg(long)]
    pub seed: Option<u64>,
    /// Start with the starter quest board
    #[arg(long)]
    pub starter: bool,
    /// Print events and results as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    Add {
        difficulty: Difficulty,
        category: Category,
        title: String,
        description: Option<String>,
    },
    Complete {
        target: String,
        bonus: Option<u32>,
    },
    Mood(Mood),
    Companion(Companion),
    Dismiss,
    Nudge,
    TimerStart {
        target: String,
        minutes: Option<u32>,
    },
    TimerToggle {
        target: String,
    },
    TimerReset {
        target: String,
    },
    Tick(u32),
    Status,
    Quests,
    Achievements,
    Help,
    Quit,
}

/// Parse a line. Blank lines and `#` comments yield `None`.
pub(crate) fn parse_line(input: &str) -> Result<Option<Line>, Box<dyn Error>> {
    let input = input.trim();
    if input.is_empty() || input.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = input
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((input, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let line = match command.to_ascii_lowercase().as_str() {
        "add" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let usage = "usage: add <difficulty> <category> <title> [-- description]";
            let difficulty = parts.next().filter(|s| !s.is_empty()).ok_or(usage)?;
            let category = parts.next().ok_or(usage)?;
            let text = parts.next().unwrap_or("");
            let (title, description) = match text.split_once(" -- ") {
                Some((t, d)) => (t.trim(), Some(d.trim().to_string())),
                None => (text.trim(), None),
            };
            Line::Add {
                difficulty: difficulty.parse()?,
                category: category.trim().parse()?,
                title: title.to_string(),
                description,
            }
        }
        "complete" | "done" => Line::Complete {
            target: required(&args, 0, "usage: complete <id|#n> [bonus]")?,
            bonus: args.get(1).map(|b| b.parse()).transpose()?,
        },
        "mood" => Line::Mood(required(&args, 0, "usage: mood <mood>")?.parse()?),
        "companion" => Line::Companion(required(&args, 0, "usage: companion <persona>")?.parse()?),
        "dismiss" => Line::Dismiss,
        "nudge" => Line::Nudge,
        "timer" => {
            let sub = required(&args, 0, "usage: timer start|toggle|reset <id|#n>")?;
            let target = required(&args, 1, "usage: timer start|toggle|reset <id|#n>")?;
            match sub.as_str() {
                "start" => Line::TimerStart {
                    target,
                    minutes: args.get(2).map(|m| m.parse()).transpose()?,
                },
                "toggle" | "pause" | "resume" => Line::TimerToggle { target },
                "reset" => Line::TimerReset { target },
                other => return Err(format!("unknown timer command: {other}").into()),
            }
        }
        "tick" => Line::Tick(args.first().map(|n| n.parse()).transpose()?.unwrap_or(1)),
        "status" => Line::Status,
        "quests" | "list" => Line::Quests,
        "achievements" => Line::Achievements,
        "help" | "?" => Line::Help,
        "quit" | "exit" => Line::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)").into()),
    };
    Ok(Some(line))
}

fn required(args: &[&str], index: usize, usage: &str) -> Result<String, Box<dyn Error>> {
    args.get(index)
        .map(|s| s.to_string())
        .ok_or_else(|| usage.into())
}

enum Flow {
    Continue,
    Quit,
}

/// Drives one engine from text commands.
pub(crate) struct Runner {
    engine: ProgressionEngine,
    json: bool,
}

impl Runner {
    pub(crate) fn new(engine: ProgressionEngine, json: bool) -> Self {
        Self { engine, json }
    }

    /// Execute every line. Failed lines are reported and skipped; only a
    /// read failure aborts.
    pub(crate) fn run_lines(&mut self, reader: impl BufRead) -> Result<(), Box<dyn Error>> {
        for line in reader.lines() {
            let line = line?;
            let result = parse_line(&line).and_then(|parsed| match parsed {
                Some(parsed) => self.execute(parsed),
                None => Ok(Flow::Continue),
            });
            match result {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => eprintln!("error: {e}"),
            }
        }
        Ok(())
    }

    fn execute(&mut self, line: Line) -> Result<Flow, Box<dyn Error>> {
        match line {
            Line::Add {
                difficulty,
                category,
                title,
                description,
            } => {
                let mut draft = QuestDraft::new(title, difficulty, category);
                if let Some(description) = description {
                    draft = draft.with_description(description);
                }
                self.engine.add_quest(draft)?;
                self.flush_events()?;
            }
            Line::Complete { target, bonus } => {
                let id = self.resolve(&target)?;
                let report = match bonus {
                    Some(bonus) => self.engine.complete_quest(&id, bonus)?,
                    None => self.engine.complete_with_timer(&id)?,
                };
                self.flush_events()?;
                if self.json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    render::print_report(&report);
                }
            }
            Line::Mood(mood) => {
                self.engine.select_mood(mood)?;
                self.flush_events()?;
            }
            Line::Companion(companion) => {
                self.engine.select_companion(companion)?;
                self.flush_events()?;
            }
            Line::Dismiss => {
                self.engine.dismiss_nudge();
                self.flush_events()?;
            }
            Line::Nudge => {
                let nudge = self.engine.nudge();
                if self.json {
                    println!("{}", serde_json::to_string(&nudge)?);
                } else {
                    match nudge {
                        Some(nudge) => render::print_nudge(&nudge),
                        None => println!("no nudge"),
                    }
                }
            }
            Line::TimerStart { target, minutes } => {
                let id = self.resolve(&target)?;
                self.engine.start_timer(&id, minutes)?;
                self.flush_events()?;
            }
            Line::TimerToggle { target } => {
                let id = self.resolve(&target)?;
                self.engine.toggle_timer(&id)?;
                self.flush_events()?;
            }
            Line::TimerReset { target } => {
                let id = self.resolve(&target)?;
                self.engine.reset_timer(&id)?;
                self.flush_events()?;
            }
            Line::Tick(seconds) => {
                for _ in 0..seconds {
                    self.engine.tick();
                }
                self.flush_events()?;
            }
            Line::Status => {
                let snapshot = self.engine.snapshot();
                if self.json {
                    println!("{}", serde_json::to_string(&snapshot)?);
                } else {
                    render::print_status(&snapshot);
                }
            }
            Line::Quests => {
                let quests = self.engine.session().quests().as_slice();
                if self.json {
                    println!("{}", serde_json::to_string(quests)?);
                } else {
                    render::print_quests(quests);
                }
            }
            Line::Achievements => {
                let achievements = self.engine.session().achievements();
                if self.json {
                    println!("{}", serde_json::to_string(achievements)?);
                } else {
                    render::print_achievements(achievements);
                }
            }
            Line::Help => println!("{HELP}"),
            Line::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// `#n` is a 1-based board position; anything else an id or unique id
    /// prefix.
    fn resolve(&self, target: &str) -> Result<QuestId, Box<dyn Error>> {
        let quests = self.engine.session().quests().as_slice();

        if let Some(index) = target.strip_prefix('#') {
            let n: usize = index.parse()?;
            return n
                .checked_sub(1)
                .and_then(|i| quests.get(i))
                .map(|q| q.id.clone())
                .ok_or_else(|| format!("no quest at #{n}").into());
        }

        if let Some(quest) = quests.iter().find(|q| q.id.as_str() == target) {
            return Ok(quest.id.clone());
        }
        let mut matches = quests.iter().filter(|q| q.id.as_str().starts_with(target));
        match (matches.next(), matches.next()) {
            (Some(quest), None) => Ok(quest.id.clone()),
            (Some(_), Some(_)) => Err(format!("ambiguous quest id: {target}").into()),
            (None, _) => Err(QuestError::NotFound(QuestId::from(target)).into()),
        }
    }

    fn flush_events(&mut self) -> Result<(), serde_json::Error> {
        let events = self.engine.drain_events();
        render::print_events(&events, self.json)
    }
}

pub fn run(args: PlayArgs, config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = super::load_config(config_path, args.seed)?;
    let engine = if args.starter {
        ProgressionEngine::with_starter_quests(config)?
    } else {
        ProgressionEngine::new(config)
    };
    let mut runner = Runner::new(engine, args.json);

    match args.script {
        Some(path) => {
            let file = File::open(&path)
                .map_err(|e| format!("cannot read script {}: {e}", path.display()))?;
            runner.run_lines(BufReader::new(file))
        }
        None => runner.run_lines(io::stdin().lock()),
    }
}
