use rand::seq::SliceRandom;
use rand::Rng;

use super::Companion;

/// Placeholder replaced with the user's name.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Nudge templates for each persona.
pub fn templates(companion: Companion) -> &'static [&'static str; 4] {
    match companion {
        Companion::Coach => &[
            "{name}, drop and give me 20... completed quests! What's with all these overdue tasks?",
            "No pain, no gain! But skipping quests? That's just pain with no gain!",
            "I've seen stronger commitment from a soggy pretzel! Get moving!",
            "You said you'd conquer today. Right now you're being conquered BY today!",
        ],
        Companion::Wizard => &[
            "{name}, you dare ignore the ancient wisdom of... doing your tasks?",
            "I foresee... many incomplete quests in your future. Unless you act NOW!",
            "By my beard! These overdue quests are casting a curse of procrastination!",
            "The crystal ball shows me someone who talks big but acts small. Ring any bells?",
        ],
        Companion::Cat => &[
            "{name}, I've seen litter boxes with better organization than your quest list.",
            "Meow. Seriously? I spend 16 hours a day napping and I'M more productive than you.",
            "If you were a mouse, you'd have starved by now with this work ethic.",
            "I'm judging you. Yes, with these exact eyes. Do your quests.",
        ],
        Companion::Robot => &[
            "ERROR 404: {name}'s motivation not found. Please restart productivity.exe",
            "CALCULATING... You are operating at 23% efficiency. This is suboptimal.",
            "ALERT: Procrastination levels critical. Immediate action required to prevent system failure.",
            "SCANNING... Multiple overdue tasks detected. Initiating shame protocol.",
        ],
        Companion::Teacher => &[
            "{name}, I'm disappointed but not surprised. Where's your homework... I mean, quests?",
            "Class, today we're studying the consequences of poor time management. Exhibit A: You.",
            "I don't want to hear 'the dog ate my motivation.' Get those tasks done!",
            "Pop quiz: What happens when you ignore your responsibilities? You get a visit from me!",
        ],
    }
}

/// Pick one of the persona's templates and fill in the user name.
pub fn pick_message<R: Rng + ?Sized>(companion: Companion, user_name: &str, rng: &mut R) -> String {
    let template = templates(companion)
        .choose(rng)
        .copied()
        .unwrap_or_default();
    template.replace(NAME_PLACEHOLDER, user_name)
}

const COMPLIMENTS: [&str; 8] = [
    "You're on fire! 🔥",
    "That was legendary! ⚡",
    "Quest mastered! 🏆",
    "Absolutely crushing it! 💪",
    "Level up vibes! ✨",
    "Pure excellence! 🌟",
    "Champion mode activated! 👑",
    "Unstoppable force! 🚀",
];

/// Celebration line shown after a completion.
pub fn pick_compliment<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    COMPLIMENTS.choose(rng).copied().unwrap_or(COMPLIMENTS[0])
}
