/// HUD text prepared from the current stats. Rendering only positions and
/// colours these strings.

use crate::game_stats::GameStats;

#[derive(Clone, Debug, PartialEq)]
pub struct Scoreboard {
    pub score: String,
    pub high_score: String,
    pub level: String,
    /// Number of ship icons to draw.
    pub ships: u32,
}

impl Scoreboard {
    pub fn from_stats(stats: &GameStats) -> Self {
        Self {
            score: format_score(stats.score),
            high_score: format!("Hi {}", format_score(stats.high_score)),
            level: format!("Level {}", stats.level),
            ships: stats.ships_left,
        }
    }
}

/// Round to the nearest ten and group thousands with commas.
pub fn format_score(score: u32) -> String {
    let rounded = (score as u64 + 5) / 10 * 10;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
