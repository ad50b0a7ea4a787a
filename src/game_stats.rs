/// Score, level and lives counters plus the two files they persist to.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;

use crate::settings::Settings;

/// Longest name accepted at the game-over prompt.
pub const MAX_NAME_LEN: usize = 15;

#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    pub level: u32,
    /// True while aliens are moving and input drives the ship.
    pub game_active: bool,
    /// True while the name-entry prompt is shown after the last ship is lost.
    pub game_over: bool,
    pub high_score: u32,
}

impl GameStats {
    /// Fresh counters for an idle game, with the high score carried in.
    pub fn new(settings: &Settings, high_score: u32) -> Self {
        let mut stats = Self {
            ships_left: 0,
            score: 0,
            level: 1,
            game_active: false,
            game_over: false,
            high_score,
        };
        stats.reset_stats(settings);
        stats
    }

    /// Reset everything that changes during a single game.
    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }
}

// ── High-score file ──────────────────────────────────────────────────────────

/// Why the high-score file could not be used.
#[derive(Debug, PartialEq)]
pub enum HighScoreError {
    Missing,
    Unparsable(String),
}

impl fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighScoreError::Missing => write!(f, "high score file not found"),
            HighScoreError::Unparsable(content) => {
                write!(f, "high score file holds {content:?}, not an integer")
            }
        }
    }
}

impl std::error::Error for HighScoreError {}

pub fn read_high_score(path: &Path) -> Result<u32, HighScoreError> {
    let content = fs::read_to_string(path).map_err(|_| HighScoreError::Missing)?;
    content
        .trim()
        .parse()
        .map_err(|_| HighScoreError::Unparsable(content.trim().to_string()))
}

/// Read the persisted high score, falling back to 0 when the file is absent
/// or does not hold a number.
pub fn load_high_score(path: &Path) -> u32 {
    match read_high_score(path) {
        Ok(score) => {
            log::info!("loaded high score {score} from {}", path.display());
            score
        }
        Err(err) => {
            log::warn!("{err} ({}), starting from 0", path.display());
            0
        }
    }
}

pub fn save_high_score(path: &Path, score: u32) -> anyhow::Result<()> {
    fs::write(path, score.to_string())
        .with_context(|| format!("writing high score to {}", path.display()))
}

// ── Scores log ───────────────────────────────────────────────────────────────

/// One "<name> <score>" line of the scores log.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.score)
    }
}

impl ScoreEntry {
    /// Parse a log line. The score is the last whitespace-separated field so
    /// names may contain spaces.
    pub fn parse(line: &str) -> Option<Self> {
        let (name, score) = line.trim_end().rsplit_once(' ')?;
        Some(Self {
            name: name.to_string(),
            score: score.parse().ok()?,
        })
    }
}

/// Write the entry to the scores log, replacing whatever was there.
pub fn save_score_entry(path: &Path, entry: &ScoreEntry) -> anyhow::Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("opening scores log {}", path.display()))?;
    writeln!(file, "{entry}").with_context(|| format!("writing scores log {}", path.display()))
}

/// Every well-formed entry of the scores log. A missing log is empty.
pub fn read_score_entries(path: &Path) -> anyhow::Result<Vec<ScoreEntry>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("reading scores log {}", path.display()))
        }
    };
    Ok(content.lines().filter_map(ScoreEntry::parse).collect())
}
