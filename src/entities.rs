/// All game entity types: pure data plus geometry helpers, no game rules.

use crate::game_stats::{GameStats, ScoreEntry};
use crate::settings::Settings;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, origin top-left, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

// ── Ship, bullets, aliens ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// Intent flags; set by input, consumed by the per-frame update.
    pub moving_left: bool,
    pub moving_right: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub rect: Rect,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Something that happened during one logic step. The frame loop reacts to
/// these with I/O (pauses, files, logging); the logic itself never does.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    GameStarted,
    BulletFired,
    AliensDestroyed { count: u32, points: u32 },
    NewHighScore { score: u32 },
    LevelCleared { level: u32 },
    ShipLost { ships_left: u32 },
    GameOver { score: u32 },
    ScoreConfirmed(ScoreEntry),
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Which overlay the game is showing; derived from the two stats flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Title and Play button.
    Idle,
    Active,
    /// Name entry after the last ship was lost.
    GameOver,
}

/// The entire game state. Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub settings: Settings,
    pub stats: GameStats,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    /// The living fleet.
    pub aliens: Vec<Alien>,
    /// Text typed at the game-over prompt.
    pub name_input: String,
    /// Whether the terminal cursor should be shown.
    pub pointer_visible: bool,
    /// Last entry written to the scores log, shown on the title screen.
    pub last_entry: Option<ScoreEntry>,
    pub frame: u64,
}

impl GameState {
    pub fn phase(&self) -> Phase {
        if self.stats.game_active {
            Phase::Active
        } else if self.stats.game_over {
            Phase::GameOver
        } else {
            Phase::Idle
        }
    }
}
