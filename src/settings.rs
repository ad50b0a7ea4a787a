/// Tunable game parameters.
///
/// Static values (sizes, limits) are fixed once the game is constructed.
/// Dynamic values (speeds, fleet direction, points per alien) are reset by
/// `initialize_dynamic_settings` at every new game and scaled by
/// `increase_speed` every time a fleet is cleared.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Screen (filled in from the terminal at runtime) ──────────────────────
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_limit: u32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullets_allowed: usize,

    // ── Aliens ───────────────────────────────────────────────────────────────
    pub alien_width: f32,
    pub alien_height: f32,
    pub fleet_drop_speed: f32,

    // ── Difficulty scaling ───────────────────────────────────────────────────
    /// Multiplier applied to every speed when a level is cleared.
    pub speedup_scale: f32,
    /// Multiplier applied to the point value of an alien on level clear.
    pub score_scale: f32,

    // ── Base values for the dynamic settings ─────────────────────────────────
    pub base_ship_speed: f32,
    pub base_bullet_speed: f32,
    pub base_alien_speed: f32,
    pub base_alien_points: u32,

    // ── Timing ───────────────────────────────────────────────────────────────
    /// Frame length of the main loop.
    pub frame_ms: u64,
    /// Freeze after losing a ship.
    pub ship_hit_pause_ms: u64,

    // ── Dynamic ──────────────────────────────────────────────────────────────
    #[serde(skip)]
    pub ship_speed: f32,
    #[serde(skip)]
    pub bullet_speed: f32,
    #[serde(skip)]
    pub alien_speed: f32,
    #[serde(skip)]
    pub alien_points: u32,
    /// +1 moves the fleet right, -1 moves it left.
    #[serde(skip)]
    pub fleet_direction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            screen_width: 80.0,
            screen_height: 24.0,
            ship_width: 5.0,
            ship_height: 2.0,
            ship_limit: 3,
            bullet_width: 1.0,
            bullet_height: 1.0,
            bullets_allowed: 3,
            alien_width: 3.0,
            alien_height: 2.0,
            fleet_drop_speed: 1.0,
            speedup_scale: 1.1,
            score_scale: 1.5,
            base_ship_speed: 1.0,
            base_bullet_speed: 1.0,
            base_alien_speed: 0.15,
            base_alien_points: 50,
            frame_ms: 33,
            ship_hit_pause_ms: 500,
            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            alien_points: 0,
            fleet_direction: 1.0,
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Settings {
    /// Same defaults, but sized for the given screen.
    pub fn with_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Reset everything that changes during a game back to its base value.
    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed = self.base_ship_speed;
        self.bullet_speed = self.base_bullet_speed;
        self.alien_speed = self.base_alien_speed;
        self.alien_points = self.base_alien_points;
        self.fleet_direction = 1.0;
    }

    /// Make the next level faster and worth more.
    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.alien_points = (self.alien_points as f32 * self.score_scale) as u32;
    }
}
