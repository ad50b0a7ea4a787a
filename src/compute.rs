/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new `GameState` together with the
/// `GameEvent`s the step produced. No I/O happens here; the frame loop
/// turns events into pauses, file writes and log lines.

use crate::entities::{Alien, Bullet, GameEvent, GameState, Rect, Ship};
use crate::game_stats::GameStats;
use crate::settings::Settings;

const PLAY_BUTTON_WIDTH: f32 = 12.0;
const PLAY_BUTTON_HEIGHT: f32 = 3.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the idle state shown before the first game: a fleet hovering behind
/// the title screen and a centred ship.
pub fn init_state(settings: Settings, high_score: u32) -> GameState {
    let stats = GameStats::new(&settings, high_score);
    GameState {
        ship: new_ship(&settings),
        aliens: create_fleet(&settings),
        bullets: Vec::new(),
        stats,
        name_input: String::new(),
        pointer_visible: true,
        last_entry: None,
        frame: 0,
        settings,
    }
}

/// A ship resting at the bottom centre of the screen.
pub fn new_ship(settings: &Settings) -> Ship {
    Ship {
        rect: Rect::new(
            (settings.screen_width - settings.ship_width) / 2.0,
            settings.screen_height - settings.ship_height,
            settings.ship_width,
            settings.ship_height,
        ),
        moving_left: false,
        moving_right: false,
    }
}

/// The clickable Play button, centred on screen.
pub fn play_button(settings: &Settings) -> Rect {
    Rect::new(
        ((settings.screen_width - PLAY_BUTTON_WIDTH) / 2.0).floor(),
        ((settings.screen_height - PLAY_BUTTON_HEIGHT) / 2.0).floor(),
        PLAY_BUTTON_WIDTH,
        PLAY_BUTTON_HEIGHT,
    )
}

/// Rebuild an inactive board for a new screen size. The high score and the
/// last saved entry survive, and behind the name prompt so do the finished
/// game's score, level and ships.
pub fn resize_board(state: &GameState, width: f32, height: f32) -> GameState {
    let settings = Settings {
        screen_width: width,
        screen_height: height,
        ..state.settings.clone()
    };
    let mut next = init_state(settings, state.stats.high_score);
    next.stats.game_over = state.stats.game_over;
    next.stats.score = state.stats.score;
    next.stats.level = state.stats.level;
    next.stats.ships_left = state.stats.ships_left;
    next.name_input = state.name_input.clone();
    next.last_entry = state.last_entry.clone();
    next.frame = state.frame;
    next
}

// ── Fleet formation ──────────────────────────────────────────────────────────

/// Number of alien columns and rows that fit on screen. Spacing between
/// aliens equals one alien width (or height), with a one-alien margin at the
/// sides and top and room for the ship plus two alien heights at the bottom.
pub fn fleet_layout(settings: &Settings) -> (usize, usize) {
    let alien_w = settings.alien_width;
    let alien_h = settings.alien_height;

    let available_space_x = settings.screen_width - 2.0 * alien_w;
    let number_aliens_x = (available_space_x / (2.0 * alien_w)).floor().max(0.0);

    let available_space_y = settings.screen_height - 3.0 * alien_h - settings.ship_height;
    let number_rows = (available_space_y / (2.0 * alien_h)).floor().max(0.0);

    (number_aliens_x as usize, number_rows as usize)
}

/// A full grid of aliens, placed left-to-right then top-to-bottom.
pub fn create_fleet(settings: &Settings) -> Vec<Alien> {
    let (columns, rows) = fleet_layout(settings);
    let alien_w = settings.alien_width;
    let alien_h = settings.alien_height;

    let mut aliens = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            aliens.push(Alien {
                rect: Rect::new(
                    alien_w + 2.0 * alien_w * column as f32,
                    alien_h + 2.0 * alien_h * row as f32,
                    alien_w,
                    alien_h,
                ),
            });
        }
    }
    aliens
}

// ── Input-driven transitions (pure) ──────────────────────────────────────────

/// Reset settings, stats, fleet and ship and make the game active.
pub fn start_game(state: &GameState) -> (GameState, Vec<GameEvent>) {
    let mut next = state.clone();
    next.settings.initialize_dynamic_settings();
    next.stats.reset_stats(&next.settings);
    next.stats.game_active = true;
    next.stats.game_over = false;

    next.aliens = create_fleet(&next.settings);
    next.bullets.clear();
    let (moving_left, moving_right) = (next.ship.moving_left, next.ship.moving_right);
    next.ship = Ship {
        moving_left,
        moving_right,
        ..new_ship(&next.settings)
    };
    next.name_input.clear();
    next.pointer_visible = false;

    log::info!(
        "game started with {} aliens, {} ships",
        next.aliens.len(),
        next.stats.ships_left
    );
    (next, vec![GameEvent::GameStarted])
}

/// Fire a bullet from the ship's nose. No-op once `bullets_allowed` are
/// already in flight or while the game is not active.
pub fn fire_bullet(state: &GameState) -> (GameState, Vec<GameEvent>) {
    if !state.stats.game_active || state.bullets.len() >= state.settings.bullets_allowed {
        return (state.clone(), Vec::new());
    }
    let settings = &state.settings;
    let ship = &state.ship.rect;
    let bullet = Bullet {
        rect: Rect::new(
            ship.center_x() - settings.bullet_width / 2.0,
            ship.top(),
            settings.bullet_width,
            settings.bullet_height,
        ),
    };
    let mut next = state.clone();
    next.bullets.push(bullet);
    (next, vec![GameEvent::BulletFired])
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame: ship, bullets (with collisions and
/// level transitions), then aliens (with edge reversal and ship hits).
/// Inactive games only count the frame.
pub fn tick(state: &GameState) -> (GameState, Vec<GameEvent>) {
    let mut next = state.clone();
    next.frame += 1;
    let mut events = Vec::new();

    if !next.stats.game_active {
        return (next, events);
    }

    update_ship(&mut next);
    update_bullets(&mut next, &mut events);
    update_aliens(&mut next, &mut events);

    (next, events)
}

fn update_ship(state: &mut GameState) {
    let speed = state.settings.ship_speed;
    let max_x = (state.settings.screen_width - state.ship.rect.width).max(0.0);
    let rect = &mut state.ship.rect;

    if state.ship.moving_right && rect.right() < state.settings.screen_width {
        rect.x += speed;
    }
    if state.ship.moving_left && rect.left() > 0.0 {
        rect.x -= speed;
    }
    rect.x = rect.x.clamp(0.0, max_x);
}

fn update_bullets(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let speed = state.settings.bullet_speed;
    for bullet in &mut state.bullets {
        bullet.rect.y -= speed;
    }
    state.bullets.retain(|b| b.rect.bottom() > 0.0);

    check_bullet_alien_collisions(state, events);
}

/// Remove every bullet/alien pair that overlaps, award points, and start the
/// next level once the fleet is gone.
fn check_bullet_alien_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut dead_aliens = vec![false; state.aliens.len()];
    let mut spent_bullets = vec![false; state.bullets.len()];
    let mut destroyed: u32 = 0;

    for (bi, bullet) in state.bullets.iter().enumerate() {
        for (ai, alien) in state.aliens.iter().enumerate() {
            if !dead_aliens[ai] && bullet.rect.intersects(&alien.rect) {
                dead_aliens[ai] = true;
                spent_bullets[bi] = true;
                destroyed += 1;
            }
        }
    }

    if destroyed > 0 {
        let mut flags = spent_bullets.into_iter();
        state.bullets.retain(|_| !flags.next().unwrap_or(false));
        let mut flags = dead_aliens.into_iter();
        state.aliens.retain(|_| !flags.next().unwrap_or(false));

        let points = state.settings.alien_points.saturating_mul(destroyed);
        state.stats.score = state.stats.score.saturating_add(points);
        events.push(GameEvent::AliensDestroyed {
            count: destroyed,
            points,
        });
        check_high_score(state, events);
    }

    if state.aliens.is_empty() {
        state.bullets.clear();
        state.aliens = create_fleet(&state.settings);
        state.settings.increase_speed();
        start_new_level(state, events);
    }
}

fn check_high_score(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.stats.score > state.stats.high_score {
        state.stats.high_score = state.stats.score;
        events.push(GameEvent::NewHighScore {
            score: state.stats.score,
        });
    }
}

fn start_new_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.stats.level += 1;
    log::info!(
        "fleet cleared, entering level {} (alien speed {:.3}, {} points per alien)",
        state.stats.level,
        state.settings.alien_speed,
        state.settings.alien_points
    );
    events.push(GameEvent::LevelCleared {
        level: state.stats.level,
    });
}

fn update_aliens(state: &mut GameState, events: &mut Vec<GameEvent>) {
    check_fleet_edges(state);

    let dx = state.settings.alien_speed * state.settings.fleet_direction;
    for alien in &mut state.aliens {
        alien.rect.x += dx;
    }

    let ship = state.ship.rect;
    let rammed = state.aliens.iter().any(|a| a.rect.intersects(&ship));
    let screen_bottom = state.settings.screen_height;
    let landed = state.aliens.iter().any(|a| a.rect.bottom() >= screen_bottom);

    if rammed || landed {
        ship_hit(state, events);
    }
}

/// True when the alien touches either side of the screen.
pub fn check_edges(alien: &Alien, settings: &Settings) -> bool {
    alien.rect.right() >= settings.screen_width || alien.rect.left() <= 0.0
}

/// The fleet moves in lockstep, so the first alien at an edge decides for
/// everyone and at most one reversal happens per tick.
fn check_fleet_edges(state: &mut GameState) {
    if state
        .aliens
        .iter()
        .any(|alien| check_edges(alien, &state.settings))
    {
        change_fleet_direction(state);
    }
}

fn change_fleet_direction(state: &mut GameState) {
    let drop = state.settings.fleet_drop_speed;
    for alien in &mut state.aliens {
        alien.rect.y += drop;
    }
    state.settings.fleet_direction *= -1.0;
}

/// A hit with ships to spare costs one and resets the board. A hit with none
/// left ends the game and opens the name prompt, leaving the board as it was.
fn ship_hit(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.stats.ships_left > 0 {
        state.stats.ships_left -= 1;
        state.aliens = create_fleet(&state.settings);
        state.bullets.clear();
        let rect = new_ship(&state.settings).rect;
        state.ship.rect = rect;

        log::info!("ship lost, {} left", state.stats.ships_left);
        events.push(GameEvent::ShipLost {
            ships_left: state.stats.ships_left,
        });
    } else {
        state.stats.game_active = false;
        state.stats.game_over = true;
        state.pointer_visible = true;
        state.name_input.clear();

        log::info!("game over with score {}", state.stats.score);
        events.push(GameEvent::GameOver {
            score: state.stats.score,
        });
    }
}
