/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use rand::Rng;

use alien_invasion::compute::play_button;
use alien_invasion::entities::{Alien, Bullet, GameState, Phase};
use alien_invasion::scoreboard::Scoreboard;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkGrey;
const C_EARTH: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_SHIPS: Color = Color::White;
const C_SHIP: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_TITLE: Color = Color::Green;
const C_BUTTON: Color = Color::White;
const C_PROMPT: Color = Color::Rgb { r: 132, g: 222, b: 2 };
const C_HINT: Color = Color::DarkGrey;

const SHIP_SPRITE: [&str; 2] = ["  ▲  ", "/███\\"];
const ALIEN_SPRITE: [&str; 2] = ["«▼»", "╚═╝"];
const TITLE: &str = "A L I E N   I N V A S I O N";
const PROMPT: &str = "Type your name and press Enter to save score";

// ── Background ────────────────────────────────────────────────────────────────

/// The space layer: a fixed scatter of stars generated once per screen size.
pub struct Starfield {
    stars: Vec<(u16, u16, char)>,
}

impl Starfield {
    /// Roughly one star per 40 cells, kept off the HUD row and the earth
    /// band at the bottom.
    pub fn new(width: u16, height: u16, rng: &mut impl Rng) -> Self {
        let count = (width as usize * height as usize) / 40;
        let stars = if width == 0 || height < 3 {
            Vec::new()
        } else {
            (0..count)
                .map(|_| {
                    let x = rng.gen_range(0..width);
                    let y = rng.gen_range(1..height - 1);
                    let glyph = if rng.gen_bool(0.2) { '+' } else { '.' };
                    (x, y, glyph)
                })
                .collect()
        };
        Self { stars }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    stars: &Starfield,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, state, stars)?;

    for alien in &state.aliens {
        draw_alien(out, state, alien)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, state, bullet)?;
    }
    draw_ship(out, state)?;
    draw_hud(out, state)?;

    match state.phase() {
        Phase::Idle => draw_title(out, state)?,
        Phase::GameOver => draw_name_prompt(out, state)?,
        Phase::Active => {}
    }

    out.queue(style::ResetColor)?;
    if state.pointer_visible {
        if state.phase() == Phase::GameOver {
            let (col, row) = prompt_input_origin(state);
            let typed = state.name_input.chars().count() as u16;
            out.queue(cursor::MoveTo(col + typed, row))?;
        } else {
            out.queue(cursor::MoveTo(0, screen_rows(state).saturating_sub(1)))?;
        }
        out.queue(cursor::Show)?;
    } else {
        out.queue(cursor::Hide)?;
    }
    out.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn screen_cols(state: &GameState) -> u16 {
    state.settings.screen_width as u16
}

fn screen_rows(state: &GameState) -> u16 {
    state.settings.screen_height as u16
}

/// Terminal cell for a logical position, or `None` when off screen.
fn cell(state: &GameState, x: f32, y: f32) -> Option<(u16, u16)> {
    let (col, row) = (x.round(), y.round());
    if col < 0.0
        || row < 0.0
        || col >= state.settings.screen_width
        || row >= state.settings.screen_height
    {
        None
    } else {
        Some((col as u16, row as u16))
    }
}

fn print_centered<W: Write>(
    out: &mut W,
    state: &GameState,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (screen_cols(state) / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_sprite<W: Write>(
    out: &mut W,
    state: &GameState,
    x: f32,
    y: f32,
    rows: &[&str],
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in rows.iter().enumerate() {
        if let Some((col, row)) = cell(state, x, y + i as f32) {
            let room = screen_cols(state).saturating_sub(col) as usize;
            let visible: String = line.chars().take(room).collect();
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(visible))?;
        }
    }
    Ok(())
}

// ── Background layers ─────────────────────────────────────────────────────────

fn draw_background<W: Write>(
    out: &mut W,
    state: &GameState,
    stars: &Starfield,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for &(x, y, glyph) in &stars.stars {
        if x < screen_cols(state) && y < screen_rows(state) {
            out.queue(cursor::MoveTo(x, y))?;
            out.queue(Print(glyph))?;
        }
    }

    // Earth: horizon band on the last row
    let rows = screen_rows(state);
    if rows > 0 {
        out.queue(cursor::MoveTo(0, rows - 1))?;
        out.queue(style::SetForegroundColor(C_EARTH))?;
        out.queue(Print("▁".repeat(screen_cols(state) as usize)))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let rect = &state.ship.rect;
    draw_sprite(out, state, rect.x, rect.y, &SHIP_SPRITE, C_SHIP)
}

fn draw_alien<W: Write>(out: &mut W, state: &GameState, alien: &Alien) -> std::io::Result<()> {
    draw_sprite(out, state, alien.rect.x, alien.rect.y, &ALIEN_SPRITE, C_ALIEN)
}

fn draw_bullet<W: Write>(out: &mut W, state: &GameState, bullet: &Bullet) -> std::io::Result<()> {
    if let Some((col, row)) = cell(state, bullet.rect.x, bullet.rect.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("║"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let board = Scoreboard::from_stats(&state.stats);

    // Remaining ships, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIPS))?;
    out.queue(Print("▲ ".repeat(board.ships as usize)))?;

    // High score, centre
    print_centered(out, state, 0, &board.high_score, C_HUD_SCORE)?;

    // Score and level, right
    let right = format!("{}  {}", board.level, board.score);
    let rx = screen_cols(state).saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&board.level))?;
    out.queue(Print("  "))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&board.score))?;

    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let button = play_button(&state.settings);
    let top = button.y as u16;
    let left = button.x as u16;
    let inner = (button.width as usize).saturating_sub(2);

    print_centered(out, state, top.saturating_sub(2), TITLE, C_TITLE)?;

    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(inner))))?;
    out.queue(cursor::MoveTo(left, top + 1))?;
    out.queue(Print(format!("║{:^inner$}║", "PLAY")))?;
    out.queue(cursor::MoveTo(left, top + 2))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;

    let hint = "Click Play or press P   ← → : Move   SPACE : Shoot   Q : Quit";
    print_centered(out, state, top + 4, hint, C_HINT)?;

    if let Some(entry) = &state.last_entry {
        let saved = format!("Saved: {entry}");
        print_centered(out, state, top + 6, &saved, C_PROMPT)?;
    }
    Ok(())
}

/// Column/row where typed name characters start.
fn prompt_input_origin(state: &GameState) -> (u16, u16) {
    let row = screen_rows(state) / 2 + 1;
    let col = (screen_cols(state) / 2).saturating_sub(8);
    (col, row)
}

fn draw_name_prompt<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let row = screen_rows(state) / 2;
    print_centered(out, state, row.saturating_sub(2), "G A M E   O V E R", Color::Red)?;
    print_centered(out, state, row, PROMPT, C_PROMPT)?;

    let (col, input_row) = prompt_input_origin(state);
    out.queue(cursor::MoveTo(col, input_row))?;
    out.queue(style::SetForegroundColor(C_PROMPT))?;
    out.queue(Print(&state.name_input))?;
    Ok(())
}
