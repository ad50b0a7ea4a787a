mod display;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
        KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use alien_invasion::compute::{init_state, resize_board, tick};
use alien_invasion::config::{AppConfig, Cli, MIN_COLS, MIN_ROWS};
use alien_invasion::controller::{apply, Command};
use alien_invasion::entities::{GameEvent, GameState, Phase};
use alien_invasion::game_stats::{
    load_high_score, read_score_entries, save_high_score, save_score_entry,
};
use alien_invasion::input::{map_key, KeyAction, KeyHold, LEFT_KEYS, RIGHT_KEYS};
use alien_invasion::settings::Settings;

use display::Starfield;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen, so log lines go to a
/// file. Falls back to stderr if the file cannot be opened.
fn init_logging(config: &AppConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(err) => {
            eprintln!("cannot open log file {}: {err}", config.log_path.display());
        }
    }
    builder.init();
}

// ── Event reactions ───────────────────────────────────────────────────────────

/// Side effects the pure logic asked for.
struct Session {
    config: AppConfig,
    /// High score as it stood in the file when the program started.
    stored_high_score: u32,
}

impl Session {
    fn handle(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ShipLost { .. } => {
                    // Deliberate freeze: input and rendering wait too.
                    thread::sleep(Duration::from_millis(self.config.settings.ship_hit_pause_ms));
                }
                GameEvent::GameOver { score } if *score > self.stored_high_score => {
                    match save_high_score(&self.config.high_score_path, *score) {
                        Ok(()) => {
                            log::info!("new high score {score} saved");
                            self.stored_high_score = *score;
                        }
                        Err(err) => log::warn!("{err:#}"),
                    }
                }
                GameEvent::ScoreConfirmed(entry) => {
                    if let Err(err) = save_score_entry(&self.config.scores_path, entry) {
                        log::warn!("{err:#}");
                    }
                }
                GameEvent::LevelCleared { level } => log::debug!("level {level}"),
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame: drain pending input, refresh the ship's intent flags from
/// held keys, advance the simulation if a game is active, then draw.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let frame_len = Duration::from_millis(session.config.settings.frame_ms);
    let mut held = KeyHold::new();
    let mut stars = Starfield::new(
        state.settings.screen_width as u16,
        state.settings.screen_height as u16,
        &mut thread_rng(),
    );

    loop {
        let frame_start = Instant::now();
        let frame = state.frame;
        let mut events = Vec::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let command = match ev {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        held.press(key.code, frame);
                        match map_key(state.phase(), &key) {
                            Some(KeyAction::Quit) => return Ok(()),
                            Some(KeyAction::Command(command)) => Some(command),
                            None => None,
                        }
                    }
                    KeyEventKind::Repeat => {
                        held.press(key.code, frame);
                        None
                    }
                    KeyEventKind::Release => {
                        held.release(key.code);
                        None
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => Some(Command::Click { x: column, y: row }),
                Event::Resize(cols, rows) if state.phase() != Phase::Active => {
                    state = resized(&state, cols, rows);
                    stars = Starfield::new(cols, rows, &mut thread_rng());
                    None
                }
                _ => None,
            };

            if let Some(command) = command {
                let was_active = state.stats.game_active;
                let (next, produced) = apply(&state, command);
                state = next;
                if state.stats.game_active && !was_active {
                    held.clear();
                }
                events.extend(produced);
            }
        }

        // ── Apply held-key intent every frame ─────────────────────────────────
        for command in [
            Command::SetMoveLeft(held.any_held(&LEFT_KEYS, frame)),
            Command::SetMoveRight(held.any_held(&RIGHT_KEYS, frame)),
        ] {
            state = apply(&state, command).0;
        }

        let (next, produced) = tick(&state);
        state = next;
        events.extend(produced);

        session.handle(&events);

        display::render(out, &state, &stars)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

/// The board for a new terminal size, never smaller than the minimum.
fn resized(state: &GameState, cols: u16, rows: u16) -> GameState {
    resize_board(
        state,
        cols.max(MIN_COLS) as f32,
        rows.max(MIN_ROWS) as f32,
    )
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?.apply_cli(&cli);
    init_logging(&config);

    let (cols, rows) = terminal::size().context("querying terminal size")?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        anyhow::bail!("terminal is {cols}x{rows}, need at least {MIN_COLS}x{MIN_ROWS}");
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, config, cols, rows, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    config: AppConfig,
    cols: u16,
    rows: u16,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let high_score = load_high_score(&config.high_score_path);
    let settings = Settings {
        screen_width: cols as f32,
        screen_height: rows as f32,
        ..config.settings.clone()
    };

    let mut state = init_state(settings, high_score);
    match read_score_entries(&config.scores_path) {
        Ok(entries) => state.last_entry = entries.into_iter().last(),
        Err(err) => log::warn!("{err:#}"),
    }

    let mut session = Session {
        config,
        stored_high_score: high_score,
    };
    game_loop(out, state, &mut session, rx)
}
