use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use alien_invasion::compute::init_state;
use alien_invasion::config::AppConfig;
use alien_invasion::controller::*;
use alien_invasion::entities::*;
use alien_invasion::game_stats::ScoreEntry;
use alien_invasion::input::*;
use alien_invasion::scoreboard::{format_score, Scoreboard};
use alien_invasion::settings::Settings;

fn idle_state() -> GameState {
    init_state(Settings::with_screen(80.0, 24.0), 0)
}

fn game_over_state(score: u32) -> GameState {
    let mut s = idle_state();
    s.stats.game_over = true;
    s.stats.ships_left = 0;
    s.stats.score = score;
    s
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

// ── controller ────────────────────────────────────────────────────────────────

#[test]
fn move_commands_set_intent_flags() {
    let s = idle_state();
    let (s2, _) = apply(&s, Command::SetMoveLeft(true));
    assert!(s2.ship.moving_left);
    let (s3, _) = apply(&s2, Command::SetMoveRight(true));
    assert!(s3.ship.moving_right);
    let (s4, _) = apply(&s3, Command::SetMoveLeft(false));
    assert!(!s4.ship.moving_left);
    assert!(s4.ship.moving_right);
}

#[test]
fn start_only_from_idle() {
    let s = idle_state();
    let (s2, events) = apply(&s, Command::Start);
    assert_eq!(s2.phase(), Phase::Active);
    assert_eq!(events, vec![GameEvent::GameStarted]);

    // A second start mid-game changes nothing
    let mut playing = s2.clone();
    playing.stats.score = 300;
    let (s3, events) = apply(&playing, Command::Start);
    assert_eq!(s3.stats.score, 300);
    assert!(events.is_empty());

    // Nor does it skip the name prompt
    let (s4, _) = apply(&game_over_state(10), Command::Start);
    assert_eq!(s4.phase(), Phase::GameOver);
}

#[test]
fn clicking_play_button_starts_game() {
    let s = idle_state();
    let (s2, _) = apply(&s, Command::Click { x: 40, y: 11 });
    assert_eq!(s2.phase(), Phase::Active);
    assert!(!s2.pointer_visible);
}

#[test]
fn clicking_elsewhere_does_nothing() {
    let s = idle_state();
    let (s2, events) = apply(&s, Command::Click { x: 2, y: 2 });
    assert_eq!(s2.phase(), Phase::Idle);
    assert!(events.is_empty());
}

#[test]
fn fire_command_adds_bullet_while_active() {
    let (s, _) = apply(&idle_state(), Command::Start);
    let (s2, events) = apply(&s, Command::Fire);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(events, vec![GameEvent::BulletFired]);
}

#[test]
fn typing_only_reaches_name_prompt() {
    let (s, _) = apply(&idle_state(), Command::TypeChar('x'));
    assert!(s.name_input.is_empty());

    let mut s = game_over_state(10);
    for ch in "Ada".chars() {
        s = apply(&s, Command::TypeChar(ch)).0;
    }
    assert_eq!(s.name_input, "Ada");
    s = apply(&s, Command::Backspace).0;
    assert_eq!(s.name_input, "Ad");
}

#[test]
fn name_is_capped_at_fifteen_chars() {
    let mut s = game_over_state(10);
    for _ in 0..20 {
        s = apply(&s, Command::TypeChar('z')).0;
    }
    assert_eq!(s.name_input.chars().count(), 15);
}

#[test]
fn confirm_saves_entry_and_returns_to_idle() {
    let mut s = game_over_state(1230);
    s.name_input = "Grace ".to_string();
    let (s2, events) = apply(&s, Command::Confirm);

    let entry = ScoreEntry {
        name: "Grace".to_string(),
        score: 1230,
    };
    assert_eq!(events, vec![GameEvent::ScoreConfirmed(entry.clone())]);
    assert_eq!(s2.phase(), Phase::Idle);
    assert!(s2.pointer_visible);
    assert!(s2.name_input.is_empty());
    assert_eq!(s2.last_entry, Some(entry));
}

#[test]
fn confirm_outside_prompt_is_ignored() {
    let (s, events) = apply(&idle_state(), Command::Confirm);
    assert_eq!(s.phase(), Phase::Idle);
    assert!(events.is_empty());
}

// ── input mapping ─────────────────────────────────────────────────────────────

#[test]
fn keys_map_by_phase() {
    assert_eq!(map_key(Phase::Idle, &key(KeyCode::Char('q'))), Some(KeyAction::Quit));
    assert_eq!(map_key(Phase::Active, &key(KeyCode::Esc)), Some(KeyAction::Quit));
    assert_eq!(
        map_key(Phase::Active, &key(KeyCode::Char(' '))),
        Some(KeyAction::Command(Command::Fire))
    );
    assert_eq!(
        map_key(Phase::Idle, &key(KeyCode::Char('p'))),
        Some(KeyAction::Command(Command::Start))
    );
    assert_eq!(map_key(Phase::Active, &key(KeyCode::Char('p'))), None);
    assert_eq!(map_key(Phase::Active, &key(KeyCode::Left)), None);
}

#[test]
fn name_prompt_captures_letters() {
    assert_eq!(
        map_key(Phase::GameOver, &key(KeyCode::Char('q'))),
        Some(KeyAction::Command(Command::TypeChar('q')))
    );
    assert_eq!(
        map_key(Phase::GameOver, &key(KeyCode::Enter)),
        Some(KeyAction::Command(Command::Confirm))
    );
    assert_eq!(
        map_key(Phase::GameOver, &key(KeyCode::Backspace)),
        Some(KeyAction::Command(Command::Backspace))
    );
    assert_eq!(map_key(Phase::GameOver, &key(KeyCode::Esc)), Some(KeyAction::Quit));
}

#[test]
fn ctrl_c_always_quits() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    for phase in [Phase::Idle, Phase::Active, Phase::GameOver] {
        assert_eq!(map_key(phase, &ctrl_c), Some(KeyAction::Quit));
    }
}

#[test]
fn held_key_expires_after_window() {
    let mut held = KeyHold::new();
    held.press(KeyCode::Left, 10);
    assert!(held.is_held(&KeyCode::Left, 10));
    assert!(held.is_held(&KeyCode::Left, 10 + HOLD_WINDOW));
    assert!(!held.is_held(&KeyCode::Left, 11 + HOLD_WINDOW));
    assert!(held.any_held(&LEFT_KEYS, 12));
    assert!(!held.any_held(&RIGHT_KEYS, 12));
}

#[test]
fn released_key_is_dropped_immediately() {
    let mut held = KeyHold::new();
    held.press(KeyCode::Char('d'), 3);
    assert!(held.any_held(&RIGHT_KEYS, 3));
    held.release(KeyCode::Char('d'));
    assert!(!held.any_held(&RIGHT_KEYS, 3));
}

// ── scoreboard ────────────────────────────────────────────────────────────────

#[test]
fn score_is_rounded_and_grouped() {
    assert_eq!(format_score(0), "0");
    assert_eq!(format_score(990), "990");
    assert_eq!(format_score(1234), "1,230");
    assert_eq!(format_score(1235), "1,240");
    assert_eq!(format_score(1_234_567), "1,234,570");
}

#[test]
fn scoreboard_reflects_stats() {
    let mut s = idle_state();
    s.stats.score = 1500;
    s.stats.high_score = 20000;
    s.stats.level = 3;
    s.stats.ships_left = 2;
    let board = Scoreboard::from_stats(&s.stats);
    assert_eq!(board.score, "1,500");
    assert_eq!(board.high_score, "Hi 20,000");
    assert_eq!(board.level, "Level 3");
    assert_eq!(board.ships, 2);
}

// ── configuration ─────────────────────────────────────────────────────────────

#[test]
fn config_overrides_merge_with_defaults() {
    let config = AppConfig::from_toml_str(
        r#"
        scores_path = "scores.log"

        [settings]
        ship_limit = 5
        base_alien_points = 10
        "#,
    )
    .unwrap();
    assert_eq!(config.scores_path.to_str(), Some("scores.log"));
    assert_eq!(config.high_score_path.to_str(), Some("high_score.txt"));
    assert_eq!(config.settings.ship_limit, 5);
    assert_eq!(config.settings.bullets_allowed, 3);
    assert_eq!(config.settings.alien_points, 10);
}

#[test]
fn config_rejects_malformed_toml() {
    assert!(AppConfig::from_toml_str("settings = [").is_err());
    assert!(AppConfig::from_toml_str("[settings]\nship_limit = \"many\"").is_err());
}

#[test]
fn config_rejects_aliens_too_big_for_a_fleet() {
    let err = AppConfig::from_toml_str("[settings]\nalien_width = 30.0").unwrap_err();
    assert!(format!("{err:#}").contains("no room for a fleet"));
    assert!(AppConfig::from_toml_str("[settings]\nalien_height = 9.0").is_err());
}

#[test]
fn config_rejects_non_positive_sizes_and_zero_bullets() {
    assert!(AppConfig::from_toml_str("[settings]\nalien_width = 0.0").is_err());
    assert!(AppConfig::from_toml_str("[settings]\nbullet_height = -1.0").is_err());
    assert!(AppConfig::from_toml_str("[settings]\nbullets_allowed = 0").is_err());
}

#[test]
fn default_config_fits_the_smallest_terminal() {
    assert!(AppConfig::from_toml_str("").is_ok());
}

#[test]
fn missing_config_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}
