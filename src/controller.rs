/// Input intake: turns player commands into state transitions.

use crate::compute::{fire_bullet, play_button, start_game};
use crate::entities::{GameEvent, GameState, Phase};
use crate::game_stats::{ScoreEntry, MAX_NAME_LEN};

/// A player intention, already decoupled from the key or button that
/// produced it.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SetMoveLeft(bool),
    SetMoveRight(bool),
    Fire,
    /// Start a new game (the restart key).
    Start,
    /// Left click at a terminal cell.
    Click { x: u16, y: u16 },
    TypeChar(char),
    Backspace,
    Confirm,
}

pub fn apply(state: &GameState, command: Command) -> (GameState, Vec<GameEvent>) {
    match command {
        Command::SetMoveLeft(held) => {
            let mut next = state.clone();
            next.ship.moving_left = held;
            (next, Vec::new())
        }
        Command::SetMoveRight(held) => {
            let mut next = state.clone();
            next.ship.moving_right = held;
            (next, Vec::new())
        }
        Command::Fire => fire_bullet(state),
        Command::Start if state.phase() == Phase::Idle => start_game(state),
        Command::Click { x, y }
            if state.phase() == Phase::Idle
                && play_button(&state.settings).contains_point(x as f32, y as f32) =>
        {
            start_game(state)
        }
        Command::TypeChar(ch)
            if state.phase() == Phase::GameOver
                && !ch.is_control()
                && state.name_input.chars().count() < MAX_NAME_LEN =>
        {
            let mut next = state.clone();
            next.name_input.push(ch);
            (next, Vec::new())
        }
        Command::Backspace if state.phase() == Phase::GameOver => {
            let mut next = state.clone();
            next.name_input.pop();
            (next, Vec::new())
        }
        Command::Confirm if state.phase() == Phase::GameOver => confirm_name(state),
        _ => (state.clone(), Vec::new()),
    }
}

/// Close the name prompt and go back to the title screen. The entry is
/// handed to the frame loop for writing.
fn confirm_name(state: &GameState) -> (GameState, Vec<GameEvent>) {
    let entry = ScoreEntry {
        name: state.name_input.trim().to_string(),
        score: state.stats.score,
    };
    let mut next = state.clone();
    next.stats.game_over = false;
    next.pointer_visible = true;
    next.name_input.clear();
    next.last_entry = Some(entry.clone());

    log::info!("score confirmed for {entry}");
    (next, vec![GameEvent::ScoreConfirmed(entry)])
}
