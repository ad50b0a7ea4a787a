pub mod compute;
pub mod config;
pub mod controller;
pub mod entities;
pub mod game_stats;
pub mod input;
pub mod scoreboard;
pub mod settings;
