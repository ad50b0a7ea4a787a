/// Command line and TOML configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::compute::fleet_layout;
use crate::settings::Settings;

/// Smallest terminal that still fits a fleet, the ship and the HUD.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 16;

#[derive(Debug, Parser)]
#[command(name = "alien_invasion", about = "Shoot down the alien fleet before it lands")]
pub struct Cli {
    /// TOML file with game settings and file locations.
    #[arg(long, default_value = "alien_invasion.toml")]
    pub config: PathBuf,

    /// File holding the persisted high score.
    #[arg(long)]
    pub high_score_file: Option<PathBuf>,

    /// File the "<name> <score>" line is written to after a game.
    #[arg(long)]
    pub scores_file: Option<PathBuf>,

    /// Where log output goes (the terminal is busy drawing the game).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub high_score_path: PathBuf,
    pub scores_path: PathBuf,
    pub log_path: PathBuf,
    pub settings: Settings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from("high_score.txt"),
            scores_path: PathBuf::from("top_scores.txt"),
            log_path: PathBuf::from("alien_invasion.log"),
            settings: Settings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let mut config: AppConfig = toml::from_str(text).context("parsing configuration")?;
        validate_settings(&config.settings)?;
        config.settings.initialize_dynamic_settings();
        Ok(config)
    }

    /// Load from `path`; a missing file means defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text)
                .with_context(|| format!("in config file {}", path.display())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("reading config {}", path.display())),
        }
    }

    /// Command-line paths win over the file.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.high_score_file {
            self.high_score_path = path.clone();
        }
        if let Some(path) = &cli.scores_file {
            self.scores_path = path.clone();
        }
        if let Some(path) = &cli.log_file {
            self.log_path = path.clone();
        }
        self
    }
}

/// Reject settings that could never produce a playable board on the smallest
/// supported terminal. The real screen is at least that big, so a fleet that
/// fits there fits everywhere.
fn validate_settings(settings: &Settings) -> anyhow::Result<()> {
    let sizes = [
        ("ship_width", settings.ship_width),
        ("ship_height", settings.ship_height),
        ("bullet_width", settings.bullet_width),
        ("bullet_height", settings.bullet_height),
        ("alien_width", settings.alien_width),
        ("alien_height", settings.alien_height),
    ];
    for (name, value) in sizes {
        if value.is_nan() || value <= 0.0 {
            anyhow::bail!("{name} must be positive, got {value}");
        }
    }
    if settings.bullets_allowed == 0 {
        anyhow::bail!("bullets_allowed must be at least 1");
    }

    let smallest = Settings::with_screen(MIN_COLS as f32, MIN_ROWS as f32);
    if settings.ship_width > smallest.screen_width {
        anyhow::bail!(
            "ship_width {} is wider than the {MIN_COLS}-column minimum screen",
            settings.ship_width
        );
    }
    let (columns, rows) = fleet_layout(&Settings {
        screen_width: smallest.screen_width,
        screen_height: smallest.screen_height,
        ..settings.clone()
    });
    if columns == 0 || rows == 0 {
        anyhow::bail!(
            "aliens of {}x{} leave no room for a fleet on a {MIN_COLS}x{MIN_ROWS} screen",
            settings.alien_width,
            settings.alien_height
        );
    }
    Ok(())
}
