use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{LevelFilter, error, info};
use portal_snake::app::{TerminalFrontend, run_session};
use portal_snake::config::{GameConfig, THEME_CLASSIC};
use portal_snake::error::AppError;
use portal_snake::game::GameState;
use portal_snake::terminal_runtime::install_panic_hook;
use portal_snake::ui::menu::end_title;
use simplelog::{Config, WriteLogger};

const APP_DIR_NAME: &str = "portal-snake";
const LOG_FILE_NAME: &str = "portal-snake.log";

/// Snake on a walled board. Move with z/q/s/d or the arrow keys, stop with a or Esc.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with game settings; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width, border included.
    #[arg(long)]
    width: Option<u16>,

    /// Board height, border included.
    #[arg(long)]
    height: Option<u16>,

    /// Seed for obstacle and apple placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path (defaults to the user data directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_logger(&log_path, cli.log_level)?;
    install_panic_hook();

    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };

    let reason = {
        let mut frontend = TerminalFrontend::enter(&THEME_CLASSIC).inspect_err(|error| {
            error!("cannot set up terminal: {error}");
        })?;
        let reason = run_session(&mut state, &mut frontend)?;
        frontend.wait_for_key()?;
        reason
    };

    info!("exiting after {reason:?}");
    println!(
        "{}: {} apples, length {} (seed {})",
        end_title(reason),
        state.apples_eaten,
        state.snake.len(),
        state.seed()
    );

    Ok(())
}

/// Loads the config file if given, applies CLI overrides, and validates.
fn resolve_config(cli: &Cli) -> Result<GameConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }

    config.validate()?;
    Ok(config)
}

fn init_logger(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file)
        .map_err(|error| AppError::Logger(error.to_string()))
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}
