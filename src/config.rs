use std::fs;
use std::path::Path;
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::board::{CellRect, obstacle_origin_range};
use crate::error::AppError;
use crate::snake::Position;

/// Logical grid dimensions passed through the game as a named type.
///
/// The playable grid runs from `1..=width` and `1..=height`, border included.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the centre cell, which is also where the portals line up.
    #[must_use]
    pub fn centre(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub apple: Color,
    pub wall: Color,
    pub portal: Color,
    pub play_bg: Color,
    pub hud_text: Color,
    pub hud_accent: Color,
    pub popup_title: Color,
    pub popup_footer: Color,
}

/// Default theme: green snake, red apple, grey walls.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    apple: Color::Red,
    wall: Color::Gray,
    portal: Color::Cyan,
    play_bg: Color::Reset,
    hud_text: Color::DarkGray,
    hud_accent: Color::White,
    popup_title: Color::Green,
    popup_footer: Color::DarkGray,
};

pub const GLYPH_WALL: &str = "#";
pub const GLYPH_EMPTY: &str = " ";
pub const GLYPH_APPLE: &str = "6";
pub const GLYPH_SNAKE_HEAD: &str = "O";
pub const GLYPH_SNAKE_BODY: &str = "X";
pub const GLYPH_CRASH: &str = "*";

/// Default board width, border included.
pub const DEFAULT_GRID_WIDTH: u16 = 80;

/// Default board height, border included.
pub const DEFAULT_GRID_HEIGHT: u16 = 40;

pub const DEFAULT_OBSTACLE_COUNT: usize = 4;

/// Side length of each square obstacle.
pub const DEFAULT_OBSTACLE_SIZE: u16 = 5;

pub const DEFAULT_INITIAL_SNAKE_LEN: usize = 10;
pub const DEFAULT_MAX_SNAKE_LEN: usize = 20;

/// Apples needed to win the session.
pub const DEFAULT_APPLES_TO_WIN: u32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 120;

/// Amount the tick interval shrinks by for every apple eaten.
pub const TICK_DECREMENT_MS: u64 = 10;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Tunable session parameters.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid: GridSize,
    pub obstacle_count: usize,
    pub obstacle_size: u16,
    pub initial_len: usize,
    pub max_len: usize,
    pub apples_to_win: u32,
    pub base_tick_ms: u64,
    pub tick_decrement_ms: u64,
    pub min_tick_ms: u64,
    /// Head position at session start; the grid centre when absent.
    pub start: Option<Position>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            obstacle_size: DEFAULT_OBSTACLE_SIZE,
            initial_len: DEFAULT_INITIAL_SNAKE_LEN,
            max_len: DEFAULT_MAX_SNAKE_LEN,
            apples_to_win: DEFAULT_APPLES_TO_WIN,
            base_tick_ms: DEFAULT_TICK_INTERVAL_MS,
            tick_decrement_ms: TICK_DECREMENT_MS,
            min_tick_ms: MIN_TICK_INTERVAL_MS,
            start: None,
        }
    }
}

impl GameConfig {
    /// Loads a config from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Head position of the snake at session start.
    #[must_use]
    pub fn start_position(&self) -> Position {
        self.start.unwrap_or_else(|| self.grid.centre())
    }

    /// Rectangle around the start head where no obstacle corner may fall.
    #[must_use]
    pub fn forbidden_zone(&self) -> CellRect {
        let start = self.start_position();
        CellRect {
            min: Position {
                x: start.x.saturating_sub(4),
                y: start.y.saturating_sub(4),
            },
            max: Position {
                x: start.x.saturating_add(3),
                y: start.y,
            },
        }
    }

    #[must_use]
    pub fn base_tick_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms)
    }

    /// Checks that a session built from this config can actually be played.
    pub fn validate(&self) -> Result<(), AppError> {
        let GridSize { width, height } = self.grid;
        if width < 5 || height < 5 {
            return Err(invalid(format!(
                "grid {width}x{height} is too small, need at least 5x5"
            )));
        }

        if self.initial_len == 0 {
            return Err(invalid("initial snake length must be at least 1".to_owned()));
        }

        if self.apples_to_win == 0 {
            return Err(invalid("apples_to_win must be at least 1".to_owned()));
        }

        let final_len = self
            .initial_len
            .checked_add(self.apples_to_win as usize)
            .filter(|len| *len <= self.max_len);
        if final_len.is_none() {
            return Err(invalid(format!(
                "snake of length {} plus {} apples exceeds max_len {}",
                self.initial_len, self.apples_to_win, self.max_len
            )));
        }

        let start = self.start_position();
        let interior_x = 2..=i32::from(width) - 1;
        let interior_y = 2..=i32::from(height) - 1;
        let tail_x = i32::try_from(self.initial_len)
            .ok()
            .and_then(|len| start.x.checked_sub(len - 1));
        let fits = interior_x.contains(&start.x)
            && interior_y.contains(&start.y)
            && tail_x.is_some_and(|x| interior_x.contains(&x));
        if !fits {
            return Err(invalid(format!(
                "snake of length {} starting at ({}, {}) does not fit inside the border",
                self.initial_len, start.x, start.y
            )));
        }

        if self.obstacle_count > 0 {
            let Some(range) = obstacle_origin_range(self.grid, self.obstacle_size) else {
                return Err(invalid(format!(
                    "grid {width}x{height} has no room for {size}x{size} obstacles",
                    size = self.obstacle_size
                )));
            };
            if self.forbidden_zone().covers(range) {
                return Err(invalid(
                    "start position leaves no legal obstacle placement".to_owned(),
                ));
            }
        }

        if self.min_tick_ms == 0 || self.base_tick_ms < self.min_tick_ms {
            return Err(invalid(format!(
                "tick interval {}ms must be at least the floor {}ms, and the floor non-zero",
                self.base_tick_ms, self.min_tick_ms
            )));
        }

        // Free cells must outnumber what the snake can ever cover.
        let wall_budget = (2 * (usize::from(width) + usize::from(height))).saturating_add(
            self.obstacle_count
                .saturating_mul(usize::from(self.obstacle_size).pow(2)),
        );
        if self.grid.total_cells() <= wall_budget.saturating_add(self.max_len) {
            return Err(invalid(format!(
                "grid {width}x{height} leaves too few free cells for apples"
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> AppError {
    AppError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{GameConfig, GridSize};
    use crate::error::AppError;
    use crate::snake::Position;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.start_position(), Position { x: 40, y: 20 });
    }

    #[test]
    fn forbidden_zone_surrounds_start() {
        let zone = GameConfig::default().forbidden_zone();

        assert_eq!(zone.min, Position { x: 36, y: 16 });
        assert_eq!(zone.max, Position { x: 43, y: 20 });
    }

    #[test]
    fn json_overrides_only_listed_keys() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "apples_to_win": 5, "grid": { "width": 60, "height": 30 } }"#)
                .expect("config should parse");

        assert_eq!(config.apples_to_win, 5);
        assert_eq!(
            config.grid,
            GridSize {
                width: 60,
                height: 30
            }
        );
        assert_eq!(config.max_len, GameConfig::default().max_len);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = serde_json::from_str::<GameConfig>(r#"{ "speed": 3 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn win_threshold_beyond_cap_is_rejected() {
        let config = GameConfig {
            apples_to_win: 11,
            ..GameConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn snake_outside_border_is_rejected() {
        let config = GameConfig {
            start: Some(Position { x: 5, y: 20 }),
            ..GameConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_initial_length_is_rejected() {
        let config: GameConfig = serde_json::from_str(r#"{ "initial_len": 18446744073709551615 }"#)
            .expect("config should parse");

        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn oversized_max_length_is_rejected() {
        let config: GameConfig = serde_json::from_str(r#"{ "max_len": 18446744073709551615 }"#)
            .expect("config should parse");

        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn extreme_start_is_rejected() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "start": { "x": -2147483648, "y": 20 } }"#)
                .expect("config should parse");

        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig(_))
        ));
        let zone = config.forbidden_zone();
        assert_eq!(zone.min.x, i32::MIN);
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let config = GameConfig {
            grid: GridSize {
                width: 10,
                height: 10,
            },
            ..GameConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("portal-snake-config-does-not-exist.json");
        let _ = fs::remove_file(&path);

        assert!(matches!(
            GameConfig::load(&path),
            Err(AppError::ConfigRead { .. })
        ));
    }

    #[test]
    fn load_reads_json_file() {
        let path = std::env::temp_dir().join(format!(
            "portal-snake-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "obstacle_count": 2 }"#).expect("test file write should succeed");

        let loaded = GameConfig::load(&path).expect("load should succeed");
        assert_eq!(loaded.obstacle_count, 2);

        let _ = fs::remove_file(&path);
    }
}
