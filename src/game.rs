use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Cell};
use crate::config::GameConfig;
use crate::engine::advance;
use crate::food::spawn_apple;
use crate::input::GameInput;
use crate::snake::{Position, Snake};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    Quit,
    Collided,
    Won,
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Ended(EndReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    pub apple: Option<Position>,
    pub apples_eaten: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    /// Cell the head ran into on the losing tick.
    pub crash_at: Option<Position>,
    tick_interval: Duration,
    config: GameConfig,
    seed: u64,
    rng: StdRng,
}

impl GameState {
    /// Creates a session with a fresh random seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let seed = rand::thread_rng().r#gen();
        Self::new_with_seed(config, seed)
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::generate(
            config.grid,
            config.obstacle_count,
            config.obstacle_size,
            config.forbidden_zone(),
            &mut rng,
        );
        let snake = Snake::new(config.start_position(), config.initial_len, config.max_len);
        let apple = spawn_apple(&mut rng, &board, &snake);

        info!(
            "session started: seed={seed} grid={}x{} obstacles={:?}",
            config.grid.width,
            config.grid.height,
            board.obstacles()
        );

        Self {
            board,
            snake,
            apple: Some(apple),
            apples_eaten: 0,
            tick_count: 0,
            status: GameStatus::Running,
            crash_at: None,
            tick_interval: config.base_tick_interval(),
            config,
            seed,
            rng,
        }
    }

    /// Advances the simulation by one tick, applying `input` first.
    ///
    /// A quit request only takes effect after the move is resolved, so a
    /// collision or win on the same tick is the reported outcome.
    pub fn tick(&mut self, input: Option<GameInput>) {
        if self.status != GameStatus::Running {
            return;
        }

        let mut quit_requested = false;
        match input {
            Some(GameInput::Direction(direction)) => {
                self.snake.set_direction(direction);
            }
            Some(GameInput::Quit) => quit_requested = true,
            None => {}
        }

        self.tick_count += 1;
        let step = advance(&self.snake, &self.board, self.apple, self.snake.direction());

        if step.collided {
            self.crash_at = Some(step.snake.head());
            self.end(EndReason::Collided);
            return;
        }

        self.snake = step.snake;

        if step.ate_apple {
            self.apple = None;
            self.apples_eaten += 1;
            self.snake.grow(step.trail_point);
            self.speed_up();
            debug!(
                "apple {} eaten, length now {}",
                self.apples_eaten,
                self.snake.len()
            );

            if self.apples_eaten >= self.config.apples_to_win {
                self.end(EndReason::Won);
                return;
            }

            let apple = spawn_apple(&mut self.rng, &self.board, &self.snake);
            debug!("apple spawned at ({}, {})", apple.x, apple.y);
            self.apple = Some(apple);
        }

        if quit_requested {
            self.end(EndReason::Quit);
        }
    }

    /// What occupies `position`, the active apple included.
    #[must_use]
    pub fn cell_at(&self, position: Position) -> Cell {
        if self.apple == Some(position) {
            Cell::Apple
        } else {
            self.board.cell_at(position)
        }
    }

    /// Delay before the next tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::Ended(reason) => Some(reason),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn speed_up(&mut self) {
        let floor = Duration::from_millis(self.config.min_tick_ms);
        let decrement = Duration::from_millis(self.config.tick_decrement_ms);
        self.tick_interval = self.tick_interval.saturating_sub(decrement).max(floor);
        debug!("tick interval now {}ms", self.tick_interval.as_millis());
    }

    fn end(&mut self, reason: EndReason) {
        info!(
            "session ended: {reason:?} after {} ticks, {} apples, length {}",
            self.tick_count,
            self.apples_eaten,
            self.snake.len()
        );
        self.status = GameStatus::Ended(reason);
    }
}
