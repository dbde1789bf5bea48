use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Quit,
}

/// Maps a typed character to a game input.
///
/// Movement uses the AZERTY home keys `z`/`q`/`s`/`d`; `a` stops the game.
#[must_use]
pub fn map_char(c: char) -> Option<GameInput> {
    match c.to_ascii_lowercase() {
        'z' => Some(GameInput::Direction(Direction::Up)),
        's' => Some(GameInput::Direction(Direction::Down)),
        'q' => Some(GameInput::Direction(Direction::Left)),
        'd' => Some(GameInput::Direction(Direction::Right)),
        'a' => Some(GameInput::Quit),
        _ => None,
    }
}

/// Maps a terminal key event to a game input. Arrow keys move too.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameInput::Quit)
        }
        KeyCode::Char(c) => map_char(c),
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Non-blocking keyboard reader over crossterm's event queue.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Drains pending terminal events without blocking and returns the most
    /// recent game input, if any.
    ///
    /// A quit request seen during the drain is kept even if other keys follow.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        let mut latest = None;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            latest = merge_inputs(latest, map_key(key));
        }

        Ok(latest)
    }

    /// Blocks until any key is pressed.
    pub fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(());
                }
            }
        }
    }
}

/// Combines an already-buffered input with a newer one from the same drain.
#[must_use]
pub fn merge_inputs(buffered: Option<GameInput>, newer: Option<GameInput>) -> Option<GameInput> {
    match (buffered, newer) {
        (Some(GameInput::Quit), _) => Some(GameInput::Quit),
        (buffered, None) => buffered,
        (_, newer) => newer,
    }
}
