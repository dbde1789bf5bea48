use std::io;
use std::thread;
use std::time::Duration;

use crate::config::Theme;
use crate::game::{EndReason, GameState};
use crate::input::{GameInput, InputHandler};
use crate::renderer;
use crate::terminal_runtime::TerminalSession;

/// I/O the loop driver needs from its surroundings.
pub trait Frontend {
    /// Draws the current state.
    fn draw(&mut self, state: &GameState) -> io::Result<()>;

    /// Returns the latest pending input without blocking.
    fn poll_input(&mut self) -> io::Result<Option<GameInput>>;

    /// Pauses between ticks.
    fn wait(&mut self, interval: Duration);
}

/// Runs ticks until the session ends, then draws the final frame.
///
/// Each tick is: draw, sleep for the current interval, poll input, advance.
pub fn run_session<F: Frontend>(state: &mut GameState, frontend: &mut F) -> io::Result<EndReason> {
    loop {
        if let Some(reason) = state.end_reason() {
            frontend.draw(state)?;
            return Ok(reason);
        }

        frontend.draw(state)?;
        frontend.wait(state.tick_interval());
        let input = frontend.poll_input()?;
        state.tick(input);
    }
}

/// Real terminal frontend: ratatui drawing and crossterm keyboard polling.
pub struct TerminalFrontend<'a> {
    session: TerminalSession,
    input: InputHandler,
    theme: &'a Theme,
}

impl<'a> TerminalFrontend<'a> {
    /// Takes over the terminal. Fails if raw mode cannot be enabled.
    pub fn enter(theme: &'a Theme) -> io::Result<Self> {
        Ok(Self {
            session: TerminalSession::enter()?,
            input: InputHandler::new(),
            theme,
        })
    }

    /// Blocks until the player presses a key, so the end screen stays up.
    pub fn wait_for_key(&mut self) -> io::Result<()> {
        self.input.wait_for_key()
    }
}

impl Frontend for TerminalFrontend<'_> {
    fn draw(&mut self, state: &GameState) -> io::Result<()> {
        let theme = self.theme;
        self.session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, state, theme))?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        self.input.poll_input()
    }

    fn wait(&mut self, interval: Duration) {
        thread::sleep(interval);
    }
}
