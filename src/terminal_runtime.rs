use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::warn;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// Raw mode turns off echo and line buffering so single key presses reach
/// the game immediately. On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    ///
    /// Any failure here is fatal to the session; partial setup is rolled back.
    pub fn enter() -> io::Result<Self> {
        set_raw_mode(true)?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            restore_or_warn();
            return Err(error);
        }

        Terminal::new(CrosstermBackend::new(stdout))
            .map(|terminal| Self { terminal })
            .inspect_err(|_| restore_or_warn())
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_or_warn();
    }
}

/// Toggles raw input mode.
pub fn set_raw_mode(enabled: bool) -> io::Result<()> {
    if enabled {
        enable_raw_mode()
    } else {
        disable_raw_mode()
    }
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_or_warn();
        default_hook(panic_info);
    }));
}

fn restore_or_warn() {
    if let Err(error) = restore_terminal() {
        warn!("terminal restore failed: {error}");
    }
}

/// Leaves raw mode and the alternate screen. Both steps always run; the
/// first failure is reported.
fn restore_terminal() -> io::Result<()> {
    let raw = set_raw_mode(false);
    let mut stdout = io::stdout();
    let screen = execute!(stdout, Show, LeaveAlternateScreen);
    raw.and(screen)
}
