use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::GameState;

/// Rows taken by the HUD below the board.
pub const HUD_HEIGHT: u16 = 1;

const SEPARATOR: &str = "  ";

/// Renders the status line: apples, length, speed, seed.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let line = hud_line(state, usize::from(area.width), theme);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

/// Builds the HUD line, dropping trailing fields that do not fit in `width`.
fn hud_line(state: &GameState, width: usize, theme: &Theme) -> Line<'static> {
    let config = state.config();
    let fields = [
        (
            "Apples ",
            format!("{}/{}", state.apples_eaten, config.apples_to_win),
        ),
        (
            "Length ",
            format!("{}/{}", state.snake.len(), state.snake.max_len()),
        ),
        ("Tick ", format!("{}ms", state.tick_interval().as_millis())),
        ("Seed ", state.seed().to_string()),
    ];

    let label_style = Style::new().fg(theme.hud_text);
    let value_style = Style::new().fg(theme.hud_accent);

    let mut spans = Vec::new();
    let mut used = 0;
    for (label, value) in fields {
        let separator = if spans.is_empty() { "" } else { SEPARATOR };
        let field_width = separator.width() + label.width() + value.width();
        if used + field_width > width {
            break;
        }

        used += field_width;
        if !separator.is_empty() {
            spans.push(Span::raw(separator));
        }
        spans.push(Span::styled(label, label_style));
        spans.push(Span::styled(value, value_style));
    }

    Line::from(spans)
}
