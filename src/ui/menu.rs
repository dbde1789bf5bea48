use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::{EndReason, GameState};

/// Draws the end-of-session popup over the board.
pub fn render_end_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    reason: EndReason,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(end_title(reason)).style(
            Style::new()
                .fg(theme.popup_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(end_cause(reason)),
        Line::from(format!(
            "Apples: {}/{}",
            state.apples_eaten,
            state.config().apples_to_win
        )),
        Line::from(format!("Length: {}", state.snake.len())),
        Line::from(""),
        Line::from("Press any key").style(Style::new().fg(theme.popup_footer)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

/// Headline for the end popup and the exit summary.
#[must_use]
pub fn end_title(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Won => "YOU WIN",
        EndReason::Collided => "GAME OVER",
        EndReason::Quit => "QUIT",
    }
}

#[must_use]
pub fn end_cause(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Won => "All apples eaten",
        EndReason::Collided => "Crashed",
        EndReason::Quit => "Stopped by player",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
