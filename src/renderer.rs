use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::board::Cell;
use crate::config::{
    GLYPH_APPLE, GLYPH_CRASH, GLYPH_EMPTY, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_WALL,
    GridSize, Theme,
};
use crate::game::GameState;
use crate::snake::Position;
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::render_end_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let area = frame.area();
    let grid = state.board.size();

    let [board_area, hud_area] = Layout::vertical([
        Constraint::Length(grid.height),
        Constraint::Length(HUD_HEIGHT),
    ])
    .areas(area);

    if area.width < grid.width || area.height < grid.height + HUD_HEIGHT {
        render_too_small(frame, area, grid, theme);
        return;
    }

    let board_area = Rect {
        width: grid.width,
        ..board_area
    };

    let buffer = frame.buffer_mut();
    render_board(buffer, board_area, state, theme);
    render_snake(buffer, board_area, state, theme);
    if let Some(crash) = state.crash_at {
        put_cell(
            buffer,
            board_area,
            crash,
            GLYPH_CRASH,
            Style::new().fg(theme.apple).add_modifier(Modifier::BOLD),
        );
    }

    render_hud(frame, Rect { width: grid.width, ..hud_area }, state, theme);

    if let Some(reason) = state.end_reason() {
        render_end_menu(frame, board_area, state, reason, theme);
    }
}

/// Draws walls, portals and the apple.
fn render_board(buffer: &mut Buffer, inner: Rect, state: &GameState, theme: &Theme) {
    for (position, _) in state.board.cells() {
        let (glyph, style) = match state.cell_at(position) {
            Cell::Wall => (GLYPH_WALL, Style::new().fg(theme.wall)),
            Cell::Apple => (
                GLYPH_APPLE,
                Style::new().fg(theme.apple).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty if state.board.is_portal(position) => {
                (GLYPH_EMPTY, Style::new().bg(theme.portal))
            }
            Cell::Empty => (GLYPH_EMPTY, Style::new().bg(theme.play_bg)),
        };
        put_cell(buffer, inner, position, glyph, style);
    }
}

fn render_snake(buffer: &mut Buffer, inner: Rect, state: &GameState, theme: &Theme) {
    // Tail first so the head is drawn last and stays visible.
    for (index, segment) in state.snake.segments().iter().enumerate().rev() {
        if index == 0 {
            put_cell(
                buffer,
                inner,
                *segment,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else if !state.board.is_wall(*segment) {
            // Body segments left on an obstacle stay hidden under the wall.
            put_cell(
                buffer,
                inner,
                *segment,
                GLYPH_SNAKE_BODY,
                Style::new().fg(theme.snake_body),
            );
        }
    }
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: GridSize, theme: &Theme) {
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!(
            "need {}x{}, have {}x{}",
            grid.width,
            grid.height + HUD_HEIGHT,
            area.width,
            area.height
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::new().fg(theme.hud_accent)),
        area,
    );
}

/// Draws one glyph at a grid coordinate; off-screen cells are skipped.
fn put_cell(buffer: &mut Buffer, inner: Rect, position: Position, glyph: &str, style: Style) {
    let Some((x, y)) = logical_to_terminal(inner, position) else {
        return;
    };
    buffer.set_string(x, y, glyph, style);
}

fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x - 1).ok()?;
    let y_offset = u16::try_from(position.y - 1).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
