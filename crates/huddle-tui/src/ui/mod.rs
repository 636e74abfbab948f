//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod controls;
mod status;
mod tiles;
mod transcript;

use huddle_app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const TILES_MIN_HEIGHT: u16 = 8;
    const TRANSCRIPT_HEIGHT: u16 = 8;
    const CONTROLS_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(TILES_MIN_HEIGHT),
            Constraint::Length(TRANSCRIPT_HEIGHT),
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [tiles_area, transcript_area, controls_area, status_area] = chunks.as_ref() else {
        return;
    };

    tiles::render(frame, app, *tiles_area);
    transcript::render(frame, app, *transcript_area);
    controls::render(frame, app, *controls_area);
    status::render(frame, app, *status_area);

    if let Some(message) = app.alert() {
        render_alert(frame, message);
    }
}

/// Render the blocking alert modal over everything else.
fn render_alert(frame: &mut Frame, message: &str) {
    const ALERT_WIDTH: u16 = 44;
    const ALERT_HEIGHT: u16 = 5;

    let area = centered(frame.area(), ALERT_WIDTH, ALERT_HEIGHT);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Alert ")
        .style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("press any key to dismiss"),
    ])
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(paragraph, area);
}

/// Center a `width` x `height` rect inside `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
