//! Media tiles
//!
//! Displays the publisher tile, remote participant tiles, and the shared
//! screen. A remote screen share takes the dominant area with the camera
//! tiles in a strip underneath.

use huddle_app::{App, ConnectionState, Tile};
use huddle_core::Region;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Height of the camera strip under a shared screen.
const STRIP_HEIGHT: u16 = 5;

/// Render the tiles area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.connection_state() != ConnectionState::InCall {
        render_placeholder(frame, app, area);
        return;
    }

    let screen_tile = app.tiles().iter().find(|t| t.region == Region::Screen);

    if let Some(screen) = screen_tile {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(STRIP_HEIGHT)])
            .split(area);
        let [screen_area, strip_area] = chunks.as_ref() else {
            return;
        };
        render_screen(frame, screen, *screen_area);
        render_strip(frame, app, *strip_area);
    } else {
        render_strip(frame, app, area);
    }
}

/// Render the pre-call placeholder.
fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.connection_state() {
        ConnectionState::Connecting => "Joining the room...",
        _ => "Not in a call. Press Enter to join.",
    };

    let block = Block::default().borders(Borders::ALL).title(" Huddle ");
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(paragraph, area);
}

/// Render the shared screen tile.
fn render_screen(frame: &mut Frame, tile: &Tile, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} is sharing ", tile.name))
        .style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(Line::from("[ shared screen ]"))
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(paragraph, area);
}

/// Render the publisher and remote camera tiles side by side.
fn render_strip(frame: &mut Frame, app: &App, area: Rect) {
    let cameras: Vec<&Tile> = app.tiles().iter().filter(|t| t.region == Region::Remote).collect();

    // Reserve a slot for the waiting placeholder when nobody is here yet.
    let count = cameras.len().max(usize::from(app.waiting_for_peers())) + 1;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count as u32)).collect();
    let chunks =
        Layout::default().direction(Direction::Horizontal).constraints(constraints).split(area);

    let Some((publisher_area, camera_areas)) = chunks.split_first() else {
        return;
    };
    render_publisher(frame, app, *publisher_area);

    for (tile, slot) in cameras.iter().zip(camera_areas) {
        render_camera(frame, tile, *slot);
    }

    if app.waiting_for_peers()
        && let Some(slot) = camera_areas.first()
    {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Waiting for others to join...",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, *slot);
    }
}

/// Render the local publisher tile with its media indicators.
fn render_publisher(frame: &mut Frame, app: &App, area: Rect) {
    let flags = app.flags();

    let camera = indicator("cam", flags.camera);
    let mic = indicator("mic", flags.mic);
    let mut spans = vec![camera, Span::raw("  "), mic];
    if flags.screen_sharing {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("sharing", Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" You ")
        .title_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph =
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center).block(block);

    frame.render_widget(paragraph, area);
}

/// Render one remote camera tile.
fn render_camera(frame: &mut Frame, tile: &Tile, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", tile.name));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "live",
        Style::default().fg(Color::Green),
    )))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(paragraph, area);
}

fn indicator(label: &str, on: bool) -> Span<'_> {
    let color = if on { Color::Green } else { Color::Red };
    Span::styled(label, Style::default().fg(color))
}
