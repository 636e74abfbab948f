//! Status bar
//!
//! Displays connection status, participant count, and transient notices.

use huddle_app::{App, ConnectionState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = match app.connection_state() {
        ConnectionState::Disconnected => {
            Span::styled("Disconnected", Style::default().fg(Color::Red))
        },
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::InCall => Span::styled(
            "In call",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let participants = if app.connection_state() == ConnectionState::InCall {
        format!(" | Participants: {}", app.tiles().len() + 1)
    } else {
        String::new()
    };

    let notice = app
        .status_message()
        .map_or_else(String::new, |message| format!(" | {message}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(participants, Style::default().fg(Color::DarkGray)),
        Span::raw(notice),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
