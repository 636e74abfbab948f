//! Control bar
//!
//! Displays the call controls with their current on/off state.

use huddle_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the control bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let flags = app.flags();

    let mut spans = Vec::new();
    spans.extend(toggle("c", "camera", flags.camera));
    spans.extend(toggle("m", "mic", flags.mic));
    spans.extend(toggle("s", "share", flags.screen_sharing));
    spans.extend(toggle("t", "captions", flags.captions));
    spans.extend(plain("d", "save transcript"));
    spans.extend(plain("o", "more"));
    spans.extend(plain("Esc", "leave"));
    spans.extend(plain("q", "quit"));

    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Key hint for a stateful toggle.
fn toggle(key: &str, label: &str, on: bool) -> Vec<Span<'static>> {
    let state = if on { "on" } else { "off" };
    let color = if on { Color::Green } else { Color::Red };
    vec![
        Span::styled(format!("[{key}]"), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {label} ")),
        Span::styled(state.to_string(), Style::default().fg(color)),
        Span::raw("  "),
    ]
}

/// Key hint for a stateless action.
fn plain(key: &str, label: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("[{key}]"), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {label}  ")),
    ]
}
